//! Parameter-file loading: file shapes, mutations, filtering and failures.

use std::io::Write;

use landform_preview::config::LandformParams;
use landform_preview::error::Error;
use landform_preview::landforms::{filter_by_code, load_patch_file};

fn write_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_worldgen_file_with_mutations() {
    let file = write_file(
        r##"{
            "code": "landforms",
            "landforms": [
                {
                    "code": "mesas",
                    "comment": "tiered buttes",
                    "hexcolor": "#a0522d",
                    "weight": 2,
                    "noiseScale": 0.0005,
                    "terrainOctaves": [0.4, 0.3, 0.2],
                    "terrainOctaveThresholds": [0, 0.2],
                    "terrainYKeyPositions": [0.4, 0.5, 0.7],
                    "terrainYKeyThresholds": [1, 0.6, 0],
                    "plateauCount": 3,
                    "baseRadius": 48,
                    "radiusStep": 0.7,
                    "mutations": [
                        {"chance": 0.05, "plateauCount": 5},
                        {"chance": 0.02, "code": "mesas-flat", "plateauCount": 0}
                    ]
                },
                null
            ]
        }"##,
    );
    let defs = load_patch_file(file.path()).unwrap();
    let codes: Vec<_> = defs.iter().map(|d| d.code.clone().unwrap()).collect();
    assert_eq!(codes, vec!["mesas", "mesas-mutation-0", "mesas-flat"]);

    let params: Vec<LandformParams> = defs.into_iter().map(LandformParams::from).collect();
    assert_eq!(params[0].plateau.count, 3);
    assert_eq!(params[1].plateau.count, 5);
    assert_eq!(params[1].plateau.base_radius, 48.0);
    assert!(!params[2].plateau.is_enabled());
    // Padding happens once, at construction.
    assert_eq!(params[0].octaves()[2].threshold, 0.0);
    assert_eq!(params[1].remap_keys().len(), 3);
}

#[test]
fn loads_patch_operations_and_filters() {
    let file = write_file(
        r#"[
            {"op": "add", "path": "/landforms/-", "value": {"code": "spires", "threshold": 0.6}},
            {"op": "add", "path": "/landforms/-", "value": {"code": "dunes"}}
        ]"#,
    );
    let defs = load_patch_file(file.path()).unwrap();
    let only = filter_by_code(defs, Some("spires")).unwrap();
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].threshold, 0.6);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = load_patch_file(&path).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let file = write_file(r#"{"landforms": [ {"code": "x", } ]"#);
    assert!(matches!(load_patch_file(file.path()), Err(Error::Parse(_))));
}

#[test]
fn wrongly_typed_field_is_a_parse_error() {
    let file = write_file(r#"{"landforms": [{"code": "x", "terrainOctaves": "loud"}]}"#);
    assert!(matches!(load_patch_file(file.path()), Err(Error::Parse(_))));
}
