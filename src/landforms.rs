//! Landform parameter files.
//!
//! A file may be a worldgen config (`{"landforms": [...]}`), a JSON patch
//! (`[{"op": "add", "path": "/landforms/-", "value": {...}}, ...]`), a bare
//! array of landforms, or a single landform object. Mutations are expanded
//! into standalone variants by overlaying their fields on the base.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::LandformDef;
use crate::error::{Error, Result};

/// Transient selection weight carried by mutations; never part of a variant.
const CHANCE_KEY: &str = "chance";
const MUTATIONS_KEY: &str = "mutations";
const LANDFORMS_KEY: &str = "landforms";

/// Read a parameter file and return every landform plus its mutation variants.
pub fn load_patch_file(path: &Path) -> Result<Vec<LandformDef>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let defs = parse_landforms(&text, &path.display().to_string())?;
    info!(path = %path.display(), count = defs.len(), "loaded landforms");
    Ok(defs)
}

/// Parse file contents. `origin` only names the source in diagnostics.
pub fn parse_landforms(text: &str, origin: &str) -> Result<Vec<LandformDef>> {
    let root: Value = serde_json::from_str(text)?;
    parse_value(root, origin)
}

/// Same as [`parse_landforms`] for an already-parsed JSON document.
pub fn parse_value(root: Value, origin: &str) -> Result<Vec<LandformDef>> {
    let raw = extract_landforms(root);
    if raw.is_empty() {
        return Err(Error::NoLandforms(origin.to_string()));
    }
    let mut defs = Vec::new();
    for landform in &raw {
        for variant in expand_mutations(landform) {
            defs.push(serde_json::from_value(Value::Object(variant))?);
        }
    }
    Ok(defs)
}

/// Parse a single inline definition (as passed on the command line).
pub fn parse_definition(text: &str) -> Result<Vec<LandformDef>> {
    parse_landforms(text, "inline definition")
}

/// Collect raw landform objects from any supported file shape.
/// Nulls and empty objects are skipped.
fn extract_landforms(root: Value) -> Vec<Map<String, Value>> {
    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

fn collect(value: Value, out: &mut Vec<Map<String, Value>>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect(item, out);
            }
        }
        Value::Object(mut obj) => {
            if let Some(list) = obj.remove(LANDFORMS_KEY) {
                collect(list, out);
            } else if obj.contains_key("op") {
                if let Some(inner) = obj.remove("value") {
                    collect(inner, out);
                }
            } else if !obj.is_empty() {
                out.push(obj);
            }
        }
        _ => {}
    }
}

/// Shallow structural merge: a new object with `overrides` layered on `base`.
pub fn overlay(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// The base landform followed by one variant per mutation.
pub fn expand_mutations(landform: &Map<String, Value>) -> Vec<Map<String, Value>> {
    let mut base = landform.clone();
    let mutations = match base.remove(MUTATIONS_KEY) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let base_code = base
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or("landform")
        .to_string();

    let mut variants = Vec::with_capacity(1 + mutations.len());
    for (i, mutation) in mutations.iter().enumerate() {
        let Value::Object(fields) = mutation else {
            debug!(code = %base_code, index = i, "skipping non-object mutation");
            continue;
        };
        let mut fields = fields.clone();
        fields.remove(CHANCE_KEY);
        fields.remove(MUTATIONS_KEY);
        let mut variant = overlay(&base, &fields);
        if !fields.contains_key("code") {
            variant.insert(
                "code".to_string(),
                Value::String(format!("{base_code}-mutation-{i}")),
            );
        }
        variants.push(variant);
    }
    variants.insert(0, base);
    variants
}

/// Keep only the landform(s) with an exact code match.
pub fn filter_by_code(defs: Vec<LandformDef>, code: Option<&str>) -> Result<Vec<LandformDef>> {
    let Some(code) = code else {
        return Ok(defs);
    };
    let matched: Vec<LandformDef> = defs
        .into_iter()
        .filter(|d| d.code.as_deref() == Some(code))
        .collect();
    if matched.is_empty() {
        return Err(Error::UnknownCode(code.to_string()));
    }
    Ok(matched)
}
