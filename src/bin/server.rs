use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use landform_preview::config::{LandformParams, RenderConfig};
use landform_preview::{landforms, logging, output};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRequest {
    /// A landform object, list, or patch; anything a landform file may hold.
    definition: Value,
    #[serde(default)]
    render: RenderConfig,
    code: Option<String>,
}

#[derive(Serialize)]
struct PreviewResponse {
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

fn build_preview(req: PreviewRequest) -> landform_preview::error::Result<PreviewResponse> {
    let config = req.render;
    config.validate()?;

    let defs = landforms::parse_value(req.definition, "request")?;
    let defs = landforms::filter_by_code(defs, req.code.as_deref())?;

    let mut layers = Vec::with_capacity(defs.len());
    let mut timing_entries = Vec::new();
    for def in defs {
        let params = LandformParams::from(def);
        let (preview, timings) = landform_preview::generate(&params, &config, None)?;
        layers.push(Layer {
            name: params.code.clone(),
            data_url: output::encode_png_data_url(&preview.pixels, preview.w, preview.h)?,
        });
        timing_entries.extend(timings.iter().map(|t| TimingEntry {
            name: format!("{}/{}", params.code, t.name),
            ms: t.ms,
        }));
    }

    Ok(PreviewResponse {
        layers,
        timings: timing_entries,
        width: config.size,
        height: config.size,
    })
}

async fn preview_handler(
    Json(req): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, (StatusCode, String)> {
    let result = tokio::task::spawn_blocking(move || build_preview(req))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match result {
        Ok(response) => {
            info!(layers = response.layers.len(), "preview rendered");
            Ok(Json(response))
        }
        Err(e) => {
            warn!("preview rejected: {e}");
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    logging::init_logging(None);

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/preview", post(preview_handler))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("landform preview server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
