use std::path::PathBuf;

use axum::body::Body;
use axum::extract::{Path as AxumPath, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use layers::markers::{ASSET_EXTENSION, AssetId};
use layers::{Overlay, OverlaySnapshot};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

const GLB_CONTENT_TYPE: &str = "model/gltf-binary";

#[derive(Clone)]
pub struct AppState {
    pub graticule: Overlay,
    pub objects: Overlay,
    /// Directory the `.glb` files are read from.
    pub asset_dir: PathBuf,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/overlays", get(get_overlays))
        .route("/overlays/graticule", get(get_graticule))
        .route("/overlays/objects", get(get_objects))
        .route("/assets/3d/:file", get(get_asset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Both overlays in map layer order.
async fn get_overlays(State(state): State<AppState>) -> Json<Vec<OverlaySnapshot>> {
    Json(vec![state.graticule.snapshot(), state.objects.snapshot()])
}

async fn get_graticule(State(state): State<AppState>) -> Json<OverlaySnapshot> {
    Json(state.graticule.snapshot())
}

/// Current contents; may still be empty while the fetch is in flight.
async fn get_objects(State(state): State<AppState>) -> Json<OverlaySnapshot> {
    Json(state.objects.snapshot())
}

async fn get_asset(State(state): State<AppState>, AxumPath(file): AxumPath<String>) -> Response {
    let Some(stem) = file.strip_suffix(&format!(".{ASSET_EXTENSION}")) else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };
    let id = match AssetId::parse(stem) {
        Ok(id) => id,
        Err(err) => {
            debug!("rejected asset request {file:?}: {err}");
            return (StatusCode::BAD_REQUEST, "invalid asset id").into_response();
        }
    };
    let path = state.asset_dir.join(format!("{id}.{ASSET_EXTENSION}"));
    match tokio::fs::read(&path).await {
        Ok(data) => (
            [(http::header::CONTENT_TYPE, HeaderValue::from_static(GLB_CONTENT_TYPE))],
            Body::from(data),
        )
            .into_response(),
        Err(err) => {
            debug!("model {id} unavailable at {}: {err}", path.display());
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}
