//! Health check route.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

/// Creates the health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET `/health` - Liveness probe.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "voltra",
    }))
}
