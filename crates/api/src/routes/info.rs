//! Liveness/info endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Info response.
#[derive(Serialize)]
pub struct InfoResponse {
    /// Fixed success marker, serialized as the string `"true"`.
    pub success: &'static str,
    /// Welcome message.
    pub message: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Info handler.
async fn api_info() -> Json<InfoResponse> {
    Json(InfoResponse {
        success: "true",
        message: "Welcome to the Depot upload API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the info routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api", get(api_info))
}
