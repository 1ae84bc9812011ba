//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Upload routes (local disk, streaming remote, staged remote)
//! - Static serving of the local uploads directory
//! - The liveness/info endpoint

pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use depot_core::storage::{LocalStore, RemoteStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Local disk store; also backs the `/uploads` static route.
    pub local: Arc<LocalStore>,
    /// Shared object store client, constructed once at startup.
    pub remote: Arc<RemoteStore>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .nest_service("/uploads", ServeDir::new(state.local.root()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
