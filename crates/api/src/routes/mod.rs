//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod info;
pub mod uploads;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(info::routes()).merge(uploads::routes())
}
