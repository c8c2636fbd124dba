// src/server/routes.rs
//! Axum router configuration for the pantry server

use crate::server::handlers::recipes;
use crate::server::ServerState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Create the main application router
pub fn create_router(state: Arc<ServerState>) -> Router {
    let media_url = state.config.media_url.clone();
    let media_root = state.config.media_root.clone();

    Router::new()
        // Single endpoint: GET renders the table, POST carries both form
        // actions (manual add and XML upload)
        .route("/", get(recipes::index).post(recipes::submit))
        .route("/health", get(health_check))
        // Media tree, including the public snapshot URL
        .nest_service(&media_url, ServeDir::new(media_root))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
