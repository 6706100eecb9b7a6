//! Globe Personal Website Backend
//!
//! REST backend serving country/state map metadata from SQLite, plus a
//! seed loader that populates the database from CSV files.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod seed;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let map_routes = Router::new()
        .route("/country", get(api::get_countries))
        .route("/state", get(api::get_all_states))
        .route("/state/{country}", get(api::get_states_by_country));

    Router::new()
        .route("/", get(handle_status))
        .route("/statusCheck", get(handle_status))
        .nest("/api/map", map_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Status endpoint used by uptime checks.
async fn handle_status() -> &'static str {
    "SUCCESS"
}
