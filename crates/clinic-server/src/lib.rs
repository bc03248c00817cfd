//! Clinic records REST API.
//!
//! Exposes CRUD endpoints for patients and medical records over JSON, plus
//! a per-patient records listing backed by a short-lived cache, and serves
//! the static frontend as the router fallback.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

/// Build the application: API routes plus the static frontend fallback.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
