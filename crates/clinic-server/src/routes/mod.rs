//! Explicit routing table: {method, path} → handler.

pub mod patients;
pub mod records;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Operational liveness probe.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The full API routing table.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(patients::list).post(patients::create))
        .route(
            "/patients/:id",
            get(patients::read)
                .put(patients::update)
                .patch(patients::update)
                .delete(patients::delete),
        )
        .route("/patients/:id/records", get(patients::records))
        .route("/records", get(records::list).post(records::create))
        .route(
            "/records/:id",
            get(records::read)
                .put(records::update)
                .patch(records::update)
                .delete(records::delete)
                .options(records::preflight),
        )
}
