//! API error type and its HTTP response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinic_core::{DbError, FieldErrors};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input; never reaches persistence.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// Referenced id does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Infrastructure-level database failure on a read path.
    #[error("database error: {0}")]
    Db(#[from] DbError),

    /// Failure during a mutating unit of work, already rolled back.
    #[error("{message}: {detail}")]
    Storage { message: String, detail: String },

    /// Poisoned database lock.
    #[error("lock poisoned: {0}")]
    Lock(String),
}

impl ApiError {
    /// A storage failure with handler-supplied context; the raw detail is
    /// kept for the response body and the log line.
    pub fn storage(message: impl Into<String>, detail: impl ToString) -> Self {
        ApiError::Storage {
            message: message.into(),
            detail: detail.to_string(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for ApiError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ApiError::Lock(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": message })),
            )
                .into_response(),
            ApiError::Db(e) => {
                error!("database failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Database error", "error": e.to_string() })),
                )
                    .into_response()
            }
            ApiError::Storage { message, detail } => {
                error!("{message}: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message, "error": detail })),
                )
                    .into_response()
            }
            ApiError::Lock(detail) => {
                error!("database lock poisoned: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error", "error": detail })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_validation_maps_to_422() {
        let mut errors: FieldErrors = BTreeMap::new();
        errors.insert("first_name".into(), vec!["first_name is required".into()]);
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound("Patient not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_maps_to_500() {
        let response = ApiError::storage("Failed to delete medical record", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
