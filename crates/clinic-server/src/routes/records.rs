//! Medical record resource handlers.
//!
//! The frontend calls the mutation routes from a different origin, so
//! update, delete, and the OPTIONS preflight carry fixed permissive CORS
//! headers on every outcome, error responses included.

use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use clinic_core::validate;
use clinic_core::{MedicalRecord, RecordDraft, RecordWithPatient};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

fn with_cors(mut response: Response, methods: &'static str) -> Response {
    let headers = response.headers_mut();
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static(methods),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Content-Type, Accept"),
    );
    response
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecordWithPatient>>, ApiError> {
    let db = state.db.lock()?;
    Ok(Json(db.list_records()?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<RecordDraft>,
) -> Result<(StatusCode, Json<MedicalRecord>), ApiError> {
    let mut db = state.db.lock()?;

    let patient_exists = match draft.patient_id {
        Some(patient_id) => db.patient_exists(patient_id)?,
        None => false,
    };
    let new =
        validate::validate_new_record(&draft, patient_exists).map_err(ApiError::Validation)?;

    let record = db
        .insert_record(&MedicalRecord::new(
            new.patient_id,
            new.visit_date,
            new.diagnosis,
            new.prescription,
        ))
        .map_err(|e| ApiError::storage("Failed to create medical record", e))?;

    state.cache.invalidate(record.patient_id);
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecordWithPatient>, ApiError> {
    let db = state.db.lock()?;
    db.get_record_with_patient(id)?.map(Json).ok_or_else(|| {
        warn!("medical record {id} not found");
        ApiError::NotFound("Medical record not found".into())
    })
}

pub async fn update(
    state: State<AppState>,
    path: Path<i64>,
    draft: Json<RecordDraft>,
) -> Response {
    with_cors(
        update_inner(state, path, draft).await.into_response(),
        "PUT, PATCH, OPTIONS",
    )
}

async fn update_inner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<RecordDraft>,
) -> Result<Json<MedicalRecord>, ApiError> {
    let mut db = state.db.lock()?;

    let existing = match db.get_record(id)? {
        Some(record) => record,
        None => {
            warn!("medical record {id} not found for update");
            return Err(ApiError::NotFound("Medical record not found".into()));
        }
    };

    let patient_exists = match draft.patient_id {
        Some(patient_id) => db.patient_exists(patient_id)?,
        None => true,
    };
    let patch =
        validate::validate_record_patch(&draft, patient_exists).map_err(ApiError::Validation)?;

    let mut updated = existing.clone();
    if let Some(patient_id) = patch.patient_id {
        updated.patient_id = patient_id;
    }
    if let Some(visit_date) = patch.visit_date {
        updated.visit_date = visit_date;
    }
    if let Some(diagnosis) = patch.diagnosis {
        updated.diagnosis = diagnosis;
    }
    if let Some(prescription) = patch.prescription {
        updated.prescription = prescription;
    }
    updated.touch();

    db.update_record(&updated)
        .map_err(|e| ApiError::storage("Failed to update medical record", e))?;

    state.cache.invalidate(existing.patient_id);
    if updated.patient_id != existing.patient_id {
        state.cache.invalidate(updated.patient_id);
    }
    Ok(Json(updated))
}

pub async fn delete(state: State<AppState>, path: Path<i64>) -> Response {
    with_cors(
        delete_inner(state, path).await.into_response(),
        "DELETE, OPTIONS",
    )
}

async fn delete_inner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let db = state.db.lock()?;

    let existing = match db.get_record(id)? {
        Some(record) => record,
        None => {
            warn!("medical record {id} not found for delete");
            return Err(ApiError::NotFound("Medical record not found".into()));
        }
    };

    let rows = db
        .delete_record(id)
        .map_err(|e| ApiError::storage("Failed to delete medical record", e))?;
    if rows == 0 {
        // Existence was confirmed just above; zero rows is a storage fault.
        return Err(ApiError::storage(
            "Failed to delete medical record",
            "delete affected no rows",
        ));
    }

    state.cache.invalidate(existing.patient_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn preflight() -> Response {
    with_cors(
        StatusCode::NO_CONTENT.into_response(),
        "PUT, PATCH, DELETE, OPTIONS",
    )
}
