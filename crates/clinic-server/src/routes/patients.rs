//! Patient resource handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_core::validate;
use clinic_core::{MedicalRecord, Patient, PatientDraft};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Patient>>, ApiError> {
    let db = state.db.lock()?;
    Ok(Json(db.list_patients()?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<PatientDraft>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let new = validate::validate_new_patient(&draft).map_err(ApiError::Validation)?;
    let db = state.db.lock()?;
    let patient = db.insert_patient(&Patient::new(new.first_name, new.last_name))?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    let db = state.db.lock()?;
    db.get_patient(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))
}

/// Partial update: only fields present in the body are applied.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<PatientDraft>,
) -> Result<Json<Patient>, ApiError> {
    let patch = validate::validate_patient_patch(&draft).map_err(ApiError::Validation)?;

    let db = state.db.lock()?;
    let mut patient = db
        .get_patient(id)?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    if let Some(first_name) = patch.first_name {
        patient.first_name = first_name;
    }
    if let Some(last_name) = patch.last_name {
        patient.last_name = last_name;
    }
    patient.touch();

    db.update_patient(&patient)?;
    Ok(Json(patient))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let removed = {
        let db = state.db.lock()?;
        db.delete_patient(id)?
    };
    if !removed {
        return Err(ApiError::NotFound("Patient not found".into()));
    }
    // Records cascade with the patient, so the cached list goes too.
    state.cache.invalidate(id);
    Ok(StatusCode::NO_CONTENT)
}

/// A patient's records, most recent visit first. The cached list is
/// dropped and repopulated from storage on every call, so the response is
/// always freshly read; the cache entry serves later readers within the TTL.
pub async fn records(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MedicalRecord>>, ApiError> {
    state.cache.invalidate(id);
    let records = {
        let db = state.db.lock()?;
        db.list_records_for_patient(id)?
    };
    state.cache.put(id, records.clone());
    Ok(Json(records))
}
