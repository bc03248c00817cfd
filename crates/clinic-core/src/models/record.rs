//! Medical record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PatientSummary;

/// A single visit record belonging to one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    /// Storage-assigned identifier (0 until inserted)
    pub id: i64,
    /// Owning patient
    pub patient_id: i64,
    /// Date of the visit
    pub visit_date: NaiveDate,
    /// Diagnosis text
    pub diagnosis: String,
    /// Prescription text
    pub prescription: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl MedicalRecord {
    /// Create a new record with all required fields. The id is assigned on insert.
    pub fn new(
        patient_id: i64,
        visit_date: NaiveDate,
        diagnosis: String,
        prescription: String,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            patient_id,
            visit_date,
            diagnosis,
            prescription,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// A medical record joined with its owning patient's summary, as returned
/// by the record list and read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordWithPatient {
    #[serde(flatten)]
    pub record: MedicalRecord,
    pub patient: PatientSummary,
}
