//! Request validation producing per-field error messages.
//!
//! Incoming payloads deserialize into draft structs where every field is
//! optional, so the same shape serves create (all fields required) and
//! partial update (present fields validated, absent fields left alone).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

/// Mapping from field name to human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Maximum accepted length for patient name fields.
pub const MAX_NAME_LEN: usize = 255;

/// Wire format for visit dates.
pub const VISIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Incoming patient payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Incoming medical record payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordDraft {
    pub patient_id: Option<i64>,
    pub visit_date: Option<String>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
}

/// Validated patient create payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
}

/// Validated patient patch. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Validated record create payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub patient_id: i64,
    pub visit_date: NaiveDate,
    pub diagnosis: String,
    pub prescription: String,
}

/// Validated record patch. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub patient_id: Option<i64>,
    pub visit_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
}

/// Accumulates field errors across checks.
#[derive(Debug, Default)]
struct FieldChecker {
    errors: FieldErrors,
}

impl FieldChecker {
    fn push(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }

    fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn check_name(
    checker: &mut FieldChecker,
    field: &str,
    value: &Option<String>,
    required: bool,
) -> Option<String> {
    match value {
        None => {
            if required {
                checker.push(field, format!("{field} is required"));
            }
            None
        }
        Some(v) if v.chars().count() > MAX_NAME_LEN => {
            checker.push(
                field,
                format!("{field} must be at most {MAX_NAME_LEN} characters"),
            );
            None
        }
        Some(v) => Some(v.clone()),
    }
}

fn check_text(
    checker: &mut FieldChecker,
    field: &str,
    value: &Option<String>,
    required: bool,
) -> Option<String> {
    match value {
        None => {
            if required {
                checker.push(field, format!("{field} is required"));
            }
            None
        }
        Some(v) if v.trim().is_empty() => {
            checker.push(field, format!("{field} must not be empty"));
            None
        }
        Some(v) => Some(v.clone()),
    }
}

fn check_visit_date(
    checker: &mut FieldChecker,
    value: &Option<String>,
    required: bool,
) -> Option<NaiveDate> {
    match value {
        None => {
            if required {
                checker.push("visit_date", "visit_date is required".into());
            }
            None
        }
        Some(v) => match NaiveDate::parse_from_str(v, VISIT_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                checker.push(
                    "visit_date",
                    "visit_date must be a valid date in YYYY-MM-DD format".into(),
                );
                None
            }
        },
    }
}

fn check_patient_ref(
    checker: &mut FieldChecker,
    value: &Option<i64>,
    patient_exists: bool,
    required: bool,
) -> Option<i64> {
    match value {
        None => {
            if required {
                checker.push("patient_id", "patient_id is required".into());
            }
            None
        }
        Some(_) if !patient_exists => {
            checker.push(
                "patient_id",
                "patient_id must reference an existing patient".into(),
            );
            None
        }
        Some(id) => Some(*id),
    }
}

/// Validate a patient create payload: both names present and within length.
pub fn validate_new_patient(draft: &PatientDraft) -> Result<NewPatient, FieldErrors> {
    let mut checker = FieldChecker::default();
    let first_name = check_name(&mut checker, "first_name", &draft.first_name, true);
    let last_name = check_name(&mut checker, "last_name", &draft.last_name, true);
    checker.finish()?;
    Ok(NewPatient {
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
    })
}

/// Validate a patient patch: present fields follow the create rules.
pub fn validate_patient_patch(draft: &PatientDraft) -> Result<PatientPatch, FieldErrors> {
    let mut checker = FieldChecker::default();
    let first_name = check_name(&mut checker, "first_name", &draft.first_name, false);
    let last_name = check_name(&mut checker, "last_name", &draft.last_name, false);
    checker.finish()?;
    Ok(PatientPatch {
        first_name,
        last_name,
    })
}

/// Validate a record create payload. `patient_exists` is the caller's
/// lookup result for the draft's patient_id (ignored when the id is absent).
pub fn validate_new_record(
    draft: &RecordDraft,
    patient_exists: bool,
) -> Result<NewRecord, FieldErrors> {
    let mut checker = FieldChecker::default();
    let patient_id = check_patient_ref(&mut checker, &draft.patient_id, patient_exists, true);
    let visit_date = check_visit_date(&mut checker, &draft.visit_date, true);
    let diagnosis = check_text(&mut checker, "diagnosis", &draft.diagnosis, true);
    let prescription = check_text(&mut checker, "prescription", &draft.prescription, true);
    checker.finish()?;
    Ok(NewRecord {
        patient_id: patient_id.unwrap_or_default(),
        visit_date: visit_date.unwrap_or(NaiveDate::MIN),
        diagnosis: diagnosis.unwrap_or_default(),
        prescription: prescription.unwrap_or_default(),
    })
}

/// Validate a record patch: present fields follow the create rules.
pub fn validate_record_patch(
    draft: &RecordDraft,
    patient_exists: bool,
) -> Result<RecordPatch, FieldErrors> {
    let mut checker = FieldChecker::default();
    let patient_id = check_patient_ref(&mut checker, &draft.patient_id, patient_exists, false);
    let visit_date = check_visit_date(&mut checker, &draft.visit_date, false);
    let diagnosis = check_text(&mut checker, "diagnosis", &draft.diagnosis, false);
    let prescription = check_text(&mut checker, "prescription", &draft.prescription, false);
    checker.finish()?;
    Ok(RecordPatch {
        patient_id,
        visit_date,
        diagnosis,
        prescription,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_patient_requires_both_names() {
        let errors = validate_new_patient(&PatientDraft::default()).unwrap_err();
        assert!(errors.contains_key("first_name"));
        assert!(errors.contains_key("last_name"));
    }

    #[test]
    fn test_new_patient_accepts_valid_names() {
        let draft = PatientDraft {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
        };
        let new = validate_new_patient(&draft).unwrap();
        assert_eq!(new.first_name, "Ada");
        assert_eq!(new.last_name, "Lovelace");
    }

    #[test]
    fn test_patient_patch_allows_empty_body() {
        let patch = validate_patient_patch(&PatientDraft::default()).unwrap();
        assert_eq!(patch, PatientPatch::default());
    }

    #[test]
    fn test_patient_patch_rejects_overlong_present_field() {
        let draft = PatientDraft {
            first_name: Some("x".repeat(MAX_NAME_LEN + 1)),
            last_name: None,
        };
        let errors = validate_patient_patch(&draft).unwrap_err();
        assert!(errors.contains_key("first_name"));
        assert!(!errors.contains_key("last_name"));
    }

    fn full_record_draft() -> RecordDraft {
        RecordDraft {
            patient_id: Some(1),
            visit_date: Some("2024-03-01".into()),
            diagnosis: Some("Flu".into()),
            prescription: Some("Rest".into()),
        }
    }

    #[test]
    fn test_new_record_valid() {
        let new = validate_new_record(&full_record_draft(), true).unwrap();
        assert_eq!(new.patient_id, 1);
        assert_eq!(new.visit_date.to_string(), "2024-03-01");
    }

    #[test]
    fn test_new_record_requires_all_fields() {
        let errors = validate_new_record(&RecordDraft::default(), false).unwrap_err();
        for field in ["patient_id", "visit_date", "diagnosis", "prescription"] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_new_record_unknown_patient() {
        let errors = validate_new_record(&full_record_draft(), false).unwrap_err();
        assert_eq!(
            errors["patient_id"],
            vec!["patient_id must reference an existing patient"]
        );
    }

    #[test]
    fn test_new_record_bad_date() {
        let mut draft = full_record_draft();
        draft.visit_date = Some("03/01/2024".into());
        let errors = validate_new_record(&draft, true).unwrap_err();
        assert!(errors.contains_key("visit_date"));
    }

    #[test]
    fn test_new_record_blank_diagnosis() {
        let mut draft = full_record_draft();
        draft.diagnosis = Some("   ".into());
        let errors = validate_new_record(&draft, true).unwrap_err();
        assert!(errors.contains_key("diagnosis"));
    }

    #[test]
    fn test_record_patch_validates_only_present_fields() {
        let draft = RecordDraft {
            visit_date: Some("not-a-date".into()),
            ..Default::default()
        };
        let errors = validate_record_patch(&draft, true).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("visit_date"));
    }

    proptest! {
        #[test]
        fn prop_accepts_names_within_limit(name in "[A-Za-z '-]{1,255}") {
            let draft = PatientDraft {
                first_name: Some(name.clone()),
                last_name: Some(name),
            };
            prop_assert!(validate_new_patient(&draft).is_ok());
        }

        #[test]
        fn prop_rejects_overlong_names(extra in 1usize..64) {
            let draft = PatientDraft {
                first_name: Some("x".repeat(MAX_NAME_LEN + extra)),
                last_name: Some("Lovelace".into()),
            };
            let errors = validate_new_patient(&draft).unwrap_err();
            prop_assert!(errors.contains_key("first_name"));
            prop_assert!(!errors.contains_key("last_name"));
        }
    }
}
