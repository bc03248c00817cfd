//! Clinic Core Library
//!
//! Domain models, SQLite persistence, request validation, and the
//! records-list cache for the clinic records manager.
//!
//! # Architecture
//!
//! ```text
//! HTTP handler ──► validate ──► Database (SQLite)
//!      │                             │
//!      │                   records for patient
//!      │                             │
//!      └──────────► RecordsCache (TTL 300 s)
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer (patients, medical records)
//! - [`models`]: Domain types (Patient, MedicalRecord, joined views)
//! - [`validate`]: Field checks producing per-field error maps
//! - [`cache`]: TTL-bound per-patient records-list cache

pub mod cache;
pub mod db;
pub mod models;
pub mod validate;

// Re-export commonly used types
pub use cache::RecordsCache;
pub use db::{Database, DbError, DbResult};
pub use models::{MedicalRecord, Patient, PatientSummary, RecordWithPatient};
pub use validate::{FieldErrors, PatientDraft, RecordDraft};
