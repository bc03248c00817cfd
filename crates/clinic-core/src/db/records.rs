//! Medical record database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{MedicalRecord, PatientSummary, RecordWithPatient};

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<MedicalRecord> {
    Ok(MedicalRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        visit_date: row.get(2)?,
        diagnosis: row.get(3)?,
        prescription: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn joined_from_row(row: &Row<'_>) -> rusqlite::Result<RecordWithPatient> {
    Ok(RecordWithPatient {
        record: record_from_row(row)?,
        patient: PatientSummary {
            id: row.get(7)?,
            first_name: row.get(8)?,
            last_name: row.get(9)?,
        },
    })
}

impl Database {
    /// Insert a new record inside a transaction and return the stored row.
    pub fn insert_record(&mut self, record: &MedicalRecord) -> DbResult<MedicalRecord> {
        let tx = self.transaction()?;
        tx.execute(
            r#"
            INSERT INTO medical_records (
                patient_id, visit_date, diagnosis, prescription, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.patient_id,
                record.visit_date,
                record.diagnosis,
                record.prescription,
                record.created_at,
                record.updated_at,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(MedicalRecord { id, ..record.clone() })
    }

    /// Update an existing record inside a transaction.
    pub fn update_record(&mut self, record: &MedicalRecord) -> DbResult<bool> {
        let tx = self.transaction()?;
        let rows_affected = tx.execute(
            r#"
            UPDATE medical_records SET
                patient_id = ?2,
                visit_date = ?3,
                diagnosis = ?4,
                prescription = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
            params![
                record.id,
                record.patient_id,
                record.visit_date,
                record.diagnosis,
                record.prescription,
                record.updated_at,
            ],
        )?;
        tx.commit()?;
        Ok(rows_affected > 0)
    }

    /// Get a record by id.
    pub fn get_record(&self, id: i64) -> DbResult<Option<MedicalRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT id, patient_id, visit_date, diagnosis, prescription,
                       created_at, updated_at
                FROM medical_records
                WHERE id = ?
                "#,
                [id],
                record_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a record by id with its owning patient's summary attached.
    pub fn get_record_with_patient(&self, id: i64) -> DbResult<Option<RecordWithPatient>> {
        self.conn
            .query_row(
                r#"
                SELECT r.id, r.patient_id, r.visit_date, r.diagnosis, r.prescription,
                       r.created_at, r.updated_at,
                       p.id, p.first_name, p.last_name
                FROM medical_records r
                JOIN patients p ON p.id = r.patient_id
                WHERE r.id = ?
                "#,
                [id],
                joined_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all records in storage order, each with its patient summary.
    pub fn list_records(&self) -> DbResult<Vec<RecordWithPatient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT r.id, r.patient_id, r.visit_date, r.diagnosis, r.prescription,
                   r.created_at, r.updated_at,
                   p.id, p.first_name, p.last_name
            FROM medical_records r
            JOIN patients p ON p.id = r.patient_id
            ORDER BY r.id
            "#,
        )?;

        let rows = stmt.query_map([], joined_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List a patient's records, most recent visit first.
    pub fn list_records_for_patient(&self, patient_id: i64) -> DbResult<Vec<MedicalRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, visit_date, diagnosis, prescription,
                   created_at, updated_at
            FROM medical_records
            WHERE patient_id = ?
            ORDER BY visit_date DESC, id DESC
            "#,
        )?;

        let rows = stmt.query_map([patient_id], record_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a record, returning the number of rows affected.
    pub fn delete_record(&self, id: i64) -> DbResult<usize> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medical_records WHERE id = ?", [id])?;
        Ok(rows_affected)
    }
}
