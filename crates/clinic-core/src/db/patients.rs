//! Patient database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::Patient;

impl Database {
    /// Insert a new patient and return the stored row with its assigned id.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<Patient> {
        self.conn.execute(
            r#"
            INSERT INTO patients (first_name, last_name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                patient.first_name,
                patient.last_name,
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(Patient { id, ..patient.clone() })
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                first_name = ?2,
                last_name = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.first_name,
                patient.last_name,
                patient.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, first_name, last_name, created_at, updated_at
                FROM patients
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(Patient {
                        id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Check whether a patient row exists.
    pub fn patient_exists(&self, id: i64) -> DbResult<bool> {
        let hit: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM patients WHERE id = ?", [id], |row| row.get(0))
            .optional()?;
        Ok(hit.is_some())
    }

    /// List all patients in storage order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, first_name, last_name, created_at, updated_at
            FROM patients
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Patient {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient. Records owned by the patient go with it.
    pub fn delete_patient(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
