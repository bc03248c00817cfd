//! Short-lived cache for per-patient records lists.

use std::time::Duration;

use moka::sync::Cache as MokaCache;

use crate::models::MedicalRecord;

/// How long a cached records list stays valid.
pub const RECORDS_TTL: Duration = Duration::from_secs(300);

/// Key namespace for records lists.
const NAMESPACE: &str = "records";

fn key_for(patient_id: i64) -> String {
    format!("{NAMESPACE}:{patient_id}")
}

/// TTL-bound cache of each patient's records list, keyed by patient id.
///
/// Never authoritative: a miss only means the list is rebuilt from storage.
#[derive(Clone)]
pub struct RecordsCache {
    inner: MokaCache<String, Vec<MedicalRecord>>,
}

impl RecordsCache {
    pub fn new(capacity: u64) -> Self {
        Self::with_ttl(capacity, RECORDS_TTL)
    }

    /// Build with an explicit TTL (tests use short lifetimes).
    pub fn with_ttl(capacity: u64, ttl: Duration) -> Self {
        RecordsCache {
            inner: MokaCache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn get(&self, patient_id: i64) -> Option<Vec<MedicalRecord>> {
        self.inner.get(&key_for(patient_id))
    }

    pub fn put(&self, patient_id: i64, records: Vec<MedicalRecord>) {
        self.inner.insert(key_for(patient_id), records);
    }

    pub fn invalidate(&self, patient_id: i64) {
        self.inner.invalidate(&key_for(patient_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_records(patient_id: i64) -> Vec<MedicalRecord> {
        vec![MedicalRecord::new(
            patient_id,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "Flu".into(),
            "Rest".into(),
        )]
    }

    #[test]
    fn test_put_and_get() {
        let cache = RecordsCache::new(16);
        cache.put(1, sample_records(1));

        let hit = cache.get(1).unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].patient_id, 1);
    }

    #[test]
    fn test_miss_for_other_patient() {
        let cache = RecordsCache::new(16);
        cache.put(1, sample_records(1));
        assert!(cache.get(2).is_none());
    }

    #[test]
    fn test_invalidate_evicts() {
        let cache = RecordsCache::new(16);
        cache.put(1, sample_records(1));
        cache.invalidate(1);
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let cache = RecordsCache::with_ttl(16, Duration::from_millis(10));
        cache.put(1, sample_records(1));
        std::thread::sleep(Duration::from_millis(30));
        assert!(cache.get(1).is_none());
    }
}
