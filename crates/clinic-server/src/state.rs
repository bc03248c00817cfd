//! Shared application state.

use std::sync::{Arc, Mutex};

use clinic_core::{Database, RecordsCache};

/// Default capacity for the records-list cache.
const CACHE_CAPACITY: u64 = 1024;

/// Handles injected into every request: the database behind a mutex and
/// the records-list cache. Both are explicit dependencies, not globals.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub cache: RecordsCache,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            db: Arc::new(Mutex::new(db)),
            cache: RecordsCache::new(CACHE_CAPACITY),
        }
    }
}
