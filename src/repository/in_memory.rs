use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::record::{Record, RecordStatus};

use super::record_repository::{status_conflict, RecordRepository};

/// In-memory implementation of RecordRepository.
pub struct InMemoryRecordRepository {
    records: Mutex<HashMap<String, Record>>,
}

impl Default for InMemoryRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordRepository {
    /// Create a new empty InMemoryRecordRepository.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new InMemoryRecordRepository with pre-populated records.
    pub fn with_records(records: Vec<Record>) -> Self {
        let map = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            records: Mutex::new(map),
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, HashMap<String, Record>>> {
        self.records
            .lock()
            .map_err(|_| Error::Storage(anyhow::anyhow!("record store lock poisoned")))
    }
}

impl RecordRepository for InMemoryRecordRepository {
    fn get(&self, id: &str) -> Result<Record> {
        self.records()?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<Record>> {
        Ok(self.records()?.values().cloned().collect())
    }

    fn save(&self, record: &Record) -> Result<()> {
        self.records()?.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn compare_and_swap(&self, expected: RecordStatus, record: &Record) -> Result<()> {
        let mut records = self.records()?;
        let current = records
            .get_mut(&record.id)
            .ok_or_else(|| Error::NotFound(record.id.clone()))?;
        if current.status() != expected {
            return Err(status_conflict(current.status(), record));
        }
        *current = record.clone();
        Ok(())
    }
}
