use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{Error, Result};
use crate::lock::RecordLock;
use crate::paths::LOCKS_DIR_NAME;
use crate::record::{Record, RecordStatus};

/// A trait for loading and saving records from a storage backend.
///
/// Implementations must make `compare_and_swap` atomic with respect to every
/// other call on the same record, so that of two concurrent transitions out
/// of the same status at most one is stored.
pub trait RecordRepository: Send + Sync {
    /// Load a record by its ID.
    fn get(&self, id: &str) -> Result<Record>;

    /// List all records, in no particular order.
    fn list(&self) -> Result<Vec<Record>>;

    /// Store a new record or overwrite an existing one unconditionally.
    fn save(&self, record: &Record) -> Result<()>;

    /// Store `record` only if the stored copy still has status `expected`.
    ///
    /// Fails with `InvalidTransition` from the observed status to the
    /// record's new status when another writer got there first.
    fn compare_and_swap(&self, expected: RecordStatus, record: &Record) -> Result<()>;
}

pub(crate) fn status_conflict(observed: RecordStatus, record: &Record) -> Error {
    tracing::debug!(
        record = %record.id,
        observed = %observed,
        wanted = %record.status(),
        "status check failed"
    );
    Error::InvalidTransition {
        from: observed,
        to: record.status(),
    }
}

/// File-based implementation of RecordRepository.
///
/// Each record is `<records_dir>/<id>.md`. Writers serialize on a per-record
/// lock file under `<records_dir>/.locks`.
pub struct FileRecordRepository {
    records_dir: PathBuf,
}

impl FileRecordRepository {
    /// Create a new FileRecordRepository for the given records directory.
    pub fn new(records_dir: PathBuf) -> Self {
        Self { records_dir }
    }

    /// Get the records directory path.
    pub fn records_dir(&self) -> &Path {
        &self.records_dir
    }

    fn locks_dir(&self) -> PathBuf {
        self.records_dir.join(LOCKS_DIR_NAME)
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.records_dir.join(format!("{}.md", id))
    }

    fn write(&self, record: &Record) -> Result<()> {
        fs::create_dir_all(&self.records_dir)
            .with_context(|| format!("Failed to create {}", self.records_dir.display()))?;
        record.save(&self.record_path(&record.id))?;
        Ok(())
    }
}

impl RecordRepository for FileRecordRepository {
    fn get(&self, id: &str) -> Result<Record> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(Record::load(&path)?)
    }

    fn list(&self) -> Result<Vec<Record>> {
        if !self.records_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.records_dir)
            .with_context(|| format!("Failed to read {}", self.records_dir.display()))?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read records directory entry")?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            match Record::load(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %format!("{:#}", e), "skipping unreadable record")
                }
            }
        }
        Ok(records)
    }

    fn save(&self, record: &Record) -> Result<()> {
        let _lock = RecordLock::acquire(&self.locks_dir(), &record.id)?;
        self.write(record)
    }

    fn compare_and_swap(&self, expected: RecordStatus, record: &Record) -> Result<()> {
        let _lock = RecordLock::acquire(&self.locks_dir(), &record.id)?;
        let current = self.get(&record.id)?;
        if current.status() != expected {
            return Err(status_conflict(current.status(), record));
        }
        self.write(record)
    }
}
