//! Record storage backends.

pub mod in_memory;
pub mod record_repository;

pub use in_memory::InMemoryRecordRepository;
pub use record_repository::{FileRecordRepository, RecordRepository};
