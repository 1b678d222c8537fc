//! Shared business logic layer for record operations.
//!
//! This module provides the canonical implementation of record operations.
//! Every CLI command goes through here so that visibility, role checks and
//! the repository's status check-and-set are applied the same way.

pub mod create;
pub mod list;
pub mod recompute;
pub mod review;

pub use create::{create_record, CreateOptions};
pub use list::{find_record, list_records, summarize, ListFilter, StatusSummary};
pub use recompute::recompute_record;
pub use review::{approve_record, reject_record, submit_record};
