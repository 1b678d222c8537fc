//! # LogBook - Facility Compliance Records
//!
//! LogBook keeps the operational records of an industrial facility: utility
//! equipment readings, chemical solution preparations, cleanroom airflow
//! validations and the reports compiled from them. Operators log entries,
//! supervisors approve or reject them, customers see approved output only.
//!
//! ## Core Concepts
//!
//! - **Calculators**: pure functions deriving chemical quantities and
//!   air-change rates from raw readings ([`calc`])
//! - **Records**: markdown files with YAML frontmatter holding one logged entry
//!   and its review state ([`record`])
//! - **Workflow**: the role-gated draft → pending → approved/rejected state
//!   machine ([`workflow`])
//! - **Repository**: pluggable record storage with an atomic status
//!   check-and-set ([`repository`])
//!
//! ## Modules
//!
//! - [`calc`] - Concentration and airflow compliance calculations
//! - [`record`] - Record types, parsing and serialization
//! - [`workflow`] - State transitions and visibility policy
//! - [`repository`] - Record storage backends
//! - [`operations`] - Canonical record operations used by the CLI
//! - [`config`] - Project configuration (site, users, rooms, chemicals)
//! - [`role`] - Roles and actors
//! - [`capability`] - Static route capability table
//! - [`instrument`] - Instrument calibration status
//! - [`id`] - Record ID generation with date-based sequencing
//!
//! ## Example
//!
//! ```
//! use logbook::calc::airflow::{evaluate, AirPath, IsoClass, Verdict};
//! use logbook::calc::concentration::compute;
//!
//! // 5% solution in 100 L of water from 98% stock
//! assert_eq!(compute(5.0, 100.0, 98.0).unwrap(), 5.1);
//!
//! let path = AirPath { filter_area_sqft: 4.0, filter_count: 4 };
//! let result = evaluate(IsoClass::Iso8, 2_000.0, &[90.0, 95.0, 100.0], &path).unwrap();
//! assert_eq!(result.result, Verdict::Pass);
//! ```

pub mod calc;
pub mod capability;
pub mod config;
pub mod error;
pub mod id;
pub mod instrument;
pub mod lock;
pub mod operations;
pub mod record;
pub mod repository;
pub mod role;
pub mod workflow;

pub use error::{Action, Error, Result};

/// Default path constants for the logbook directory structure.
pub mod paths {
    /// Project directory: `.logbook`
    pub const LOGBOOK_DIR: &str = ".logbook";
    /// Project configuration file: `.logbook/config.md`
    pub const CONFIG_PATH: &str = ".logbook/config.md";
    /// Directory containing record files: `.logbook/records`
    pub const RECORDS_DIR: &str = ".logbook/records";
    /// Lock directory name, created inside the records directory
    pub const LOCKS_DIR_NAME: &str = ".locks";
}

/// Round to two decimal places, halves rounding up.
///
/// All values are non-negative by the time they reach display or storage, so
/// `f64::round` (half away from zero) is half-up here.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
