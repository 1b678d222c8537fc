//! Logged records: utility readings, chemical preparations, air validations
//! and reports, each carrying its review status.

pub mod frontmatter;
pub mod parse;

pub use frontmatter::{
    AirValidation, ChemicalPreparation, EquipmentType, Entry, RecordFrontmatter, RecordKind,
    RecordStatus, Report, ReportType, Resolution, UtilityReading,
};
pub use parse::{split_frontmatter, Record};
