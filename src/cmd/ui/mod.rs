//! CLI-specific UI output and formatting modules

pub mod output;
pub mod render;

pub use output::{Output, OutputMode};
