//! Pure compliance calculations.
//!
//! Nothing in here performs I/O or holds state; the same inputs always yield
//! the same output.

pub mod airflow;
pub mod concentration;

use crate::error::{Error, Result};

/// Reject NaN and infinities before any range check.
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid_input(field, format!("{} is not a number", value)))
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    let value = require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid_input(
            field,
            format!("must be greater than 0, got {}", value),
        ))
    }
}

/// Percentages in (0, 100].
pub(crate) fn require_percent(field: &'static str, value: f64) -> Result<f64> {
    let value = require_positive(field, value)?;
    if value <= 100.0 {
        Ok(value)
    } else {
        Err(Error::invalid_input(
            field,
            format!("must be at most 100%, got {}", value),
        ))
    }
}
