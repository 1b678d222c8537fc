//! Measuring instruments and their calibration status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    pub calibration_date: NaiveDate,
    pub calibration_due_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStatus {
    Valid,
    Expiring,
    Expired,
}

impl fmt::Display for CalibrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationStatus::Valid => write!(f, "valid"),
            CalibrationStatus::Expiring => write!(f, "expiring"),
            CalibrationStatus::Expired => write!(f, "expired"),
        }
    }
}

impl Instrument {
    /// Days from `today` until calibration is due. Negative once overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.calibration_due_date - today).num_days()
    }

    /// Expired when past due, expiring when due within `window_days`.
    pub fn status(&self, today: NaiveDate, window_days: u32) -> CalibrationStatus {
        let days = self.days_until_due(today);
        if days < 0 {
            CalibrationStatus::Expired
        } else if days < i64::from(window_days) {
            CalibrationStatus::Expiring
        } else {
            CalibrationStatus::Valid
        }
    }
}
