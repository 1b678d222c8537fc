//! Cleanroom airflow validation.
//!
//! Grid velocity readings (ft/min) taken across a room's supply filters are
//! averaged, converted to a volumetric flow through the room's filter area,
//! and expressed as air changes per hour (ACH). The room passes when its ACH
//! meets the minimum for its ISO class.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{require_finite, require_positive};
use crate::error::{Error, Result};

/// Cleanroom cleanliness class. ISO 5 is the strictest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IsoClass {
    Iso5,
    Iso6,
    Iso7,
    Iso8,
}

impl IsoClass {
    pub const ALL: [IsoClass; 4] = [IsoClass::Iso5, IsoClass::Iso6, IsoClass::Iso7, IsoClass::Iso8];

    pub fn number(self) -> u8 {
        match self {
            IsoClass::Iso5 => 5,
            IsoClass::Iso6 => 6,
            IsoClass::Iso7 => 7,
            IsoClass::Iso8 => 8,
        }
    }

    /// Minimum air changes per hour required for this class.
    pub fn design_spec(self) -> f64 {
        match self {
            IsoClass::Iso5 => 240.0,
            IsoClass::Iso6 => 150.0,
            IsoClass::Iso7 => 60.0,
            IsoClass::Iso8 => 20.0,
        }
    }
}

impl TryFrom<u8> for IsoClass {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            5 => Ok(IsoClass::Iso5),
            6 => Ok(IsoClass::Iso6),
            7 => Ok(IsoClass::Iso7),
            8 => Ok(IsoClass::Iso8),
            other => Err(Error::invalid_input(
                "ISO class",
                format!("expected 5, 6, 7 or 8, got {}", other),
            )),
        }
    }
}

impl From<IsoClass> for u8 {
    fn from(class: IsoClass) -> u8 {
        class.number()
    }
}

impl fmt::Display for IsoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ISO {}", self.number())
    }
}

/// Supply air geometry of a room: the effective face area of one filter and
/// how many filters feed the room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirPath {
    pub filter_area_sqft: f64,
    pub filter_count: u32,
}

impl AirPath {
    pub fn validate(&self) -> Result<()> {
        require_positive("filter area", self.filter_area_sqft)?;
        if self.filter_count == 0 {
            return Err(Error::invalid_input(
                "filter count",
                "a room needs at least one supply filter",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

/// Derived values of one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Mean grid velocity, ft/min.
    pub average_velocity: f64,
    /// Flow through a single filter, CFM.
    pub flow_rate_cfm: f64,
    /// Flow through all filters, CFM.
    pub total_cfm: f64,
    pub ach: f64,
    pub design_spec: f64,
    pub result: Verdict,
}

/// Evaluate a room against its ISO class.
///
/// Fails with `InvalidInput` when `grid_readings` is empty, a reading is
/// negative or not a number, `room_volume` is not positive, or the air path
/// is degenerate.
pub fn evaluate(
    iso_class: IsoClass,
    room_volume: f64,
    grid_readings: &[f64],
    air_path: &AirPath,
) -> Result<ValidationResult> {
    if grid_readings.is_empty() {
        return Err(Error::invalid_input(
            "grid readings",
            "at least one reading is required",
        ));
    }
    for (i, &reading) in grid_readings.iter().enumerate() {
        require_finite("grid readings", reading)?;
        if reading < 0.0 {
            return Err(Error::invalid_input(
                "grid readings",
                format!("reading {} is negative ({})", i + 1, reading),
            ));
        }
    }
    let room_volume = require_positive("room volume", room_volume)?;
    air_path.validate()?;

    let average_velocity = grid_readings.iter().sum::<f64>() / grid_readings.len() as f64;
    let flow_rate_cfm = average_velocity * air_path.filter_area_sqft;
    let total_cfm = flow_rate_cfm * f64::from(air_path.filter_count);
    let ach = (total_cfm * 60.0) / room_volume;
    let design_spec = iso_class.design_spec();
    let result = if ach >= design_spec {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    Ok(ValidationResult {
        average_velocity,
        flow_rate_cfm,
        total_cfm,
        ach,
        design_spec,
        result,
    })
}
