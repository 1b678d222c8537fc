//! Chemical dilution: how much stock chemical to add for a target strength.
//!
//! Uses `V1 = (C2 * V2) / C1` where `C1` is the stock concentration, `C2` the
//! target concentration and `V2` the solution volume.

use serde::{Deserialize, Serialize};

use super::{require_percent, require_positive};
use crate::error::Result;
use crate::round_to_cents;

/// Reference data for a chemical as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chemical {
    pub name: String,
    pub formula: String,
    /// Stock concentration in percent, (0, 100].
    pub stock_concentration: f64,
}

impl Chemical {
    pub fn new(name: &str, formula: &str, stock_concentration: f64) -> Self {
        Self {
            name: name.to_string(),
            formula: formula.to_string(),
            stock_concentration,
        }
    }

    /// Whether `query` names this chemical, by full name or formula.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.eq_ignore_ascii_case(query) || self.formula.eq_ignore_ascii_case(query)
    }
}

/// Chemicals stocked by default.
pub fn default_catalog() -> Vec<Chemical> {
    vec![
        Chemical::new("Sodium Hydroxide (NaOH)", "NaOH", 98.0),
        Chemical::new("Hydrochloric Acid (HCl)", "HCl", 37.0),
        Chemical::new("Sulfuric Acid (H2SO4)", "H2SO4", 98.0),
        Chemical::new("Nitric Acid (HNO3)", "HNO3", 70.0),
        Chemical::new("Phosphoric Acid (H3PO4)", "H3PO4", 85.0),
    ]
}

/// Required chemical quantity, in the volume's unit, rounded to 2 places.
///
/// Fails with `InvalidInput` unless `target_percent` and `stock_percent` are in
/// (0, 100] and `volume` is positive.
pub fn compute(target_percent: f64, volume: f64, stock_percent: f64) -> Result<f64> {
    let target = require_percent("target concentration", target_percent)?;
    let volume = require_positive("solution volume", volume)?;
    let stock = require_percent("stock concentration", stock_percent)?;

    Ok(round_to_cents((target * volume) / stock))
}

/// [`compute`] using a catalog chemical's stock concentration.
pub fn compute_for(chemical: &Chemical, target_percent: f64, volume: f64) -> Result<f64> {
    compute(target_percent, volume, chemical.stock_concentration)
}
