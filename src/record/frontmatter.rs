//! Frontmatter types for records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calc::airflow::{self, AirPath, IsoClass, ValidationResult};
use crate::calc::concentration::{self, Chemical};
use crate::calc::require_finite;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 4] = [
        RecordStatus::Draft,
        RecordStatus::Pending,
        RecordStatus::Approved,
        RecordStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Draft => "draft",
            RecordStatus::Pending => "pending",
            RecordStatus::Approved => "approved",
            RecordStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected records never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordStatus::Approved | RecordStatus::Rejected)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RecordStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown status '{}'. Expected one of: draft, pending, approved, rejected",
                    s
                )
            })
    }
}

/// Kind of logged entry, also used as the record ID prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Utility,
    Chemical,
    AirValidation,
    Report,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Utility,
        RecordKind::Chemical,
        RecordKind::AirValidation,
        RecordKind::Report,
    ];

    pub fn id_prefix(&self) -> &'static str {
        match self {
            RecordKind::Utility => "UT",
            RecordKind::Chemical => "CP",
            RecordKind::AirValidation => "AV",
            RecordKind::Report => "RPT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Utility => "Utility Log",
            RecordKind::Chemical => "Chemical Prep",
            RecordKind::AirValidation => "Air Validation",
            RecordKind::Report => "Report",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Utility => "utility",
            RecordKind::Chemical => "chemical",
            RecordKind::AirValidation => "air_validation",
            RecordKind::Report => "report",
        }
    }
}

impl FromStr for RecordKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utility" => Ok(RecordKind::Utility),
            "chemical" => Ok(RecordKind::Chemical),
            "air" | "air_validation" => Ok(RecordKind::AirValidation),
            "report" => Ok(RecordKind::Report),
            _ => anyhow::bail!(
                "Unknown record kind '{}'. Expected one of: utility, chemical, air, report",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Chiller,
    Boiler,
    Compressor,
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentType::Chiller => write!(f, "chiller"),
            EquipmentType::Boiler => write!(f, "boiler"),
            EquipmentType::Compressor => write!(f, "compressor"),
        }
    }
}

impl FromStr for EquipmentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chiller" => Ok(EquipmentType::Chiller),
            "boiler" => Ok(EquipmentType::Boiler),
            "compressor" => Ok(EquipmentType::Compressor),
            _ => anyhow::bail!(
                "Unknown equipment type '{}'. Expected chiller, boiler or compressor",
                s
            ),
        }
    }
}

/// Manual readings taken at a chiller, boiler or compressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityReading {
    pub equipment_type: EquipmentType,
    pub equipment_id: String,
    /// Inlet / outlet temperature, °C
    pub t1: f64,
    pub t2: f64,
    /// Inlet / outlet pressure, bar
    pub p1: f64,
    pub p2: f64,
    pub flow_rate: f64,
}

impl UtilityReading {
    pub fn validate(&self) -> Result<()> {
        require_finite("T1", self.t1)?;
        require_finite("T2", self.t2)?;
        require_finite("P1", self.p1)?;
        require_finite("P2", self.p2)?;
        require_finite("flow rate", self.flow_rate)?;
        if self.p1 < 0.0 || self.p2 < 0.0 {
            return Err(Error::invalid_input("pressure", "must not be negative"));
        }
        if self.flow_rate < 0.0 {
            return Err(Error::invalid_input("flow rate", "must not be negative"));
        }
        Ok(())
    }
}

/// A chemical solution made up from stock. The quantity is always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalPreparation {
    pub chemical: String,
    pub formula: String,
    /// Stock concentration at the time of preparation, percent
    pub stock_concentration: f64,
    pub equipment_id: String,
    /// Target concentration, percent
    pub target_concentration: f64,
    /// Solution volume, liters
    pub solution_volume: f64,
    /// Stock chemical to add, liters
    pub chemical_quantity: f64,
}

impl ChemicalPreparation {
    pub fn new(
        chemical: &Chemical,
        equipment_id: &str,
        target_concentration: f64,
        solution_volume: f64,
    ) -> Result<Self> {
        let chemical_quantity =
            concentration::compute_for(chemical, target_concentration, solution_volume)?;
        Ok(Self {
            chemical: chemical.name.clone(),
            formula: chemical.formula.clone(),
            stock_concentration: chemical.stock_concentration,
            equipment_id: equipment_id.to_string(),
            target_concentration,
            solution_volume,
            chemical_quantity,
        })
    }

    fn derive(&self) -> Result<f64> {
        concentration::compute(
            self.target_concentration,
            self.solution_volume,
            self.stock_concentration,
        )
    }
}

/// A cleanroom airflow validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirValidation {
    pub room_name: String,
    pub iso_class: IsoClass,
    /// Room volume, ft³
    pub room_volume: f64,
    pub air_path: AirPath,
    /// Grid velocities in measurement order, ft/min
    pub grid_readings: Vec<f64>,
    pub outcome: ValidationResult,
}

impl AirValidation {
    pub fn new(
        room_name: &str,
        iso_class: IsoClass,
        room_volume: f64,
        air_path: AirPath,
        grid_readings: Vec<f64>,
    ) -> Result<Self> {
        let outcome = airflow::evaluate(iso_class, room_volume, &grid_readings, &air_path)?;
        Ok(Self {
            room_name: room_name.to_string(),
            iso_class,
            room_volume,
            air_path,
            grid_readings,
            outcome,
        })
    }

    fn derive(&self) -> Result<ValidationResult> {
        airflow::evaluate(
            self.iso_class,
            self.room_volume,
            &self.grid_readings,
            &self.air_path,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Utility,
    Chemical,
    Validation,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Utility => "utility",
            ReportType::Chemical => "chemical",
            ReportType::Validation => "validation",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utility" => Ok(ReportType::Utility),
            "chemical" => Ok(ReportType::Chemical),
            "validation" => Ok(ReportType::Validation),
            _ => anyhow::bail!(
                "Unknown report type '{}'. Expected utility, chemical or validation",
                s
            ),
        }
    }
}

/// A compiled report sent for sign-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report_type: ReportType,
    pub title: String,
}

/// The logged content of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Utility(UtilityReading),
    Chemical(ChemicalPreparation),
    AirValidation(AirValidation),
    Report(Report),
}

impl Entry {
    pub fn kind(&self) -> RecordKind {
        match self {
            Entry::Utility(_) => RecordKind::Utility,
            Entry::Chemical(_) => RecordKind::Chemical,
            Entry::AirValidation(_) => RecordKind::AirValidation,
            Entry::Report(_) => RecordKind::Report,
        }
    }

    /// One-line description for listings.
    pub fn summary(&self) -> String {
        match self {
            Entry::Utility(u) => format!("{} {}", u.equipment_type, u.equipment_id),
            Entry::Chemical(c) => format!(
                "{} {}% x {} L -> {} L on {}",
                c.formula, c.target_concentration, c.solution_volume, c.chemical_quantity,
                c.equipment_id
            ),
            Entry::AirValidation(a) => format!(
                "{} ({}) {:.2} ACH {}",
                a.room_name, a.iso_class, a.outcome.ach, a.outcome.result
            ),
            Entry::Report(r) => r.title.clone(),
        }
    }

    /// Re-derive computed fields from the inputs, replacing stored values.
    pub fn recompute(&mut self) -> Result<()> {
        match self {
            Entry::Utility(u) => u.validate(),
            Entry::Chemical(c) => {
                c.chemical_quantity = c.derive()?;
                Ok(())
            }
            Entry::AirValidation(a) => {
                a.outcome = a.derive()?;
                Ok(())
            }
            Entry::Report(r) => require_title(&r.title),
        }
    }

    /// Check that stored computed fields equal a fresh derivation.
    pub fn verify(&self) -> Result<()> {
        match self {
            Entry::Utility(u) => u.validate(),
            Entry::Chemical(c) => {
                let expected = c.derive()?;
                if expected != c.chemical_quantity {
                    return Err(Error::invalid_input(
                        "chemical quantity",
                        format!(
                            "stored {} does not match computed {}",
                            c.chemical_quantity, expected
                        ),
                    ));
                }
                Ok(())
            }
            Entry::AirValidation(a) => {
                let expected = a.derive()?;
                if expected != a.outcome {
                    return Err(Error::invalid_input(
                        "validation outcome",
                        format!(
                            "stored ACH {} / {} does not match computed ACH {} / {}",
                            a.outcome.ach, a.outcome.result, expected.ach, expected.result
                        ),
                    ));
                }
                Ok(())
            }
            Entry::Report(r) => require_title(&r.title),
        }
    }
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::invalid_input("title", "must not be empty"));
    }
    Ok(())
}

/// Who resolved a record and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub by_id: String,
    pub by_name: String,
    pub at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFrontmatter {
    #[serde(default)]
    pub status: RecordStatus,
    pub site_id: String,
    pub operator_id: String,
    pub operator_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    pub entry: Entry,
}
