//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

use crate::calc::airflow::{AirPath, IsoClass};
use crate::calc::concentration::{self, Chemical};
use crate::instrument::Instrument;
use crate::paths::RECORDS_DIR;
use crate::record::EquipmentType;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_chemicals, Vec<Chemical>, concentration::default_catalog());
default_fn!(default_expiring_within_days, u32, 30);
default_fn!(default_records_dir, String, RECORDS_DIR.to_string());
default_fn!(default_chillers, Vec<String>, ids(&["CH-001", "CH-002", "CH-003"]));
default_fn!(default_boilers, Vec<String>, ids(&["BL-001", "BL-002"]));
default_fn!(default_compressors, Vec<String>, ids(&["AC-001", "AC-002", "AC-003"]));
default_fn!(
    default_reactors,
    Vec<String>,
    ids(&["RE0001", "RE0002", "RE0003", "RE0004", "RE0005"])
);

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// The facility this logbook belongs to
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SiteConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A cleanroom and the supply-air geometry used to convert grid velocity
/// into airflow.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomConfig {
    pub name: String,
    pub iso_class: IsoClass,
    /// Room volume, ft³
    pub volume: f64,
    /// Effective face area of one supply filter, ft²
    pub filter_area_sqft: f64,
    pub filter_count: u32,
}

impl RoomConfig {
    pub fn air_path(&self) -> AirPath {
        AirPath {
            filter_area_sqft: self.filter_area_sqft,
            filter_count: self.filter_count,
        }
    }
}

/// Equipment IDs that readings and preparations may reference
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EquipmentConfig {
    #[serde(default = "default_chillers")]
    pub chillers: Vec<String>,
    #[serde(default = "default_boilers")]
    pub boilers: Vec<String>,
    #[serde(default = "default_compressors")]
    pub compressors: Vec<String>,
    /// Preparation vessels for chemical solutions
    #[serde(default = "default_reactors")]
    pub reactors: Vec<String>,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            chillers: default_chillers(),
            boilers: default_boilers(),
            compressors: default_compressors(),
            reactors: default_reactors(),
        }
    }
}

impl EquipmentConfig {
    pub fn ids_for(&self, equipment_type: EquipmentType) -> &[String] {
        match equipment_type {
            EquipmentType::Chiller => &self.chillers,
            EquipmentType::Boiler => &self.boilers,
            EquipmentType::Compressor => &self.compressors,
        }
    }

    pub fn has(&self, equipment_type: EquipmentType, id: &str) -> bool {
        self.ids_for(equipment_type).iter().any(|e| e == id)
    }

    pub fn has_reactor(&self, id: &str) -> bool {
        self.reactors.iter().any(|r| r == id)
    }
}

/// Calibrated instruments and the warning window before their due date
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstrumentsConfig {
    /// Days before the due date at which calibration shows as expiring (default: 30)
    #[serde(default = "default_expiring_within_days")]
    pub expiring_within_days: u32,
    #[serde(default)]
    pub items: Vec<Instrument>,
}

impl Default for InstrumentsConfig {
    fn default() -> Self {
        Self {
            expiring_within_days: default_expiring_within_days(),
            items: vec![],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding record files; `~` and `$VARS` are expanded (default: .logbook/records)
    #[serde(default = "default_records_dir")]
    pub records_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            records_dir: default_records_dir(),
        }
    }
}
