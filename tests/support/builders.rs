use chrono::{DateTime, TimeZone, Utc};
use logbook::calc::airflow::{AirPath, IsoClass};
use logbook::calc::concentration::Chemical;
use logbook::record::{
    AirValidation, ChemicalPreparation, Entry, Record, RecordFrontmatter, RecordStatus,
};

pub struct RecordBuilder {
    id: String,
    status: RecordStatus,
    site_id: String,
    operator_id: String,
    operator_name: String,
    created_at: DateTime<Utc>,
    entry: Entry,
}

impl RecordBuilder {
    /// A draft NaOH preparation owned by op-001 at site-001.
    pub fn new(id: &str) -> Self {
        let naoh = Chemical::new("Sodium Hydroxide (NaOH)", "NaOH", 98.0);
        Self {
            id: id.to_string(),
            status: RecordStatus::Draft,
            site_id: "site-001".to_string(),
            operator_id: "op-001".to_string(),
            operator_name: "James Wilson".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
            entry: Entry::Chemical(ChemicalPreparation::new(&naoh, "RE0001", 5.0, 100.0).unwrap()),
        }
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_site(mut self, site_id: &str) -> Self {
        self.site_id = site_id.to_string();
        self
    }

    pub fn with_operator(mut self, id: &str, name: &str) -> Self {
        self.operator_id = id.to_string();
        self.operator_name = name.to_string();
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn with_air_validation(mut self, readings: Vec<f64>) -> Self {
        let path = AirPath {
            filter_area_sqft: 4.0,
            filter_count: 6,
        };
        self.entry = Entry::AirValidation(
            AirValidation::new("Fill Room A", IsoClass::Iso7, 1800.0, path, readings).unwrap(),
        );
        self
    }

    pub fn build(self) -> Record {
        Record {
            id: self.id,
            frontmatter: RecordFrontmatter {
                status: self.status,
                site_id: self.site_id,
                operator_id: self.operator_id,
                operator_name: self.operator_name,
                created_at: self.created_at,
                submitted_at: None,
                resolution: None,
                entry: self.entry,
            },
            body: String::new(),
        }
    }
}
