use logbook::record::Record;
use logbook::repository::{FileRecordRepository, RecordRepository};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const CONFIG: &str = r#"---
site:
  id: site-001
  name: Main Plant
users:
  - id: op-001
    name: James Wilson
    role: operator
    site_id: site-001
  - id: op-002
    name: Ana Ruiz
    role: operator
    site_id: site-001
  - id: op-003
    name: Tom Baker
    role: operator
    site_id: site-001
    active: false
  - id: sv-001
    name: Sarah Chen
    role: supervisor
    site_id: site-001
  - id: sv-002
    name: David Park
    role: supervisor
    site_id: site-002
  - id: cu-001
    name: Michael Foster
    role: customer
    site_id: site-001
  - id: ad-001
    name: Emily Rodriguez
    role: super_admin
rooms:
  - name: Fill Room A
    iso_class: 7
    volume: 1800
    filter_area_sqft: 4
    filter_count: 6
instruments:
  items:
    - id: inst-001
      name: Digital Anemometer
      make: TSI
      model: 9545-A
      serial_number: SN-78234
      calibration_date: 2026-01-15
      calibration_due_date: 2099-01-15
    - id: inst-002
      name: Pressure Gauge
      calibration_date: 2019-01-01
      calibration_due_date: 2020-01-01
---

# LogBook Configuration
"#;

/// TestHarness provides an isolated logbook project in a temporary
/// directory with `.logbook/config.md` and an empty records directory.
pub struct TestHarness {
    pub dir: TempDir,
    pub records_dir: PathBuf,
    pub binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let harness = Self::uninitialized();
        fs::create_dir_all(&harness.records_dir).expect("Failed to create records dir");
        fs::write(harness.path().join(".logbook/config.md"), CONFIG)
            .expect("Failed to write config");
        harness
    }

    /// A directory with no `.logbook/` at all.
    pub fn uninitialized() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        TestHarness {
            records_dir: dir.path().join(".logbook/records"),
            dir,
            binary: PathBuf::from(env!("CARGO_BIN_EXE_logbook")),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run the binary in the harness directory with no acting user.
    ///
    /// HOME points into the temp dir so no global config leaks in.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary)
            .args(args)
            .current_dir(self.path())
            .env_remove("LOGBOOK_USER")
            .env_remove("RUST_LOG")
            .env("HOME", self.path())
            .output()
            .expect("Failed to run logbook")
    }

    /// Run the binary as `user` with JSON output.
    pub fn run_as(&self, user: &str, args: &[&str]) -> Output {
        let mut full = vec!["--json", "--user", user];
        full.extend_from_slice(args);
        self.run(&full)
    }

    pub fn repo(&self) -> FileRecordRepository {
        FileRecordRepository::new(self.records_dir.clone())
    }

    pub fn repo_is_empty(&self) -> bool {
        self.repo().list().map(|r| r.is_empty()).unwrap_or(false)
    }

    pub fn write_record(&self, record: &Record) {
        record
            .save(&self.records_dir.join(format!("{}.md", record.id)))
            .expect("Failed to write record");
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
