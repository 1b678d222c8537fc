//! File repository behaviour visible from outside the crate.

use std::fs;

use logbook::error::Error;
use logbook::record::RecordStatus;
use logbook::repository::RecordRepository;

use crate::support::builders::RecordBuilder;
use crate::support::harness::TestHarness;

#[test]
fn test_records_are_markdown_with_frontmatter() {
    let harness = TestHarness::new();
    let repo = harness.repo();
    let record = RecordBuilder::new("CP-2026-10-19-001-abc").build();
    repo.save(&record).unwrap();

    let content = fs::read_to_string(harness.records_dir.join("CP-2026-10-19-001-abc.md")).unwrap();
    assert!(content.starts_with("---\n"));
    assert!(content.contains("status: draft"));
    assert!(content.contains("kind: chemical"));
    assert!(content.contains("chemical_quantity: 5.1"));
}

#[test]
fn test_hand_edited_quantity_is_refused() {
    let harness = TestHarness::new();
    let repo = harness.repo();
    let record = RecordBuilder::new("CP-2026-10-19-001-abc").build();
    repo.save(&record).unwrap();

    let path = harness.records_dir.join("CP-2026-10-19-001-abc.md");
    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, content.replace("chemical_quantity: 5.1", "chemical_quantity: 4.0")).unwrap();

    assert!(repo.get("CP-2026-10-19-001-abc").is_err());
}

#[test]
fn test_list_ignores_foreign_files() {
    let harness = TestHarness::new();
    let repo = harness.repo();
    repo.save(&RecordBuilder::new("CP-2026-10-19-001-abc").build()).unwrap();
    fs::write(harness.records_dir.join("README.txt"), "not a record").unwrap();

    let records = repo.list().unwrap();
    assert_eq!(records.len(), 1);
    assert!(!harness.records_dir.join(".locks/CP-2026-10-19-001-abc.lock").exists());
}

#[test]
fn test_compare_and_swap_on_disk() {
    let harness = TestHarness::new();
    let repo = harness.repo();
    let record = RecordBuilder::new("CP-2026-10-19-001-abc")
        .with_status(RecordStatus::Pending)
        .build();
    repo.save(&record).unwrap();

    let mut approved = record.clone();
    approved.frontmatter.status = RecordStatus::Approved;
    repo.compare_and_swap(RecordStatus::Pending, &approved).unwrap();

    let mut rejected = record.clone();
    rejected.frontmatter.status = RecordStatus::Rejected;
    assert!(matches!(
        repo.compare_and_swap(RecordStatus::Pending, &rejected),
        Err(Error::InvalidTransition {
            from: RecordStatus::Approved,
            to: RecordStatus::Rejected
        })
    ));
    assert_eq!(repo.get(&record.id).unwrap().status(), RecordStatus::Approved);
}

#[test]
fn test_missing_record_is_not_found() {
    let harness = TestHarness::new();
    assert!(matches!(
        harness.repo().get("CP-2026-10-19-404-abc"),
        Err(Error::NotFound(_))
    ));
}
