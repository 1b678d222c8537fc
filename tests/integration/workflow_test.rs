//! Review workflow against the file-backed repository.

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{TimeZone, Utc};
use logbook::error::Error;
use logbook::operations::{self, CreateOptions, ListFilter};
use logbook::record::{Entry, RecordStatus, Report, ReportType};
use logbook::repository::RecordRepository;
use logbook::role::{Actor, Role};

use crate::support::builders::RecordBuilder;
use crate::support::harness::TestHarness;

fn operator() -> Actor {
    Actor::new("op-001", "James Wilson", Role::Operator, Some("site-001"))
}

fn supervisor(id: &str) -> Actor {
    Actor::new(id, "Supervisor", Role::Supervisor, Some("site-001"))
}

fn customer() -> Actor {
    Actor::new("cu-001", "Michael Foster", Role::Customer, Some("site-001"))
}

#[test]
fn test_full_lifecycle_persists_each_step() {
    let harness = TestHarness::new();
    let repo = harness.repo();
    let entry = Entry::Report(Report {
        report_type: ReportType::Validation,
        title: "ISO 7 Clean Room Validation - Q4".into(),
    });

    let record = operations::create_record(
        &repo,
        "site-001",
        &operator(),
        entry,
        CreateOptions {
            notes: "Quarterly".into(),
            submit: false,
            at: Some(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()),
        },
    )
    .unwrap();
    assert!(record.id.starts_with("RPT-2026-10-19-001-"));
    assert_eq!(repo.get(&record.id).unwrap().status(), RecordStatus::Draft);

    operations::submit_record(&repo, &record.id, &operator()).unwrap();
    assert_eq!(repo.get(&record.id).unwrap().status(), RecordStatus::Pending);

    operations::reject_record(&repo, &record.id, &supervisor("sv-001"), "Wrong quarter").unwrap();
    let stored = repo.get(&record.id).unwrap();
    assert_eq!(stored.status(), RecordStatus::Rejected);
    assert_eq!(stored.body, "Quarterly");
    let resolution = stored.frontmatter.resolution.unwrap();
    assert_eq!(resolution.by_id, "sv-001");
    assert_eq!(resolution.remarks.as_deref(), Some("Wrong quarter"));

    assert!(matches!(
        operations::approve_record(&repo, &record.id, &supervisor("sv-001"), None),
        Err(Error::InvalidTransition { from: RecordStatus::Rejected, .. })
    ));
}

#[test]
fn test_concurrent_approve_and_reject_on_disk() {
    for round in 0..10 {
        let harness = TestHarness::new();
        let id = format!("CP-2026-10-19-{:03}-abc", round + 1);
        harness.write_record(&RecordBuilder::new(&id).with_status(RecordStatus::Pending).build());

        let repo = Arc::new(harness.repo());
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|i| {
                let repo = Arc::clone(&repo);
                let barrier = Arc::clone(&barrier);
                let id = id.clone();
                thread::spawn(move || {
                    let actor = supervisor(&format!("sv-00{}", i + 1));
                    barrier.wait();
                    if i == 0 {
                        operations::approve_record(repo.as_ref(), &id, &actor, None)
                    } else {
                        operations::reject_record(repo.as_ref(), &id, &actor, "Out of range")
                    }
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1, "round {}: exactly one transition must win", round);

        let final_status = repo.get(&id).unwrap().status();
        assert_eq!(final_status, winners[0].status());
        for result in &results {
            if let Err(err) = result {
                assert!(
                    matches!(err, Error::InvalidTransition { from, .. } if *from == final_status),
                    "round {}: unexpected error {:?}",
                    round,
                    err
                );
            }
        }
    }
}

#[test]
fn test_customer_listing_is_approved_only() {
    let harness = TestHarness::new();
    for (i, status) in RecordStatus::ALL.iter().enumerate() {
        harness.write_record(
            &RecordBuilder::new(&format!("CP-2026-10-19-00{}-abc", i + 1))
                .with_status(*status)
                .build(),
        );
    }
    harness.write_record(
        &RecordBuilder::new("CP-2026-10-19-009-abc")
            .with_status(RecordStatus::Approved)
            .with_site("site-002")
            .build(),
    );

    let repo = harness.repo();
    let records = operations::list_records(&repo, &customer(), &ListFilter::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "CP-2026-10-19-003-abc");

    let admin = Actor::new("ad-001", "Emily Rodriguez", Role::SuperAdmin, None);
    let all = operations::list_records(&repo, &admin, &ListFilter::default()).unwrap();
    assert_eq!(all.len(), 5);
}

#[test]
fn test_recompute_on_disk_after_correction() {
    let harness = TestHarness::new();
    let id = "AV-2026-10-19-001-abc";
    harness.write_record(&RecordBuilder::new(id).with_air_validation(vec![40.0]).build());
    let repo = harness.repo();

    let updated = operations::recompute_record(&repo, id, &operator(), |entry| {
        if let Entry::AirValidation(a) = entry {
            a.grid_readings = vec![85.0, 90.0, 95.0];
        }
        Ok(())
    })
    .unwrap();

    match &updated.frontmatter.entry {
        Entry::AirValidation(a) => assert_eq!(a.outcome.ach, 72.0),
        other => panic!("unexpected entry {:?}", other),
    }
    assert_eq!(repo.get(id).unwrap(), updated);
}

#[test]
fn test_approve_reclaims_lock_left_by_dead_process() {
    let harness = TestHarness::new();
    let id = "CP-2026-10-19-001-abc";
    harness.write_record(&RecordBuilder::new(id).with_status(RecordStatus::Pending).build());

    let locks_dir = harness.records_dir.join(".locks");
    std::fs::create_dir_all(&locks_dir).unwrap();
    // No process can have this PID; it is above the kernel limit.
    std::fs::write(locks_dir.join(format!("{}.lock", id)), "999999999").unwrap();

    let repo = harness.repo();
    let started = std::time::Instant::now();
    let approved = operations::approve_record(&repo, id, &supervisor("sv-001"), None).unwrap();

    assert_eq!(approved.status(), RecordStatus::Approved);
    assert_eq!(repo.get(id).unwrap().status(), RecordStatus::Approved);
    assert!(started.elapsed() < std::time::Duration::from_secs(2));
    assert!(!locks_dir.join(format!("{}.lock", id)).exists());
}
