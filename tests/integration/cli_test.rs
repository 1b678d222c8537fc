//! End-to-end tests driving the logbook binary.

use crate::common::{assert_error_tag, assert_success, json_lines, last_json, stdout};
use crate::support::harness::TestHarness;

fn log_naoh(harness: &TestHarness, user: &str, extra: &[&str]) -> String {
    let mut args = vec![
        "log",
        "chemical",
        "--chemical",
        "NaOH",
        "--equipment",
        "RE0001",
        "--target",
        "5",
        "--volume",
        "100",
    ];
    args.extend_from_slice(extra);
    let output = harness.run_as(user, &args);
    assert_success(&output);
    last_json(&output)["id"]
        .as_str()
        .expect("record id in output")
        .to_string()
}

#[test]
fn test_calc_chemical_without_init() {
    let harness = TestHarness::uninitialized();
    let output = harness.run(&[
        "--json", "calc", "chemical", "--chemical", "NaOH", "--target", "5", "--volume", "100",
    ]);
    assert_success(&output);

    let value = last_json(&output);
    assert_eq!(value["formula"], "NaOH");
    assert_eq!(value["chemical_quantity"], 5.1);
}

#[test]
fn test_calc_chemical_custom_stock() {
    let harness = TestHarness::uninitialized();
    let output = harness.run(&[
        "--json", "calc", "chemical", "--stock", "37", "--target", "2", "--volume", "50",
    ]);
    assert_success(&output);
    assert_eq!(last_json(&output)["chemical_quantity"], 2.7);
}

#[test]
fn test_calc_chemical_rejects_out_of_range_target() {
    let harness = TestHarness::uninitialized();
    let output = harness.run(&[
        "--json", "calc", "chemical", "--chemical", "HCl", "--target", "0", "--volume", "10",
    ]);
    assert_error_tag(&output, "invalid_input");
}

#[test]
fn test_calc_air_with_explicit_geometry() {
    let harness = TestHarness::uninitialized();
    let output = harness.run(&[
        "--json",
        "calc",
        "air",
        "--iso-class",
        "7",
        "--volume",
        "1800",
        "--filter-area",
        "4",
        "--filter-count",
        "6",
        "--readings",
        "85,90,95",
    ]);
    assert_success(&output);

    let value = last_json(&output);
    assert_eq!(value["ach"], 72.0);
    assert_eq!(value["design_spec"], 60.0);
    assert_eq!(value["result"], "pass");
    assert_eq!(value["iso_class"], 7);
}

#[test]
fn test_calc_air_uses_configured_room() {
    let harness = TestHarness::new();
    let output = harness.run(&[
        "--json",
        "calc",
        "air",
        "--room",
        "fill room a",
        "--iso-class",
        "6",
        "--readings",
        "85,90,95",
    ]);
    assert_success(&output);

    let value = last_json(&output);
    assert_eq!(value["ach"], 72.0);
    assert_eq!(value["result"], "fail");
}

#[test]
fn test_init_creates_config_and_refuses_overwrite() {
    let harness = TestHarness::uninitialized();
    assert_success(&harness.run(&["init", "--site", "site-042", "--name", "North Plant"]));
    assert!(harness.path().join(".logbook/config.md").exists());
    assert!(harness.records_dir.is_dir());

    let again = harness.run(&["init"]);
    assert!(!again.status.success());

    assert_success(&harness.run(&["init", "--force"]));
}

#[test]
fn test_commands_require_init() {
    let harness = TestHarness::uninitialized();
    let output = harness.run(&["--user", "op-001", "list"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("not initialized"));
}

#[test]
fn test_unknown_user_is_refused() {
    let harness = TestHarness::new();
    let output = harness.run_as("nobody", &["list"]);
    assert_error_tag(&output, "error");
    assert!(last_json(&output)["msg"]
        .as_str()
        .unwrap()
        .contains("Unknown user 'nobody'"));

    let output = harness.run(&["--json", "list"]);
    assert_error_tag(&output, "error");
}

#[test]
fn test_log_chemical_creates_draft() {
    let harness = TestHarness::new();
    let output = harness.run_as(
        "op-001",
        &[
            "log", "chemical", "--chemical", "NaOH", "--equipment", "RE0001", "--target", "5",
            "--volume", "100", "--notes", "For CIP cycle",
        ],
    );
    assert_success(&output);

    let lines = json_lines(&output);
    assert_eq!(lines[0]["level"], "success");
    let record = &lines[1];
    assert!(record["id"].as_str().unwrap().starts_with("CP-"));
    assert_eq!(record["status"], "draft");
    assert_eq!(record["operator_id"], "op-001");
    assert_eq!(record["site_id"], "site-001");
    assert_eq!(record["entry"]["kind"], "chemical");
    assert_eq!(record["entry"]["chemical_quantity"], 5.1);
    assert_eq!(record["notes"], "For CIP cycle");
}

#[test]
fn test_log_rejects_unknown_equipment() {
    let harness = TestHarness::new();
    let output = harness.run_as(
        "op-001",
        &[
            "log", "utility", "--type", "chiller", "--equipment", "CH-999", "--t1", "7.2",
            "--t2", "12.5", "--p1", "2.4", "--p2", "1.8", "--flow-rate", "45.2",
        ],
    );
    assert!(!output.status.success());
    assert!(last_json(&output)["msg"]
        .as_str()
        .unwrap()
        .contains("Unknown chiller 'CH-999'"));
}

#[test]
fn test_log_air_validation_for_room() {
    let harness = TestHarness::new();
    let output = harness.run_as(
        "op-002",
        &["log", "air", "--room", "Fill Room A", "--readings", "85,90,95", "--submit"],
    );
    assert_success(&output);

    let record = last_json(&output);
    assert!(record["id"].as_str().unwrap().starts_with("AV-"));
    assert_eq!(record["status"], "pending");
    assert_eq!(record["entry"]["room_name"], "Fill Room A");
    assert_eq!(record["entry"]["outcome"]["ach"], 72.0);
    assert_eq!(record["entry"]["outcome"]["result"], "pass");
}

#[test]
fn test_customer_cannot_log() {
    let harness = TestHarness::new();
    let output = harness.run_as(
        "cu-001",
        &["log", "report", "--type", "validation", "--title", "Q4 validation"],
    );
    assert_error_tag(&output, "unauthorized");
}

#[test]
fn test_review_lifecycle() {
    let harness = TestHarness::new();
    let id = log_naoh(&harness, "op-001", &[]);

    // Nothing approved yet, so the customer sees nothing.
    let output = harness.run_as("cu-001", &["list"]);
    assert_success(&output);
    assert_eq!(last_json(&output)["msg"], "No records.");

    assert_error_tag(&harness.run_as("op-002", &["submit", &id]), "unauthorized");
    assert_success(&harness.run_as("op-001", &["submit", &id]));
    assert_error_tag(&harness.run_as("op-001", &["approve", &id]), "unauthorized");

    let output = harness.run_as("sv-001", &["approve", &id, "--remarks", "Checked"]);
    assert_success(&output);
    let record = last_json(&output);
    assert_eq!(record["status"], "approved");
    assert_eq!(record["resolution"]["by_id"], "sv-001");
    assert_eq!(record["resolution"]["remarks"], "Checked");

    assert_error_tag(
        &harness.run_as("sv-001", &["reject", &id, "--remarks", "too late"]),
        "invalid_transition",
    );

    let output = harness.run_as("cu-001", &["list"]);
    assert_success(&output);
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], id.as_str());
}

#[test]
fn test_reject_requires_remarks() {
    let harness = TestHarness::new();
    let id = log_naoh(&harness, "op-001", &["--submit"]);

    assert_error_tag(
        &harness.run_as("sv-001", &["reject", &id, "--remarks", "  "]),
        "missing_remarks",
    );

    let output = harness.run_as(
        "sv-001",
        &["reject", &id, "--remarks", "Missing pressure readings"],
    );
    assert_success(&output);
    assert_eq!(last_json(&output)["status"], "rejected");
}

#[test]
fn test_other_site_supervisor_cannot_see_records() {
    let harness = TestHarness::new();
    let id = log_naoh(&harness, "op-001", &["--submit"]);

    let output = harness.run_as("sv-002", &["list"]);
    assert_success(&output);
    assert_eq!(last_json(&output)["msg"], "No records.");

    assert_error_tag(&harness.run_as("sv-002", &["approve", &id]), "not_found");

    // Unbound super admin sees every site.
    assert_success(&harness.run_as("ad-001", &["approve", &id]));
}

#[test]
fn test_recompute_draft() {
    let harness = TestHarness::new();
    let id = log_naoh(&harness, "op-001", &[]);

    let output = harness.run_as("op-001", &["recompute", &id, "--volume", "200"]);
    assert_success(&output);
    let record = last_json(&output);
    assert_eq!(record["entry"]["solution_volume"], 200.0);
    assert_eq!(record["entry"]["chemical_quantity"], 10.2);

    assert_error_tag(
        &harness.run_as("op-001", &["recompute", &id, "--title", "x"]),
        "invalid_input",
    );

    assert_success(&harness.run_as("op-001", &["submit", &id]));
    assert_error_tag(
        &harness.run_as("op-001", &["recompute", &id, "--volume", "300"]),
        "invalid_transition",
    );
}

#[test]
fn test_partial_id_lookup() {
    let harness = TestHarness::new();
    let id = log_naoh(&harness, "op-001", &[]);
    let suffix = &id[id.len() - 3..];

    let output = harness.run_as("op-001", &["show", suffix]);
    assert_success(&output);
    assert_eq!(last_json(&output)["id"], id.as_str());

    assert_error_tag(&harness.run_as("op-001", &["show", "NOPE"]), "not_found");
}

#[test]
fn test_summary_counts_visible_records() {
    let harness = TestHarness::new();
    log_naoh(&harness, "op-001", &[]);
    let pending = log_naoh(&harness, "op-001", &["--submit"]);
    let approved = log_naoh(&harness, "op-002", &["--submit"]);
    assert_success(&harness.run_as("sv-001", &["approve", &approved]));

    let output = harness.run_as("sv-001", &["summary"]);
    assert_success(&output);
    let summary = last_json(&output);
    assert_eq!(summary["draft"], 1);
    assert_eq!(summary["pending"], 1);
    assert_eq!(summary["approved"], 1);
    assert_eq!(summary["total"], 3);

    let output = harness.run_as("cu-001", &["summary"]);
    let summary = last_json(&output);
    assert_eq!(summary["approved"], 1);
    assert_eq!(summary["total"], 1);

    let output = harness.run_as("sv-001", &["list", "--status", "pending"]);
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], pending.as_str());
}

#[test]
fn test_instruments_gated_by_role() {
    let harness = TestHarness::new();
    let output = harness.run_as("cu-001", &["instruments"]);
    assert!(!output.status.success());

    let output = harness.run_as("sv-001", &["instruments"]);
    assert_success(&output);
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], "inst-001");
    assert_eq!(lines[0]["status"], "valid");
    assert_eq!(lines[1]["id"], "inst-002");
    assert_eq!(lines[1]["status"], "expired");
}

#[test]
fn test_routes_for_customer() {
    let harness = TestHarness::new();
    let output = harness.run_as("cu-001", &["routes"]);
    assert_success(&output);

    let paths: Vec<String> = json_lines(&output)
        .iter()
        .filter_map(|v| v["path"].as_str().map(str::to_string))
        .collect();
    assert_eq!(paths, vec!["/dashboard", "/reports"]);
}

#[test]
fn test_completion_generates_script() {
    let harness = TestHarness::uninitialized();
    let output = harness.run(&["completion", "bash"]);
    assert_success(&output);
    assert!(stdout(&output).contains("logbook"));
}

#[test]
fn test_inactive_user_cannot_act() {
    let harness = TestHarness::new();
    let output = harness.run_as(
        "op-003",
        &[
            "log", "chemical", "--chemical", "NaOH", "--equipment", "RE0001", "--target", "5",
            "--volume", "100",
        ],
    );
    assert!(!output.status.success());
    assert!(last_json(&output)["msg"]
        .as_str()
        .unwrap()
        .contains("User 'op-003' is inactive"));
    assert!(harness.repo_is_empty());
}

#[test]
fn test_users_listing_for_super_admin() {
    let harness = TestHarness::new();
    assert!(!harness.run_as("sv-001", &["users"]).status.success());

    let output = harness.run_as("ad-001", &["users"]);
    assert_success(&output);
    let lines = json_lines(&output);

    let former = lines.iter().find(|v| v["id"] == "op-003").unwrap();
    assert_eq!(former["status"], "inactive");
    let admin = lines.iter().find(|v| v["id"] == "ad-001").unwrap();
    assert_eq!(admin["role"], "super_admin");
    assert_eq!(admin["status"], "active");

    let counts = &last_json(&output)["active_by_role"];
    assert_eq!(counts["operator"], 2);
    assert_eq!(counts["supervisor"], 2);
    assert_eq!(counts["customer"], 1);
    assert_eq!(counts["super_admin"], 1);
}

#[test]
fn test_list_reports_by_type_and_search() {
    let harness = TestHarness::new();
    for (report_type, title) in [
        ("utility", "Chiller Performance - October"),
        ("validation", "ISO 7 Clean Room Validation - Q4"),
        ("chemical", "NaOH Usage - October"),
    ] {
        let output = harness.run_as(
            "op-001",
            &["log", "report", "--type", report_type, "--title", title],
        );
        assert_success(&output);
    }
    log_naoh(&harness, "op-001", &[]);

    let output = harness.run_as("sv-001", &["list", "--report-type", "validation"]);
    assert_success(&output);
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["entry"]["title"], "ISO 7 Clean Room Validation - Q4");

    let output = harness.run_as("sv-001", &["list", "--search", "october"]);
    assert_eq!(json_lines(&output).len(), 2);

    let output = harness.run_as("sv-001", &["list", "--kind", "report", "--search", "RPT-"]);
    assert_eq!(json_lines(&output).len(), 3);

    let output = harness.run_as(
        "sv-001",
        &["list", "--report-type", "chemical", "--search", "chiller"],
    );
    assert_eq!(last_json(&output)["msg"], "No records.");
}
