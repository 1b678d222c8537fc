//! Rendering of records for terminal and JSON output.

use anyhow::Result;
use colored::Color;
use serde_json::{json, Value};

use logbook::record::{Entry, Record, RecordStatus};

use super::output::Output;

fn status_color(status: RecordStatus) -> Color {
    match status {
        RecordStatus::Draft => Color::White,
        RecordStatus::Pending => Color::Yellow,
        RecordStatus::Approved => Color::Green,
        RecordStatus::Rejected => Color::Red,
    }
}

pub fn status_label(out: &Output, status: RecordStatus) -> String {
    out.paint(&format!("{:<8}", status.as_str()), status_color(status))
}

/// One listing line.
pub fn record_line(out: &Output, record: &Record) -> String {
    format!(
        "{}  {}  {:<14}  {}  ({})",
        record.id,
        status_label(out, record.status()),
        record.kind().label(),
        record.frontmatter.entry.summary(),
        record.frontmatter.operator_name
    )
}

pub fn record_json(record: &Record) -> Result<Value> {
    let mut value = serde_json::to_value(&record.frontmatter)?;
    value["id"] = json!(record.id);
    value["notes"] = json!(record.body);
    Ok(value)
}

/// Emit a record as a listing line, or as JSON.
pub fn emit_record(out: &Output, record: &Record) -> Result<()> {
    out.data(&record_line(out, record), &record_json(record)?);
    Ok(())
}

/// Full record view.
pub fn show_record(out: &Output, record: &Record) -> Result<()> {
    let fm = &record.frontmatter;
    out.data(
        &format!("{}  {}", record.id, status_label(out, record.status())),
        &record_json(record)?,
    );
    out.field("Kind", record.kind().label());
    out.field("Site", &fm.site_id);
    out.field("Operator", &fm.operator_name);
    out.field("Created", &fm.created_at.to_rfc3339());
    if let Some(at) = fm.submitted_at {
        out.field("Submitted", &at.to_rfc3339());
    }

    match &fm.entry {
        Entry::Utility(u) => {
            out.field("Equipment", &format!("{} {}", u.equipment_type, u.equipment_id));
            out.field("T1 / T2 (°C)", &format!("{} / {}", u.t1, u.t2));
            out.field("P1 / P2 (bar)", &format!("{} / {}", u.p1, u.p2));
            out.field("Flow rate", &u.flow_rate.to_string());
        }
        Entry::Chemical(c) => {
            out.field("Chemical", &format!("{} ({}%)", c.chemical, c.stock_concentration));
            out.field("Equipment", &c.equipment_id);
            out.field("Target", &format!("{}%", c.target_concentration));
            out.field("Solution volume", &format!("{} L", c.solution_volume));
            out.field("Chemical quantity", &format!("{:.2} L", c.chemical_quantity));
        }
        Entry::AirValidation(a) => {
            let o = &a.outcome;
            out.field("Room", &format!("{} ({})", a.room_name, a.iso_class));
            out.field("Room volume", &format!("{} ft³", a.room_volume));
            out.field(
                "Air path",
                &format!(
                    "{} filters x {} ft²",
                    a.air_path.filter_count, a.air_path.filter_area_sqft
                ),
            );
            out.field(
                "Grid readings",
                &a.grid_readings
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            out.field("Average velocity", &format!("{:.2} ft/min", o.average_velocity));
            out.field("Flow rate", &format!("{:.2} CFM", o.flow_rate_cfm));
            out.field("Total airflow", &format!("{:.2} CFM", o.total_cfm));
            out.field("ACH", &format!("{:.2} (design {})", o.ach, o.design_spec));
            out.field("Result", &o.result.to_string());
        }
        Entry::Report(r) => {
            out.field("Title", &r.title);
            out.field("Report type", &r.report_type.to_string());
        }
    }

    if let Some(resolution) = &fm.resolution {
        out.field(
            "Resolved by",
            &format!("{} at {}", resolution.by_name, resolution.at.to_rfc3339()),
        );
        if let Some(remarks) = &resolution.remarks {
            out.field("Remarks", remarks);
        }
    }
    if !record.body.is_empty() {
        out.field("Notes", &record.body);
    }
    Ok(())
}
