//! Site-level views: instrument calibration, users and route capabilities.

use anyhow::Result;
use chrono::Local;
use colored::Color;
use serde_json::json;

use logbook::capability;
use logbook::instrument::CalibrationStatus;
use logbook::role;

use super::ui::Output;
use super::Workspace;

pub fn cmd_instruments(out: &Output, ws: &Workspace, user: Option<&str>) -> Result<()> {
    let actor = ws.actor(user)?;
    if !capability::can_access(actor.role, "/instruments") {
        anyhow::bail!("{} may not view instruments", actor.role.label());
    }

    let instruments = &ws.config.instruments;
    if instruments.items.is_empty() {
        out.info("No instruments configured.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    for inst in &instruments.items {
        let status = inst.status(today, instruments.expiring_within_days);
        let days = inst.days_until_due(today);
        let color = match status {
            CalibrationStatus::Valid => Color::Green,
            CalibrationStatus::Expiring => Color::Yellow,
            CalibrationStatus::Expired => Color::Red,
        };
        out.data(
            &format!(
                "{:<10} {:<28} {}  due {} ({} days)",
                inst.id,
                inst.name,
                out.paint(&format!("{:<8}", status), color),
                inst.calibration_due_date,
                days
            ),
            &json!({
                "id": inst.id,
                "name": inst.name,
                "make": inst.make,
                "model": inst.model,
                "serial_number": inst.serial_number,
                "calibration_date": inst.calibration_date,
                "calibration_due_date": inst.calibration_due_date,
                "days_until_due": days,
                "status": status,
            }),
        );
        if status == CalibrationStatus::Expired {
            tracing::warn!(instrument = %inst.id, "calibration expired");
        }
    }
    Ok(())
}

/// The configured user table with per-role counts of active users.
pub fn cmd_users(out: &Output, ws: &Workspace, user: Option<&str>) -> Result<()> {
    let actor = ws.actor(user)?;
    if !capability::can_access(actor.role, "/users") {
        anyhow::bail!("{} may not view users", actor.role.label());
    }

    for u in &ws.config.users {
        let status = if u.active { "active" } else { "inactive" };
        let status_color = if u.active { Color::Green } else { Color::Red };
        out.data(
            &format!(
                "{:<10} {:<24} {:<12} {:<10} {}",
                u.id,
                u.name,
                u.role.label(),
                u.site_id.as_deref().unwrap_or("all sites"),
                out.paint(status, status_color)
            ),
            &json!({
                "id": u.id,
                "name": u.name,
                "email": u.email,
                "role": u.role,
                "site_id": u.site_id,
                "status": status,
            }),
        );
    }

    let counts = role::count_by_role(&ws.config.users);
    let by_role: serde_json::Map<String, serde_json::Value> = counts
        .iter()
        .map(|(role, n)| (role.as_str().to_string(), json!(n)))
        .collect();
    out.data("Active users by role:", &json!({ "active_by_role": by_role }));
    for (role, n) in &counts {
        out.field(role.label(), &n.to_string());
    }
    Ok(())
}

pub fn cmd_routes(out: &Output, ws: &Workspace, user: Option<&str>) -> Result<()> {
    let actor = ws.actor(user)?;
    out.info(&format!("{} ({})", actor.name, actor.role.label()));
    for route in capability::routes_for(actor.role) {
        out.data(
            &format!("  {:<18} {}", route.path, route.label),
            &json!({ "path": route.path, "label": route.label }),
        );
    }
    Ok(())
}
