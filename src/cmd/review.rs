//! Draft correction and the review transitions.

use anyhow::Result;

use logbook::error::Error;
use logbook::operations;
use logbook::record::Entry;

use super::ui::{render, Output};
use super::Workspace;
use crate::cli::RecomputeArgs;

/// Apply the flags that belong to `entry`'s kind. Flags for other kinds are
/// rejected so a typo does not silently do nothing.
fn apply_overrides(entry: &mut Entry, args: &RecomputeArgs) -> logbook::Result<()> {
    let chemical = args.target.is_some() || args.volume.is_some();
    let air = args.readings.is_some() || args.room_volume.is_some();
    let utility = args.t1.is_some()
        || args.t2.is_some()
        || args.p1.is_some()
        || args.p2.is_some()
        || args.flow_rate.is_some();
    let report = args.title.is_some();

    let foreign = match entry {
        Entry::Utility(u) => {
            u.t1 = args.t1.unwrap_or(u.t1);
            u.t2 = args.t2.unwrap_or(u.t2);
            u.p1 = args.p1.unwrap_or(u.p1);
            u.p2 = args.p2.unwrap_or(u.p2);
            u.flow_rate = args.flow_rate.unwrap_or(u.flow_rate);
            chemical || air || report
        }
        Entry::Chemical(c) => {
            c.target_concentration = args.target.unwrap_or(c.target_concentration);
            c.solution_volume = args.volume.unwrap_or(c.solution_volume);
            utility || air || report
        }
        Entry::AirValidation(a) => {
            if let Some(readings) = &args.readings {
                a.grid_readings = readings.clone();
            }
            a.room_volume = args.room_volume.unwrap_or(a.room_volume);
            utility || chemical || report
        }
        Entry::Report(r) => {
            if let Some(title) = &args.title {
                r.title = title.trim().to_string();
            }
            utility || chemical || air
        }
    };

    if foreign {
        return Err(Error::invalid_input(
            "recompute flags",
            format!("some flags do not apply to a {} record", entry.kind().label()),
        ));
    }
    Ok(())
}

pub fn cmd_recompute(out: &Output, ws: &Workspace, user: Option<&str>, args: &RecomputeArgs) -> Result<()> {
    let actor = ws.actor(user)?;
    let record = operations::find_record(&ws.repo, &actor, &args.id)?;
    let updated =
        operations::recompute_record(&ws.repo, &record.id, &actor, |entry| apply_overrides(entry, args))?;

    out.success(&format!("Recomputed {}", updated.id));
    render::emit_record(out, &updated)
}

pub fn cmd_submit(out: &Output, ws: &Workspace, user: Option<&str>, id: &str) -> Result<()> {
    let actor = ws.actor(user)?;
    let record = operations::find_record(&ws.repo, &actor, id)?;
    let updated = operations::submit_record(&ws.repo, &record.id, &actor)?;

    out.success(&format!("Submitted {} for review", updated.id));
    render::emit_record(out, &updated)
}

pub fn cmd_approve(
    out: &Output,
    ws: &Workspace,
    user: Option<&str>,
    id: &str,
    remarks: Option<&str>,
) -> Result<()> {
    let actor = ws.actor(user)?;
    let record = operations::find_record(&ws.repo, &actor, id)?;
    let updated = operations::approve_record(&ws.repo, &record.id, &actor, remarks)?;

    out.success(&format!("Approved {}", updated.id));
    render::emit_record(out, &updated)
}

pub fn cmd_reject(
    out: &Output,
    ws: &Workspace,
    user: Option<&str>,
    id: &str,
    remarks: &str,
) -> Result<()> {
    let actor = ws.actor(user)?;
    let record = operations::find_record(&ws.repo, &actor, id)?;
    let updated = operations::reject_record(&ws.repo, &record.id, &actor, remarks)?;

    out.success(&format!("Rejected {}", updated.id));
    render::emit_record(out, &updated)
}
