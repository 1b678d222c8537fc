//! Read-only record commands: list, show, summary.

use anyhow::Result;
use serde_json::json;

use logbook::operations::{self, ListFilter};
use logbook::record::{RecordKind, RecordStatus, ReportType};

use super::ui::{render, Output};
use super::Workspace;

pub fn cmd_list(
    out: &Output,
    ws: &Workspace,
    user: Option<&str>,
    status: Option<RecordStatus>,
    kind: Option<RecordKind>,
    report_type: Option<ReportType>,
    search: Option<String>,
) -> Result<()> {
    let actor = ws.actor(user)?;
    let filter = ListFilter {
        status,
        kind,
        report_type,
        search,
    };
    let records = operations::list_records(&ws.repo, &actor, &filter)?;

    if records.is_empty() {
        out.info("No records.");
        return Ok(());
    }
    for record in &records {
        render::emit_record(out, record)?;
    }
    Ok(())
}

pub fn cmd_show(out: &Output, ws: &Workspace, user: Option<&str>, id: &str) -> Result<()> {
    let actor = ws.actor(user)?;
    let record = operations::find_record(&ws.repo, &actor, id)?;
    render::show_record(out, &record)
}

pub fn cmd_summary(out: &Output, ws: &Workspace, user: Option<&str>) -> Result<()> {
    let actor = ws.actor(user)?;
    let summary = operations::summarize(&ws.repo, &actor)?;

    out.data(
        &format!("{} records", summary.total()),
        &json!({
            "draft": summary.draft,
            "pending": summary.pending,
            "approved": summary.approved,
            "rejected": summary.rejected,
            "total": summary.total(),
        }),
    );
    out.field("Draft", &summary.draft.to_string());
    out.field("Pending", &summary.pending.to_string());
    out.field("Approved", &summary.approved.to_string());
    out.field("Rejected", &summary.rejected.to_string());
    Ok(())
}
