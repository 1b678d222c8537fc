//! Listing, lookup and status counts, all filtered by visibility.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::{Entry, Record, RecordKind, RecordStatus, ReportType};
use crate::repository::RecordRepository;
use crate::role::Actor;
use crate::workflow::visible;

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<RecordStatus>,
    pub kind: Option<RecordKind>,
    /// Only reports of this type
    pub report_type: Option<ReportType>,
    /// Case-insensitive text matched against the record ID and its summary
    /// (a report's title)
    pub search: Option<String>,
}

impl ListFilter {
    fn matches(&self, record: &Record) -> bool {
        self.status.map_or(true, |s| record.status() == s)
            && self.kind.map_or(true, |k| record.kind() == k)
            && self.report_type.map_or(true, |t| {
                matches!(&record.frontmatter.entry, Entry::Report(r) if r.report_type == t)
            })
            && self.matches_search(record)
    }

    fn matches_search(&self, record: &Record) -> bool {
        let needle = match self.search.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_lowercase(),
            _ => return true,
        };
        record.id.to_lowercase().contains(&needle)
            || record
                .frontmatter
                .entry
                .summary()
                .to_lowercase()
                .contains(&needle)
    }
}

/// Records visible to `actor`, newest first.
pub fn list_records(
    repo: &dyn RecordRepository,
    actor: &Actor,
    filter: &ListFilter,
) -> Result<Vec<Record>> {
    let all = repo.list()?;
    let mut records: Vec<Record> = visible(actor, &all)
        .into_iter()
        .filter(|r| filter.matches(r))
        .collect();
    records.sort_by(|a, b| {
        b.frontmatter
            .created_at
            .cmp(&a.frontmatter.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    Ok(records)
}

/// Resolve a full or partial record ID among the records visible to `actor`.
///
/// Tries an exact match, then a unique suffix match, then a unique substring
/// match. Records the actor may not see are reported as not found.
pub fn find_record(repo: &dyn RecordRepository, actor: &Actor, partial_id: &str) -> Result<Record> {
    let all = repo.list()?;
    let records = visible(actor, &all);

    if let Some(record) = records.iter().find(|r| r.id == partial_id) {
        return Ok(record.clone());
    }

    let suffix_matches: Vec<&Record> = records
        .iter()
        .filter(|r| r.id.ends_with(partial_id))
        .collect();
    if suffix_matches.len() == 1 {
        return Ok(suffix_matches[0].clone());
    }

    let partial_matches: Vec<&Record> = records
        .iter()
        .filter(|r| r.id.contains(partial_id))
        .collect();
    match partial_matches.as_slice() {
        [] => Err(Error::NotFound(partial_id.to_string())),
        [only] => Ok((*only).clone()),
        many => Err(Error::invalid_input(
            "record id",
            format!(
                "'{}' is ambiguous, matches: {}",
                partial_id,
                many.iter()
                    .map(|r| r.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )),
    }
}

/// Record counts per status, as shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub draft: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusSummary {
    pub fn total(&self) -> usize {
        self.draft + self.pending + self.approved + self.rejected
    }
}

pub fn summarize(repo: &dyn RecordRepository, actor: &Actor) -> Result<StatusSummary> {
    let all = repo.list()?;
    let mut summary = StatusSummary::default();
    for record in visible(actor, &all) {
        match record.status() {
            RecordStatus::Draft => summary.draft += 1,
            RecordStatus::Pending => summary.pending += 1,
            RecordStatus::Approved => summary.approved += 1,
            RecordStatus::Rejected => summary.rejected += 1,
        }
    }
    Ok(summary)
}
