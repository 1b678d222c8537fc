//! Record creation operation.

use chrono::{DateTime, Utc};

use crate::error::{Action, Error, Result};
use crate::id;
use crate::record::{Entry, Record, RecordFrontmatter, RecordStatus};
use crate::repository::RecordRepository;
use crate::role::Actor;
use crate::workflow;

/// Options for record creation
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Free-text notes stored as the record body
    pub notes: String,
    /// Send the record for review straight away
    pub submit: bool,
    /// Creation time; defaults to now
    pub at: Option<DateTime<Utc>>,
}

/// Create a new draft record owned by `actor` at `site_id`.
///
/// Derived fields are recomputed from the entry's inputs before anything is
/// stored. With `options.submit` the record is stored as pending.
pub fn create_record(
    repo: &dyn RecordRepository,
    site_id: &str,
    actor: &Actor,
    mut entry: Entry,
    options: CreateOptions,
) -> Result<Record> {
    if !actor.role.can_log() || !actor.covers_site(site_id) {
        return Err(Error::Unauthorized {
            role: actor.role,
            action: Action::Create,
        });
    }

    entry.recompute()?;

    let created_at = options.at.unwrap_or_else(Utc::now);
    let existing = repo.list()?;
    let id = id::generate_id(
        entry.kind(),
        created_at.date_naive(),
        existing.iter().map(|r| r.id.as_str()),
    );

    let mut record = Record {
        id,
        frontmatter: RecordFrontmatter {
            status: RecordStatus::Draft,
            site_id: site_id.to_string(),
            operator_id: actor.id.clone(),
            operator_name: actor.name.clone(),
            created_at,
            submitted_at: None,
            resolution: None,
            entry,
        },
        body: options.notes.trim().to_string(),
    };

    if options.submit {
        workflow::state_machine::TransitionBuilder::new(&mut record, actor)
            .at(created_at)
            .submit()?;
    }

    repo.save(&record)?;
    tracing::info!(
        record = %record.id,
        kind = record.kind().as_str(),
        status = %record.status(),
        "record created"
    );
    Ok(record)
}
