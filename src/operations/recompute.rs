//! Draft correction: edit inputs and re-derive computed fields.

use crate::error::{Action, Error, Result};
use crate::record::{Entry, Record, RecordStatus};
use crate::repository::RecordRepository;
use crate::role::Actor;
use crate::workflow::can_view;

/// Apply `edit` to a draft's entry, recompute derived fields and store it.
///
/// Only the owning operator may edit, and only while the record is a draft.
/// The stored copy is replaced only if it is still a draft at commit time.
pub fn recompute_record<F>(
    repo: &dyn RecordRepository,
    id: &str,
    actor: &Actor,
    edit: F,
) -> Result<Record>
where
    F: FnOnce(&mut Entry) -> Result<()>,
{
    let current = repo.get(id)?;
    if !can_view(actor, &current) {
        return Err(Error::NotFound(id.to_string()));
    }
    if current.status() != RecordStatus::Draft {
        return Err(Error::InvalidTransition {
            from: current.status(),
            to: RecordStatus::Draft,
        });
    }
    if !current.is_owned_by(actor) {
        return Err(Error::Unauthorized {
            role: actor.role,
            action: Action::Edit,
        });
    }

    let mut updated = current.clone();
    edit(&mut updated.frontmatter.entry)?;
    if updated.kind() != current.kind() {
        return Err(Error::invalid_input(
            "entry",
            format!(
                "cannot change a {} record into a {} record",
                current.kind().as_str(),
                updated.kind().as_str()
            ),
        ));
    }
    updated.frontmatter.entry.recompute()?;

    repo.compare_and_swap(RecordStatus::Draft, &updated)?;
    tracing::info!(record = %updated.id, "record recomputed");
    Ok(updated)
}
