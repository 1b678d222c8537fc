//! Submit, approve and reject operations.
//!
//! Each loads the stored record, applies the transition to a copy and commits
//! it with the repository's status check-and-set. When two actors race on
//! the same record, the loser gets `InvalidTransition` naming the status the
//! winner left behind.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::repository::RecordRepository;
use crate::role::Actor;
use crate::workflow::{self, can_view};

fn transition<F>(repo: &dyn RecordRepository, id: &str, actor: &Actor, apply: F) -> Result<Record>
where
    F: FnOnce(&mut Record) -> Result<()>,
{
    let current = repo.get(id)?;
    if !can_view(actor, &current) {
        return Err(Error::NotFound(id.to_string()));
    }

    let mut updated = current.clone();
    apply(&mut updated)?;
    repo.compare_and_swap(current.status(), &updated)?;
    Ok(updated)
}

/// Send a draft for review.
pub fn submit_record(repo: &dyn RecordRepository, id: &str, actor: &Actor) -> Result<Record> {
    transition(repo, id, actor, |record| workflow::submit(record, actor))
}

pub fn approve_record(
    repo: &dyn RecordRepository,
    id: &str,
    actor: &Actor,
    remarks: Option<&str>,
) -> Result<Record> {
    transition(repo, id, actor, |record| {
        workflow::approve(record, actor, remarks)
    })
}

pub fn reject_record(
    repo: &dyn RecordRepository,
    id: &str,
    actor: &Actor,
    remarks: &str,
) -> Result<Record> {
    transition(repo, id, actor, |record| {
        workflow::reject(record, actor, remarks)
    })
}
