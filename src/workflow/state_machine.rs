//! State machine for the record review lifecycle.
//!
//! Provides centralized validation of status transitions with role and
//! ownership checks. A failed transition leaves the record untouched.

use chrono::{DateTime, Utc};

use crate::error::{Action, Error, Result};
use crate::record::{Record, RecordStatus, Resolution};
use crate::role::Actor;

/// Builder for validated state transitions.
pub struct TransitionBuilder<'a> {
    record: &'a mut Record,
    actor: &'a Actor,
    remarks: Option<String>,
    at: Option<DateTime<Utc>>,
}

impl<'a> TransitionBuilder<'a> {
    /// Create a new transition builder for a record and the actor moving it.
    pub fn new(record: &'a mut Record, actor: &'a Actor) -> Self {
        Self {
            record,
            actor,
            remarks: None,
            at: None,
        }
    }

    /// Attach reviewer remarks. Blank remarks count as none.
    pub fn remarks(mut self, remarks: Option<&str>) -> Self {
        self.remarks = remarks
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        self
    }

    /// Timestamp to record instead of the current time.
    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }

    /// draft → pending, by the owning operator once derived fields check out.
    pub fn submit(self) -> Result<()> {
        let from = self.record.status();
        require_valid_transition(from, RecordStatus::Pending)?;

        if !self.record.is_owned_by(self.actor) {
            return Err(Error::Unauthorized {
                role: self.actor.role,
                action: Action::Submit,
            });
        }

        self.record.frontmatter.entry.verify()?;

        let at = self.at.unwrap_or_else(Utc::now);
        self.record.frontmatter.status = RecordStatus::Pending;
        self.record.frontmatter.submitted_at = Some(at);
        tracing::info!(record = %self.record.id, actor = %self.actor.id, "record submitted");
        Ok(())
    }

    /// pending → approved, by a supervisor or super admin.
    pub fn approve(self) -> Result<()> {
        self.resolve(RecordStatus::Approved, Action::Approve)
    }

    /// pending → rejected, by a supervisor or super admin, with remarks.
    pub fn reject(self) -> Result<()> {
        self.resolve(RecordStatus::Rejected, Action::Reject)
    }

    fn resolve(self, target: RecordStatus, action: Action) -> Result<()> {
        let from = self.record.status();
        require_valid_transition(from, target)?;

        if !self.actor.role.can_review() {
            return Err(Error::Unauthorized {
                role: self.actor.role,
                action,
            });
        }

        if target == RecordStatus::Rejected && self.remarks.is_none() {
            return Err(Error::MissingRemarks);
        }

        let at = self.at.unwrap_or_else(Utc::now);
        self.record.frontmatter.status = target;
        self.record.frontmatter.resolution = Some(Resolution {
            by_id: self.actor.id.clone(),
            by_name: self.actor.name.clone(),
            at,
            remarks: self.remarks,
        });
        tracing::info!(
            record = %self.record.id,
            actor = %self.actor.id,
            status = %target,
            "record resolved"
        );
        Ok(())
    }
}

/// Check if a transition from one status to another is valid.
pub fn is_valid_transition(from: RecordStatus, to: RecordStatus) -> bool {
    use RecordStatus::*;

    matches!((from, to), (Draft, Pending) | (Pending, Approved) | (Pending, Rejected))
}

fn require_valid_transition(from: RecordStatus, to: RecordStatus) -> Result<()> {
    if is_valid_transition(from, to) {
        Ok(())
    } else {
        Err(Error::InvalidTransition { from, to })
    }
}

// ============================================================================
// PUBLIC TRANSITION HELPERS
// ============================================================================

/// Submit a draft for review.
pub fn submit(record: &mut Record, actor: &Actor) -> Result<()> {
    TransitionBuilder::new(record, actor).submit()
}

/// Approve a pending record. Remarks are optional.
pub fn approve(record: &mut Record, actor: &Actor, remarks: Option<&str>) -> Result<()> {
    TransitionBuilder::new(record, actor).remarks(remarks).approve()
}

/// Reject a pending record. Remarks are mandatory.
pub fn reject(record: &mut Record, actor: &Actor, remarks: &str) -> Result<()> {
    TransitionBuilder::new(record, actor)
        .remarks(Some(remarks))
        .reject()
}
