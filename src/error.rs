//! Error taxonomy shared by calculators, the approval workflow and storage.

use std::fmt;

use thiserror::Error;

use crate::record::RecordStatus;
use crate::role::Role;

/// Result type alias for logbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Actions an actor may attempt on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Edit,
    Submit,
    Approve,
    Reject,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create records"),
            Action::Edit => write!(f, "edit this record"),
            Action::Submit => write!(f, "submit this record"),
            Action::Approve => write!(f, "approve records"),
            Action::Reject => write!(f, "reject records"),
        }
    }
}

/// Errors returned to the caller as values.
#[derive(Debug, Error)]
pub enum Error {
    /// A numeric input is outside its domain or not a number.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A rejection was attempted without a justification.
    #[error("Remarks are required to reject a record")]
    MissingRemarks,

    /// The actor's role (or identity) does not permit the action.
    #[error("{role} is not allowed to {action}")]
    Unauthorized { role: Role, action: Action },

    /// The record's current status does not allow the requested move.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: RecordStatus, to: RecordStatus },

    #[error("Record '{0}' not found")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl Error {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Stable tag used in JSON output.
    pub fn tag(&self) -> &'static str {
        match self {
            Error::InvalidInput { .. } => "invalid_input",
            Error::MissingRemarks => "missing_remarks",
            Error::Unauthorized { .. } => "unauthorized",
            Error::InvalidTransition { .. } => "invalid_transition",
            Error::NotFound(_) => "not_found",
            Error::Storage(_) => "storage",
        }
    }
}
