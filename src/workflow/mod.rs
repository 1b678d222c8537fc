//! Review workflow: status transitions and visibility policy.

pub mod state_machine;
pub mod visibility;

pub use state_machine::{approve, is_valid_transition, reject, submit, TransitionBuilder};
pub use visibility::{can_view, visible};
