//! Which records an actor may see.
//!
//! Operators, supervisors and site-bound super admins see every record of
//! their site. An unbound super admin sees all sites. Customers see only the
//! approved records of their own site.

use crate::record::{Record, RecordStatus};
use crate::role::{Actor, Role};

pub fn can_view(actor: &Actor, record: &Record) -> bool {
    if !actor.covers_site(&record.frontmatter.site_id) {
        return false;
    }
    match actor.role {
        Role::Customer => record.status() == RecordStatus::Approved,
        Role::Operator | Role::Supervisor | Role::SuperAdmin => true,
    }
}

/// Filter `records` down to those `actor` may see, preserving order.
pub fn visible<'a, I>(actor: &Actor, records: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| can_view(actor, r))
        .cloned()
        .collect()
}
