//! Roles and the actors that carry them.
//!
//! An actor's role is resolved from the configured user table. There is no
//! way to change it at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Operator,
    Supervisor,
    Customer,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Operator,
        Role::Supervisor,
        Role::Customer,
        Role::SuperAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Supervisor => "supervisor",
            Role::Customer => "customer",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Display label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Operator => "Operator",
            Role::Supervisor => "Supervisor",
            Role::Customer => "Client",
            Role::SuperAdmin => "Super Admin",
        }
    }

    /// Whether this role may approve or reject pending records.
    pub fn can_review(&self) -> bool {
        matches!(self, Role::Supervisor | Role::SuperAdmin)
    }

    /// Whether this role may log new records.
    pub fn can_log(&self) -> bool {
        !matches!(self, Role::Customer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown role '{}'. Expected one of: operator, supervisor, customer, super_admin",
                    s
                )
            })
    }
}

/// A person acting on records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    /// Site the actor belongs to. Only super admins may be unbound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Inactive users stay in the table for attribution but may not act.
    #[serde(default = "active_default", skip_serializing_if = "is_active")]
    pub active: bool,
}

fn active_default() -> bool {
    true
}

fn is_active(active: &bool) -> bool {
    *active
}

impl Actor {
    pub fn new(id: &str, name: &str, role: Role, site_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            role,
            site_id: site_id.map(str::to_string),
            active: true,
        }
    }

    /// Whether the actor may see records belonging to `site_id`.
    pub fn covers_site(&self, site_id: &str) -> bool {
        match &self.site_id {
            Some(own) => own == site_id,
            None => self.role == Role::SuperAdmin,
        }
    }
}

/// Number of active users per role, in `Role::ALL` order.
pub fn count_by_role<'a, I>(actors: I) -> Vec<(Role, usize)>
where
    I: IntoIterator<Item = &'a Actor>,
{
    let mut counts: Vec<(Role, usize)> = Role::ALL.iter().map(|r| (*r, 0)).collect();
    for actor in actors.into_iter().filter(|a| a.active) {
        if let Some((_, n)) = counts.iter_mut().find(|(r, _)| *r == actor.role) {
            *n += 1;
        }
    }
    counts
}
