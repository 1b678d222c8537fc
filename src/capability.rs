//! Static route capability table.
//!
//! Each dashboard page lists the roles allowed to open it. The table is data,
//! checked with plain lookups.

use crate::role::Role;

use Role::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub label: &'static str,
    pub roles: &'static [Role],
}

pub const ROUTES: &[Route] = &[
    Route {
        path: "/dashboard",
        label: "Dashboard",
        roles: &[Operator, Supervisor, Customer, SuperAdmin],
    },
    Route {
        path: "/logbooks",
        label: "Logbooks",
        roles: &[Operator, Supervisor, SuperAdmin],
    },
    Route {
        path: "/logbook-builder",
        label: "Logbook Builder",
        roles: &[SuperAdmin],
    },
    Route {
        path: "/utility-logs",
        label: "Utility Logs",
        roles: &[Operator, Supervisor, SuperAdmin],
    },
    Route {
        path: "/chemical-prep",
        label: "Chemical Prep",
        roles: &[Operator, Supervisor, SuperAdmin],
    },
    Route {
        path: "/air-validation",
        label: "Air Validation",
        roles: &[Operator, Supervisor, SuperAdmin],
    },
    Route {
        path: "/instruments",
        label: "Instruments",
        roles: &[Supervisor, SuperAdmin],
    },
    Route {
        path: "/reports",
        label: "Reports",
        roles: &[Supervisor, Customer, SuperAdmin],
    },
    Route {
        path: "/users",
        label: "User Management",
        roles: &[SuperAdmin],
    },
    Route {
        path: "/settings",
        label: "Settings",
        roles: &[SuperAdmin],
    },
];

/// Routes visible to a role, in table order.
pub fn routes_for(role: Role) -> impl Iterator<Item = &'static Route> {
    ROUTES.iter().filter(move |r| r.roles.contains(&role))
}

/// Whether `role` may open `path`. Unknown paths are closed to everyone.
pub fn can_access(role: Role, path: &str) -> bool {
    ROUTES
        .iter()
        .find(|r| r.path == path)
        .map(|r| r.roles.contains(&role))
        .unwrap_or(false)
}
