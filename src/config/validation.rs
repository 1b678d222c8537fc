//! Validation logic for configuration.

use anyhow::{Context, Result};
use std::collections::HashSet;

use super::defaults::RoomConfig;
use super::Config;
use crate::role::Role;

impl Config {
    /// Validate the merged configuration
    pub fn validate(&self) -> Result<()> {
        if self.site.id.trim().is_empty() {
            anyhow::bail!("site.id is required");
        }

        let mut user_ids = HashSet::new();
        for user in &self.users {
            if !user_ids.insert(user.id.as_str()) {
                anyhow::bail!("Duplicate user id '{}'", user.id);
            }
            if user.site_id.is_none() && user.role != Role::SuperAdmin {
                anyhow::bail!(
                    "User '{}' has role {} but no site_id; only super_admin may be unbound",
                    user.id,
                    user.role
                );
            }
        }

        for chemical in &self.chemicals {
            let stock = chemical.stock_concentration;
            if !(stock > 0.0 && stock <= 100.0) {
                anyhow::bail!(
                    "Chemical '{}' has stock concentration {}, expected a percentage in (0, 100]",
                    chemical.name,
                    stock
                );
            }
        }

        let mut room_names = HashSet::new();
        for room in &self.rooms {
            if !room_names.insert(room.name.to_lowercase()) {
                anyhow::bail!("Duplicate room '{}'", room.name);
            }
            room.validate()?;
        }

        Ok(())
    }
}

impl RoomConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.volume.is_finite() && self.volume > 0.0) {
            anyhow::bail!("Room '{}' volume must be greater than 0", self.name);
        }
        self.air_path()
            .validate()
            .with_context(|| format!("Room '{}' has an invalid air path", self.name))
    }
}
