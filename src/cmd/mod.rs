//! Command handlers for the logbook CLI

use anyhow::{Context, Result};
use std::path::Path;

use logbook::config::Config;
use logbook::paths::CONFIG_PATH;
use logbook::repository::FileRecordRepository;
use logbook::role::Actor;

pub mod calc;
pub mod init;
pub mod log;
pub mod query;
pub mod review;
pub mod site;
pub mod ui;

/// Loaded configuration plus the record store it points at.
pub struct Workspace {
    pub config: Config,
    pub repo: FileRecordRepository,
}

impl Workspace {
    /// Resolve the acting user from the configured user table.
    pub fn actor(&self, user: Option<&str>) -> Result<Actor> {
        let user = user.context("No user given. Pass --user <id> or set LOGBOOK_USER")?;
        let actor = self
            .config
            .find_user(user)
            .with_context(|| format!("Unknown user '{}'. Add it to {}", user, CONFIG_PATH))?;
        if !actor.active {
            anyhow::bail!("User '{}' is inactive", actor.id);
        }
        tracing::debug!(user = %actor.id, role = %actor.role, "acting user resolved");
        Ok(actor.clone())
    }
}

/// Ensure logbook is initialized and load the workspace.
pub fn open_workspace() -> Result<Workspace> {
    if !Path::new(CONFIG_PATH).exists() {
        anyhow::bail!("LogBook not initialized. Run `logbook init` first.");
    }
    let config = Config::load()?;
    let repo = FileRecordRepository::new(config.records_dir()?);
    Ok(Workspace { config, repo })
}
