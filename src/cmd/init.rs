//! Initialize logbook in a project directory
//!
//! Creates `.logbook/config.md` with a starter configuration and the records
//! directory it points at.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use logbook::config::{Config, EquipmentConfig, InstrumentsConfig, SiteConfig, StorageConfig};
use logbook::calc::concentration;
use logbook::paths::{CONFIG_PATH, LOGBOOK_DIR};
use logbook::role::{Actor, Role};

use super::ui::Output;

/// Starter configuration: the site and a single unbound super admin.
fn starter_config(site: &str, name: Option<String>) -> Config {
    Config {
        site: SiteConfig {
            id: site.to_string(),
            name: name.unwrap_or_else(|| site.to_string()),
            location: None,
        },
        users: vec![Actor::new("admin", "Administrator", Role::SuperAdmin, None)],
        chemicals: concentration::default_catalog(),
        rooms: vec![],
        equipment: EquipmentConfig::default(),
        instruments: InstrumentsConfig::default(),
        storage: StorageConfig::default(),
    }
}

pub fn cmd_init(out: &Output, site: &str, name: Option<String>, force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() && !force {
        anyhow::bail!(
            "LogBook already initialized ({} exists). Use --force to overwrite.",
            CONFIG_PATH
        );
    }

    let config = starter_config(site, name);
    config.validate()?;

    fs::create_dir_all(LOGBOOK_DIR)
        .with_context(|| format!("Failed to create {}", LOGBOOK_DIR))?;
    fs::write(config_path, config.to_markdown()?)
        .with_context(|| format!("Failed to write {}", CONFIG_PATH))?;

    let records_dir = config.records_dir()?;
    fs::create_dir_all(&records_dir)
        .with_context(|| format!("Failed to create {}", records_dir.display()))?;

    tracing::info!(site = %config.site.id, "logbook initialized");
    out.success(&format!("Initialized LogBook for site {}", config.site.id));
    out.info(&format!(
        "Add users, rooms and instruments to {}, then run commands with --user <id>.",
        CONFIG_PATH
    ));
    Ok(())
}
