//! Configuration management for logbook projects.
//!
//! The project config lives in `.logbook/config.md` as YAML frontmatter. An
//! optional global config at `~/.config/logbook/config.md` supplies sections
//! the project config leaves out.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calc::concentration::Chemical;
use crate::paths::CONFIG_PATH;
use crate::record::split_frontmatter;
use crate::role::Actor;

pub mod defaults;
pub mod validation;

pub use defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    /// Authoritative user table. An actor's role comes from here only.
    #[serde(default)]
    pub users: Vec<Actor>,
    #[serde(default = "defaults::default_chemicals")]
    pub chemicals: Vec<Chemical>,
    #[serde(default)]
    pub rooms: Vec<RoomConfig>,
    #[serde(default)]
    pub equipment: EquipmentConfig,
    #[serde(default)]
    pub instruments: InstrumentsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/logbook/config.md)
    /// 2. Project config (.logbook/config.md)
    pub fn load() -> Result<Self> {
        Self::load_merged_from(global_config_path().as_deref(), Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        let config: Config =
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?;
        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from specified global and project config paths.
    /// Each section of the project config replaces the same global section.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = PartialConfig::load_from(project_path)?;

        let config = global_config.merge_with(project_config);
        config.validate()?;
        tracing::debug!(
            site = %config.site.id,
            users = config.users.len(),
            rooms = config.rooms.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Render as a config file.
    pub fn to_markdown(&self) -> Result<String> {
        let frontmatter = serde_yaml::to_string(self)?;
        Ok(format!(
            "---\n{}---\n\n# LogBook Configuration\n\nUsers, rooms and equipment for site {}.\n",
            frontmatter, self.site.id
        ))
    }

    pub fn find_user(&self, id: &str) -> Option<&Actor> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_room(&self, name: &str) -> Option<&RoomConfig> {
        self.rooms
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Records directory with `~` and environment variables expanded.
    pub fn records_dir(&self) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.storage.records_dir).with_context(|| {
            format!(
                "Failed to expand storage.records_dir '{}'",
                self.storage.records_dir
            )
        })?;
        Ok(PathBuf::from(expanded.into_owned()))
    }
}

/// Returns the path to the global config file at ~/.config/logbook/config.md
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/logbook/config.md"))
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub site: Option<SiteConfig>,
    pub users: Option<Vec<Actor>>,
    pub chemicals: Option<Vec<Chemical>>,
    pub rooms: Option<Vec<RoomConfig>>,
    pub equipment: Option<EquipmentConfig>,
    pub instruments: Option<InstrumentsConfig>,
    pub storage: Option<StorageConfig>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        Config {
            site: project.site.or(self.site).unwrap_or_default(),
            users: project.users.or(self.users).unwrap_or_default(),
            chemicals: project
                .chemicals
                .or(self.chemicals)
                .unwrap_or_else(defaults::default_chemicals),
            rooms: project.rooms.or(self.rooms).unwrap_or_default(),
            equipment: project.equipment.or(self.equipment).unwrap_or_default(),
            instruments: project.instruments.or(self.instruments).unwrap_or_default(),
            storage: project.storage.or(self.storage).unwrap_or_default(),
        }
    }
}
