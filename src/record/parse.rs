//! Record file format: YAML frontmatter followed by free-text remarks.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::frontmatter::{RecordFrontmatter, RecordKind, RecordStatus};
use crate::role::Actor;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub frontmatter: RecordFrontmatter,
    /// Operator remarks
    pub body: String,
}

/// Split content into frontmatter and body.
///
/// If the content starts with `---`, extracts the YAML frontmatter between
/// the first and second `---` delimiters, and returns the body after.
/// Otherwise returns None for frontmatter and the entire content as body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    if !content.starts_with("---") {
        return (None, content);
    }

    let rest = &content[3..];
    if let Some(end) = rest.find("\n---") {
        let frontmatter = rest[..end].to_string();
        let body = rest[end + 4..].trim_start();
        (Some(frontmatter), body)
    } else {
        (None, content)
    }
}

impl Record {
    pub fn status(&self) -> RecordStatus {
        self.frontmatter.status
    }

    pub fn kind(&self) -> RecordKind {
        self.frontmatter.entry.kind()
    }

    pub fn is_owned_by(&self, actor: &Actor) -> bool {
        self.frontmatter.operator_id == actor.id
    }

    /// Parse a record from file content.
    ///
    /// Derived fields are checked against a fresh computation; a file whose
    /// stored values were edited by hand is refused.
    pub fn parse(id: &str, content: &str) -> Result<Self> {
        let (frontmatter_str, body) = split_frontmatter(content);
        let frontmatter_str =
            frontmatter_str.with_context(|| format!("Record {} has no frontmatter", id))?;

        let frontmatter: RecordFrontmatter = serde_yaml::from_str(&frontmatter_str)
            .with_context(|| format!("Failed to parse frontmatter of record {}", id))?;

        frontmatter
            .entry
            .verify()
            .with_context(|| format!("Derived fields of record {} do not match its inputs", id))?;

        Ok(Self {
            id: id.to_string(),
            frontmatter,
            body: body.to_string(),
        })
    }

    /// Load a record from a file path. The file stem is the record ID.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read record from {}", path.display()))?;

        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid record filename"))?;

        Self::parse(id, &content)
    }

    pub fn to_markdown(&self) -> Result<String> {
        let frontmatter = serde_yaml::to_string(&self.frontmatter)?;
        Ok(format!("---\n{}---\n{}", frontmatter, self.body))
    }

    /// Save the record to a file, replacing it atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_markdown()?;
        let tmp_path = path.with_extension("md.tmp");
        fs::write(&tmp_path, &content)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
