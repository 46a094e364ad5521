//! Per-tool install metadata
//!
//! After a real (non-dry-run) install, a small JSON file is written into
//! the tool's folder recording what was installed and when. The file is
//! informational: presence detection never trusts it over the filesystem,
//! and its absence is not an error.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ToolshedError};
use crate::manifest::ToolDescriptor;
use crate::source::SourceKind;

/// Metadata file name inside an installed tool's folder
pub const METADATA_FILE: &str = ".toolshed.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub display_name: String,
    pub source_kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub install_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
    /// RFC 3339 timestamp of the last successful install
    pub installed_at: String,
}

impl ToolMetadata {
    pub fn from_descriptor(descriptor: &ToolDescriptor) -> ToolMetadata {
        ToolMetadata {
            name: descriptor.name.clone(),
            display_name: descriptor.display_name.clone(),
            source_kind: descriptor.source_kind,
            url: descriptor.url.clone(),
            install_steps: descriptor.install_steps.clone(),
            start_command: descriptor.start_command.clone(),
            installed_at: Utc::now().to_rfc3339(),
        }
    }

    /// Write the metadata file into a tool folder
    pub fn save(&self, tool_dir: &Path) -> Result<()> {
        let path = tool_dir.join(METADATA_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|e| ToolshedError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Read the metadata file from a tool folder, `None` when missing or
    /// unreadable (a hand-managed folder is still a valid tool folder).
    pub fn load(tool_dir: &Path) -> Option<ToolMetadata> {
        let path = tool_dir.join(METADATA_FILE);
        if !path.exists() {
            return None;
        }
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!(path = %path.display(), "unreadable tool metadata: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let descriptor = ToolDescriptor::from_url("https://github.com/org/toolA", None).unwrap();

        let metadata = ToolMetadata::from_descriptor(&descriptor);
        metadata.save(dir.path()).unwrap();

        let loaded = ToolMetadata::load(dir.path()).unwrap();
        assert_eq!(loaded.name, "toolA");
        assert_eq!(loaded.source_kind, SourceKind::CodeHost);
        assert!(!loaded.installed_at.is_empty());
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(ToolMetadata::load(dir.path()).is_none());
    }

    #[test]
    fn test_load_garbage_is_none() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(METADATA_FILE), "{not json").unwrap();
        assert!(ToolMetadata::load(dir.path()).is_none());
    }
}
