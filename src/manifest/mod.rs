//! Tool manifests
//!
//! A manifest is an ordered, name-keyed collection of tool descriptors plus
//! optional named profiles (subsets of tools to install together). Manifests
//! live as YAML or JSON documents under the workspace `manifests/` directory
//! and are the installer's only input.
//!
//! ## Module Organization
//!
//! - `mod.rs`: descriptor and manifest data structures, entry validation
//! - `store.rs`: loading, saving, and managing manifest documents

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolshedError};
use crate::source::SourceKind;

pub mod store;

/// Identity and install recipe for one tool.
///
/// Immutable once constructed: the installer only reads it. `install_steps`
/// are opaque shell strings handed to the platform shell verbatim; the core
/// never parses or validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique key within a manifest
    pub name: String,

    /// Human label, defaults to `name`
    pub display_name: String,

    /// Where the tool comes from
    pub source_kind: SourceKind,

    /// Remote URL; required unless the tool is a custom one with no remote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Shell commands run in declared order inside the target folder
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub install_steps: Vec<String>,

    /// Informational only; never executed by toolshed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,

    /// Folder under the source kind's base directory, defaults to `name`
    pub target_folder: String,

    /// Create an isolated environment in the target folder before install steps
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub needs_isolated_environment: bool,

    /// Import names probed for library-style presence detection
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub import_probes: Vec<String>,
}

impl ToolDescriptor {
    /// Build a descriptor from a bare URL with heuristic defaults.
    ///
    /// The name falls back to the URL's last path segment, the source kind
    /// is classified from the host.
    pub fn from_url(url: &str, name: Option<String>) -> Result<ToolDescriptor> {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => name_from_url(url).ok_or_else(|| ToolshedError::InvalidDescriptor {
                reason: format!("cannot derive a tool name from '{}'", url),
            })?,
        };
        let source_kind = SourceKind::classify(url);

        Ok(ToolDescriptor {
            display_name: name.clone(),
            target_folder: name.clone(),
            name,
            source_kind,
            url: Some(url.to_string()),
            description: None,
            install_steps: Vec::new(),
            start_command: None,
            needs_isolated_environment: false,
            import_probes: Vec::new(),
        })
    }
}

/// Derive a tool name from the last path segment of a URL
fn name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.trim_end_matches(".git").trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// A manifest entry as it appears on disk, before validation.
///
/// Every field is optional here so that one malformed entry can be skipped
/// with a warning instead of failing the whole document. Unknown fields are
/// ignored for forward compatibility.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawToolEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub source_kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub install_steps: Vec<String>,
    #[serde(default)]
    pub start_command: Option<String>,
    #[serde(default)]
    pub target_folder: Option<String>,
    #[serde(default)]
    pub needs_isolated_environment: bool,
    #[serde(default)]
    pub import_probes: Vec<String>,
}

impl RawToolEntry {
    /// Validate a raw entry into a descriptor.
    ///
    /// Rules: `name` must be present and non-empty; `source_kind` must be a
    /// known token when given, and is classified from the URL when absent;
    /// `url` is required for everything except custom tools.
    pub fn validate(self) -> Result<ToolDescriptor> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => {
                return Err(ToolshedError::InvalidDescriptor {
                    reason: "missing required field 'name'".to_string(),
                });
            }
        };

        let source_kind = match self.source_kind.as_deref() {
            Some(token) => {
                serde_yaml::from_str::<SourceKind>(token).map_err(|_| {
                    ToolshedError::InvalidDescriptor {
                        reason: format!("'{}': unknown source_kind '{}'", name, token),
                    }
                })?
            }
            None => self
                .url
                .as_deref()
                .map(SourceKind::classify)
                .unwrap_or(SourceKind::Custom),
        };

        if self.url.is_none() && source_kind != SourceKind::Custom {
            return Err(ToolshedError::InvalidDescriptor {
                reason: format!("'{}': missing required field 'url'", name),
            });
        }

        Ok(ToolDescriptor {
            display_name: self.display_name.unwrap_or_else(|| name.clone()),
            target_folder: self.target_folder.unwrap_or_else(|| name.clone()),
            name,
            source_kind,
            url: self.url,
            description: self.description,
            install_steps: self.install_steps,
            start_command: self.start_command,
            needs_isolated_environment: self.needs_isolated_environment,
            import_probes: self.import_probes,
        })
    }
}

/// An ordered, name-keyed collection of tool descriptors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest name (defaults to the file stem when loaded)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,

    /// Named subsets of tools, by tool name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, Vec<String>>,
}

impl Manifest {
    pub fn new(name: impl Into<String>) -> Self {
        Manifest {
            name: name.into(),
            tools: Vec::new(),
            profiles: BTreeMap::new(),
        }
    }

    /// Find a descriptor by tool name
    pub fn find(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Insert a descriptor, replacing any existing entry with the same name.
    ///
    /// Replacement keeps the original position so repeated adds stay
    /// deterministic (last write wins on content, first write on order).
    pub fn upsert(&mut self, descriptor: ToolDescriptor) {
        match self.tools.iter_mut().find(|t| t.name == descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => self.tools.push(descriptor),
        }
    }

    /// Resolve a profile to its descriptors, in manifest order
    pub fn profile_tools(&self, profile: &str) -> Result<Vec<&ToolDescriptor>> {
        let names = self
            .profiles
            .get(profile)
            .ok_or_else(|| ToolshedError::ProfileNotFound {
                name: profile.to_string(),
            })?;
        Ok(self
            .tools
            .iter()
            .filter(|t| names.iter().any(|n| n == &t.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: Option<&str>, kind: Option<&str>, url: Option<&str>) -> RawToolEntry {
        RawToolEntry {
            name: name.map(String::from),
            source_kind: kind.map(String::from),
            url: url.map(String::from),
            ..RawToolEntry::default()
        }
    }

    #[test]
    fn test_validate_minimal_entry() {
        let entry = raw(
            Some("comfyui"),
            Some("code_host"),
            Some("https://github.com/comfyanonymous/ComfyUI"),
        );
        let tool = entry.validate().unwrap();
        assert_eq!(tool.name, "comfyui");
        assert_eq!(tool.display_name, "comfyui");
        assert_eq!(tool.target_folder, "comfyui");
        assert_eq!(tool.source_kind, SourceKind::CodeHost);
        assert!(!tool.needs_isolated_environment);
    }

    #[test]
    fn test_validate_missing_name() {
        let entry = raw(None, Some("code_host"), Some("https://github.com/a/b"));
        assert!(entry.validate().is_err());

        let entry = raw(Some("  "), Some("code_host"), Some("https://github.com/a/b"));
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_validate_missing_url_for_fetched_kind() {
        let entry = raw(Some("tool"), Some("code_host"), None);
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_validate_custom_without_url() {
        let entry = raw(Some("local-scripts"), Some("custom"), None);
        let tool = entry.validate().unwrap();
        assert_eq!(tool.source_kind, SourceKind::Custom);
        assert!(tool.url.is_none());
    }

    #[test]
    fn test_validate_unknown_source_kind() {
        let entry = raw(Some("tool"), Some("warez"), Some("https://github.com/a/b"));
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_validate_classifies_when_kind_absent() {
        let entry = raw(Some("sdxl"), None, Some("https://huggingface.co/org/sdxl"));
        let tool = entry.validate().unwrap();
        assert_eq!(tool.source_kind, SourceKind::ModelHub);
    }

    #[test]
    fn test_from_url_derives_name() {
        let tool =
            ToolDescriptor::from_url("https://github.com/comfyanonymous/ComfyUI.git", None)
                .unwrap();
        assert_eq!(tool.name, "ComfyUI");
        assert_eq!(tool.source_kind, SourceKind::CodeHost);
        assert_eq!(tool.target_folder, "ComfyUI");
    }

    #[test]
    fn test_from_url_explicit_name_wins() {
        let tool = ToolDescriptor::from_url(
            "https://github.com/org/repo",
            Some("my-tool".to_string()),
        )
        .unwrap();
        assert_eq!(tool.name, "my-tool");
    }

    #[test]
    fn test_upsert_last_write_wins_in_place() {
        let mut manifest = Manifest::new("default");
        manifest.upsert(ToolDescriptor::from_url("https://github.com/a/one", None).unwrap());
        manifest.upsert(ToolDescriptor::from_url("https://github.com/a/two", None).unwrap());

        let mut replacement = ToolDescriptor::from_url("https://github.com/b/one", None).unwrap();
        replacement.description = Some("replaced".to_string());
        manifest.upsert(replacement);

        assert_eq!(manifest.tools.len(), 2);
        assert_eq!(manifest.tools[0].name, "one");
        assert_eq!(manifest.tools[0].description.as_deref(), Some("replaced"));
        assert_eq!(
            manifest.tools[0].url.as_deref(),
            Some("https://github.com/b/one")
        );
    }

    #[test]
    fn test_profile_tools_in_manifest_order() {
        let mut manifest = Manifest::new("default");
        for url in [
            "https://github.com/a/one",
            "https://github.com/a/two",
            "https://github.com/a/three",
        ] {
            manifest.upsert(ToolDescriptor::from_url(url, None).unwrap());
        }
        manifest.profiles.insert(
            "media".to_string(),
            vec!["three".to_string(), "one".to_string()],
        );

        let tools = manifest.profile_tools("media").unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["one", "three"]);

        assert!(manifest.profile_tools("nope").is_err());
    }
}
