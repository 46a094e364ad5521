//! Presence detection
//!
//! Determines whether a tool is already installed without performing any
//! install action. Three probes, tried in order, first positive wins:
//! the install path on disk, then declared import names, then (for bare
//! names not tied to a descriptor) a `--version` command probe.
//!
//! Detection never errors and never touches the network. Any probe failure
//! resolves to "not installed" or unknown health; the filesystem and the
//! ambient environment are the only sources of truth.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::git;
use crate::manifest::ToolDescriptor;
use crate::runner::{CommandRunner, PROBE_TIMEOUT};
use crate::workspace::Workspace;

pub mod system;

/// How a tool's presence was established
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    PathExists,
    ImportProbe,
    CommandProbe,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DetectionMethod::PathExists => "path",
            DetectionMethod::ImportProbe => "import",
            DetectionMethod::CommandProbe => "command",
        };
        write!(f, "{}", label)
    }
}

/// Health of an installed tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    /// Local modifications in the checkout
    Modified,
    /// Checkout lags its upstream
    Outdated,
    /// Install folder exists but holds nothing
    Unhealthy,
    Unknown,
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Health::Healthy => "healthy",
            Health::Modified => "modified",
            Health::Outdated => "outdated",
            Health::Unhealthy => "unhealthy",
            Health::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Detection outcome for one tool. Recomputed on demand, never persisted.
#[derive(Debug, Clone)]
pub struct PresenceInfo {
    pub name: String,
    pub installed: bool,
    pub path: Option<PathBuf>,
    pub version: Option<String>,
    pub detection_method: Option<DetectionMethod>,
    pub health: Health,
}

impl PresenceInfo {
    fn absent(name: &str) -> PresenceInfo {
        PresenceInfo {
            name: name.to_string(),
            installed: false,
            path: None,
            version: None,
            detection_method: None,
            health: Health::Unknown,
        }
    }
}

/// Checks descriptors and bare names against the workspace and environment
pub struct PresenceChecker<'a> {
    workspace: &'a Workspace,
    settings: &'a Settings,
}

impl<'a> PresenceChecker<'a> {
    pub fn new(workspace: &'a Workspace, settings: &'a Settings) -> Self {
        Self {
            workspace,
            settings,
        }
    }

    /// Check a described tool: install path first, then import probes.
    pub fn check(&self, descriptor: &ToolDescriptor) -> PresenceInfo {
        if let Some(path) = self.workspace.tool_path(descriptor) {
            if path.exists() {
                return PresenceInfo {
                    name: descriptor.name.clone(),
                    installed: true,
                    version: version_marker(&path),
                    health: folder_health(&path),
                    path: Some(path),
                    detection_method: Some(DetectionMethod::PathExists),
                };
            }
        }

        for import in &descriptor.import_probes {
            if let Some(version) = self.import_probe(import) {
                return PresenceInfo {
                    name: descriptor.name.clone(),
                    installed: true,
                    path: None,
                    version: (!version.is_empty()).then_some(version),
                    detection_method: Some(DetectionMethod::ImportProbe),
                    health: Health::Unknown,
                };
            }
        }

        PresenceInfo::absent(&descriptor.name)
    }

    /// Probe a bare command name, for ambient system tools. First stdout
    /// line of `<name> --version` becomes the version.
    pub fn probe_command(name: &str) -> PresenceInfo {
        match CommandRunner::probe(name, &["--version"], PROBE_TIMEOUT) {
            Some(version) => PresenceInfo {
                name: name.to_string(),
                installed: true,
                path: None,
                version: (!version.is_empty()).then_some(version),
                detection_method: Some(DetectionMethod::CommandProbe),
                health: Health::Healthy,
            },
            None => PresenceInfo::absent(name),
        }
    }

    /// Bounded import probe via the configured interpreter. Any failure is
    /// silently "not found". Returns the module's version when exposed,
    /// possibly empty.
    fn import_probe(&self, module: &str) -> Option<String> {
        // Opaque shell strings are fine for install steps, but an import
        // name is interpolated into code, so restrict it to module syntax.
        let valid = !module.is_empty()
            && module
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !valid {
            return None;
        }

        let code = format!(
            "import {m}; print(getattr({m}, '__version__', ''))",
            m = module
        );
        CommandRunner::probe(&self.settings.python, &["-c", &code], PROBE_TIMEOUT)
    }
}

/// Read a version marker for an installed folder: a version file when one
/// exists, else a describe string for checkouts.
fn version_marker(path: &Path) -> Option<String> {
    for file_name in ["VERSION", "version.txt"] {
        let candidate = path.join(file_name);
        if let Ok(content) = fs::read_to_string(&candidate) {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    git::describe_version(path)
}

/// Health of an installed folder. Checkouts are judged by work-tree state;
/// plain folders are healthy unless empty.
fn folder_health(path: &Path) -> Health {
    if git::is_checkout(path) {
        return match git::work_tree_state(path) {
            Some(state) if state.dirty => Health::Modified,
            Some(state) if state.behind_upstream => Health::Outdated,
            Some(_) => Health::Healthy,
            None => Health::Unknown,
        };
    }

    match fs::read_dir(path) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                Health::Healthy
            } else {
                Health::Unhealthy
            }
        }
        Err(_) => Health::Unknown,
    }
}
