//! Ambient system survey for the `doctor` command
//!
//! Probes the common tools an install recipe tends to assume (git, an
//! interpreter, package managers, container/GPU tooling) and reports
//! OS/arch plus the workspace root. Purely local, bounded probes.

use std::path::PathBuf;

use crate::config::Settings;
use crate::detect::{PresenceChecker, PresenceInfo};
use crate::workspace::Workspace;

/// One ambient tool probe result
#[derive(Debug, Clone)]
pub struct AmbientTool {
    pub name: String,
    pub info: PresenceInfo,
}

/// Snapshot of the environment toolshed operates in
#[derive(Debug, Clone)]
pub struct SystemReport {
    pub os: &'static str,
    pub arch: &'static str,
    pub workspace_root: PathBuf,
    pub workspace_exists: bool,
    pub tools: Vec<AmbientTool>,
}

/// Tools every report probes, besides the configured interpreter
const AMBIENT_TOOLS: &[&str] = &["git", "uv", "pip", "docker", "nvidia-smi"];

/// Probe the ambient environment. Never fails; missing tools are simply
/// reported as not installed.
pub fn system_report(workspace: &Workspace, settings: &Settings) -> SystemReport {
    let mut names: Vec<String> = vec![settings.python.clone()];
    names.extend(AMBIENT_TOOLS.iter().map(|s| s.to_string()));

    let tools = names
        .into_iter()
        .map(|name| AmbientTool {
            info: PresenceChecker::probe_command(&name),
            name,
        })
        .collect();

    SystemReport {
        os: std::env::consts::OS,
        arch: std::env::consts::ARCH,
        workspace_root: workspace.display_root(),
        workspace_exists: workspace.root.exists(),
        tools,
    }
}
