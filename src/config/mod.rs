//! Runtime configuration
//!
//! Settings come from an optional YAML file; a missing file means defaults.
//! There is no process-wide configuration state: `main` builds one
//! `Settings` value and hands it to whoever needs it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolshedError};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TOOLSHED_CONFIG";

/// Environment variable overriding the workspace root
pub const HOME_ENV: &str = "TOOLSHED_HOME";

/// User settings, all optional on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Workspace root; when unset the workspace falls back to
    /// `TOOLSHED_HOME` and then `~/toolshed`
    pub workspace: Option<PathBuf>,

    /// Default to dry-run installs unless overridden on the command line
    pub dry_run: bool,

    /// Prefer `uv` over `python -m venv` / `pip`
    pub use_uv: bool,

    /// Interpreter used for import probes and venv creation
    pub python: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            workspace: None,
            dry_run: false,
            use_uv: true,
            python: "python3".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `$TOOLSHED_CONFIG`, else the OS config dir,
    /// else defaults.
    pub fn load() -> Result<Settings> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => match dirs::config_dir() {
                Some(dir) => dir.join("toolshed").join("config.yaml"),
                None => return Ok(Settings::default()),
            },
        };
        Settings::load_from(&path)
    }

    /// Load settings from a specific path; a missing file yields defaults,
    /// a malformed one is a configuration error.
    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ToolshedError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ToolshedError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// The package-install command prefix for package-index tools
    pub fn pip_command(&self) -> &'static str {
        if self.use_uv { "uv pip install" } else { "pip install" }
    }

    /// The environment-creation command run inside a tool folder
    pub fn venv_command(&self) -> String {
        if self.use_uv {
            "uv venv .venv".to_string()
        } else {
            format!("{} -m venv .venv", self.python)
        }
    }
}
