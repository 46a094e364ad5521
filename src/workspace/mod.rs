//! Workspace layout and resolution
//!
//! The workspace is one root directory with a subdirectory per source kind
//! (`code_host/`, `model_hub/`, `custom/`) plus `manifests/` for saved
//! manifest documents. Package-index tools install into an interpreter
//! environment and have no folder here.
//!
//! Root resolution precedence: `--workspace` flag (which also reads
//! `TOOLSHED_HOME`) > `workspace:` config key > `~/toolshed`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Result, ToolshedError};
use crate::manifest::ToolDescriptor;
use crate::source::SourceKind;
use crate::workspace::metadata::ToolMetadata;

pub mod metadata;

/// Subdirectory holding saved manifest documents
pub const MANIFESTS_DIR: &str = "manifests";

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "default.yaml";

/// A resolved workspace root
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
}

/// One installed tool found on disk
#[derive(Debug, Clone)]
pub struct InstalledTool {
    pub name: String,
    pub kind: SourceKind,
    pub path: PathBuf,
    /// Present when the tool was installed by toolshed; directories dropped
    /// in by hand simply have none
    pub metadata: Option<ToolMetadata>,
}

impl Workspace {
    /// Resolve the workspace root from the CLI flag and settings.
    pub fn resolve(flag: Option<PathBuf>, settings: &Settings) -> Workspace {
        let root = flag
            .or_else(|| settings.workspace.clone())
            .or_else(|| dirs::home_dir().map(|home| home.join("toolshed")))
            .unwrap_or_else(|| PathBuf::from("toolshed"));
        Workspace { root }
    }

    /// Create the root and its standard subdirectories.
    pub fn ensure_layout(&self) -> Result<()> {
        let mut required: Vec<PathBuf> = vec![self.root.clone(), self.manifests_dir()];
        for kind in [SourceKind::CodeHost, SourceKind::ModelHub, SourceKind::Custom] {
            if let Some(dir) = self.base_dir(kind) {
                required.push(dir);
            }
        }
        for dir in required {
            fs::create_dir_all(&dir).map_err(|e| ToolshedError::WorkspaceCreateFailed {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Base directory for a source kind, when it has one
    pub fn base_dir(&self, kind: SourceKind) -> Option<PathBuf> {
        kind.base_dir_name().map(|name| self.root.join(name))
    }

    /// Install path for a descriptor, when its kind installs into a folder
    pub fn tool_path(&self, descriptor: &ToolDescriptor) -> Option<PathBuf> {
        self.base_dir(descriptor.source_kind)
            .map(|base| base.join(&descriptor.target_folder))
    }

    pub fn manifests_dir(&self) -> PathBuf {
        self.root.join(MANIFESTS_DIR)
    }

    pub fn default_manifest_path(&self) -> PathBuf {
        self.manifests_dir().join(DEFAULT_MANIFEST)
    }

    /// Resolve a `--manifest` argument: an existing path is used as-is,
    /// anything else names a document in the workspace `manifests/` dir.
    pub fn manifest_path(&self, arg: &str) -> PathBuf {
        let as_path = Path::new(arg);
        if as_path.exists() {
            return as_path.to_path_buf();
        }
        if as_path.extension().is_some() {
            self.manifests_dir().join(as_path)
        } else {
            self.manifests_dir().join(format!("{}.yaml", arg))
        }
    }

    /// Scan the kind directories for installed tools, pairing each folder
    /// with its metadata file when one exists.
    pub fn installed_tools(&self) -> Vec<InstalledTool> {
        let mut tools = Vec::new();

        for kind in [SourceKind::CodeHost, SourceKind::ModelHub, SourceKind::Custom] {
            let Some(base) = self.base_dir(kind) else {
                continue;
            };
            let Ok(entries) = fs::read_dir(&base) else {
                continue;
            };
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_dir())
                .collect();
            paths.sort();

            for path in paths {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let metadata = ToolMetadata::load(&path);
                tools.push(InstalledTool {
                    name,
                    kind,
                    path,
                    metadata,
                });
            }
        }

        tools
    }

    /// Canonical root for display, falling back to the configured path
    pub fn display_root(&self) -> PathBuf {
        dunce::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone())
    }
}
