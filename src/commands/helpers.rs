//! Shared command plumbing

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::Result;
use crate::workspace::Workspace;

/// Resolved per-invocation context
pub struct Context {
    pub workspace: Workspace,
    pub settings: Settings,
}

/// Load settings and resolve the workspace from the global flag
pub fn context(workspace_flag: Option<PathBuf>) -> Result<Context> {
    let settings = Settings::load()?;
    let workspace = Workspace::resolve(workspace_flag, &settings);
    Ok(Context {
        workspace,
        settings,
    })
}

/// Resolve a `--manifest` argument against the workspace, defaulting to
/// the workspace default manifest
pub fn manifest_path(ctx: &Context, arg: Option<&str>) -> PathBuf {
    match arg {
        Some(arg) => ctx.workspace.manifest_path(arg),
        None => ctx.workspace.default_manifest_path(),
    }
}
