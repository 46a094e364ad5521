//! Docs command implementation
//!
//! Summarizes an installed tool's README: title, first paragraph, and the
//! install/usage flavored sections. The tool is resolved through the
//! manifest when it is tracked there, otherwise by folder name in the
//! workspace.

use std::path::PathBuf;

use console::Style;

use crate::cli::DocsArgs;
use crate::commands::helpers;
use crate::docs;
use crate::error::{Result, ToolshedError};
use crate::manifest::store;

/// Run docs command
pub fn run(workspace: Option<PathBuf>, args: DocsArgs) -> Result<()> {
    let ctx = helpers::context(workspace)?;
    let tool_dir = resolve_tool_dir(&ctx, &args)?;

    let summary = docs::summarize(&args.name, &tool_dir);
    let bold = Style::new().bold();

    let heading = summary.title.as_deref().unwrap_or(&args.name);
    println!("{}", Style::new().bold().yellow().apply_to(heading));

    match summary.summary {
        Some(ref text) => {
            println!();
            println!("{}", text);
        }
        None => {
            println!();
            println!("No README found in {}.", tool_dir.display());
            return Ok(());
        }
    }

    if let Some(ref section) = summary.install_section {
        println!();
        println!("{}", bold.apply_to("Install:"));
        for line in section.lines() {
            println!("  {}", line);
        }
    }

    if let Some(ref section) = summary.usage_section {
        println!();
        println!("{}", bold.apply_to("Usage:"));
        for line in section.lines() {
            println!("  {}", line);
        }
    }

    if !summary.doc_files.is_empty() {
        println!();
        println!("{}", bold.apply_to("More documentation:"));
        for file in &summary.doc_files {
            let shown = file.strip_prefix(&tool_dir).unwrap_or(file);
            println!("  {}", shown.display());
        }
    }

    Ok(())
}

/// The tool's folder: manifest entry first, then a workspace folder with
/// the same name.
fn resolve_tool_dir(ctx: &helpers::Context, args: &DocsArgs) -> Result<PathBuf> {
    let manifest_path = helpers::manifest_path(ctx, args.manifest.as_deref());
    let manifest = store::load_or_default(&manifest_path)?;

    if let Some(tool) = manifest.find(&args.name) {
        let path = ctx
            .workspace
            .tool_path(tool)
            .ok_or_else(|| ToolshedError::ToolNotInstalled {
                name: args.name.clone(),
            })?;
        if !path.exists() {
            return Err(ToolshedError::ToolNotInstalled {
                name: args.name.clone(),
            });
        }
        return Ok(path);
    }

    ctx.workspace
        .installed_tools()
        .into_iter()
        .find(|t| t.name == args.name)
        .map(|t| t.path)
        .ok_or_else(|| ToolshedError::ToolNotFound {
            name: args.name.clone(),
        })
}
