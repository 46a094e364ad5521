//! Manifest management command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::{ManifestArgs, ManifestSubcommand};
use crate::commands::helpers;
use crate::error::{Result, ToolshedError};
use crate::manifest::store;

/// Run manifest command
pub fn run(workspace: Option<PathBuf>, args: ManifestArgs) -> Result<()> {
    let ctx = helpers::context(workspace)?;

    match args.command {
        ManifestSubcommand::List => list(&ctx),
        ManifestSubcommand::Export { name, dest } => export(&ctx, &name, &dest),
        ManifestSubcommand::Import { src } => import(&ctx, &src),
    }
}

fn list(ctx: &helpers::Context) -> Result<()> {
    let summaries = store::list(&ctx.workspace.manifests_dir())?;

    if summaries.is_empty() {
        println!("No manifests in {}.", ctx.workspace.manifests_dir().display());
        println!("Add a tool with 'toolshed add <url>' or import a manifest.");
        return Ok(());
    }

    println!("Manifests ({}):", summaries.len());
    for summary in summaries {
        println!(
            "  {} ({} tool{})",
            Style::new().bold().yellow().apply_to(&summary.name),
            summary.tool_count,
            if summary.tool_count == 1 { "" } else { "s" }
        );
        println!("    {}", Style::new().dim().apply_to(summary.path.display()));
    }

    Ok(())
}

fn export(ctx: &helpers::Context, name: &str, dest: &std::path::Path) -> Result<()> {
    let src = ctx.workspace.manifest_path(name);
    if !src.exists() {
        return Err(ToolshedError::ManifestNotFound {
            path: src.display().to_string(),
        });
    }

    store::export(&src, dest)?;
    println!("Exported '{}' to {}", name, dest.display());
    Ok(())
}

fn import(ctx: &helpers::Context, src: &std::path::Path) -> Result<()> {
    ctx.workspace.ensure_layout()?;
    let dest = store::import(src, &ctx.workspace.manifests_dir())?;
    println!("Imported manifest to {}", dest.display());
    Ok(())
}
