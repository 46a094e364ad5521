//! Status command implementation
//!
//! Lists every tool the manifest knows about with live presence, version
//! and health, recomputed on each run. With `--detailed`, also lists
//! workspace folders the manifest does not track.

use std::path::PathBuf;

use console::Style;

use crate::cli::StatusArgs;
use crate::commands::helpers;
use crate::detect::{Health, PresenceChecker, PresenceInfo};
use crate::error::Result;
use crate::manifest::store;

/// Run status command
pub fn run(workspace: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let ctx = helpers::context(workspace)?;
    let manifest_path = helpers::manifest_path(&ctx, args.manifest.as_deref());
    let manifest = store::load_or_default(&manifest_path)?;

    println!(
        "Workspace: {}",
        Style::new().bold().apply_to(ctx.workspace.display_root().display())
    );
    println!();

    if manifest.tools.is_empty() {
        println!("No tools in manifest '{}'.", manifest.name);
        println!("Add one with 'toolshed add <url>'.");
        return Ok(());
    }

    let checker = PresenceChecker::new(&ctx.workspace, &ctx.settings);

    println!("Tools in manifest '{}' ({}):", manifest.name, manifest.tools.len());
    println!();
    for tool in &manifest.tools {
        let info = checker.check(tool);
        display_tool(&tool.display_name, &info, args.detailed);
        if args.detailed {
            if let Some(ref command) = tool.start_command {
                println!("      {} {}", Style::new().bold().apply_to("start:"), command);
            }
        }
    }

    if args.detailed {
        display_untracked(&ctx, &manifest);
    }

    Ok(())
}

fn display_tool(display_name: &str, info: &PresenceInfo, detailed: bool) {
    let mark = if info.installed {
        Style::new().green().apply_to("✓")
    } else {
        Style::new().red().apply_to("✗")
    };

    let mut line = format!("  {} {}", mark, Style::new().bold().yellow().apply_to(display_name));
    if let Some(ref version) = info.version {
        line.push_str(&format!(" {}", Style::new().dim().apply_to(version)));
    }
    if info.installed {
        line.push_str(&format!(" [{}]", styled_health(info.health)));
    }
    println!("{}", line);

    if detailed {
        if let Some(method) = info.detection_method {
            println!("      {} {}", Style::new().bold().apply_to("detected:"), method);
        }
        if let Some(ref path) = info.path {
            println!("      {} {}", Style::new().bold().apply_to("path:"), path.display());
        }
    }
}

fn styled_health(health: Health) -> console::StyledObject<Health> {
    let style = match health {
        Health::Healthy => Style::new().green(),
        Health::Modified | Health::Outdated => Style::new().yellow(),
        Health::Unhealthy => Style::new().red(),
        Health::Unknown => Style::new().dim(),
    };
    style.apply_to(health)
}

/// Folders present in the workspace that no manifest entry accounts for
fn display_untracked(ctx: &helpers::Context, manifest: &crate::manifest::Manifest) {
    let untracked: Vec<_> = ctx
        .workspace
        .installed_tools()
        .into_iter()
        .filter(|t| {
            !manifest
                .tools
                .iter()
                .any(|m| m.target_folder == t.name || m.name == t.name)
        })
        .collect();

    if untracked.is_empty() {
        return;
    }

    println!();
    println!("Not tracked by this manifest:");
    for tool in untracked {
        println!(
            "  {} {} ({})",
            Style::new().dim().apply_to("•"),
            tool.name,
            tool.kind
        );
    }
}
