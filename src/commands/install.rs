//! Install command implementation
//!
//! The installation process per selected tool:
//! 1. Acquire the source (clone, or update an existing checkout in place)
//! 2. Create an isolated environment when the descriptor asks for one
//! 3. Run install steps in order (best effort, first failure recorded)
//!
//! Tools are processed strictly one at a time, and one tool's failure
//! never stops the rest of the batch. The returned count of failed tools
//! drives the process exit code.

use std::path::PathBuf;

use console::Style;

use crate::cli::InstallArgs;
use crate::commands::helpers;
use crate::commands::menu;
use crate::error::{Result, ToolshedError};
use crate::installer::{InstallOrchestrator, InstallResult};
use crate::manifest::{Manifest, ToolDescriptor, store};
use crate::progress::ProgressDisplay;

/// Run install command. Returns the number of failed installs.
pub fn run(workspace: Option<PathBuf>, args: InstallArgs) -> Result<usize> {
    let ctx = helpers::context(workspace)?;
    let manifest_path = helpers::manifest_path(&ctx, args.manifest.as_deref());
    let manifest = store::load_or_default(&manifest_path)?;

    if manifest.tools.is_empty() {
        println!("Manifest '{}' has no tools.", manifest.name);
        println!("Add one with 'toolshed add <url>'.");
        return Ok(0);
    }

    let selected = select_tools(&manifest, &args)?;
    if selected.is_empty() {
        println!("Nothing selected.");
        return Ok(0);
    }

    let dry_run = args.dry_run || ctx.settings.dry_run;
    if !dry_run {
        ctx.workspace.ensure_layout()?;
    }

    let orchestrator = InstallOrchestrator::new(&ctx.workspace, &ctx.settings, dry_run);
    let show_steps = args.show_output || dry_run;

    let progress = (!show_steps && selected.len() > 1)
        .then(|| ProgressDisplay::new(selected.len() as u64));

    let mut results = Vec::with_capacity(selected.len());
    for (index, tool) in selected.iter().enumerate() {
        if let Some(ref progress) = progress {
            progress.update_tool(&tool.display_name, index + 1, selected.len());
        }

        let result = orchestrator.install(tool);
        if show_steps {
            display_steps(tool, &result);
        }
        results.push(result);

        if let Some(ref progress) = progress {
            progress.inc_tool();
        }
    }
    if let Some(progress) = progress {
        progress.finish();
    }

    display_report(&results, dry_run);

    Ok(results.iter().filter(|r| !r.succeeded).count())
}

/// Resolve the requested subset of manifest tools, preserving manifest order
fn select_tools(manifest: &Manifest, args: &InstallArgs) -> Result<Vec<ToolDescriptor>> {
    if let Some(ref profile) = args.profile {
        return Ok(manifest
            .profile_tools(profile)?
            .into_iter()
            .cloned()
            .collect());
    }

    if !args.names.is_empty() {
        let mut tools = Vec::with_capacity(args.names.len());
        for name in &args.names {
            let tool = manifest
                .find(name)
                .ok_or_else(|| ToolshedError::ToolNotFound { name: name.clone() })?;
            tools.push(tool.clone());
        }
        return Ok(tools);
    }

    if args.all {
        return Ok(manifest.tools.clone());
    }

    let names = menu::select_tools_interactively(&manifest.tools)?;
    Ok(manifest
        .tools
        .iter()
        .filter(|t| names.contains(&t.name))
        .cloned()
        .collect())
}

fn display_steps(tool: &ToolDescriptor, result: &InstallResult) {
    println!("{}", Style::new().bold().yellow().apply_to(&tool.display_name));
    for step in &result.steps {
        let mark = if step.succeeded {
            Style::new().green().apply_to("✓")
        } else {
            Style::new().red().apply_to("✗")
        };
        println!("  {} {}", mark, step.title);
        for line in step.output.lines().take(12) {
            println!("      {}", Style::new().dim().apply_to(line));
        }
    }
    println!();
}

fn display_report(results: &[InstallResult], dry_run: bool) {
    let succeeded = results.iter().filter(|r| r.succeeded).count();
    let failed = results.len() - succeeded;

    let heading = if dry_run { "Dry run report:" } else { "Install report:" };
    println!("{}", Style::new().bold().apply_to(heading));

    for result in results {
        let mark = if result.succeeded {
            Style::new().green().apply_to("✓")
        } else {
            Style::new().red().apply_to("✗")
        };
        println!("  {} {}", mark, result.message);

        if let Some(index) = result.failed_step_index {
            if let Some(step) = result.steps.get(index) {
                println!(
                    "      {} step {}: {}",
                    Style::new().red().apply_to("failed"),
                    index,
                    step.title
                );
                for line in step.output.lines().take(6) {
                    println!("      {}", Style::new().dim().apply_to(line));
                }
            }
        }
        if let Some(ref path) = result.install_path {
            if result.succeeded && !dry_run {
                println!("      {}", Style::new().dim().apply_to(path.display()));
            }
        }
    }

    println!();
    if failed == 0 {
        println!("{} tool(s) processed, all succeeded.", results.len());
    } else {
        println!("{} tool(s) processed, {} failed.", results.len(), failed);
    }
}
