//! Doctor command implementation
//!
//! Surveys the ambient environment an install recipe tends to assume.

use std::path::PathBuf;

use console::Style;

use crate::commands::helpers;
use crate::detect::system;
use crate::error::Result;

/// Run doctor command
pub fn run(workspace: Option<PathBuf>) -> Result<()> {
    let ctx = helpers::context(workspace)?;
    let report = system::system_report(&ctx.workspace, &ctx.settings);

    let bold = Style::new().bold();
    println!("{} {} ({})", bold.apply_to("System:"), report.os, report.arch);
    println!(
        "{} {}{}",
        bold.apply_to("Workspace:"),
        report.workspace_root.display(),
        if report.workspace_exists {
            ""
        } else {
            " (not created yet)"
        }
    );
    println!();

    println!("{}", bold.apply_to("Ambient tools:"));
    for tool in &report.tools {
        if tool.info.installed {
            println!(
                "  {} {} {}",
                Style::new().green().apply_to("✓"),
                tool.name,
                Style::new()
                    .dim()
                    .apply_to(tool.info.version.as_deref().unwrap_or(""))
            );
        } else {
            println!("  {} {}", Style::new().red().apply_to("✗"), tool.name);
        }
    }

    Ok(())
}
