//! Add command implementation
//!
//! Classifies a URL, builds a descriptor with heuristic defaults, and
//! appends it to the manifest. An existing entry with the same name is
//! replaced (last write wins). Optionally installs right away.

use std::path::PathBuf;

use console::Style;

use crate::cli::AddArgs;
use crate::commands::helpers;
use crate::error::Result;
use crate::installer::InstallOrchestrator;
use crate::manifest::{ToolDescriptor, store};

/// Run add command. Returns 1 when an immediate install failed, else 0.
pub fn run(workspace: Option<PathBuf>, args: AddArgs) -> Result<usize> {
    let ctx = helpers::context(workspace)?;
    let manifest_path = helpers::manifest_path(&ctx, args.manifest.as_deref());
    let mut manifest = store::load_or_default(&manifest_path)?;

    let mut tool = ToolDescriptor::from_url(&args.url, args.name.clone())?;
    tool.install_steps = args.steps.clone();
    tool.start_command = args.start_command.clone();
    tool.needs_isolated_environment = args.isolated_env;

    let replaced = manifest.find(&tool.name).is_some();
    let name = tool.name.clone();
    let kind = tool.source_kind;
    manifest.upsert(tool.clone());
    store::save(&manifest, &manifest_path)?;

    println!(
        "{} {} ({}) {} manifest '{}'",
        Style::new().green().apply_to("✓"),
        Style::new().bold().yellow().apply_to(&name),
        kind,
        if replaced { "replaced in" } else { "added to" },
        manifest.name
    );

    if !args.install {
        return Ok(0);
    }

    let dry_run = args.dry_run || ctx.settings.dry_run;
    if !dry_run {
        ctx.workspace.ensure_layout()?;
    }

    let orchestrator = InstallOrchestrator::new(&ctx.workspace, &ctx.settings, dry_run);
    let result = orchestrator.install(&tool);

    let mark = if result.succeeded {
        Style::new().green().apply_to("✓")
    } else {
        Style::new().red().apply_to("✗")
    };
    println!("{} {}", mark, result.message);

    Ok(usize::from(!result.succeeded))
}
