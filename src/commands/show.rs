//! Show command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::ShowArgs;
use crate::commands::helpers;
use crate::detect::PresenceChecker;
use crate::error::{Result, ToolshedError};
use crate::manifest::store;
use crate::workspace::metadata::ToolMetadata;

/// Run show command
pub fn run(workspace: Option<PathBuf>, args: ShowArgs) -> Result<()> {
    let ctx = helpers::context(workspace)?;
    let manifest_path = helpers::manifest_path(&ctx, args.manifest.as_deref());
    let manifest = store::load_or_default(&manifest_path)?;

    let tool = manifest
        .find(&args.name)
        .ok_or_else(|| ToolshedError::ToolNotFound {
            name: args.name.clone(),
        })?;

    let bold = Style::new().bold();

    println!("{}", Style::new().bold().yellow().apply_to(&tool.display_name));
    if let Some(ref description) = tool.description {
        println!("  {} {}", bold.apply_to("description:"), description);
    }
    println!("  {} {}", bold.apply_to("source:"), tool.source_kind);
    if let Some(ref url) = tool.url {
        println!("  {} {}", bold.apply_to("url:"), url);
    }
    println!("  {} {}", bold.apply_to("folder:"), tool.target_folder);
    if tool.needs_isolated_environment {
        println!("  {} yes", bold.apply_to("isolated environment:"));
    }
    if !tool.install_steps.is_empty() {
        println!("  {}", bold.apply_to("install steps:"));
        for step in &tool.install_steps {
            println!("    - {}", step);
        }
    }
    if let Some(ref command) = tool.start_command {
        println!("  {} {}", bold.apply_to("start:"), command);
    }

    let checker = PresenceChecker::new(&ctx.workspace, &ctx.settings);
    let info = checker.check(tool);

    println!();
    if info.installed {
        println!("  {} installed", Style::new().green().apply_to("✓"));
        if let Some(method) = info.detection_method {
            println!("  {} {}", bold.apply_to("detected:"), method);
        }
        if let Some(ref version) = info.version {
            println!("  {} {}", bold.apply_to("version:"), version);
        }
        println!("  {} {}", bold.apply_to("health:"), info.health);
        if let Some(ref path) = info.path {
            println!("  {} {}", bold.apply_to("path:"), path.display());
            if let Some(metadata) = ToolMetadata::load(path) {
                println!("  {} {}", bold.apply_to("installed at:"), metadata.installed_at);
            }
        }
    } else {
        println!("  {} not installed", Style::new().red().apply_to("✗"));
    }

    Ok(())
}
