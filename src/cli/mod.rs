//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - status: Status command arguments
//! - add: Add command arguments
//! - show: Show command arguments
//! - docs: Docs command arguments
//! - manifest: Manifest management arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod add;
pub mod completions;
pub mod docs;
pub mod install;
pub mod manifest;
pub mod show;
pub mod status;

pub use add::AddArgs;
pub use completions::CompletionsArgs;
pub use docs::DocsArgs;
pub use install::InstallArgs;
pub use manifest::{ManifestArgs, ManifestSubcommand};
pub use show::ShowArgs;
pub use status::StatusArgs;

/// Toolshed - workspace installer for AI/ML tooling
#[derive(Parser, Debug)]
#[command(
    name = "toolshed",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Lean workspace installer for AI/ML tooling",
    long_about = "Toolshed installs and tracks third-party AI/ML tools (git checkouts, \
                  model-hub repositories, package-index packages) in one workspace \
                  directory, driven by declarative manifests.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  toolshed status                            \x1b[90m# What is installed, and how healthy\x1b[0m\n   \
                  toolshed install --all                     \x1b[90m# Install everything in the manifest\x1b[0m\n   \
                  toolshed install comfyui --dry-run         \x1b[90m# Show what an install would run\x1b[0m\n   \
                  toolshed add https://github.com/org/tool   \x1b[90m# Add a tool by URL\x1b[0m\n   \
                  toolshed docs comfyui                      \x1b[90m# Summarize an installed tool's README\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Workspace root directory (defaults to ~/toolshed)
    #[arg(long, short = 'w', global = true, env = "TOOLSHED_HOME")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show presence, version and health for every manifest tool
    Status(StatusArgs),

    /// Install tools from a manifest
    Install(InstallArgs),

    /// Add a tool to the manifest by URL
    Add(AddArgs),

    /// Show one tool's descriptor and live presence
    Show(ShowArgs),

    /// Summarize an installed tool's documentation
    Docs(DocsArgs),

    /// Manage manifest documents in the workspace
    #[command(name = "manifest")]
    Manifest(ManifestArgs),

    /// Report the ambient environment (git, python, uv, ...)
    Doctor,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_status() {
        let cli = Cli::try_parse_from(["toolshed", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parsing_doctor() {
        let cli = Cli::try_parse_from(["toolshed", "doctor"]).unwrap();
        assert!(matches!(cli.command, Commands::Doctor));
    }

    #[test]
    fn test_cli_parsing_workspace_flag() {
        let cli =
            Cli::try_parse_from(["toolshed", "-w", "/srv/tools", "status"]).unwrap();
        assert_eq!(cli.workspace.as_deref(), Some(std::path::Path::new("/srv/tools")));
    }

    #[test]
    fn test_cli_parsing_show() {
        let cli = Cli::try_parse_from(["toolshed", "show", "comfyui"]).unwrap();
        match cli.command {
            Commands::Show(args) => assert_eq!(args.name, "comfyui"),
            _ => panic!("Expected Show command"),
        }
    }
}
