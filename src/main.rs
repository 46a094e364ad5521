//! Toolshed - workspace installer for AI/ML tooling
//!
//! A command line tool that detects, installs, and updates third-party
//! AI/ML tools (git checkouts, model-hub repositories, package-index
//! packages) in one workspace directory, driven by declarative manifests.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod detect;
mod docs;
mod error;
mod git;
mod installer;
mod manifest;
mod progress;
mod runner;
mod source;
mod workspace;

use cli::{Cli, Commands};
use error::Result;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "toolshed=debug" } else { "toolshed=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) if code != 0 => std::process::exit(code),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Dispatch to the selected command. The returned code is the process
/// exit code: nonzero when any requested install failed.
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Status(args) => commands::status::run(cli.workspace, args).map(|()| 0),
        Commands::Install(args) => {
            commands::install::run(cli.workspace, args).map(|failures| i32::from(failures > 0))
        }
        Commands::Add(args) => {
            commands::add::run(cli.workspace, args).map(|failures| i32::from(failures > 0))
        }
        Commands::Show(args) => commands::show::run(cli.workspace, args).map(|()| 0),
        Commands::Docs(args) => commands::docs::run(cli.workspace, args).map(|()| 0),
        Commands::Manifest(args) => commands::manifest::run(cli.workspace, args).map(|()| 0),
        Commands::Doctor => commands::doctor::run(cli.workspace).map(|()| 0),
        Commands::Version => commands::version::run().map(|()| 0),
        Commands::Completions(args) => commands::completions::run(args).map(|()| 0),
    }
}
