use clap::Parser;

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Manifest to check (name in the workspace, or a path)
    #[arg(long, short = 'm', value_name = "MANIFEST")]
    pub manifest: Option<String>,

    /// Include paths, versions, and folders not tracked by the manifest
    #[arg(long, short = 'd')]
    pub detailed: bool,
}
