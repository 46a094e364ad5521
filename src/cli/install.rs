use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install everything in the default manifest:\n    toolshed install --all\n\n\
                   Install selected tools:\n    toolshed install comfyui fluxgym\n\n\
                   Install a profile:\n    toolshed install --profile media\n\n\
                   See what would run without touching anything:\n    toolshed install --all --dry-run")]
pub struct InstallArgs {
    /// Tool names to install. With no names and no --all, an interactive
    /// menu is shown
    pub names: Vec<String>,

    /// Install every tool in the manifest
    #[arg(long)]
    pub all: bool,

    /// Manifest to install from (name in the workspace, or a path).
    /// Defaults to the workspace default manifest
    #[arg(long, short = 'm', value_name = "MANIFEST")]
    pub manifest: Option<String>,

    /// Install the tools of a named profile
    #[arg(long, short = 'p', value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Show what would be run without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Per-step output even for successful steps
    #[arg(long)]
    pub show_output: bool,
}
