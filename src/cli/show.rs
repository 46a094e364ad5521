use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Tool name as it appears in the manifest
    pub name: String,

    /// Manifest to read (name in the workspace, or a path)
    #[arg(long, short = 'm', value_name = "MANIFEST")]
    pub manifest: Option<String>,
}
