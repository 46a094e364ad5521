use clap::Parser;

/// Arguments for the docs command
#[derive(Parser, Debug)]
pub struct DocsArgs {
    /// Installed tool to summarize
    pub name: String,

    /// Manifest used to resolve the tool's folder (name or path)
    #[arg(long, short = 'm', value_name = "MANIFEST")]
    pub manifest: Option<String>,
}
