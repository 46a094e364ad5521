use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Arguments for the manifest command
#[derive(Parser, Debug)]
pub struct ManifestArgs {
    #[command(subcommand)]
    pub command: ManifestSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ManifestSubcommand {
    /// List the manifests stored in the workspace
    List,

    /// Copy a stored manifest to a destination for sharing
    Export {
        /// Manifest name in the workspace
        name: String,
        /// Destination file
        dest: PathBuf,
    },

    /// Bring an external manifest document into the workspace
    Import {
        /// Manifest document to import
        src: PathBuf,
    },
}
