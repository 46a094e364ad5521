//! Error types and handling for Toolshed
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Toolshed operations
#[derive(Error, Diagnostic, Debug)]
pub enum ToolshedError {
    // Manifest errors
    #[error("Manifest not found: {path}")]
    #[diagnostic(
        code(toolshed::manifest::not_found),
        help("Run 'toolshed manifest list' to see the manifests in your workspace")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest: {path}")]
    #[diagnostic(code(toolshed::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Failed to write manifest: {path}")]
    #[diagnostic(code(toolshed::manifest::write_failed))]
    ManifestWriteFailed { path: String, reason: String },

    #[error("Invalid tool entry: {reason}")]
    #[diagnostic(code(toolshed::manifest::invalid_entry))]
    InvalidDescriptor { reason: String },

    // Tool errors
    #[error("Tool '{name}' is not in the manifest")]
    #[diagnostic(
        code(toolshed::tool::not_found),
        help("Run 'toolshed status' to list the tools the manifest knows about")
    )]
    ToolNotFound { name: String },

    #[error("Tool '{name}' is not installed")]
    #[diagnostic(
        code(toolshed::tool::not_installed),
        help("Run 'toolshed install {name}' first")
    )]
    ToolNotInstalled { name: String },

    #[error("Profile '{name}' is not defined in the manifest")]
    #[diagnostic(code(toolshed::manifest::profile_not_found))]
    ProfileNotFound { name: String },

    // Git errors
    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(toolshed::git::clone_failed),
        help("Check that URL is correct and you have access to the repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to update checkout at '{path}': {reason}")]
    #[diagnostic(code(toolshed::git::update_failed))]
    GitUpdateFailed { path: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(toolshed::git::operation_failed))]
    GitOperationFailed { message: String },

    // Workspace errors
    #[error("Failed to create workspace directory: {path}")]
    #[diagnostic(
        code(toolshed::workspace::create_failed),
        help("Check permissions on the workspace root, or point TOOLSHED_HOME elsewhere")
    )]
    WorkspaceCreateFailed { path: String, reason: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(toolshed::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(toolshed::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(toolshed::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(toolshed::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(toolshed::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for ToolshedError {
    fn from(err: std::io::Error) -> Self {
        ToolshedError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ToolshedError {
    fn from(err: serde_yaml::Error) -> Self {
        ToolshedError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ToolshedError {
    fn from(err: serde_json::Error) -> Self {
        ToolshedError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for ToolshedError {
    fn from(err: git2::Error) -> Self {
        ToolshedError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for ToolshedError {
    fn from(err: inquire::InquireError) -> Self {
        ToolshedError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, ToolshedError>;
