//! Command implementations
//!
//! One submodule per CLI subcommand, plus shared helpers. Each `run`
//! resolves the workspace explicitly from the global flag and settings;
//! nothing here relies on process-wide state.

pub mod add;
pub mod completions;
pub mod docs;
pub mod doctor;
pub mod helpers;
pub mod install;
pub mod manifest;
pub mod menu;
pub mod show;
pub mod status;
pub mod version;
