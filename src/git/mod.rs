//! Git operations for acquiring and inspecting tool checkouts
//!
//! This module handles:
//! - Cloning repositories (HTTPS and SSH)
//! - Updating an existing checkout in place (fetch + fast-forward)
//! - Reading a descriptive version string for a checkout
//! - Inspecting work-tree state for presence health
//!
//! Authentication is delegated entirely to git's native system:
//! - SSH keys from ~/.ssh/ and the ssh agent
//! - Git credential helpers

use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{
    Cred, CredentialType, DescribeFormatOptions, DescribeOptions, Error, ErrorClass,
    FetchOptions, RemoteCallbacks, Repository, StatusOptions,
};

use crate::error::{Result, ToolshedError};

/// Outcome of an update-in-place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
    FastForwarded,
}

/// Work-tree facts backing presence health
#[derive(Debug, Clone, Copy)]
pub struct WorkTreeState {
    /// Uncommitted or untracked changes present
    pub dirty: bool,
    /// Local branch lags its already-fetched upstream
    pub behind_upstream: bool,
}

/// Whether a directory is a git checkout
pub fn is_checkout(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Clone a repository into `target`.
///
/// Shallow (depth=1) for remote URLs; local paths and file:// URLs are
/// cloned in full since libgit2 does not support shallow local clones.
pub fn clone(url: &str, target: &Path) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let is_local =
        url.starts_with("file://") || url.starts_with('/') || Path::new(url).is_absolute();
    if !is_local {
        fetch_options.depth(1);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);

    builder
        .clone(url, target)
        .map_err(|e| ToolshedError::GitCloneFailed {
            url: url.to_string(),
            reason: e.message().to_string(),
        })
}

/// Update an existing checkout in place: fetch origin, then fast-forward
/// the current branch to its remote counterpart.
///
/// Diverged local history is an error rather than a merge attempt; the
/// operator has changed the checkout and an installer must not rewrite it.
pub fn update(path: &Path) -> Result<UpdateOutcome> {
    let repo = Repository::open(path).map_err(|e| ToolshedError::GitUpdateFailed {
        path: path.display().to_string(),
        reason: e.message().to_string(),
    })?;

    let branch_name = {
        let head = repo.head().map_err(|e| update_error(path, e.message()))?;
        head.shorthand()
            .ok_or_else(|| update_error(path, "HEAD is not a named branch"))?
            .to_string()
    };

    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);
    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let mut remote = repo
        .find_remote("origin")
        .map_err(|e| update_error(path, e.message()))?;
    remote
        .fetch(&[] as &[&str], Some(&mut fetch_options), None)
        .map_err(|e| update_error(path, e.message()))?;
    drop(remote);

    let remote_ref = repo
        .find_reference(&format!("refs/remotes/origin/{}", branch_name))
        .map_err(|e| update_error(path, e.message()))?;
    let annotated = repo
        .reference_to_annotated_commit(&remote_ref)
        .map_err(|e| update_error(path, e.message()))?;

    let (analysis, _) = repo
        .merge_analysis(&[&annotated])
        .map_err(|e| update_error(path, e.message()))?;

    if analysis.is_up_to_date() {
        return Ok(UpdateOutcome::UpToDate);
    }

    if analysis.is_fast_forward() {
        let refname = format!("refs/heads/{}", branch_name);
        let mut reference = repo
            .find_reference(&refname)
            .map_err(|e| update_error(path, e.message()))?;
        reference
            .set_target(annotated.id(), "toolshed: fast-forward")
            .map_err(|e| update_error(path, e.message()))?;
        repo.set_head(&refname)
            .map_err(|e| update_error(path, e.message()))?;
        repo.checkout_head(Some(CheckoutBuilder::default().force()))
            .map_err(|e| update_error(path, e.message()))?;
        return Ok(UpdateOutcome::FastForwarded);
    }

    Err(update_error(
        path,
        "local history has diverged from origin; resolve manually",
    ))
}

/// Descriptive version string for a checkout: nearest tag when one exists,
/// otherwise an abbreviated commit id. `None` when the path is not a
/// readable repository.
pub fn describe_version(path: &Path) -> Option<String> {
    let repo = Repository::open(path).ok()?;
    let describe = repo
        .describe(
            DescribeOptions::new()
                .describe_tags()
                .show_commit_oid_as_fallback(true),
        )
        .ok()?;
    describe
        .format(Some(DescribeFormatOptions::new().abbreviated_size(8)))
        .ok()
}

/// Inspect a checkout's work tree. `None` on any failure; callers map that
/// to unknown health rather than an error.
///
/// No network: lag is judged against the already-fetched upstream ref only.
pub fn work_tree_state(path: &Path) -> Option<WorkTreeState> {
    let repo = Repository::open(path).ok()?;

    let mut opts = StatusOptions::new();
    opts.include_untracked(true).exclude_submodules(true);
    let statuses = repo.statuses(Some(&mut opts)).ok()?;
    let dirty = !statuses.is_empty();

    let behind_upstream = (|| {
        let head = repo.head().ok()?;
        let local = head.target()?;
        let branch = git2::Branch::wrap(head);
        let upstream = branch.upstream().ok()?;
        let upstream_oid = upstream.get().target()?;
        let (_, behind) = repo.graph_ahead_behind(local, upstream_oid).ok()?;
        Some(behind > 0)
    })()
    .unwrap_or(false);

    Some(WorkTreeState {
        dirty,
        behind_upstream,
    })
}

fn update_error(path: &Path, reason: &str) -> ToolshedError {
    ToolshedError::GitUpdateFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn try_ssh_key_files(username: &str) -> std::result::Result<Cred, git2::Error> {
    let home = dirs::home_dir().unwrap_or_default();
    let ssh_dir = home.join(".ssh");

    for key_name in &["id_ed25519", "id_rsa", "id_ecdsa"] {
        let private_key = ssh_dir.join(key_name);
        let public_key = ssh_dir.join(format!("{key_name}.pub"));

        if !private_key.exists() {
            continue;
        }

        let public_key_path = public_key.exists().then_some(public_key.as_path());

        if let Ok(cred) = Cred::ssh_key(username, public_key_path, &private_key, None) {
            return Ok(cred);
        }
    }

    Err(Error::new(
        git2::ErrorCode::Auth,
        ErrorClass::Ssh,
        "SSH key not found",
    ))
}

/// Wire git's native credential sources into remote callbacks
fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks<'_>) {
    callbacks.credentials(|url, username_from_url, allowed| {
        if allowed.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
            return try_ssh_key_files(username);
        }

        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(config) = git2::Config::open_default() {
                if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                    return Ok(cred);
                }
            }
            return Cred::userpass_plaintext(username_from_url.unwrap_or("git"), "");
        }

        Cred::default()
    });
}
