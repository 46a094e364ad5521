//! Common test utilities for Toolshed integration tests

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the workspace root handed to the binary via TOOLSHED_HOME
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("ws");
        std::fs::create_dir_all(&path).expect("Failed to create workspace root");
        Self { temp, path }
    }

    /// Write a file in the workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write the workspace default manifest
    pub fn write_manifest(&self, content: &str) {
        self.write_file("manifests/default.yaml", content);
    }

    /// Create a git repository with one committed README, outside the
    /// workspace root, and return its path
    pub fn create_mock_git_repo(&self, name: &str) -> PathBuf {
        let repo_path = self.temp.path().join(name);
        std::fs::create_dir_all(&repo_path).expect("Failed to create repo directory");
        std::fs::write(repo_path.join("README.md"), "# Mock repo\n\nFixture content.\n")
            .expect("Failed to write README");

        git(&repo_path, &["init", "--quiet"]);
        git(&repo_path, &["add", "."]);
        git(
            &repo_path,
            &[
                "-c",
                "user.name=Tester",
                "-c",
                "user.email=tester@example.com",
                "commit",
                "--quiet",
                "-m",
                "initial",
            ],
        );

        repo_path
    }
}

fn git(cwd: &std::path::Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// Command for the toolshed binary, pinned to a test workspace and
/// isolated from any developer configuration
pub fn toolshed_cmd(workspace: &TestWorkspace) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("toolshed").expect("binary builds");
    cmd.env("TOOLSHED_HOME", &workspace.path);
    cmd.env(
        "TOOLSHED_CONFIG",
        workspace.temp.path().join("no-such-config.yaml"),
    );
    cmd
}
