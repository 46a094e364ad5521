//! Status command tests

mod common;

use predicates::prelude::*;

#[test]
fn test_status_empty_workspace() {
    let workspace = common::TestWorkspace::new();
    common::toolshed_cmd(&workspace)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tools in manifest"));
}

#[test]
fn test_status_lists_manifest_tools() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: toolA
    source_kind: code_host
    url: https://github.com/org/toolA
  - name: toolB
    source_kind: custom
"#,
    );
    // toolA is "installed" by folder presence
    workspace.write_file("code_host/toolA/main.py", "print('hi')\n");

    common::toolshed_cmd(&workspace)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("toolA"))
        .stdout(predicate::str::contains("toolB"))
        .stdout(predicate::str::contains("healthy"));
}

#[test]
fn test_status_skips_malformed_entry_and_still_loads() {
    let workspace = common::TestWorkspace::new();
    // first entry has no name, second is valid
    workspace.write_manifest(
        r#"
tools:
  - source_kind: code_host
    url: https://github.com/org/nameless
  - name: survivor
    source_kind: custom
"#,
    );

    common::toolshed_cmd(&workspace)
        .args(["-v", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("survivor"))
        .stdout(predicate::str::contains("(1)"))
        .stderr(predicate::str::contains("skipping invalid entry"));
}

#[test]
fn test_status_detailed_shows_untracked_folders() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: tracked
    source_kind: custom
"#,
    );
    workspace.write_file("custom/stray/file.txt", "x");

    common::toolshed_cmd(&workspace)
        .args(["status", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not tracked by this manifest"))
        .stdout(predicate::str::contains("stray"));
}

#[test]
fn test_status_version_marker_from_file() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: versioned
    source_kind: custom
"#,
    );
    workspace.write_file("custom/versioned/VERSION", "2.1.0\n");

    common::toolshed_cmd(&workspace)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("2.1.0"));
}
