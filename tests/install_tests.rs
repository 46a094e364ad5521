//! Install command tests
//!
//! Custom-source and local-git installs only; nothing here touches the
//! network.

mod common;

use predicates::prelude::*;

#[test]
fn test_install_custom_tool_runs_steps() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: local
    source_kind: custom
    install_steps:
      - echo done > step-ran.txt
"#,
    );

    common::toolshed_cmd(&workspace)
        .args(["install", "local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("all succeeded"));

    assert!(workspace.file_exists("custom/local/step-ran.txt"));
    assert!(workspace.file_exists("custom/local/.toolshed.json"));
}

#[test]
fn test_failing_step_is_recorded_but_install_succeeds() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: warny
    source_kind: custom
    install_steps:
      - exit 7
      - echo done > second-ran.txt
"#,
    );

    common::toolshed_cmd(&workspace)
        .args(["install", "warny"])
        .assert()
        .success()
        .stdout(predicate::str::contains("failed"))
        .stdout(predicate::str::contains("all succeeded"));

    // the runner does not stop early for install steps
    assert!(workspace.file_exists("custom/warny/second-ran.txt"));
}

#[test]
fn test_install_clones_local_repo_into_code_host() {
    let workspace = common::TestWorkspace::new();
    let repo = workspace.create_mock_git_repo("toolA");
    workspace.write_manifest(&format!(
        r#"
tools:
  - name: toolA
    source_kind: code_host
    url: {}
"#,
        repo.display()
    ));

    common::toolshed_cmd(&workspace)
        .args(["install", "toolA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("code_host"));

    assert!(workspace.file_exists("code_host/toolA/README.md"));

    // second run updates in place instead of re-fetching
    common::toolshed_cmd(&workspace)
        .args(["install", "toolA", "--show-output"])
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));

    assert!(!workspace.file_exists("code_host/toolA/toolA"));
}

#[test]
fn test_acquire_failure_fails_the_batch_exit_code() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: ghost
    source_kind: code_host
    url: /nonexistent/toolshed-fixture-repo
"#,
    );

    common::toolshed_cmd(&workspace)
        .args(["install", "ghost"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 failed"));
}

#[test]
fn test_one_failure_does_not_stop_the_batch() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: ghost
    source_kind: code_host
    url: /nonexistent/toolshed-fixture-repo
  - name: local
    source_kind: custom
    install_steps:
      - echo done > ran.txt
"#,
    );

    common::toolshed_cmd(&workspace)
        .args(["install", "--all"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2 tool(s) processed"));

    // the failing tool did not prevent the other from installing
    assert!(workspace.file_exists("custom/local/ran.txt"));
}

#[test]
fn test_install_unknown_tool_name() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: known
    source_kind: custom
"#,
    );

    common::toolshed_cmd(&workspace)
        .args(["install", "unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the manifest"));
}

#[test]
fn test_install_empty_manifest_is_a_noop() {
    let workspace = common::TestWorkspace::new();
    common::toolshed_cmd(&workspace)
        .args(["install", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("has no tools"));
}

#[test]
fn test_install_profile_subset() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: in-profile
    source_kind: custom
    install_steps:
      - echo done > in.txt
  - name: out-of-profile
    source_kind: custom
    install_steps:
      - echo done > out.txt
profiles:
  media: [in-profile]
"#,
    );

    common::toolshed_cmd(&workspace)
        .args(["install", "--profile", "media"])
        .assert()
        .success();

    assert!(workspace.file_exists("custom/in-profile/in.txt"));
    assert!(!workspace.file_exists("custom/out-of-profile"));
}

#[test]
fn test_install_unknown_profile() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        r#"
tools:
  - name: known
    source_kind: custom
"#,
    );

    common::toolshed_cmd(&workspace)
        .args(["install", "--profile", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}
