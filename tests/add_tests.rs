//! Add command tests

mod common;

use predicates::prelude::*;

#[test]
fn test_add_creates_manifest_entry() {
    let workspace = common::TestWorkspace::new();

    common::toolshed_cmd(&workspace)
        .args(["add", "https://github.com/org/toolA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toolA"))
        .stdout(predicate::str::contains("added to"));

    let manifest = workspace.read_file("manifests/default.yaml");
    assert!(manifest.contains("name: toolA"));
    assert!(manifest.contains("source_kind: code_host"));
    assert!(manifest.contains("url: https://github.com/org/toolA"));
}

#[test]
fn test_add_classifies_model_hub_url() {
    let workspace = common::TestWorkspace::new();

    common::toolshed_cmd(&workspace)
        .args(["add", "https://huggingface.co/org/some-model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model_hub"));

    let manifest = workspace.read_file("manifests/default.yaml");
    assert!(manifest.contains("source_kind: model_hub"));
}

#[test]
fn test_add_same_name_replaces_entry() {
    let workspace = common::TestWorkspace::new();

    common::toolshed_cmd(&workspace)
        .args(["add", "https://github.com/org/toolA"])
        .assert()
        .success();
    common::toolshed_cmd(&workspace)
        .args(["add", "https://github.com/fork/toolA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced in"));

    let manifest = workspace.read_file("manifests/default.yaml");
    assert_eq!(manifest.matches("name: toolA").count(), 1);
    assert!(manifest.contains("https://github.com/fork/toolA"));
    assert!(!manifest.contains("https://github.com/org/toolA"));
}

#[test]
fn test_add_with_steps_and_environment() {
    let workspace = common::TestWorkspace::new();

    common::toolshed_cmd(&workspace)
        .args([
            "add",
            "https://github.com/org/toolA",
            "--isolated-env",
            "--step",
            "uv pip install -r requirements.txt",
            "--start-command",
            "python main.py",
        ])
        .assert()
        .success();

    let manifest = workspace.read_file("manifests/default.yaml");
    assert!(manifest.contains("uv pip install -r requirements.txt"));
    assert!(manifest.contains("needs_isolated_environment: true"));
    assert!(manifest.contains("start_command: python main.py"));
}

#[test]
fn test_add_and_install_immediately() {
    let workspace = common::TestWorkspace::new();
    let repo = workspace.create_mock_git_repo("toolA");

    common::toolshed_cmd(&workspace)
        .args(["add", repo.to_str().unwrap(), "--name", "toolA", "--install"])
        .assert()
        .success();

    // plain filesystem paths classify as custom, so the folder lands there
    assert!(workspace.file_exists("custom/toolA"));
}

#[test]
fn test_add_underivable_name_is_an_error() {
    let workspace = common::TestWorkspace::new();

    common::toolshed_cmd(&workspace)
        .args(["add", "///"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
