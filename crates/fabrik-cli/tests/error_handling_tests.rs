//! Tests for error handling, suggestions and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn fabrik(dir: &tempfile::TempDir, config: &str) -> Command {
    let path = dir.path().join("fabrik.toml");
    std::fs::write(&path, config).unwrap();
    let mut cmd = Command::cargo_bin("fabrik").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(path);
    cmd
}

#[test]
fn test_missing_descriptor_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fabrik(&dir, "")
        .args(["generate", "absent.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Component descriptor not found"))
        .stderr(predicate::str::contains("Suggestions"));
}

#[test]
fn test_invalid_descriptor_is_user_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("web.yaml"), "name: web\nchart: nope\n").unwrap();
    fabrik(&dir, "")
        .args(["install", "web.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid component descriptor"));
}

#[test]
fn test_invalid_component_name_is_user_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("web.yaml"), "name: ../escape\nsource: repo\n").unwrap();
    fabrik(&dir, "")
        .args(["install", "web.yaml"])
        .assert()
        .code(2);
}

#[cfg(unix)]
#[test]
fn test_git_failure_is_external() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("web.yaml"), "name: web\nsource: repo\n").unwrap();
    fabrik(&dir, "[git]\nprogram = \"false\"\n[helm]\ndocker_program = \"echo\"\n")
        .args(["generate", "web.yaml"])
        .assert()
        .code(5)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("web"));
}

#[test]
fn test_missing_git_binary_is_external() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("web.yaml"), "name: web\nsource: repo\n").unwrap();
    fabrik(&dir, "[git]\nprogram = \"fabrik-no-such-git\"\n")
        .args(["install", "web.yaml"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("fabrik-no-such-git"));
}

#[test]
fn test_malformed_metadata_is_user_error() {
    let dir = tempfile::tempdir().unwrap();
    fabrik(&dir, "")
        .args(["normalize", "-n", "prod"])
        .write_stdin("kind: Service\nmetadata: broken\n")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("metadata"));
}

#[test]
fn test_missing_explicit_config_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("fabrik")
        .unwrap()
        .current_dir(dir.path())
        .args(["--config", "does-not-exist.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_config_key() {
    let dir = tempfile::tempdir().unwrap();
    fabrik(&dir, "")
        .args(["config", "get", "helm.colour"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_usage_error_exit_code() {
    Command::cargo_bin("fabrik")
        .unwrap()
        .args(["normalize", "input.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--namespace"));
}

#[test]
fn test_verbose_shows_cause_chain() {
    let dir = tempfile::tempdir().unwrap();
    fabrik(&dir, "")
        .args(["-v", "normalize", "-n", "prod"])
        .write_stdin("---\nkind: A\nmetadata: [1]\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Caused by").or(predicate::str::contains("sequence")));
}
