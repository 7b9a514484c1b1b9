//! Integration tests for document commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn stringly_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stringly").unwrap();
    cmd.env("STRINGLY_DATA_PATH", data_dir.path())
        .env("STRINGLY_CONFIG", data_dir.path().join("missing-config.yml"))
        .env_remove("RUST_LOG");
    cmd
}

fn setup_documents() -> TempDir {
    let data_dir = TempDir::new().unwrap();
    fs::write(
        data_dir.path().join("alpha.json"),
        r#"{"id": "alpha", "kind": "widget"}"#,
    )
    .unwrap();
    fs::write(
        data_dir.path().join("beta.json"),
        r#"{"id": "beta", "content": "hello"}"#,
    )
    .unwrap();
    data_dir
}

#[test]
fn test_ls_empty_directory() {
    let data_dir = TempDir::new().unwrap();

    stringly_cmd(&data_dir)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_ls_prints_ids_in_order() {
    let data_dir = setup_documents();

    stringly_cmd(&data_dir)
        .arg("ls")
        .assert()
        .success()
        .stdout("alpha\nbeta\n");
}

#[test]
fn test_ls_json_skips_malformed_files() {
    let data_dir = setup_documents();
    fs::write(data_dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(data_dir.path().join("notes.txt"), "ignored").unwrap();

    let output = stringly_cmd(&data_dir)
        .args(["ls", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let docs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = docs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["alpha", "beta"]);
}

#[test]
fn test_get_prints_document() {
    let data_dir = setup_documents();

    stringly_cmd(&data_dir)
        .args(["get", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "widget""#));

    stringly_cmd(&data_dir)
        .args(["get", "beta", "--format", "json"])
        .assert()
        .success()
        .stdout(r#"{"id":"beta","content":"hello"}"#.to_string() + "\n");
}

#[test]
fn test_get_missing_exits_not_found() {
    let data_dir = setup_documents();

    stringly_cmd(&data_dir)
        .args(["get", "ghost"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Document not found: ghost"));
}

#[test]
fn test_rm_deletes_once() {
    let data_dir = setup_documents();

    stringly_cmd(&data_dir)
        .args(["rm", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted alpha"));
    assert!(!data_dir.path().join("alpha.json").exists());

    stringly_cmd(&data_dir)
        .args(["delete", "alpha"])
        .assert()
        .code(2);

    stringly_cmd(&data_dir)
        .arg("ls")
        .assert()
        .success()
        .stdout("beta\n");
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let env_dir = setup_documents();
    let flag_dir = TempDir::new().unwrap();
    fs::write(flag_dir.path().join("gamma.json"), r#"{"id": "gamma"}"#).unwrap();

    stringly_cmd(&env_dir)
        .arg("--data-dir")
        .arg(flag_dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout("gamma\n");
}

#[test]
fn test_help_lists_commands() {
    let data_dir = TempDir::new().unwrap();

    stringly_cmd(&data_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("mcp"));
}
