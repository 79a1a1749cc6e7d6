use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp home
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".pr-dashboard").join("config.json")
}

const BINARY_NAME: &str = "pr-dashboard";

fn command(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path()).env_remove("PR_DASHBOARD_URL");
    cmd
}

#[test]
/// Help command should list every subcommand.
fn cli_help_lists_commands() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("watch"))
        .stdout(contains("headless"))
        .stdout(contains("snapshot"))
        .stdout(contains("config"));
}

#[test]
fn set_server_writes_config_file() {
    let tmp = temp_home();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    command(&tmp)
        .args(["config", "set-server", "https://prs.example.com/"])
        .assert()
        .success()
        .stderr(contains("Server saved"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("\"server_url\": \"https://prs.example.com\""));

    command(&tmp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("https://prs.example.com"));
}

#[test]
fn set_server_rejects_non_http_urls() {
    let tmp = temp_home();
    command(&tmp)
        .args(["config", "set-server", "ftp://prs.example.com"])
        .assert()
        .failure()
        .stderr(contains("Invalid server URL"));
    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// Clear should delete an existing config file.
fn clear_deletes_config_file() {
    let tmp = temp_home();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    command(&tmp)
        .args(["config", "clear"])
        .assert()
        .success()
        .stderr(contains("Config cleared"));

    assert!(!config_path.exists());
}

#[test]
fn snapshot_against_unreachable_server_fails() {
    let tmp = temp_home();
    command(&tmp)
        .args(["snapshot", "--server", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(contains("Failed to load pull requests"));
}

#[test]
fn snapshot_rejects_unknown_state() {
    let tmp = temp_home();
    command(&tmp)
        .args(["snapshot", "--server", "http://127.0.0.1:1", "--state", "mergd"])
        .assert()
        .failure()
        .stderr(contains("unknown state 'mergd'"))
        .stderr(contains("Failed to load pull requests").not());
}
