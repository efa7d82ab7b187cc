//! End-to-end tests for the strata binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn strata(workspace: &Path, config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_strata"))
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .env_clear()
        .env("XDG_CONFIG_HOME", config_home)
        .env("STRATA_LOG", "off")
        .output()
        .expect("failed to run strata binary")
}

fn write_snapshot(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("snapshot.json");
    fs::write(
        &path,
        r#"{
  "parameters": {
    "/config/billing_prod/db/url": "jdbc:postgresql://prod/billing",
    "/config/billing/db/url": "jdbc:postgresql://dev/billing",
    "/config/application/db/pool": "4"
  },
  "failures": {
    "/config/application_prod/": "access-denied"
  }
}"#,
    )
    .unwrap();
    path
}

#[test]
fn test_contexts_command_prints_ordered_contexts() {
    let workspace = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();

    let output = strata(
        workspace.path(),
        config_home.path(),
        &["contexts", "--name", "billing", "--profile", "prod", "--format", "json"],
    );

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["contexts"],
        serde_json::json!([
            "/config/billing_prod/",
            "/config/billing/",
            "/config/application_prod/",
            "/config/application/"
        ])
    );
}

#[test]
fn test_locate_from_snapshot() {
    let workspace = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    let snapshot = write_snapshot(&workspace);

    let output = strata(
        workspace.path(),
        config_home.path(),
        &[
            "locate",
            "--name",
            "billing",
            "--profile",
            "prod",
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--format",
            "json",
        ],
    );

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "partial");
    assert_eq!(json["properties"]["db.url"], "jdbc:postgresql://prod/billing");
    assert_eq!(json["properties"]["db.pool"], "4");
}

#[test]
fn test_require_complete_fails_on_skipped_context() {
    let workspace = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    let snapshot = write_snapshot(&workspace);

    let output = strata(
        workspace.path(),
        config_home.path(),
        &[
            "locate",
            "--name",
            "billing",
            "--profile",
            "prod",
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--require-complete",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/config/application_prod/"));
}

#[test]
fn test_validate_reports_invalid_workspace_config() {
    let workspace = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    let config_dir = workspace.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[secretsmanager]\nprofile_separator = \"!\"\n",
    )
    .unwrap();

    let output = strata(workspace.path(), config_home.path(), &["validate"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("secretsmanager"));
}
