//! Integration tests for log destination selection in the binary.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_log_output_file_writes_structured_logs() {
    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("config");
    let workspace = temp_dir.path().join("ws");
    let log_file = temp_dir.path().join("logs").join("strata.log");
    fs::create_dir_all(&config_home).unwrap();
    fs::create_dir_all(&workspace).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_strata"))
        .env_clear()
        .env("XDG_CONFIG_HOME", config_home.as_os_str())
        .arg("--workspace")
        .arg(&workspace)
        .arg("--log-output")
        .arg("file")
        .arg("--log-file")
        .arg(&log_file)
        .arg("--log-format")
        .arg("json")
        .args(["contexts", "--name", "billing"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "strata contexts should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stderr.is_empty(), "logs should not reach stderr");

    let contents = fs::read_to_string(&log_file).unwrap();
    let first: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
    assert_eq!(first["level"], "INFO");
    assert!(contents.contains("Executing command"));
}

#[test]
fn test_log_level_off_keeps_stderr_clean() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("ws");
    fs::create_dir_all(&workspace).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_strata"))
        .env_clear()
        .env("XDG_CONFIG_HOME", temp_dir.path().as_os_str())
        .arg("--workspace")
        .arg(&workspace)
        .arg("--log-level")
        .arg("off")
        .args(["contexts", "--store", "secrets-manager", "--name", "billing"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. /secret/billing"));
    assert!(stdout.contains("2. /secret/application"));
}
