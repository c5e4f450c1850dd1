//! Integration tests for the seolens CLI
//!
//! These tests run the compiled binary as a subprocess. None of them need
//! network access.

use std::process::Command;

fn seolens() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_seolens"));
    command.env_remove("GEMINI_API_KEY").env("RUST_LOG", "off");
    command
}

#[test]
fn test_cli_help() {
    let output = seolens().arg("--help").output().expect("Failed to run CLI");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("seolens - On-page SEO scoring"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--industry"));
    assert!(stdout.contains("GEMINI_API_KEY"));
}

#[test]
fn test_cli_no_arguments_prints_help() {
    let output = seolens().output().expect("Failed to run CLI");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let output = seolens().arg("--version").output().expect("Failed to run CLI");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.trim(),
        format!("seolens {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_cli_unknown_flag_fails() {
    let output = seolens()
        .args(["--bogus", "example.com"])
        .output()
        .expect("Failed to run CLI");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown flag: --bogus"));
}

#[test]
fn test_cli_invalid_url_reports_zero_score() {
    let output = seolens()
        .args(["http://"])
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("SEO Score: 0/100"));
    assert!(stdout.contains("Invalid URL"));
}

#[test]
fn test_cli_json_output_for_invalid_url() {
    let output = seolens()
        .args(["--json", "http://"])
        .output()
        .expect("Failed to run CLI");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["score"], 0);
    assert!(json["page"]["error"].as_str().unwrap().starts_with("Invalid URL"));
}

#[test]
fn test_cli_save_to_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("reports").join("audit.md");

    let output = seolens()
        .args(["http://", "--save"])
        .arg(&target)
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let saved = std::fs::read_to_string(&target).unwrap();
    assert!(saved.contains("SEO Score: 0/100"));
}

#[test]
fn test_cli_save_to_directory_uses_default_name() {
    let dir = tempfile::tempdir().unwrap();

    let output = seolens()
        .arg("http://")
        .arg(format!("--save={}", dir.path().display()))
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    assert!(dir.path().join("report.md").exists());
}
