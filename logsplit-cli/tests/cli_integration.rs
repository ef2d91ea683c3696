//! Integration tests for the logsplit CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn logsplit() -> Command {
    Command::cargo_bin("logsplit").unwrap()
}

fn json_records(args: &[&str]) -> Vec<Value> {
    let output = logsplit().args(args).arg("-f").arg("json").output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    match serde_json::from_slice(&output.stdout).unwrap() {
        Value::Array(records) => records,
        other => panic!("expected array, got {other}"),
    }
}

#[test]
fn test_split_lines() {
    logsplit()
        .arg("split")
        .arg("-i")
        .arg(fixture_path("service.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2024-03-01 10:00:05 WARN disk usage at 91%\n",
        ))
        .stdout(predicate::str::contains("service stopped"));
}

#[test]
fn test_split_stack_traces_with_line_start() {
    let path = fixture_path("stacktrace.log");
    let records = json_records(&[
        "split",
        "-i",
        &path,
        "--line-start-pattern",
        r"^\d{4}-\d{2}-\d{2}",
    ]);

    assert_eq!(records.len(), 2);
    let first = records[0]["text"].as_str().unwrap();
    assert!(first.starts_with("2024-03-01 12:00:00 ERROR request failed"));
    assert!(first.ends_with("at com.example.Server.run(Server.java:7)"));
    assert_eq!(records[1]["text"], "2024-03-01 12:00:01 INFO request retried");
    assert_eq!(records[1]["index"], 1);
    assert_eq!(records[0]["file"], path.as_str());
}

#[test]
fn test_split_with_config_file() {
    let path = fixture_path("stacktrace.log");
    let config = fixture_path("multiline.toml");
    let records = json_records(&["split", "-i", &path, "-c", &config]);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_split_without_pattern_is_line_based() {
    let path = fixture_path("stacktrace.log");
    let records = json_records(&["split", "-i", &path]);
    assert_eq!(records.len(), 5);
    assert_eq!(
        records[2]["text"],
        "at com.example.Handler.handle(Handler.java:42)"
    );
}

#[test]
fn test_preserve_leading_whitespace() {
    let path = fixture_path("stacktrace.log");
    let records = json_records(&["split", "-i", &path, "--preserve-leading"]);
    assert_eq!(
        records[2]["text"],
        "    at com.example.Handler.handle(Handler.java:42)"
    );
}

#[test]
fn test_conflicting_patterns_rejected() {
    logsplit()
        .args(["split", "-i", "x.log"])
        .args(["--line-start-pattern", "a", "--line-end-pattern", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_invalid_regex_rejected() {
    logsplit()
        .args(["split", "-i", &fixture_path("service.log")])
        .args(["--line-end-pattern", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_encoding_rejected() {
    logsplit()
        .args(["split", "-i", &fixture_path("service.log"), "-e", "klingon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported encoding 'klingon'"));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("records.txt");

    logsplit()
        .arg("split")
        .arg("-i")
        .arg(fixture_path("service.log"))
        .arg("-o")
        .arg(&output_file)
        .assert()
        .success();

    let content = fs::read_to_string(&output_file).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("service started"));
}

#[test]
fn test_glob_pattern() {
    let records = json_records(&["split", "-i", &fixture_path("*.log"), "-t", "2", "-q"]);
    assert_eq!(records.len(), 8);
    assert_eq!(records[0]["file"], fixture_path("service.log").as_str());
    assert_eq!(records[3]["file"], fixture_path("stacktrace.log").as_str());
}

#[test]
fn test_invalid_file() {
    logsplit()
        .args(["split", "-i", "nonexistent.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_utf16_input() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("utf16.log");
    let bytes: Vec<u8> = "héllo\r\nwörld\r\n"
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    fs::write(&path, bytes).unwrap();

    logsplit()
        .arg("split")
        .arg("-i")
        .arg(&path)
        .args(["-e", "utf-16le"])
        .assert()
        .success()
        .stdout("héllo\nwörld\n");
}

#[test]
fn test_no_flush_at_eof_drops_partial_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("partial.log");
    fs::write(&path, "a\nb\npartial").unwrap();

    logsplit()
        .arg("split")
        .arg("-i")
        .arg(&path)
        .args(["--no-flush-at-eof", "--force-flush-period-ms", "0"])
        .assert()
        .success()
        .stdout("a\nb\n");
}

#[test]
fn test_truncated_records_flagged() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("long.log");
    fs::write(&path, "short\nabcdefghijklmnop\n").unwrap();
    let path = path.to_string_lossy().into_owned();

    let records = json_records(&["split", "-i", &path, "--max-log-size", "8"]);
    let texts: Vec<&str> = records.iter().map(|r| r["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["short", "abcdefgh", "ijklmnop"]);
    assert!(records[0].get("truncated").is_none());
    assert_eq!(records[1]["truncated"], true);
    assert_eq!(records[2]["truncated"], true);
}

#[test]
fn test_validate_config() {
    logsplit()
        .args(["validate", "-c", &fixture_path("multiline.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Strategy: line_start"));

    logsplit()
        .args(["validate", "-c", &fixture_path("conflicting.toml")])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"))
        .stderr(predicate::str::contains("only one of"));
}

#[test]
fn test_generate_then_validate() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("logsplit.toml");

    logsplit()
        .arg("generate-config")
        .arg("-o")
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    logsplit()
        .arg("validate")
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Strategy: newline"));
}

#[test]
fn test_help_command() {
    logsplit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Split log streams into records"));
}

#[test]
fn test_list_encodings() {
    logsplit()
        .args(["list", "encodings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("utf-16le"))
        .stdout(predicate::str::contains("nop"));
}

#[test]
fn test_list_formats() {
    logsplit()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"));
}
