//! Integration tests for the command-line interface

mod common;

use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_cli_help() {
    Workspace::new()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("quality"))
        .stdout(predicate::str::contains("backup"));
}

#[test]
fn test_run_is_default_command() {
    let ws = Workspace::with_retail_feed();

    ws.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("PIPELINE EXECUTION SUMMARY"))
        .stdout(predicate::str::contains("Files successfully processed: 4"))
        .stdout(predicate::str::contains("Total records: 11"))
        .stdout(predicate::str::contains("✅ All files processed successfully"));

    assert!(ws.summary_path().exists());
    assert!(ws.data("stores_validated.csv").exists());
}

#[test]
fn test_run_reports_schema_drift() {
    let ws = Workspace::with_retail_feed();
    ws.write_data("promotions.csv", DRIFTED_PROMOTIONS_CSV);

    ws.command()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠️  Issues detected: 1"))
        .stdout(predicate::str::contains("  • promotions.csv: validation_failed"));

    let summary = ws.summary_json();
    assert_eq!(summary["results"]["promotions.csv"]["status"], "failed");
    assert_eq!(summary["files_processed"], 3);
    let errors = summary["results"]["promotions.csv"]["errors"]
        .as_array()
        .unwrap();
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().starts_with("SCHEMA DRIFT DETECTED")));
    assert_eq!(ws.quarantined().len(), 2);
}

#[test]
fn test_run_flags_override_config_file() {
    let ws = Workspace::with_retail_feed();
    fs::write(
        ws.root().join("ingest.toml"),
        "data_dir = \"nowhere\"\nsummary_path = \"from_file.json\"\n",
    )
    .unwrap();

    ws.command()
        .args(["run", "--data-dir", "data", "--summary", "out/summary.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files successfully processed: 4"));

    assert!(ws.root().join("out/summary.json").exists());
    assert!(!ws.root().join("from_file.json").exists());
}

#[test]
fn test_env_overrides_config_file() {
    let ws = Workspace::with_retail_feed();
    let custom = ws.root().join("custom-logs").join("summary.json");

    ws.command()
        .env("INGEST_SUMMARY_PATH", &custom)
        .arg("run")
        .assert()
        .success();

    assert!(custom.exists());
    assert!(!ws.summary_path().exists());
}

#[test]
fn test_missing_explicit_config_fails() {
    Workspace::new()
        .command()
        .args(["--config", "missing.toml", "run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration problem"));
}

#[test]
fn test_invalid_config_fails() {
    let ws = Workspace::new();
    fs::write(ws.root().join("ingest.toml"), "data_dir = [").unwrap();

    ws.command().arg("run").assert().code(2);
}

#[test]
fn test_status_before_any_run() {
    Workspace::new()
        .command()
        .arg("status")
        .assert()
        .success()
        .stdout("Pipeline not run\n");
}

#[test]
fn test_status_with_corrupt_summary() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.root().join("logs")).unwrap();
    fs::write(ws.summary_path(), "{ not json").unwrap();

    ws.command()
        .arg("status")
        .assert()
        .success()
        .stdout("Pipeline not run\n");
}

#[test]
fn test_status_with_minimal_summary() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.root().join("logs")).unwrap();
    fs::write(
        ws.summary_path(),
        r#"{"timestamp": "2024-03-09T14:05:07", "results": {"stores.csv": {"status": "success", "records": 150}}}"#,
    )
    .unwrap();

    ws.command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Last run: 2024-03-09 14:05:07"))
        .stdout(predicate::str::contains("Files processed: 1  Records: 150"))
        .stdout(predicate::str::contains("stores.csv  success  150 records"));
}

#[test]
fn test_status_after_run() {
    let ws = Workspace::with_retail_feed();
    fs::remove_file(ws.data("inventory_snapshots.csv")).unwrap();
    ws.command().arg("run").assert().success();

    ws.command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed: 3"))
        .stdout(predicate::str::contains("inventory_snapshots.csv"))
        .stdout(predicate::str::contains("file_not_found"));
}

#[test]
fn test_quality_report() {
    let ws = Workspace::new();
    ws.write_data(
        "promotions.csv",
        "promotion_id,discount_pct\nP1,0.2\nP2,\nP3,1.4\n",
    );

    ws.command()
        .args(["quality", "data/promotions.csv", "--range", "discount_pct=0:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 3"))
        .stdout(predicate::str::contains("Column discount_pct has 1 null values"))
        .stdout(predicate::str::contains(
            "Column discount_pct outside expected range",
        ));
}

#[test]
fn test_quality_json() {
    let ws = Workspace::new();
    ws.write_data("stores.csv", STORES_CSV);

    let output = ws
        .command()
        .args(["quality", "data/stores.csv", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_rows"], 3);
    assert_eq!(report["issues"], serde_json::json!([]));
}

#[test]
fn test_quality_missing_file() {
    Workspace::new()
        .command()
        .args(["quality", "data/absent.csv"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_backup_prints_path() {
    let ws = Workspace::new();
    ws.write_data("stores.csv", STORES_CSV);

    let output = ws
        .command()
        .args(["backup", "data/stores.csv", "--backup-dir", "archive"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let printed = String::from_utf8(output.stdout).unwrap();
    let backup = ws.root().join(printed.trim());
    assert!(printed.trim().ends_with("_stores.csv"));
    assert_eq!(fs::read_to_string(backup).unwrap(), STORES_CSV);
    assert!(ws.data("stores.csv").exists());
}

#[test]
fn test_backup_missing_file_fails() {
    Workspace::new()
        .command()
        .args(["backup", "data/absent.csv"])
        .assert()
        .code(4);
}
