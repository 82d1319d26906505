//! End-to-end pipeline runs through the library API

mod common;

use common::*;
use retail_ingest::config::IngestConfig;
use retail_ingest::context::LogContext;
use retail_ingest::pipeline::{PipelineRunner, ProcessingResult, Status};
use retail_ingest::quarantine::{QuarantineManager, QuarantineRecord};
use std::fs;

fn runner(ws: &Workspace) -> PipelineRunner {
    PipelineRunner::new(
        IngestConfig::default()
            .with_data_dir(ws.data_dir())
            .with_summary_path(ws.summary_path()),
    )
}

fn run(ws: &Workspace) -> retail_ingest::PipelineSummary {
    runner(ws)
        .run_with_output(&LogContext::new_run(), &mut Vec::new())
        .expect("summary saved")
}

#[test]
fn test_every_outcome_in_one_run() {
    let ws = Workspace::with_retail_feed();
    ws.write_data("promotions.csv", DRIFTED_PROMOTIONS_CSV);
    ws.write_data("daily_sales.csv", "total_sales\n1000\n-500\n2000\n");
    fs::remove_file(ws.data("inventory_snapshots.csv")).unwrap();

    let summary = run(&ws);

    let status = |name: &str| summary.results.get(name).unwrap().status();
    assert_eq!(status("stores.csv"), Status::Success);
    assert_eq!(status("daily_sales.csv"), Status::Failed);
    assert_eq!(status("inventory_snapshots.csv"), Status::Skipped);
    assert_eq!(status("promotions.csv"), Status::Failed);
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.records_processed, 3);

    // two quarantined files, each with its sidecar
    assert_eq!(ws.quarantined().len(), 4);
    for name in ["daily_sales.csv", "promotions.csv"] {
        let result = summary.results.get(name).unwrap();
        let qpath = result.quarantine_path().unwrap();
        let record = QuarantineRecord::load(&QuarantineManager::sidecar_path(qpath)).unwrap();
        assert_eq!(record.original_path, ws.data(name));
        assert_eq!(record.errors, result.errors());
        assert!(!ws.data(name).exists());
    }
}

#[test]
fn test_validated_copy_carries_metadata() {
    let ws = Workspace::with_retail_feed();

    run(&ws);

    let text = fs::read_to_string(ws.data("daily_sales_validated.csv")).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,store_id,total_sales,transaction_count,_ingested_at,_batch_id"
    );
    let batch_ids: Vec<&str> = lines.map(|l| l.rsplit(',').next().unwrap()).collect();
    assert_eq!(batch_ids.len(), 4);
    assert!(batch_ids.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(batch_ids[0].len(), "20240101_120000".len());
}

#[test]
fn test_summary_document_shape() {
    let ws = Workspace::with_retail_feed();
    fs::remove_file(ws.data("promotions.csv")).unwrap();

    run(&ws);
    let doc = ws.summary_json();

    for key in [
        "timestamp",
        "duration_seconds",
        "files_processed",
        "records_processed",
        "results",
    ] {
        assert!(doc.get(key).is_some(), "missing {key}");
    }
    assert_eq!(doc["records_processed"], 3 + 4 + 2);
    assert_eq!(doc["results"]["stores.csv"]["records"], 3);
    assert_eq!(
        doc["results"]["promotions.csv"],
        serde_json::json!({"status": "skipped", "reason": "file_not_found"})
    );
}

#[test]
fn test_second_run_after_quarantine_skips_moved_file() {
    let ws = Workspace::with_retail_feed();
    ws.write_data("promotions.csv", DRIFTED_PROMOTIONS_CSV);

    run(&ws);
    let second = run(&ws);

    assert_eq!(
        second.results.get("promotions.csv"),
        Some(&ProcessingResult::file_not_found())
    );
    assert_eq!(ws.quarantined().len(), 2);
}
