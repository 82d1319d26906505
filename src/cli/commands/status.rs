//! Status command implementation
//!
//! Reads the run summary the same way any downstream consumer would: an
//! absent or unreadable document means the pipeline has not run.

use crate::config::IngestConfig;
use crate::pipeline::{with_thousands, SummaryView};
use anyhow::Result;
use std::fmt::Write as _;
use std::io::{self, Write};

pub const NOT_RUN_MESSAGE: &str = "Pipeline not run";

pub fn run_status_command(config: &IngestConfig) -> Result<()> {
    let summary = SummaryView::load(config.summary_path());
    let mut stdout = io::stdout().lock();
    stdout.write_all(render_status(summary.as_ref()).as_bytes())?;
    Ok(())
}

pub fn render_status(summary: Option<&SummaryView>) -> String {
    let Some(summary) = summary else {
        return format!("{NOT_RUN_MESSAGE}\n");
    };

    let mut out = String::new();
    let when = summary
        .display_timestamp()
        .unwrap_or_else(|| "unknown".to_string());
    let _ = match summary.duration_seconds {
        Some(secs) => writeln!(out, "Last run: {when} ({secs:.1}s)"),
        None => writeln!(out, "Last run: {when}"),
    };
    let _ = writeln!(
        out,
        "Files processed: {}  Records: {}",
        summary.files_processed(),
        with_thousands(summary.records_processed())
    );

    let width = summary
        .results
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, result) in &summary.results {
        let detail = match (result.is_success(), result.records) {
            (true, Some(records)) => format!("{} records", with_thousands(records)),
            _ => result.reason.clone().unwrap_or_default(),
        };
        let status = if result.status.is_empty() {
            "unknown"
        } else {
            result.status.as_str()
        };
        let _ = writeln!(out, "  {name:<width$}  {status:<8} {detail}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{PipelineSummary, ProcessingResult, RunResults};
    use chrono::TimeZone;
    use chrono::Utc;
    use std::path::PathBuf;

    fn view(json: &str) -> SummaryView {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_not_run() {
        assert_eq!(render_status(None), "Pipeline not run\n");
    }

    #[test]
    fn test_status_table() {
        let mut results = RunResults::new();
        results.insert(
            "daily_sales.csv",
            ProcessingResult::Success {
                records: 27000,
                validated_path: PathBuf::from("data/daily_sales_validated.csv"),
            },
        );
        results.insert(
            "promotions.csv",
            ProcessingResult::validation_failed(vec![], PathBuf::from("q/p.csv")),
        );
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let summary = PipelineSummary::new(results, at, 1.5);

        let text = render_status(Some(&view(&serde_json::to_string(&summary).unwrap())));

        assert!(text.starts_with("Last run: 2024-03-09 14:05:07 UTC (1.5s)\n"));
        assert!(text.contains("Files processed: 1  Records: 27,000"));
        assert!(text.contains("  daily_sales.csv  success  27,000 records"));
        assert!(text.contains("  promotions.csv   failed   validation_failed"));
    }

    #[test]
    fn test_minimal_summary_renders() {
        let summary = view(
            r#"{"timestamp": "2024-03-09T14:05:07.500000",
                "results": {"stores.csv": {"status": "success", "records": 150}}}"#,
        );

        let text = render_status(Some(&summary));

        assert_eq!(
            text,
            "Last run: 2024-03-09 14:05:07\n\
             Files processed: 1  Records: 150\n  \
             stores.csv  success  150 records\n"
        );
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let text = render_status(Some(&view(r#"{"results": {"a.csv": {"reason": "x"}}}"#)));
        assert!(text.starts_with("Last run: unknown\n"));
        assert!(text.contains("  a.csv  unknown  x"));
    }
}
