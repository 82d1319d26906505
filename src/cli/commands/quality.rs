//! Quality command implementation

use crate::storage::{self, quality_report, QualityReport, RangeRule};
use anyhow::Result;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

pub fn run_quality_command(file: &Path, ranges: &[RangeRule], json: bool) -> Result<()> {
    let dataset = storage::load_dataset(file).map_err(crate::error::IngestError::from)?;
    let report = quality_report(&dataset, ranges);

    let text = if json {
        let mut text = serde_json::to_string_pretty(&report)?;
        text.push('\n');
        text
    } else {
        render_quality(file, &report)
    };
    io::stdout().lock().write_all(text.as_bytes())?;
    Ok(())
}

pub fn render_quality(file: &Path, report: &QualityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Quality report for {}", file.display());
    let _ = writeln!(out, "Rows: {}", report.total_rows);

    if !report.null_counts.is_empty() {
        let _ = writeln!(out, "Null values:");
        for (column, count) in &report.null_counts {
            let _ = writeln!(out, "  {column}: {count}");
        }
    }

    if !report.value_ranges.is_empty() {
        let _ = writeln!(out, "Ranges:");
        for (column, range) in &report.value_ranges {
            let _ = writeln!(
                out,
                "  {column}: [{}, {}] expected [{}, {}]",
                range.min, range.max, range.expected_min, range.expected_max
            );
        }
    }

    if report.is_clean() {
        let _ = writeln!(out, "No issues found");
    } else {
        let _ = writeln!(out, "Issues:");
        for issue in &report.issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_render_quality_with_issues() {
        let ds = Dataset::from_literals(
            &["store_id", "discount_pct"],
            &[&["1", "0.2"], &["2", ""], &["3", "1.5"]],
        )
        .unwrap();
        let rules = vec!["discount_pct=0:1".parse::<RangeRule>().unwrap()];
        let report = quality_report(&ds, &rules);

        let text = render_quality(Path::new("promotions.csv"), &report);

        assert!(text.starts_with("Quality report for promotions.csv\nRows: 3\n"));
        assert!(text.contains("  discount_pct: 1\n"));
        assert!(text.contains("  discount_pct: [0.2, 1.5] expected [0, 1]"));
        assert!(text.contains("  - Column discount_pct has 1 null values"));
    }

    #[test]
    fn test_render_quality_clean() {
        let ds = Dataset::from_literals(&["store_id"], &[&["1"]]).unwrap();
        let text = render_quality(Path::new("stores.csv"), &quality_report(&ds, &[]));
        assert!(text.ends_with("No issues found\n"));
    }
}
