//! Operator-facing run report

use super::summary::PipelineSummary;
use std::fmt::Write as _;
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Render the end-of-run report printed by the runner
pub fn render_report(summary: &PipelineSummary, summary_path: &Path) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = writeln!(out, "\n{rule}\nPIPELINE EXECUTION SUMMARY\n{rule}");
    let _ = writeln!(out, "Duration: {:.1} seconds", summary.duration_seconds);
    let _ = writeln!(
        out,
        "Files successfully processed: {}",
        summary.files_processed
    );
    let _ = writeln!(
        out,
        "Total records: {}",
        with_thousands(summary.records_processed)
    );

    let failures: Vec<_> = summary.failures().collect();
    if failures.is_empty() {
        let _ = writeln!(out, "\n✅ All files processed successfully");
    } else {
        let _ = writeln!(out, "\n⚠️  Issues detected: {}", failures.len());
        for (file, reason) in failures {
            let _ = writeln!(out, "  • {file}: {reason}");
        }
    }

    let _ = writeln!(out, "\nPipeline summary: {}", summary_path.display());
    out
}

/// `27000` -> `27,000`
pub fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
