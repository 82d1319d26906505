//! Error handling utilities

use crate::error::{describe_error_code, IngestError};
use std::io::Write;
use tracing::error;

/// Report a fatal error and exit with its status code
///
/// An [`IngestError`] prints its user message, plus its code description and
/// the full cause chain when `verbose >= 1`, and exits with its category's code. Anything else
/// exits with 1.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {:#}", error);
    std::process::exit(report_fatal_error(&error, verbose, &mut std::io::stderr()))
}

/// Write the fatal error report to `out` and return the exit code
pub fn report_fatal_error(
    error: &anyhow::Error,
    verbose: u8,
    out: &mut impl Write,
) -> i32 {
    if let Some(ingest_err) = error.downcast_ref::<IngestError>() {
        let _ = writeln!(out, "{}", ingest_err.user_message());
        if verbose >= 1 {
            let code = ingest_err.code();
            let _ = writeln!(out, "Error code E{code:04}: {}", describe_error_code(code));
            let _ = writeln!(out, "\nContext Chain:\n{}", ingest_err.developer_message());
        }
        ingest_err.exit_code()
    } else {
        let _ = writeln!(out, "Error: {error}");
        if verbose >= 1 {
            let _ = writeln!(out, "\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                let _ = writeln!(out, "  {}: {}", i, cause);
            }
        }
        1
    }
}
