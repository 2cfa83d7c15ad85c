//! Post-export verification
//!
//! Re-opens a written archive and checks that it holds exactly the expected
//! entries in the expected order.

use crate::core::export::ExportSummary;
use crate::core::verification::checksum::checksum_file;
use crate::core::verification::report::{VerificationFailure, VerificationReport};
use crate::domain::{ConfzipError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;
use zip::ZipArchive;

/// Verifier for exported archives
#[derive(Debug, Clone, Copy, Default)]
pub struct Verifier;

impl Verifier {
    /// Create a new verifier
    pub fn new() -> Self {
        Self
    }

    /// Verify the archive described by `summary`
    ///
    /// Runs on the blocking pool.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use confzip::core::verification::Verifier;
    /// # async fn example(summary: confzip::core::export::ExportSummary) -> confzip::domain::Result<()> {
    /// let report = Verifier::new().verify_export(&summary).await?;
    /// println!("{}", report.format_summary());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn verify_export(&self, summary: &ExportSummary) -> Result<VerificationReport> {
        let location = summary.location.clone();
        let expected = summary.entries.clone();

        tokio::task::spawn_blocking(move || verify_archive(&location, &expected))
            .await
            .map_err(|e| ConfzipError::Verification(format!("verification task failed: {e}")))?
    }
}

/// Check that the archive at `path` holds `expected` entries, in order
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a zip archive.
/// Entry mismatches are reported in the returned report, not as errors.
pub fn verify_archive(path: &Path, expected: &[String]) -> Result<VerificationReport> {
    let start = Instant::now();

    tracing::info!(
        location = %path.display(),
        expected_entries = expected.len(),
        "Starting post-export verification"
    );

    let checksum = checksum_file(path)?;
    let mut report = VerificationReport::new(path, checksum);

    let file = File::open(path)?;
    let archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| ConfzipError::Verification(format!("not a readable zip archive: {e}")))?;
    let actual: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.name_for_index(i).map(str::to_string))
        .collect();

    for index in 0..expected.len().max(actual.len()) {
        match (expected.get(index), actual.get(index)) {
            (Some(want), Some(got)) if want == got => report.record_pass(),
            (want, got) => {
                let reason = match (want, got) {
                    (Some(_), None) => "missing entry",
                    (None, Some(_)) => "unexpected entry",
                    _ => "entry name mismatch",
                };
                tracing::warn!(
                    index,
                    expected = ?want,
                    actual = ?got,
                    reason,
                    "Verification failure"
                );
                report.record_failure(VerificationFailure {
                    index,
                    expected: want.cloned(),
                    actual: got.cloned(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    report.set_duration(start.elapsed().as_millis() as u64);

    tracing::info!(
        passed = report.passed,
        failed = report.failed,
        checksum = %report.checksum,
        "Verification completed"
    );

    Ok(report)
}
