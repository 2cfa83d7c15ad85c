//! Verification report structures
//!
//! This module defines the structures for reporting archive verification results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of re-reading an exported archive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// When the verification was performed
    pub verified_at: DateTime<Utc>,

    /// Archive that was verified
    pub location: PathBuf,

    /// Hex-encoded SHA-256 of the archive file
    pub checksum: String,

    /// Number of entries checked
    pub total_verified: usize,

    /// Number of entries found where expected
    pub passed: usize,

    /// Number of entries missing, misplaced or unexpected
    pub failed: usize,

    /// Details of each failed entry
    pub failures: Vec<VerificationFailure>,

    /// Duration of verification in milliseconds
    pub duration_ms: u64,
}

/// Details of a failed entry check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Position in the archive
    pub index: usize,

    /// Entry name that was expected at this position, if any
    pub expected: Option<String>,

    /// Entry name actually found at this position, if any
    pub actual: Option<String>,

    /// Reason for failure
    pub reason: String,
}

impl VerificationReport {
    /// Create an empty report for `location`
    pub fn new(location: impl Into<PathBuf>, checksum: impl Into<String>) -> Self {
        Self {
            verified_at: Utc::now(),
            location: location.into(),
            checksum: checksum.into(),
            total_verified: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Record a successful entry check
    pub fn record_pass(&mut self) {
        self.total_verified += 1;
        self.passed += 1;
    }

    /// Record a failed entry check
    pub fn record_failure(&mut self, failure: VerificationFailure) {
        self.total_verified += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Set the duration of verification
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Check if all entries matched
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("📊 Verification Report\n");
        summary.push_str(&format!("  Archive: {}\n", self.location.display()));
        summary.push_str(&format!("  SHA-256: {}\n", self.checksum));
        summary.push_str(&format!("  Entries checked: {}\n", self.total_verified));
        summary.push_str(&format!("  ✅ Passed: {}\n", self.passed));
        summary.push_str(&format!("  ❌ Failed: {}\n", self.failed));

        if !self.failures.is_empty() {
            summary.push_str("\n❌ Failures:\n");
            for failure in &self.failures {
                summary.push_str(&format!(
                    "  #{}: expected {}, found {} ({})\n",
                    failure.index,
                    failure.expected.as_deref().unwrap_or("nothing"),
                    failure.actual.as_deref().unwrap_or("nothing"),
                    failure.reason
                ));
            }
        }

        summary
    }
}
