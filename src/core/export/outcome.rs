//! Export outcome and summary reporting
//!
//! Every export request ends in exactly one [`ExportOutcome`].

use crate::domain::{ExportError, ExportErrorKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Summary of a successful export
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Where the archive was written
    pub location: PathBuf,

    /// Declared media type of the archive
    pub media_type: String,

    /// Entry names, in archive order
    pub entries: Vec<String>,

    /// Total UTF-8 content bytes across entries (before compression)
    pub content_bytes: u64,

    /// When the export started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the export
    #[serde(serialize_with = "serialize_duration_ms", rename = "duration_ms")]
    pub duration: Duration,
}

impl ExportSummary {
    /// Number of entries in the archive
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_export_complete!(self.location.display(), self.entry_count(), self.duration);
    }
}

fn serialize_duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Terminal result of one export request
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// The archive was written completely and is visible at `location`
    Success {
        /// Location of the archive
        location: PathBuf,
        /// Details of what was written
        summary: ExportSummary,
    },

    /// The export failed; no artifact was left behind
    Failure {
        /// Why the export failed
        reason: ExportError,
    },
}

impl ExportOutcome {
    /// Build a success outcome from its summary
    pub fn success(summary: ExportSummary) -> Self {
        Self::Success {
            location: summary.location.clone(),
            summary,
        }
    }

    /// Build a failure outcome
    pub fn failure(reason: ExportError) -> Self {
        Self::Failure { reason }
    }

    /// Whether the export succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Location of the archive on success
    pub fn location(&self) -> Option<&Path> {
        match self {
            Self::Success { location, .. } => Some(location),
            Self::Failure { .. } => None,
        }
    }

    /// Failure reason, if any
    pub fn error(&self) -> Option<&ExportError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }

    /// Stable kind of the failure, if any
    pub fn error_kind(&self) -> Option<ExportErrorKind> {
        self.error().map(ExportError::kind)
    }

    /// Convert into a standard result
    pub fn into_result(self) -> std::result::Result<ExportSummary, ExportError> {
        match self {
            Self::Success { summary, .. } => Ok(summary),
            Self::Failure { reason } => Err(reason),
        }
    }
}

impl From<std::result::Result<ExportSummary, ExportError>> for ExportOutcome {
    fn from(result: std::result::Result<ExportSummary, ExportError>) -> Self {
        match result {
            Ok(summary) => Self::success(summary),
            Err(reason) => Self::failure(reason),
        }
    }
}
