//! Domain error types
//!
//! This module defines the error hierarchy for Confzip.
//! Errors are domain-specific and don't expose third-party types.

use super::ids::SourceName;
use std::path::PathBuf;
use thiserror::Error;

/// Main Confzip error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ConfzipError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Export pipeline errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A configuration source could not produce its document
    #[error("Source error: {0}")]
    Source(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Post-export verification errors
    #[error("Verification error: {0}")]
    Verification(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Terminal failure of a single export request
///
/// Exactly one of these is reported per failed request. Underlying causes are
/// carried as diagnostic strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The request contained no sources; nothing was touched
    #[error("No configuration sources to export")]
    NoSources,

    /// A source failed to resolve; no destination was created
    #[error("Failed to resolve source '{name}' (position {index}): {cause}")]
    Resolution {
        /// Name of the failing source
        name: SourceName,
        /// Position of the source in the request
        index: usize,
        /// Underlying cause
        cause: String,
    },

    /// The archive could not be fully written; the destination was removed
    #[error("Failed to write archive {}: {cause}", .location.display())]
    Write {
        /// Destination that was being written
        location: PathBuf,
        /// Underlying cause
        cause: String,
    },

    /// The destination could not be created; no write was attempted
    #[error("Failed to create export destination: {0}")]
    Destination(String),

    /// Another export is already running
    #[error("An export is already in progress")]
    Busy,

    /// The export was abandoned because shutdown was requested
    #[error("Export cancelled: {0}")]
    Cancelled(String),
}

/// Stable discriminant of an [`ExportError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportErrorKind {
    /// See [`ExportError::NoSources`]
    NoSources,
    /// See [`ExportError::Resolution`]
    Resolution,
    /// See [`ExportError::Write`]
    Write,
    /// See [`ExportError::Destination`]
    Destination,
    /// See [`ExportError::Busy`]
    Busy,
    /// See [`ExportError::Cancelled`]
    Cancelled,
}

impl ExportError {
    /// Returns the stable kind of this error
    pub fn kind(&self) -> ExportErrorKind {
        match self {
            ExportError::NoSources => ExportErrorKind::NoSources,
            ExportError::Resolution { .. } => ExportErrorKind::Resolution,
            ExportError::Write { .. } => ExportErrorKind::Write,
            ExportError::Destination(_) => ExportErrorKind::Destination,
            ExportError::Busy => ExportErrorKind::Busy,
            ExportError::Cancelled(_) => ExportErrorKind::Cancelled,
        }
    }

    /// Name of the failing source, if this is a resolution failure
    pub fn source_name(&self) -> Option<&SourceName> {
        match self {
            ExportError::Resolution { name, .. } => Some(name),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ConfzipError {
    fn from(err: std::io::Error) -> Self {
        ConfzipError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ConfzipError {
    fn from(err: serde_json::Error) -> Self {
        ConfzipError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ConfzipError {
    fn from(err: toml::de::Error) -> Self {
        ConfzipError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<zip::result::ZipError> for ConfzipError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => ConfzipError::Io(e.to_string()),
            other => ConfzipError::Io(format!("zip: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_confzip_error_display() {
        let err = ConfzipError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_export_error_conversion() {
        let err: ConfzipError = ExportError::NoSources.into();
        assert!(matches!(err, ConfzipError::Export(ExportError::NoSources)));
    }

    #[test]
    fn test_resolution_error_display_names_source() {
        let err = ExportError::Resolution {
            name: SourceName::from_str("office").unwrap(),
            index: 1,
            cause: "permission denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'office'"));
        assert!(msg.contains("position 1"));
        assert!(msg.contains("permission denied"));
        assert_eq!(err.source_name().unwrap().as_str(), "office");
    }

    #[test]
    fn test_export_error_kinds() {
        assert_eq!(ExportError::NoSources.kind(), ExportErrorKind::NoSources);
        assert_eq!(ExportError::Busy.kind(), ExportErrorKind::Busy);
        assert_eq!(
            ExportError::Destination("read-only".into()).kind(),
            ExportErrorKind::Destination
        );
        assert_eq!(
            ExportError::Write {
                location: PathBuf::from("/tmp/x.zip"),
                cause: "disk full".into()
            }
            .kind(),
            ExportErrorKind::Write
        );
        assert_eq!(
            ExportError::Cancelled("shutdown".into()).kind(),
            ExportErrorKind::Cancelled
        );
        assert!(ExportError::Busy.source_name().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ConfzipError = io_err.into();
        assert!(matches!(err, ConfzipError::Io(_)));
    }

    #[test]
    fn test_zip_io_error_keeps_cause() {
        let zip_err = zip::result::ZipError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "device full",
        ));
        let err: ConfzipError = zip_err.into();
        assert_eq!(err.to_string(), "I/O error: device full");
    }

    #[test]
    fn test_zip_format_error_is_labelled() {
        let err: ConfzipError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, ConfzipError::Io(ref msg) if msg.starts_with("zip: ")));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ConfzipError = toml_err.into();
        assert!(matches!(err, ConfzipError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = ConfzipError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let _: &dyn std::error::Error = &ExportError::NoSources;
    }
}
