//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use confzip::logging::init_logging;
//! use confzip::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use confzip::log_export_start;
///
/// log_export_start!(3);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($source_count:expr) => {
        tracing::info!(source_count = $source_count, "Starting export");
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use confzip::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!("/tmp/wireguard-export.zip", 2, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($location:expr, $entry_count:expr, $duration:expr) => {
        tracing::info!(
            location = %$location,
            entry_count = $entry_count,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use confzip::log_error_with_context;
/// use confzip::domain::ExportError;
///
/// let error = ExportError::NoSources;
/// log_error_with_context!(&error, "Export failed");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
