//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod validate;

/// Exit code for a successful command
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a failed export
pub const EXIT_EXPORT_FAILED: i32 = 1;
/// Exit code for an invalid or unreadable configuration
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code when there was nothing to export
pub const EXIT_NO_SOURCES: i32 = 3;
/// Exit code when the export was interrupted by a signal
pub const EXIT_CANCELLED: i32 = 130;
