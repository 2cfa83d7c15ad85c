//! Configuration management for Confzip.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Confzip uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CONFZIP_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use confzip::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("confzip.toml")?;
//! println!("Writing {} into {}", config.export.file_name, config.export.output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ExportConfig`] - Output directory, file name, source directory, compression
//! - [`SourceConfig`] - Explicit `[[sources]]`, exported in the order listed
//! - [`VerificationConfig`] - Post-export verification
//! - [`LoggingConfig`] - Rolling file logs
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! output_dir = "${HOME}/Downloads"
//! file_name = "wireguard-export.zip"
//! source_dir = "/etc/wireguard"
//!
//! [[sources]]
//! name = "home"
//! path = "/opt/tunnels/home.conf"
//!
//! [verification]
//! enable_verification = true
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, ConfzipConfig, ExportConfig, LoggingConfig, SourceConfig,
    VerificationConfig,
};
