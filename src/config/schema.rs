//! Configuration schema types
//!
//! This module defines the configuration structure for Confzip.

use crate::adapters::source::FileSource;
use crate::domain::SourceName;
use serde::{Deserialize, Serialize};

/// Main Confzip configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfzipConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export destination and discovery settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Explicit sources, exported in the order listed
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Post-export verification
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfzipConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        for (i, source) in self.sources.iter().enumerate() {
            source
                .validate()
                .map_err(|e| format!("sources[{i}]: {e}"))?;
        }
        self.logging.validate()?;
        Ok(())
    }

    /// File sources for the explicitly configured `[[sources]]`, in order
    ///
    /// # Errors
    ///
    /// Returns an error if a source name is invalid
    pub fn file_sources(&self) -> Result<Vec<FileSource>, String> {
        self.sources
            .iter()
            .map(|s| -> Result<FileSource, String> {
                Ok(FileSource::new(SourceName::new(&s.name)?, &s.path))
            })
            .collect()
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Existing directory the archive is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Preferred archive file name; suffixed on collision
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Directory scanned for `*.conf` files, exported after `[[sources]]`
    #[serde(default)]
    pub source_dir: Option<String>,

    /// Entry compression (deflate, stored)
    #[serde(default = "default_compression")]
    pub compression: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.file_name.trim().is_empty() {
            return Err("export.file_name cannot be empty".to_string());
        }
        if self.file_name.contains(['/', '\\']) {
            return Err(format!(
                "export.file_name '{}' must be a file name, not a path",
                self.file_name
            ));
        }
        if !self.file_name.to_lowercase().ends_with(".zip") {
            return Err(format!(
                "export.file_name '{}' must end with .zip",
                self.file_name
            ));
        }

        let valid_compressions = ["deflate", "stored"];
        if !valid_compressions.contains(&self.compression.as_str()) {
            return Err(format!(
                "Invalid export.compression '{}'. Must be one of: {}",
                self.compression,
                valid_compressions.join(", ")
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_name: default_file_name(),
            source_dir: None,
            compression: default_compression(),
        }
    }
}

/// An explicitly configured source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source name; the archive entry is `<name>.conf`
    pub name: String,

    /// Path of the configuration file
    pub path: String,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        SourceName::new(&self.name)?;
        if self.path.trim().is_empty() {
            return Err(format!("source '{}' has an empty path", self.name));
        }
        Ok(())
    }
}

/// Post-export verification configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VerificationConfig {
    /// Re-read the archive and record its checksum after a successful export
    #[serde(default)]
    pub enable_verification: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_file_name() -> String {
    "wireguard-export.zip".to_string()
}

fn default_compression() -> String {
    "deflate".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ConfzipConfig::default();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.export.output_dir, ".");
        assert_eq!(config.export.file_name, "wireguard-export.zip");
        assert_eq!(config.export.compression, "deflate");
        assert!(config.sources.is_empty());
        assert!(!config.verification.enable_verification);
        assert!(!config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.file_name = "export.tar".to_string();
        assert!(config.validate().is_err());

        config.file_name = "sub/export.zip".to_string();
        assert!(config.validate().is_err());

        config.file_name = "EXPORT.ZIP".to_string();
        assert!(config.validate().is_ok());

        config.compression = "bzip2".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_config_validation() {
        let mut config = ConfzipConfig::default();
        config.sources.push(SourceConfig {
            name: "home".to_string(),
            path: "/etc/wireguard/home.conf".to_string(),
        });
        assert!(config.validate().is_ok());

        config.sources.push(SourceConfig {
            name: "bad/name".to_string(),
            path: "/tmp/x.conf".to_string(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("sources[1]"));
    }

    #[test]
    fn test_file_sources_preserve_order() {
        let config = ConfzipConfig {
            sources: vec![
                SourceConfig {
                    name: "office".to_string(),
                    path: "/a/office.conf".to_string(),
                },
                SourceConfig {
                    name: "home".to_string(),
                    path: "/a/home.conf".to_string(),
                },
            ],
            ..Default::default()
        };

        let sources = config.file_sources().unwrap();
        let names: Vec<&str> = sources
            .iter()
            .map(|s| crate::domain::ConfigSource::name(s).as_str())
            .collect();
        assert_eq!(names, vec!["office", "home"]);
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = " ".to_string();
        assert!(config.validate().is_err());
    }
}
