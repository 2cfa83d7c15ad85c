//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Confzip configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  File Name: {}", config.export.file_name);
        println!("  Compression: {}", config.export.compression);
        println!(
            "  Source Directory: {}",
            config.export.source_dir.as_deref().unwrap_or("(none)")
        );
        println!("  Explicit Sources: {}", config.sources.len());
        for source in &config.sources {
            println!("    - {} ({})", source.name, source.path);
        }
        println!(
            "  Verification: {}",
            if config.verification.enable_verification {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!();
        Ok(EXIT_SUCCESS)
    }
}
