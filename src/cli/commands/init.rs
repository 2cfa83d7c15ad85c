//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_EXPORT_FAILED, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "confzip.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Confzip configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your tunnel locations", self.output);
                println!("  2. Validate configuration: confzip validate-config");
                println!("  3. Run export: confzip export");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_EXPORT_FAILED)
            }
        }
    }
}

/// Sample configuration written by `confzip init`
pub fn sample_config() -> &'static str {
    r#"# Confzip Configuration File
# Bundles WireGuard tunnel configurations into one zip archive.
#
# Values may reference environment variables with ${VAR_NAME}, and any key
# can be overridden with CONFZIP_<SECTION>_<KEY>, e.g. CONFZIP_EXPORT_OUTPUT_DIR.

[application]
# trace, debug, info, warn, error
log_level = "info"

[export]
# Existing directory the archive is written into, e.g. "${HOME}/Downloads"
output_dir = "."
# An existing file is never replaced; "name (1).zip" is used instead
file_name = "wireguard-export.zip"
# Every *.conf file here is exported after the [[sources]] below
# source_dir = "/etc/wireguard"
# deflate or stored
compression = "deflate"

# Explicit sources, exported in the order listed as <name>.conf
# [[sources]]
# name = "home"
# path = "/etc/wireguard/home.conf"

[verification]
# Re-read the archive after export and print its SHA-256
enable_verification = false

[logging]
local_enabled = false
local_path = "./logs"
# daily or hourly
local_rotation = "daily"
"#
}
