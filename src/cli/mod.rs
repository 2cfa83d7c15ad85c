//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Confzip using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Confzip - bundle WireGuard tunnel configurations into one zip archive
#[derive(Parser, Debug)]
#[command(name = "confzip")]
#[command(version, about, long_about = None)]
#[command(author = "Confzip Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "confzip.toml", env = "CONFZIP_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CONFZIP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export configured tunnels into a zip archive
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
