// Confzip - WireGuard tunnel configuration exporter
// Copyright (c) 2025 Confzip Contributors
// Licensed under the MIT License

//! # Confzip - export tunnel configurations as one zip archive
//!
//! Confzip collects a set of named WireGuard tunnel configurations, resolves
//! their text concurrently, and writes them into a single zip archive with one
//! `<name>.conf` entry per tunnel. The archive either appears complete at its
//! destination or not at all.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export pipeline (resolution, archive writing, atomic sink, orchestration) and verification
//! - [`adapters`] - File-backed sources and destination placement
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use confzip::adapters::{FilePlacement, StaticSource};
//! use confzip::core::export::{ExportOrchestrator, ExportOutcome, ExportRequest};
//! use confzip::domain::ConfigSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request: ExportRequest = vec![
//!         Arc::new(StaticSource::new("home", "[Interface]\n")?) as Arc<dyn ConfigSource>,
//!         Arc::new(StaticSource::new("office", "[Interface]\n")?),
//!     ];
//!
//!     let orchestrator = ExportOrchestrator::new(Arc::new(FilePlacement::new(".", "wireguard-export.zip")));
//!     match orchestrator.run(request).await {
//!         ExportOutcome::Success { location, .. } => println!("Wrote {}", location.display()),
//!         ExportOutcome::Failure { reason } => eprintln!("Export failed: {reason}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Export failures are reported as [`domain::ExportError`] inside an
//! [`core::export::ExportOutcome`]; everything else uses [`domain::ConfzipError`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
