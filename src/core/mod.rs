//! Core business logic for Confzip.
//!
//! # Modules
//!
//! - [`export`] - Resolution, archive writing, atomic destination handling and orchestration
//! - [`verification`] - Post-export archive verification with checksums
//!
//! # Export Workflow
//!
//! 1. **Reject** an empty request before touching anything
//! 2. **Resolve** every source concurrently and wait for all of them
//! 3. **Create** the destination through a [`export::DestinationFactory`]
//! 4. **Write** one `<name>.conf` entry per source, in request order
//! 5. **Commit** the archive, or delete it if anything failed
//! 6. **Report** exactly one [`export::ExportOutcome`]
//!
//! # Example
//!
//! ```rust,no_run
//! use confzip::adapters::placement::FilePlacement;
//! use confzip::adapters::source::StaticSource;
//! use confzip::core::export::{ExportOrchestrator, ExportRequest};
//! use confzip::domain::ConfigSource;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let placement = FilePlacement::new("/tmp/exports", "wireguard-export.zip");
//! let orchestrator = ExportOrchestrator::new(Arc::new(placement));
//!
//! let request: ExportRequest = vec![
//!     Arc::new(StaticSource::new("home", "[Interface]\n")?) as Arc<dyn ConfigSource>,
//!     Arc::new(StaticSource::new("office", "[Interface]\n")?),
//! ];
//!
//! let summary = orchestrator.run(request).await.into_result()?;
//! println!("Exported {} entries to {}", summary.entry_count(), summary.location.display());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod verification;
