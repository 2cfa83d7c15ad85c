//! External integrations for Confzip.
//!
//! - [`source`] - Configuration sources (files, in-memory text, directory discovery)
//! - [`placement`] - Destination file placement with collision avoidance
//!
//! # Design Pattern
//!
//! Adapters implement the traits the export pipeline depends on
//! ([`crate::domain::ConfigSource`] and [`crate::core::export::DestinationFactory`]),
//! so the pipeline itself never touches the filesystem directly and tests can
//! substitute in-memory implementations.
//!
//! ```rust,no_run
//! use confzip::adapters::placement::FilePlacement;
//! use confzip::adapters::source::discover_sources;
//! use confzip::core::export::{ExportOrchestrator, ExportRequest};
//! use confzip::domain::ConfigSource;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request: ExportRequest = discover_sources("/etc/wireguard")
//!     .await?
//!     .into_iter()
//!     .map(|s| Arc::new(s) as Arc<dyn ConfigSource>)
//!     .collect();
//!
//! let orchestrator = ExportOrchestrator::new(Arc::new(FilePlacement::new(".", "wireguard-export.zip")));
//! let outcome = orchestrator.run(request).await;
//! # Ok(())
//! # }
//! ```

pub mod placement;
pub mod source;

pub use placement::FilePlacement;
pub use source::{discover_sources, FileSource, StaticSource};
