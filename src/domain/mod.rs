//! Domain models and types for Confzip.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Validated identifiers** ([`SourceName`])
//! - **Source contract** ([`ConfigSource`], [`DocumentText`])
//! - **Archive records** ([`ArchiveEntry`])
//! - **Error types** ([`ConfzipError`], [`ExportError`], [`ExportErrorKind`])
//! - **Result type alias** ([`Result`])
//!
//! # Implementing a source
//!
//! ```rust
//! use async_trait::async_trait;
//! use confzip::domain::{ConfigSource, DocumentText, Result, SourceName};
//!
//! struct Fixed(SourceName);
//!
//! #[async_trait]
//! impl ConfigSource for Fixed {
//!     fn name(&self) -> &SourceName {
//!         &self.0
//!     }
//!
//!     async fn resolve(&self) -> Result<DocumentText> {
//!         Ok(DocumentText::from("[Interface]\n"))
//!     }
//! }
//! ```

pub mod entry;
pub mod errors;
pub mod ids;
pub mod result;
pub mod source;

// Re-export commonly used types for convenience
pub use entry::ArchiveEntry;
pub use errors::{ConfzipError, ExportError, ExportErrorKind};
pub use ids::SourceName;
pub use result::Result;
pub use source::{ConfigSource, DocumentText};
