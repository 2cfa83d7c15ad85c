//! Export orchestration
//!
//! This module provides the export pipeline:
//! - Concurrent resolution of sources ([`Resolver`])
//! - Zip serialization in request order ([`ArchiveWriter`])
//! - All-or-nothing destination handling ([`AtomicSink`])
//! - The single-flight entry point ([`ExportOrchestrator`])

pub mod archive;
pub mod orchestrator;
pub mod outcome;
pub mod resolver;
pub mod sink;

pub use archive::ArchiveWriter;
pub use orchestrator::{Completion, ExportOrchestrator, ExportRequest, ExportState};
pub use outcome::{ExportOutcome, ExportSummary};
pub use resolver::Resolver;
pub use sink::{
    AtomicSink, Destination, DestinationFactory, DiscardGuard, WritableResource, MEDIA_TYPE_ZIP,
};
