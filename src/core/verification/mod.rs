//! Archive verification for post-export validation
//!
//! This module re-reads an exported archive, checks its entries against the
//! export summary, and records its SHA-256 checksum.

pub mod checksum;
pub mod report;
pub mod verify;

pub use report::{VerificationFailure, VerificationReport};
pub use verify::{verify_archive, Verifier};
