//! Archive entries derived from resolved sources

use super::ids::SourceName;
use super::source::DocumentText;

/// One named record in the output archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name inside the archive (`<source name>.conf`)
    pub entry_name: String,

    /// UTF-8 encoded document text
    pub content: Vec<u8>,
}

impl ArchiveEntry {
    /// Create an entry with an explicit name
    pub fn new(entry_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            entry_name: entry_name.into(),
            content: content.into(),
        }
    }

    /// Derive the entry for a resolved source
    pub fn from_resolved(name: &SourceName, text: DocumentText) -> Self {
        Self {
            entry_name: name.entry_name(),
            content: text.into_bytes(),
        }
    }

    /// Content size in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the entry has no content
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
