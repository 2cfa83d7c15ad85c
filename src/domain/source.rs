//! Configuration sources and the documents they resolve to

use super::ids::SourceName;
use super::result::Result;
use async_trait::async_trait;
use std::fmt;

/// Text of a resolved configuration document
///
/// Opaque to the export pipeline; written to the archive as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentText(String);

impl DocumentText {
    /// Wraps document text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the text as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the UTF-8 encoding in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the document and returns its UTF-8 bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }
}

impl From<String> for DocumentText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for DocumentText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for DocumentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named unit of configuration that resolves asynchronously to text
///
/// Implementations are owned by the caller. The export pipeline only holds a
/// shared reference for the duration of one export and may resolve every
/// source of a request concurrently.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Name of the source, used as the archive entry stem
    fn name(&self) -> &SourceName;

    /// Resolve the source to its document text
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be produced. The export that
    /// requested it fails as a whole.
    async fn resolve(&self) -> Result<DocumentText>;
}
