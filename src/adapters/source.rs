//! Configuration source implementations
//!
//! - [`FileSource`] reads a `.conf` file from disk when resolved
//! - [`StaticSource`] resolves to text held in memory
//! - [`discover_sources`] turns a directory of `.conf` files into sources

use crate::domain::{ConfigSource, ConfzipError, DocumentText, Result, SourceName};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// File extension of configuration files picked up by [`discover_sources`]
pub const CONFIG_EXTENSION: &str = "conf";

/// A source backed by a configuration file
#[derive(Debug, Clone)]
pub struct FileSource {
    name: SourceName,
    path: PathBuf,
}

impl FileSource {
    /// Create a source named `name` reading `path`
    pub fn new(name: SourceName, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            path: path.into(),
        }
    }

    /// Create a source named after the file stem of `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the stem is not a valid source name.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                ConfzipError::Validation(format!(
                    "Cannot derive a source name from {}",
                    path.display()
                ))
            })?;
        let name = SourceName::new(stem).map_err(ConfzipError::Validation)?;
        Ok(Self::new(name, path))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &SourceName {
        &self.name
    }

    async fn resolve(&self) -> Result<DocumentText> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            ConfzipError::Source(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let text = String::from_utf8(bytes).map_err(|e| {
            ConfzipError::Source(format!("{} is not valid UTF-8: {e}", self.path.display()))
        })?;

        tracing::debug!(
            source = %self.name,
            path = %self.path.display(),
            bytes = text.len(),
            "Resolved file source"
        );

        Ok(DocumentText::from(text))
    }
}

/// A source that resolves to fixed text
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: SourceName,
    text: DocumentText,
}

impl StaticSource {
    /// Create a static source
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid source name.
    pub fn new(name: &str, text: impl Into<DocumentText>) -> std::result::Result<Self, String> {
        Ok(Self {
            name: SourceName::new(name)?,
            text: text.into(),
        })
    }
}

#[async_trait]
impl ConfigSource for StaticSource {
    fn name(&self) -> &SourceName {
        &self.name
    }

    async fn resolve(&self) -> Result<DocumentText> {
        Ok(self.text.clone())
    }
}

/// Find every `*.conf` file directly inside `dir`
///
/// Sources are ordered by file name so that repeated exports of the same
/// directory produce the same archive. Files whose stem is not a valid source
/// name are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub async fn discover_sources(dir: impl AsRef<Path>) -> Result<Vec<FileSource>> {
    let dir = dir.as_ref();
    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(|e| {
        ConfzipError::Configuration(format!(
            "Failed to read source directory {}: {e}",
            dir.display()
        ))
    })?;

    let mut paths = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        let is_conf = path
            .extension()
            .is_some_and(|ext| ext == CONFIG_EXTENSION);
        if is_conf && entry.file_type().await?.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        match FileSource::from_path(&path) {
            Ok(source) => sources.push(source),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping configuration file");
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        count = sources.len(),
        "Discovered configuration sources"
    );

    Ok(sources)
}
