//! All-or-nothing destination handling
//!
//! [`AtomicSink`] is the only place that removes a partially written archive.
//! The archive is written to a staging location, handed to a body closure,
//! then either synced and published by its factory, or closed and deleted. A
//! [`DiscardGuard`] covers the exits that do not return normally (panics,
//! abandoned blocking tasks). A process killed mid-write leaves at most a
//! staging file behind, never a completed-looking archive.

use crate::domain::{ExportError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Cursor, Seek, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Media type declared for exported archives
pub const MEDIA_TYPE_ZIP: &str = "application/zip";

/// A writable, seekable export target
pub trait WritableResource: Write + Seek + Send {
    /// Flush buffered data and make it durable
    fn sync(&mut self) -> io::Result<()>;
}

impl WritableResource for File {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_all()
    }
}

impl WritableResource for BufWriter<File> {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_ref().sync_all()
    }
}

impl WritableResource for Cursor<Vec<u8>> {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A freshly created export target and where it lives
pub struct Destination {
    /// Open resource the archive is written into
    pub resource: Box<dyn WritableResource>,

    /// Where the resource is being written; removed on failure
    pub staging: PathBuf,

    /// Declared media type of the artifact
    pub media_type: &'static str,
}

impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Destination")
            .field("staging", &self.staging)
            .field("media_type", &self.media_type)
            .finish_non_exhaustive()
    }
}

/// Creates export destinations
///
/// Implementations choose the staging location and the final one (and avoid
/// collisions); the sink owns the created resource for the rest of the export.
pub trait DestinationFactory: Send + Sync {
    /// Create a new staging destination
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be created at all.
    fn create(&self) -> Result<Destination>;

    /// Make a fully written and synced staging destination visible
    ///
    /// Returns the final location. Must never replace an existing artifact.
    /// When the returned location differs from `staged`, the sink removes
    /// `staged` afterwards. The default publishes in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be published; the sink then
    /// removes `staged`.
    fn publish(&self, staged: &Path) -> Result<PathBuf> {
        Ok(staged.to_path_buf())
    }
}

/// Scoped acquisition of a destination with delete-on-failure
pub struct AtomicSink;

impl AtomicSink {
    /// Create a destination, run `body` against it, and keep it only on success
    ///
    /// On success the resource is synced, closed, published, and the final
    /// location returned. On any failure the resource is closed and the
    /// staging location deleted before the error is returned, so no partial
    /// artifact stays visible.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Destination`] if `factory` cannot create the destination
    /// - [`ExportError::Write`] if `body` fails or panics, or the final sync or
    ///   the publish step fails
    pub fn with_destination<F, B>(factory: &F, body: B) -> std::result::Result<PathBuf, ExportError>
    where
        F: DestinationFactory + ?Sized,
        B: FnOnce(&mut dyn WritableResource) -> Result<()>,
    {
        let destination = factory.create().map_err(|e| {
            tracing::error!(error = %e, "Failed to create export destination");
            ExportError::Destination(e.to_string())
        })?;

        // Declared before the resource so that on unwind the resource is closed first.
        let guard = DiscardGuard::new(destination.staging.clone());
        let Destination {
            mut resource,
            staging,
            media_type,
        } = destination;

        tracing::debug!(staging = %staging.display(), media_type, "Destination created");

        let written = match panic::catch_unwind(AssertUnwindSafe(|| body(resource.as_mut()))) {
            Ok(Ok(())) => resource.sync().map_err(|e| format!("failed to sync: {e}")),
            Ok(Err(e)) => Err(e.to_string()),
            Err(payload) => Err(format!("writer panicked: {}", panic_message(payload.as_ref()))),
        };

        drop(resource);

        if let Err(cause) = written {
            guard.discard();
            return Err(ExportError::Write {
                location: staging,
                cause,
            });
        }

        match factory.publish(&staging) {
            Ok(location) if location == staging => {
                guard.commit();
                Ok(location)
            }
            Ok(location) => {
                guard.commit();
                remove_staging(&staging);
                tracing::debug!(location = %location.display(), "Export published");
                Ok(location)
            }
            Err(e) => {
                guard.discard();
                Err(ExportError::Write {
                    location: staging,
                    cause: format!("failed to publish: {e}"),
                })
            }
        }
    }
}

/// Removes a destination unless committed
#[must_use = "an unused guard discards the destination immediately"]
pub struct DiscardGuard {
    location: Option<PathBuf>,
}

impl DiscardGuard {
    /// Guard `location`
    pub fn new(location: PathBuf) -> Self {
        Self {
            location: Some(location),
        }
    }

    /// Keep the destination
    pub fn commit(mut self) {
        self.location = None;
    }

    /// Remove the destination now
    pub fn discard(mut self) {
        if let Some(location) = self.location.take() {
            remove_destination(&location);
        }
    }
}

impl Drop for DiscardGuard {
    fn drop(&mut self) {
        if let Some(location) = self.location.take() {
            remove_destination(&location);
        }
    }
}

/// Delete a partial destination; failures are logged, never propagated
fn remove_destination(location: &Path) {
    match std::fs::remove_file(location) {
        Ok(()) => {
            tracing::info!(location = %location.display(), "Removed partial export");
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::error!(
                location = %location.display(),
                error = %e,
                "Failed to remove partial export"
            );
        }
    }
}

/// Drop the staging name of a published archive
fn remove_staging(staging: &Path) {
    if let Err(e) = std::fs::remove_file(staging) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(
                staging = %staging.display(),
                error = %e,
                "Failed to remove staging file"
            );
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
