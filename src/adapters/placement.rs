//! File placement for exported archives
//!
//! [`FilePlacement`] stages the archive in a hidden `.partial` file inside an
//! existing directory and publishes it under the preferred name once it is
//! complete. It never replaces an existing file: when the preferred name is
//! taken it tries `name (1).zip`, `name (2).zip` and so on.

use crate::core::export::sink::{Destination, DestinationFactory, MEDIA_TYPE_ZIP};
use crate::domain::{ConfzipError, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// How many suffixed names are tried before giving up
const MAX_ATTEMPTS: usize = 1000;

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Creates collision-free destination files in a directory
#[derive(Debug, Clone)]
pub struct FilePlacement {
    dir: PathBuf,
    file_name: String,
}

impl FilePlacement {
    /// Place archives named `file_name` in `dir`
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Preferred file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn staging_path(&self) -> PathBuf {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(
            ".{}.{}-{seq}.partial",
            self.file_name,
            std::process::id()
        ))
    }

    /// Fallback for filesystems without hard links: reserve a name, then
    /// rename the staged archive over the empty reservation
    fn publish_by_rename(&self, staged: &Path, first_attempt: usize) -> Result<PathBuf> {
        for attempt in first_attempt..MAX_ATTEMPTS {
            let candidate = self.dir.join(candidate_name(&self.file_name, attempt));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(reservation) => {
                    drop(reservation);
                    return match fs::rename(staged, &candidate) {
                        Ok(()) => Ok(candidate),
                        Err(e) => {
                            if let Err(cleanup) = fs::remove_file(&candidate) {
                                tracing::warn!(
                                    location = %candidate.display(),
                                    error = %cleanup,
                                    "Failed to remove name reservation"
                                );
                            }
                            Err(ConfzipError::Io(format!(
                                "cannot publish {}: {e}",
                                candidate.display()
                            )))
                        }
                    };
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(ConfzipError::Io(format!(
                        "cannot create {}: {e}",
                        candidate.display()
                    )))
                }
            }
        }

        Err(self.no_free_name())
    }

    fn no_free_name(&self) -> ConfzipError {
        ConfzipError::Io(format!(
            "no free file name for {} in {} after {MAX_ATTEMPTS} attempts",
            self.file_name,
            self.dir.display()
        ))
    }
}

impl DestinationFactory for FilePlacement {
    fn create(&self) -> Result<Destination> {
        if !self.dir.is_dir() {
            return Err(ConfzipError::Io(format!(
                "output directory {} does not exist",
                self.dir.display()
            )));
        }

        for _ in 0..MAX_ATTEMPTS {
            let staging = self.staging_path();
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&staging)
            {
                Ok(file) => {
                    return Ok(Destination {
                        resource: Box::new(BufWriter::new(file)),
                        staging,
                        media_type: MEDIA_TYPE_ZIP,
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(ConfzipError::Io(format!(
                        "cannot create {}: {e}",
                        staging.display()
                    )))
                }
            }
        }

        Err(ConfzipError::Io(format!(
            "no free staging name in {}",
            self.dir.display()
        )))
    }

    fn publish(&self, staged: &Path) -> Result<PathBuf> {
        for attempt in 0..MAX_ATTEMPTS {
            let candidate = self.dir.join(candidate_name(&self.file_name, attempt));
            match fs::hard_link(staged, &candidate) {
                Ok(()) => {
                    if attempt > 0 {
                        tracing::debug!(
                            preferred = %self.file_name,
                            location = %candidate.display(),
                            "Preferred export name taken, using suffixed name"
                        );
                    }
                    return Ok(candidate);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "Hard link unavailable, publishing by rename");
                    return self.publish_by_rename(staged, attempt);
                }
            }
        }

        Err(self.no_free_name())
    }
}

/// `export.zip`, `export (1).zip`, `export (2).zip`, ...
fn candidate_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => {
            let (stem, ext) = file_name.split_at(dot);
            format!("{stem} ({attempt}){ext}")
        }
        _ => format!("{file_name} ({attempt})"),
    }
}
