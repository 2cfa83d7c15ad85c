//! Concurrent resolution of configuration sources
//!
//! Every source of a request is resolved on its own tokio task. The resolver
//! waits for all of them before reporting, so the outcome does not depend on
//! which task finishes first: documents come back in request order, and when
//! several sources fail the one with the lowest position is reported.

use crate::domain::{ConfigSource, DocumentText, ExportError};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Outcome of one resolution task: its position and the document or cause
type Resolved = (usize, std::result::Result<DocumentText, String>);

/// Fan-out/fan-in coordinator for source resolution
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    shutdown: Option<watch::Receiver<bool>>,
}

impl Resolver {
    /// Create a resolver that runs until every source has finished
    pub fn new() -> Self {
        Self { shutdown: None }
    }

    /// Abort in-flight resolutions once `shutdown` flips to `true`
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Resolve all sources concurrently
    ///
    /// Returns the documents in the same order as `sources`. The caller
    /// guarantees `sources` is non-empty.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Resolution`] for the failing source with the lowest
    ///   position, once every resolution has finished
    /// - [`ExportError::Cancelled`] if shutdown was requested; outstanding
    ///   tasks are aborted before returning
    pub async fn resolve_all(
        &self,
        sources: &[Arc<dyn ConfigSource>],
    ) -> std::result::Result<Vec<DocumentText>, ExportError> {
        let mut join_set: JoinSet<Resolved> = JoinSet::new();

        for (index, source) in sources.iter().enumerate() {
            let source = Arc::clone(source);
            join_set.spawn(async move {
                let outcome = match AssertUnwindSafe(source.resolve()).catch_unwind().await {
                    Ok(Ok(document)) => Ok(document),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(_) => Err("resolution panicked".to_string()),
                };
                (index, outcome)
            });
        }

        tracing::debug!(count = sources.len(), "Spawned source resolutions");

        let mut slots: Vec<Option<std::result::Result<DocumentText, String>>> =
            (0..sources.len()).map(|_| None).collect();
        let mut shutdown = self.shutdown.clone();

        loop {
            let next = match shutdown.as_mut() {
                Some(rx) => tokio::select! {
                    joined = join_set.join_next() => Next::Joined(joined),
                    () = shutdown_requested(rx) => Next::Shutdown,
                },
                None => Next::Joined(join_set.join_next().await),
            };

            match next {
                Next::Joined(Some(Ok((index, outcome)))) => {
                    if let Err(cause) = &outcome {
                        tracing::warn!(
                            source = %sources[index].name(),
                            index,
                            error = %cause,
                            "Source failed to resolve"
                        );
                    }
                    slots[index] = Some(outcome);
                }
                Next::Joined(Some(Err(join_error))) => {
                    // The slot stays empty and is reported below.
                    tracing::error!(error = %join_error, "Resolution task did not complete");
                }
                Next::Joined(None) => break,
                Next::Shutdown => {
                    let pending = join_set.len();
                    join_set.shutdown().await;
                    tracing::warn!(pending, "Shutdown requested, abandoned source resolution");
                    return Err(ExportError::Cancelled(format!(
                        "shutdown requested with {pending} source(s) still resolving"
                    )));
                }
            }
        }

        let mut documents = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(Ok(document)) => documents.push(document),
                Some(Err(cause)) => {
                    return Err(ExportError::Resolution {
                        name: sources[index].name().clone(),
                        index,
                        cause,
                    })
                }
                None => {
                    return Err(ExportError::Resolution {
                        name: sources[index].name().clone(),
                        index,
                        cause: "resolution task did not complete".to_string(),
                    })
                }
            }
        }

        Ok(documents)
    }
}

enum Next {
    Joined(Option<std::result::Result<Resolved, tokio::task::JoinError>>),
    Shutdown,
}

/// Completes once the watched flag is `true`; never completes if the sender is gone
async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
