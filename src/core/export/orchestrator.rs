//! Export orchestrator - top-level entry point of the export pipeline
//!
//! The orchestrator drives one request through resolution, archive writing
//! and the atomic sink, and produces exactly one [`ExportOutcome`].
//!
//! # State machine
//!
//! ```text
//! Idle ──export──▶ Running ──▶ Completed(Success | Failure)
//!   ▲                                   │
//!   └────────────── next export ◀───────┘
//! ```
//!
//! Only one export runs at a time. A request that arrives while another is
//! running fails with [`ExportError::Busy`] without side effects. Front-ends
//! can [`subscribe`](ExportOrchestrator::subscribe) to the state to disable
//! their trigger while an export is running.

use crate::core::export::archive::ArchiveWriter;
use crate::core::export::outcome::{ExportOutcome, ExportSummary};
use crate::core::export::resolver::Resolver;
use crate::core::export::sink::{AtomicSink, DestinationFactory, MEDIA_TYPE_ZIP};
use crate::domain::{ArchiveEntry, ConfigSource, ExportError, SourceName};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// Ordered, caller-owned sources of one export
pub type ExportRequest = Vec<Arc<dyn ConfigSource>>;

/// How a completed export ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The archive was written
    Success,
    /// The export failed
    Failure,
}

/// Observable orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    /// No export has run yet, or the last request was rejected before starting
    Idle,
    /// An export is in progress
    Running,
    /// The last export finished
    Completed(Completion),
}

/// Export orchestrator
#[derive(Clone)]
pub struct ExportOrchestrator {
    destinations: Arc<dyn DestinationFactory>,
    writer: ArchiveWriter,
    resolver: Resolver,
    shutdown: Option<watch::Receiver<bool>>,
    state: Arc<watch::Sender<ExportState>>,
}

impl ExportOrchestrator {
    /// Create an orchestrator writing to destinations created by `destinations`
    pub fn new(destinations: Arc<dyn DestinationFactory>) -> Self {
        let (state, _) = watch::channel(ExportState::Idle);
        Self {
            destinations,
            writer: ArchiveWriter::new(),
            resolver: Resolver::new(),
            shutdown: None,
            state: Arc::new(state),
        }
    }

    /// Use a specific archive writer
    pub fn with_writer(mut self, writer: ArchiveWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Abandon running exports once `shutdown` flips to `true`
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.resolver = Resolver::new().with_shutdown(shutdown.clone());
        self.shutdown = Some(shutdown);
        self
    }

    /// Current state
    pub fn state(&self) -> ExportState {
        *self.state.borrow()
    }

    /// Whether an export is running
    pub fn is_running(&self) -> bool {
        self.state() == ExportState::Running
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<ExportState> {
        self.state.subscribe()
    }

    /// Start an export in the background and deliver its outcome to `completion`
    ///
    /// The outcome, including [`ExportError::Busy`] and
    /// [`ExportError::NoSources`] rejections, is sent exactly once. The caller
    /// decides where it is received by where it awaits the receiver.
    pub fn start(
        &self,
        request: ExportRequest,
        completion: oneshot::Sender<ExportOutcome>,
    ) -> JoinHandle<()> {
        let orchestrator = self.clone();
        tokio::spawn(async move {
            let outcome = orchestrator.run(request).await;
            if completion.send(outcome).is_err() {
                tracing::warn!("Export completion receiver dropped before the outcome was delivered");
            }
        })
    }

    /// Run one export to completion
    ///
    /// An empty request is rejected before any resource is created.
    pub async fn run(&self, request: ExportRequest) -> ExportOutcome {
        if request.is_empty() {
            tracing::warn!("Export requested with no sources");
            self.state.send_if_modified(|state| {
                if *state == ExportState::Running {
                    false
                } else {
                    *state = ExportState::Idle;
                    true
                }
            });
            return ExportOutcome::failure(ExportError::NoSources);
        }

        let Some(running) = RunningGuard::acquire(&self.state) else {
            tracing::warn!("Export rejected, another export is in progress");
            return ExportOutcome::failure(ExportError::Busy);
        };

        let outcome: ExportOutcome = self.execute(request).await.into();

        match &outcome {
            ExportOutcome::Success { summary, .. } => summary.log_summary(),
            ExportOutcome::Failure { reason } => {
                crate::log_error_with_context!(reason, "Export failed");
            }
        }

        running.complete(if outcome.is_success() {
            Completion::Success
        } else {
            Completion::Failure
        });

        outcome
    }

    async fn execute(
        &self,
        request: ExportRequest,
    ) -> std::result::Result<ExportSummary, ExportError> {
        let started_at = Utc::now();
        let start = Instant::now();

        crate::log_export_start!(request.len());

        let names: Vec<SourceName> = request.iter().map(|s| s.name().clone()).collect();
        let documents = self.resolver.resolve_all(&request).await?;
        drop(request);

        tracing::debug!(count = documents.len(), "All sources resolved");

        if self.shutdown_requested() {
            return Err(ExportError::Cancelled(
                "shutdown requested before writing the archive".to_string(),
            ));
        }

        let entries: Vec<ArchiveEntry> = names
            .iter()
            .zip(documents)
            .map(|(name, text)| ArchiveEntry::from_resolved(name, text))
            .collect();
        let entry_names: Vec<String> = entries.iter().map(|e| e.entry_name.clone()).collect();
        let content_bytes: u64 = entries.iter().map(|e| e.len() as u64).sum();

        let destinations = Arc::clone(&self.destinations);
        let writer = self.writer;
        let location = tokio::task::spawn_blocking(move || {
            AtomicSink::with_destination(destinations.as_ref(), |resource| {
                writer.write(&entries, resource).map(|_| ())
            })
        })
        .await
        .map_err(|e| ExportError::Cancelled(format!("archive task aborted: {e}")))??;

        Ok(ExportSummary {
            location,
            media_type: MEDIA_TYPE_ZIP.to_string(),
            entries: entry_names,
            content_bytes,
            started_at,
            duration: start.elapsed(),
        })
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.as_ref().is_some_and(|rx| *rx.borrow())
    }
}

/// Holds the single-flight slot; resets to `Idle` if dropped without completing
struct RunningGuard<'a> {
    state: &'a watch::Sender<ExportState>,
    completed: bool,
}

impl<'a> RunningGuard<'a> {
    fn acquire(state: &'a watch::Sender<ExportState>) -> Option<Self> {
        let acquired = state.send_if_modified(|current| {
            if *current == ExportState::Running {
                false
            } else {
                *current = ExportState::Running;
                true
            }
        });
        acquired.then(|| Self {
            state,
            completed: false,
        })
    }

    fn complete(mut self, completion: Completion) {
        self.completed = true;
        self.state.send_replace(ExportState::Completed(completion));
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.state.send_replace(ExportState::Idle);
        }
    }
}
