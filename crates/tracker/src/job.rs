// crates/tracker/src/job.rs
//! Atomic state tracking for a single background job.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::RwLock;
use tokio::sync::broadcast;

use aibys_console_types::{JobId, JobKind, JobSnapshot, JobStatus};

/// Atomic state for a single job.
///
/// Status and progress use lock-free atomics (the message uses a RwLock) so
/// updates from the watcher task never block snapshot readers. Every change
/// broadcasts a fresh snapshot on the tracker's shared channel.
pub struct JobState {
    id: JobId,
    kind: JobKind,
    label: String,
    created_at: String,
    status: AtomicU8,
    current: AtomicU64,
    total: AtomicU64,
    message: RwLock<Option<String>>,
    tx: broadcast::Sender<JobSnapshot>,
}

impl JobState {
    /// Create a new job in the `running` state.
    ///
    /// Jobs are only registered after their trigger request succeeded, so
    /// there is no pending phase: a tracked job is running by definition.
    pub(crate) fn new(id: JobId, kind: JobKind, tx: broadcast::Sender<JobSnapshot>) -> Self {
        let label = kind.label();
        let total = kind.total();
        Self {
            id,
            kind,
            label,
            created_at: chrono::Utc::now().to_rfc3339(),
            status: AtomicU8::new(JobStatus::Running as u8),
            current: AtomicU64::new(0),
            total: AtomicU64::new(total),
            message: RwLock::new(None),
            tx,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn kind(&self) -> &JobKind {
        &self.kind
    }

    pub fn status(&self) -> JobStatus {
        JobStatus::from_u8(self.status.load(Ordering::Relaxed))
    }

    /// Set observed progress and broadcast an update.
    pub fn set_progress(&self, current: u64) {
        let total = self.total.load(Ordering::Relaxed);
        self.current.store(current.min(total), Ordering::Relaxed);
        self.broadcast();
    }

    /// Transition `running -> done`. A no-op if the job is already terminal.
    /// Returns whether the transition happened.
    pub fn mark_done(&self) -> bool {
        let moved = self.transition(JobStatus::Done);
        if moved {
            self.current
                .store(self.total.load(Ordering::Relaxed), Ordering::Relaxed);
            self.broadcast();
        }
        moved
    }

    /// Transition `running -> failed` with an error message. A no-op if the
    /// job is already terminal. Returns whether the transition happened.
    pub fn mark_failed(&self, error: impl Into<String>) -> bool {
        let moved = self.transition(JobStatus::Failed);
        if moved {
            match self.message.write() {
                Ok(mut guard) => *guard = Some(error.into()),
                Err(e) => tracing::error!(job_id = self.id, "RwLock poisoned writing message: {e}"),
            }
            self.broadcast();
        }
        moved
    }

    /// Get a snapshot of the current job state.
    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            id: self.id,
            kind: self.kind.clone(),
            label: self.label.clone(),
            status: self.status(),
            current: self.current.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
            message: match self.message.read() {
                Ok(g) => g.clone(),
                Err(e) => {
                    tracing::error!(job_id = self.id, "RwLock poisoned reading message: {e}");
                    None
                }
            },
            created_at: self.created_at.clone(),
        }
    }

    /// Terminal states never transition back to running or to each other.
    fn transition(&self, to: JobStatus) -> bool {
        self.status
            .compare_exchange(
                JobStatus::Running as u8,
                to as u8,
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_ok()
    }

    fn broadcast(&self) {
        // No subscribers is fine.
        let _ = self.tx.send(self.snapshot());
    }
}
