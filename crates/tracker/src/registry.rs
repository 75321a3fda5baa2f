// crates/tracker/src/registry.rs
//! Central registry of tracked background jobs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use aibys_console_types::{BlogRef, JobId, JobKind, JobSnapshot, JobStatus};

use crate::job::JobState;

/// Snapshot channel capacity. Sized for bursts of progress updates from a
/// handful of concurrent jobs.
const SNAPSHOT_CAPACITY: usize = 256;

/// Process-wide registry of in-flight generation jobs.
///
/// Pages (or CLI commands) register jobs through the three `start_*`
/// functions right after the triggering HTTP call succeeded; the indicator
/// renders `active_jobs()` and listens on `subscribe()` regardless of which
/// caller started what. The registry owns the job list exclusively —
/// consumers only ever see snapshots.
///
/// The start functions never block and never panic: a poisoned lock is
/// logged and degrades to skipping the indicator, because callers have
/// already shown a success toast by the time they get here.
pub struct JobTracker {
    next_id: AtomicU64,
    jobs: RwLock<HashMap<JobId, Arc<JobState>>>,
    snapshot_tx: broadcast::Sender<JobSnapshot>,
}

impl JobTracker {
    pub fn new() -> Self {
        let (snapshot_tx, _) = broadcast::channel(SNAPSHOT_CAPACITY);
        Self {
            next_id: AtomicU64::new(1),
            jobs: RwLock::new(HashMap::new()),
            snapshot_tx,
        }
    }

    /// Track "AI is writing `total` posts about `keyword`".
    ///
    /// The caller validates `total` (1–10) and has already fired
    /// `POST /blogs/generate`; this only registers the indicator entry.
    pub fn start_generate_job(&self, keyword: &str, total: u32) -> JobId {
        self.register(JobKind::Generate {
            keyword: keyword.to_string(),
            total,
        })
    }

    /// Track the rewrite of a single rejected AI post.
    ///
    /// Re-registering a blog already tracked by a running job returns the
    /// existing job id instead of adding a duplicate indicator entry.
    pub fn start_regenerate_job(&self, blog_id: i64, blog_title: &str) -> JobId {
        if let Some(existing) = self.running_job_for_blog(blog_id) {
            tracing::debug!(blog_id, job_id = existing, "blog already tracked, reusing job");
            return existing;
        }
        self.register(JobKind::RegenerateSingle {
            blog: BlogRef::new(blog_id, blog_title),
        })
    }

    /// Track a batch of rewrites as one aggregate job with per-blog progress.
    ///
    /// Callers guard against empty batches (`ai_regenerate > 0`), but an
    /// empty slice is tolerated: it registers a zero-total job the watcher
    /// completes on its next tick.
    pub fn start_bulk_regenerate_job(&self, blogs: &[BlogRef]) -> JobId {
        self.register(JobKind::RegenerateBulk {
            blogs: blogs.to_vec(),
        })
    }

    /// Jobs still visible in the indicator: running only, oldest first.
    pub fn active_jobs(&self) -> Vec<JobSnapshot> {
        let mut jobs: Vec<JobSnapshot> = match self.jobs.read() {
            Ok(jobs) => jobs
                .values()
                .map(|s| s.snapshot())
                .filter(|snap| snap.status == JobStatus::Running)
                .collect(),
            Err(e) => {
                tracing::error!("RwLock poisoned reading jobs map: {e}");
                Vec::new()
            }
        };
        jobs.sort_by_key(|snap| snap.id);
        jobs
    }

    /// Every tracked job, terminal ones included, oldest first.
    pub fn all_jobs(&self) -> Vec<JobSnapshot> {
        let mut jobs: Vec<JobSnapshot> = match self.jobs.read() {
            Ok(jobs) => jobs.values().map(|s| s.snapshot()).collect(),
            Err(e) => {
                tracing::error!("RwLock poisoned reading jobs map: {e}");
                Vec::new()
            }
        };
        jobs.sort_by_key(|snap| snap.id);
        jobs
    }

    pub fn get(&self, id: JobId) -> Option<JobSnapshot> {
        match self.jobs.read() {
            Ok(jobs) => jobs.get(&id).map(|s| s.snapshot()),
            Err(e) => {
                tracing::error!("RwLock poisoned reading jobs map: {e}");
                None
            }
        }
    }

    /// Drop a job from the registry (user dismissal). Returns whether the
    /// job existed. State is in-memory only, so nothing else to clean up.
    pub fn dismiss(&self, id: JobId) -> bool {
        match self.jobs.write() {
            Ok(mut jobs) => jobs.remove(&id).is_some(),
            Err(e) => {
                tracing::error!("RwLock poisoned dismissing job: {e}");
                false
            }
        }
    }

    /// Subscribe to every snapshot change across all jobs.
    pub fn subscribe(&self) -> broadcast::Receiver<JobSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Shared handles to the running jobs, for the watcher.
    pub(crate) fn running_states(&self) -> Vec<Arc<JobState>> {
        match self.jobs.read() {
            Ok(jobs) => jobs
                .values()
                .filter(|s| s.status() == JobStatus::Running)
                .cloned()
                .collect(),
            Err(e) => {
                tracing::error!("RwLock poisoned reading jobs map: {e}");
                Vec::new()
            }
        }
    }

    fn register(&self, kind: JobKind) -> JobId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let state = Arc::new(JobState::new(id, kind, self.snapshot_tx.clone()));

        // Store first so a subscriber reacting to the announcement can
        // already find the job through `get`/`active_jobs`. The announcement
        // still goes out on a poisoned lock, since callers have shown their
        // success toast by now.
        match self.jobs.write() {
            Ok(mut jobs) => {
                jobs.insert(id, Arc::clone(&state));
            }
            Err(e) => tracing::error!("RwLock poisoned writing jobs map: {e}"),
        }
        let _ = self.snapshot_tx.send(state.snapshot());

        tracing::info!(job_id = id, "job registered");
        id
    }

    fn running_job_for_blog(&self, blog_id: i64) -> Option<JobId> {
        match self.jobs.read() {
            Ok(jobs) => jobs
                .values()
                .filter(|s| s.status() == JobStatus::Running)
                .find(|s| s.kind().target_ids().contains(&blog_id))
                .map(|s| s.id()),
            Err(e) => {
                tracing::error!("RwLock poisoned reading jobs map: {e}");
                None
            }
        }
    }
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_start_generate_registers_one_running_job() {
        let tracker = JobTracker::new();
        let id = tracker.start_generate_job("golang", 3);

        let active = tracker.active_jobs();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert_eq!(active[0].status, JobStatus::Running);
        assert!(active[0].label.contains("golang"));
        assert!(active[0].label.contains('3'));
    }

    #[test]
    fn test_start_regenerate_label_contains_title() {
        let tracker = JobTracker::new();
        tracker.start_regenerate_job(42, "My Post");

        let active = tracker.active_jobs();
        assert_eq!(active.len(), 1);
        assert!(active[0].label.contains("My Post"));
        assert_eq!(active[0].kind.target_ids(), vec![42]);
    }

    #[test]
    fn test_bulk_registers_single_aggregate_job() {
        let tracker = JobTracker::new();
        let blogs = vec![BlogRef::new(1, "a"), BlogRef::new(2, "b"), BlogRef::new(3, "c")];
        tracker.start_bulk_regenerate_job(&blogs);

        let active = tracker.active_jobs();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].total, 3);
        assert_eq!(active[0].current, 0);
    }

    #[test]
    fn test_duplicate_blog_reuses_running_job() {
        let tracker = JobTracker::new();
        let first = tracker.start_regenerate_job(7, "Intro to Goroutines");
        let second = tracker.start_regenerate_job(7, "Intro to Goroutines");

        assert_eq!(first, second);
        assert_eq!(tracker.active_jobs().len(), 1);
    }

    #[test]
    fn test_dedup_ignores_terminal_jobs() {
        let tracker = JobTracker::new();
        let first = tracker.start_regenerate_job(7, "Intro to Goroutines");

        // Finish the first job, then reject the same blog again.
        for state in tracker.running_states() {
            state.mark_done();
        }
        let second = tracker.start_regenerate_job(7, "Intro to Goroutines");

        assert_ne!(first, second);
        assert_eq!(tracker.active_jobs().len(), 1);
    }

    #[test]
    fn test_empty_bulk_is_tolerated() {
        let tracker = JobTracker::new();
        let id = tracker.start_bulk_regenerate_job(&[]);

        let snap = tracker.get(id).unwrap();
        assert_eq!(snap.total, 0);
        assert_eq!(snap.status, JobStatus::Running);
    }

    #[test]
    fn test_terminal_jobs_leave_visible_set() {
        let tracker = JobTracker::new();
        let id = tracker.start_generate_job("rust", 2);
        assert_eq!(tracker.active_jobs().len(), 1);

        for state in tracker.running_states() {
            state.mark_done();
        }
        assert!(tracker.active_jobs().is_empty());
        // still queryable until dismissed
        assert_eq!(tracker.get(id).unwrap().status, JobStatus::Done);
    }

    #[test]
    fn test_dismiss_removes_job() {
        let tracker = JobTracker::new();
        let id = tracker.start_generate_job("rust", 1);

        assert!(tracker.dismiss(id));
        assert!(tracker.get(id).is_none());
        assert!(!tracker.dismiss(id));
    }

    #[test]
    fn test_jobs_ordered_by_registration() {
        let tracker = JobTracker::new();
        let a = tracker.start_generate_job("first", 1);
        let b = tracker.start_regenerate_job(5, "second");
        let c = tracker.start_generate_job("third", 2);

        let ids: Vec<JobId> = tracker.active_jobs().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_registration_broadcasts_snapshot() {
        let tracker = JobTracker::new();
        let mut rx = tracker.subscribe();

        let id = tracker.start_generate_job("rust backend", 5);

        let snap = rx.recv().await.unwrap();
        assert_eq!(snap.id, id);
        assert_eq!(snap.status, JobStatus::Running);
        assert!(snap.label.contains("rust backend"));
        assert!(snap.label.contains('5'));
    }

    #[tokio::test]
    async fn test_announced_job_is_queryable() {
        let tracker = Arc::new(JobTracker::new());
        let mut rx = tracker.subscribe();

        // A subscriber on another task must be able to look the job up as
        // soon as its registration snapshot arrives.
        let lookup = {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move {
                let snap = rx.recv().await.unwrap();
                tracker.get(snap.id)
            })
        };

        let id = tracker.start_generate_job("rust", 2);
        let found = lookup.await.unwrap();
        assert_eq!(found.unwrap().id, id);
        assert_eq!(tracker.active_jobs().len(), 1);
    }
}
