// crates/tracker/src/watcher.rs
//! Polling completion detector for tracked jobs.
//!
//! The blog API offers no push channel, so the watcher polls the resource
//! through `BlogSource` on a fixed interval:
//!
//! - generate jobs complete when enough new AI posts have appeared; the
//!   count is a shared signal, so new posts are credited to generate jobs
//!   in registration order, oldest unfilled job first;
//! - regenerate jobs complete when every target blog's status has left
//!   `rejected` (the AI puts rewritten posts back in the review queue);
//! - a job that outlives the configured deadline fails with a timeout.
//!
//! Terminal transitions emit `BlogsRefresh` plus a toast on the event bus.
//! Transient poll errors are logged and retried next tick; they never fail
//! a job by themselves.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use aibys_console_types::{AppEvent, BlogStatus, JobId, JobKind};

use crate::events::EventBus;
use crate::job::JobState;
use crate::registry::JobTracker;
use crate::source::BlogSource;

/// Watcher tuning knobs.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// How often to poll the blog resource.
    pub poll_interval: Duration,
    /// How long a job may run before it is declared failed.
    pub job_timeout: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            job_timeout: Duration::from_secs(600),
        }
    }
}

/// Polls the blog resource and drives tracked jobs to their terminal state.
pub struct Watcher {
    tracker: Arc<JobTracker>,
    bus: EventBus,
    source: Arc<dyn BlogSource>,
    config: WatcherConfig,
    /// Posts credited so far, per generate job.
    attributed: HashMap<JobId, u64>,
    /// AI-blog count at the last successful fetch.
    last_count: Option<u64>,
    /// First observation time, per job (timeout basis).
    first_seen: HashMap<JobId, Instant>,
}

impl Watcher {
    pub fn new(
        tracker: Arc<JobTracker>,
        bus: EventBus,
        source: Arc<dyn BlogSource>,
        config: WatcherConfig,
    ) -> Self {
        Self {
            tracker,
            bus,
            source,
            config,
            attributed: HashMap::new(),
            last_count: None,
            first_seen: HashMap::new(),
        }
    }

    /// Run the poll loop forever on a background task.
    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.config.poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                self.poll_once().await;
            }
        })
    }

    /// One polling pass over all running jobs. Public so tests can drive
    /// ticks deterministically.
    pub async fn poll_once(&mut self) {
        let mut running = self.tracker.running_states();
        running.sort_by_key(|s| s.id());

        // Drop bookkeeping for jobs that went terminal or were dismissed.
        let live: HashSet<JobId> = running.iter().map(|s| s.id()).collect();
        self.attributed.retain(|id, _| live.contains(id));
        self.first_seen.retain(|id, _| live.contains(id));

        // One count fetch per tick, shared by every generate job. Posts that
        // appeared since the last fetch go into a pool that the loop below
        // hands to generate jobs in registration order.
        let has_generate = running
            .iter()
            .any(|s| matches!(s.kind(), JobKind::Generate { .. }));
        let mut new_posts = if has_generate {
            match self.source.ai_blog_count().await {
                Ok(count) => {
                    let delta = self.last_count.map_or(0, |last| count.saturating_sub(last));
                    self.last_count = Some(count);
                    Some(delta)
                }
                Err(e) => {
                    tracing::debug!("AI blog count poll failed: {e}");
                    None
                }
            }
        } else {
            // Posts landing while no generate job runs belong to nobody.
            self.last_count = None;
            None
        };

        for state in running {
            let id = state.id();
            let seen = *self.first_seen.entry(id).or_insert_with(Instant::now);

            match state.kind() {
                JobKind::Generate { total, .. } => {
                    let total = u64::from(*total);
                    if let Some(pool) = new_posts.as_mut() {
                        let credited = {
                            let credited = self.attributed.entry(id).or_insert(0);
                            let take = (*pool).min(total.saturating_sub(*credited));
                            *credited += take;
                            *pool -= take;
                            *credited
                        };
                        state.set_progress(credited);
                        if credited >= total {
                            self.finish(&state);
                            continue;
                        }
                    }
                }
                JobKind::RegenerateSingle { .. } | JobKind::RegenerateBulk { .. } => {
                    if self.poll_regenerate(&state).await {
                        continue;
                    }
                }
            }

            if seen.elapsed() >= self.config.job_timeout {
                self.fail(
                    &state,
                    format!(
                        "melewati batas waktu {} detik",
                        self.config.job_timeout.as_secs()
                    ),
                );
            }
        }
    }

    /// Poll the targets of a regenerate job. Returns true when the job
    /// reached a terminal state this tick.
    async fn poll_regenerate(&self, state: &Arc<JobState>) -> bool {
        let targets = state.kind().target_ids();
        if targets.is_empty() {
            // Empty bulk batch: nothing to wait for.
            self.finish(state);
            return true;
        }

        let mut finished = 0u64;
        let mut undecided = false;
        for target in &targets {
            match self.source.blog_status(*target).await {
                Ok(Some(BlogStatus::Rejected)) => {}
                Ok(Some(_)) => finished += 1,
                Ok(None) => {
                    self.fail(state, format!("blog {target} sudah tidak ada"));
                    return true;
                }
                Err(e) => {
                    tracing::debug!(blog_id = target, "status poll failed: {e}");
                    undecided = true;
                }
            }
        }

        state.set_progress(finished);
        if !undecided && finished == targets.len() as u64 {
            self.finish(state);
            return true;
        }
        false
    }

    fn finish(&self, state: &Arc<JobState>) {
        if state.mark_done() {
            let snap = state.snapshot();
            tracing::info!(job_id = snap.id, kind = snap.kind.tag(), "job completed");
            self.bus.emit(AppEvent::BlogsRefresh);
            self.bus.emit(AppEvent::ShowToast {
                kind: aibys_console_types::ToastKind::Success,
                message: "Aibys selesai!".to_string(),
                description: Some(snap.label),
            });
        }
    }

    fn fail(&self, state: &Arc<JobState>, reason: String) {
        if state.mark_failed(reason.clone()) {
            let snap = state.snapshot();
            tracing::warn!(
                job_id = snap.id,
                kind = snap.kind.tag(),
                reason = %reason,
                "job failed"
            );
            self.bus.emit(AppEvent::error(
                "Aibys gagal",
                Some(format!("{}: {reason}", snap.label)),
            ));
        }
    }
}
