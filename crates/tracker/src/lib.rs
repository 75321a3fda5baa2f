// crates/tracker/src/lib.rs
//! Background job tracker for AI blog generation.
//!
//! Provides:
//! - `JobTracker` — process-wide registry of in-flight generation jobs
//! - `JobState` — atomic per-job state with broadcast snapshots
//! - `EventBus` — typed in-process channel for refresh/toast events
//! - `Watcher` — polling completion detector over a `BlogSource`
//!
//! Registration is strictly post-trigger: callers only start tracking a job
//! after the HTTP request that kicked it off has already succeeded. The
//! tracker itself never performs trigger requests and never panics into
//! caller code.

pub mod events;
pub mod job;
pub mod registry;
pub mod source;
pub mod watcher;

pub use events::EventBus;
pub use job::JobState;
pub use registry::JobTracker;
pub use source::BlogSource;
pub use watcher::{Watcher, WatcherConfig};
