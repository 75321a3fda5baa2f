// crates/types/src/job.rs
//! Tracked-job types for the background job registry.
//!
//! A job is a client-side record of a long-running server-side task. It is
//! born `running` (tracking starts only after the trigger request already
//! succeeded) and moves to exactly one of `done` or `failed`, both terminal.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::blog::BlogRef;

/// Unique identifier for a tracked job.
pub type JobId = u64;

/// Status of a tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Running = 0,
    Done = 1,
    Failed = 2,
}

impl JobStatus {
    /// Reconstruct from the atomic's u8 representation.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => JobStatus::Running,
            1 => JobStatus::Done,
            _ => JobStatus::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

/// What a job is tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum JobKind {
    /// AI is writing `total` new posts about `keyword`.
    Generate { keyword: String, total: u32 },
    /// AI is rewriting a single rejected post.
    RegenerateSingle { blog: BlogRef },
    /// AI is rewriting a batch of rejected posts (one aggregate job).
    RegenerateBulk { blogs: Vec<BlogRef> },
}

/// Titles shown in a bulk label before the rest is elided.
const BULK_LABEL_TITLES: usize = 3;

impl JobKind {
    /// Human-readable description, deterministic from the inputs.
    pub fn label(&self) -> String {
        match self {
            JobKind::Generate { keyword, total } => {
                if keyword.trim().is_empty() {
                    format!("Aibys menulis {total} artikel baru")
                } else {
                    format!("Aibys menulis {total} artikel tentang \"{keyword}\"")
                }
            }
            JobKind::RegenerateSingle { blog } => {
                format!("Aibys menulis ulang \"{}\"", blog.title)
            }
            JobKind::RegenerateBulk { blogs } => {
                let mut titles: Vec<&str> = blogs
                    .iter()
                    .take(BULK_LABEL_TITLES)
                    .map(|b| b.title.as_str())
                    .collect();
                if blogs.len() > BULK_LABEL_TITLES {
                    titles.push("…");
                }
                format!(
                    "Aibys memperbaiki {} blog AI: {}",
                    blogs.len(),
                    titles.join(", ")
                )
            }
        }
    }

    /// Wire tag for logs and the indicator (`generate`, `regenerate-single`,
    /// `regenerate-bulk`).
    pub fn tag(&self) -> &'static str {
        match self {
            JobKind::Generate { .. } => "generate",
            JobKind::RegenerateSingle { .. } => "regenerate-single",
            JobKind::RegenerateBulk { .. } => "regenerate-bulk",
        }
    }

    /// Blog ids this job is waiting on. Empty for generate jobs, which are
    /// tracked by count delta rather than by id.
    pub fn target_ids(&self) -> Vec<i64> {
        match self {
            JobKind::Generate { .. } => Vec::new(),
            JobKind::RegenerateSingle { blog } => vec![blog.id],
            JobKind::RegenerateBulk { blogs } => blogs.iter().map(|b| b.id).collect(),
        }
    }

    /// Number of units of work the job represents.
    pub fn total(&self) -> u64 {
        match self {
            JobKind::Generate { total, .. } => u64::from(*total),
            JobKind::RegenerateSingle { .. } => 1,
            JobKind::RegenerateBulk { blogs } => blogs.len() as u64,
        }
    }
}

/// Point-in-time view of a tracked job, broadcast to the indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub id: JobId,
    pub kind: JobKind,
    pub label: String,
    pub status: JobStatus,
    pub current: u64,
    pub total: u64,
    pub message: Option<String>,
    /// RFC 3339 timestamp of when tracking began.
    pub created_at: String,
}
