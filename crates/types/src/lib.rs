// crates/types/src/lib.rs
//! Shared wire and domain types for the aibys-console workspace.
//!
//! Everything here crosses a boundary: either the portfolio REST API
//! (`blog`, `api`) or the dashboard frontend via generated TS bindings
//! (`job`, `event`). Pure data, no IO.

pub mod api;
pub mod blog;
pub mod event;
pub mod job;

pub use api::{ApiErrorBody, BulkAction, BulkRequest, BulkResult, Envelope, GenerateRequest, RejectRequest};
pub use blog::{Blog, BlogRef, BlogStats, BlogStatus, AI_AUTHOR};
pub use event::{AppEvent, ToastKind};
pub use job::{JobId, JobKind, JobSnapshot, JobStatus};
