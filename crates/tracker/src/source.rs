// crates/tracker/src/source.rs
//! Seam between the watcher and the blog resource API.
//!
//! The tracker core never talks HTTP directly; completion detection goes
//! through this trait so the registry and watcher are testable with an
//! in-memory fake.

use async_trait::async_trait;

use aibys_console_types::BlogStatus;

/// Read-only view of the blog resource, as much of it as completion
/// detection needs.
#[async_trait]
pub trait BlogSource: Send + Sync {
    /// Number of AI-authored posts currently on the server.
    async fn ai_blog_count(&self) -> Result<u64, String>;

    /// Current status of one blog, or `None` when it no longer exists.
    async fn blog_status(&self, id: i64) -> Result<Option<BlogStatus>, String>;
}
