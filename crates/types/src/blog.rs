// crates/types/src/blog.rs
//! Blog resource types as the portfolio API serves them.
//!
//! Field names match the API's snake_case JSON verbatim, so these structs
//! need no serde renames. Status transitions are server-owned; the console
//! only observes them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Author value the backend assigns to AI-generated posts.
pub const AI_AUTHOR: &str = "aibys";

/// Lifecycle status of a blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "snake_case")]
pub enum BlogStatus {
    Pending,
    Published,
    Rejected,
    Archived,
}

/// A blog row as returned by `GET /blogs` and `GET /blogs/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub status: BlogStatus,
    /// RFC 3339 timestamps, passed through as the API sends them.
    pub created_at: String,
    pub updated_at: String,
}

impl Blog {
    /// Whether this post was written by the AI service.
    pub fn is_ai(&self) -> bool {
        self.author == AI_AUTHOR
    }
}

/// Aggregate counts from `GET /blogs/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
pub struct BlogStats {
    pub total: u64,
    pub pending: u64,
    pub published: u64,
    pub rejected: u64,
    pub archived: u64,
}

/// Minimal blog reference carried inside regenerate jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
pub struct BlogRef {
    pub id: i64,
    pub title: String,
}

impl BlogRef {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blog_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&BlogStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<BlogStatus>("\"rejected\"").unwrap(),
            BlogStatus::Rejected
        );
    }

    #[test]
    fn test_blog_is_ai() {
        let mut blog = Blog {
            id: 1,
            title: "Intro to Goroutines".to_string(),
            author: AI_AUTHOR.to_string(),
            status: BlogStatus::Pending,
            created_at: "2026-08-01T09:00:00Z".to_string(),
            updated_at: "2026-08-01T09:00:00Z".to_string(),
        };
        assert!(blog.is_ai());

        blog.author = "rani".to_string();
        assert!(!blog.is_ai());
    }

    #[test]
    fn test_blog_deserialize_snake_case() {
        let json = r#"{
            "id": 7,
            "title": "Intro to Goroutines",
            "author": "aibys",
            "status": "rejected",
            "created_at": "2026-08-01T09:00:00Z",
            "updated_at": "2026-08-02T10:30:00Z"
        }"#;
        let blog: Blog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.id, 7);
        assert_eq!(blog.status, BlogStatus::Rejected);
        assert!(blog.is_ai());
    }
}
