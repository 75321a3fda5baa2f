// crates/types/src/event.rs
//! In-process application events.
//!
//! The original dashboard used untyped window CustomEvents (`blogs_refresh`,
//! `show_toast`) with an ad-hoc `detail` shape. Here the channel carries a
//! closed discriminated union instead, so the payload shape cannot drift.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// Everything the event bus can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// Underlying blog rows changed; listeners should refetch their lists.
    BlogsRefresh,
    /// Fire-and-forget UI notification.
    ShowToast {
        kind: ToastKind,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl AppEvent {
    pub fn success(message: impl Into<String>) -> Self {
        AppEvent::ShowToast {
            kind: ToastKind::Success,
            message: message.into(),
            description: None,
        }
    }

    pub fn error(message: impl Into<String>, description: Option<String>) -> Self {
        AppEvent::ShowToast {
            kind: ToastKind::Error,
            message: message.into(),
            description,
        }
    }
}
