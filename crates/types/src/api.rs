// crates/types/src/api.rs
//! Request and response bodies for the portfolio REST API.
//!
//! The API wraps every successful payload in `{ "data": ... }` and every
//! failure in `{ "message": ... }`; both envelopes live here so the client
//! crate can decode uniformly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Success envelope: `{ "data": <payload> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Error envelope the API returns on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Body for `POST /blogs/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
pub struct GenerateRequest {
    pub keyword: String,
    pub total: u32,
}

/// Body for `PUT /blogs/:id/reject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
pub struct RejectRequest {
    pub comment: String,
}

/// Action applied by `POST /blogs/bulk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Publish,
    Archive,
    Reject,
    Delete,
}

/// Body for `POST /blogs/bulk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
pub struct BulkRequest {
    pub ids: Vec<i64>,
    pub action: BulkAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// `data` payload of the bulk endpoint's response.
///
/// `ai_regenerate` is the number of affected rows that were AI-authored and
/// queued for regeneration server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
pub struct BulkResult {
    pub affected: u64,
    pub ai_regenerate: u64,
}
