// crates/client/src/lib.rs
//! HTTP client for the Aibys portfolio API.
//!
//! `ApiClient` is the thin CRUD layer (`get/post/put/delete` against
//! `${API_URL}` with the `{ "data": ... }` envelope); `blogs` adds the typed
//! blog endpoints; `actions` reproduces the dashboard call sites that trigger
//! a job, show a toast, and register the job with the tracker.

pub mod actions;
pub mod blogs;
pub mod error;
pub mod http;
pub mod source;

pub use actions::{bulk_reject, generate_blogs, reject_blog, BulkOutcome};
pub use error::ClientError;
pub use http::ApiClient;
