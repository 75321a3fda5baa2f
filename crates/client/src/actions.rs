// crates/client/src/actions.rs
//! Dashboard call sites: trigger the API, toast the outcome, track the job.
//!
//! Registration order is fixed by contract: a job is registered only after
//! the triggering request succeeded, never before. Trigger failures surface
//! as error toasts and never reach the tracker.

use aibys_console_tracker::{EventBus, JobTracker};
use aibys_console_types::{AppEvent, Blog, BlogRef, BulkAction, BulkResult, JobId};

use crate::error::ClientError;
use crate::http::ApiClient;

/// Allowed range for the generate count, enforced before the trigger fires.
pub const GENERATE_MIN: u32 = 1;
pub const GENERATE_MAX: u32 = 10;

/// Outcome of a bulk reject: the server's counts plus the tracked job, if
/// any AI posts were part of the batch.
#[derive(Debug)]
pub struct BulkOutcome {
    pub result: BulkResult,
    pub job: Option<JobId>,
}

/// "Generate AI Blog" submit: `POST /blogs/generate`, then track one job.
pub async fn generate_blogs(
    api: &ApiClient,
    tracker: &JobTracker,
    bus: &EventBus,
    keyword: &str,
    total: u32,
) -> Result<JobId, ClientError> {
    if !(GENERATE_MIN..=GENERATE_MAX).contains(&total) {
        let reason = format!("jumlah blog harus {GENERATE_MIN}-{GENERATE_MAX}");
        bus.emit(AppEvent::error("Gagal membuat blog", Some(reason.clone())));
        return Err(ClientError::Invalid(reason));
    }

    match api.generate(keyword, total).await {
        Ok(()) => {
            bus.emit(AppEvent::success("Aibys mulai menulis di background!"));
            Ok(tracker.start_generate_job(keyword, total))
        }
        Err(e) => {
            bus.emit(AppEvent::error("Gagal membuat blog", Some(e.toast_message())));
            Err(e)
        }
    }
}

/// Reject one post: `PUT /blogs/:id/reject`. AI-authored posts additionally
/// get a regenerate job tracked; human posts just get the toast.
pub async fn reject_blog(
    api: &ApiClient,
    tracker: &JobTracker,
    bus: &EventBus,
    blog: &Blog,
    comment: &str,
) -> Result<Option<JobId>, ClientError> {
    match api.reject(blog.id, comment).await {
        Ok(()) => {
            if blog.is_ai() {
                bus.emit(AppEvent::success("Blog ditolak, Aibys akan memperbaikinya"));
                Ok(Some(tracker.start_regenerate_job(blog.id, &blog.title)))
            } else {
                bus.emit(AppEvent::success("Blog ditolak"));
                Ok(None)
            }
        }
        Err(e) => {
            bus.emit(AppEvent::error("Gagal menolak blog", Some(e.toast_message())));
            Err(e)
        }
    }
}

/// Bulk reject: `POST /blogs/bulk` with `action: "reject"`. The AI-authored
/// subset of the selection is tracked as one aggregate job, and only when
/// the server actually queued regenerations (`ai_regenerate > 0`).
pub async fn bulk_reject(
    api: &ApiClient,
    tracker: &JobTracker,
    bus: &EventBus,
    selection: &[Blog],
    comment: &str,
) -> Result<BulkOutcome, ClientError> {
    let ids: Vec<i64> = selection.iter().map(|b| b.id).collect();

    match api
        .bulk(ids, BulkAction::Reject, Some(comment.to_string()))
        .await
    {
        Ok(result) => {
            let ai_blogs: Vec<BlogRef> = selection
                .iter()
                .filter(|b| b.is_ai())
                .map(|b| BlogRef::new(b.id, b.title.clone()))
                .collect();

            let message = if result.ai_regenerate > 0 {
                format!(
                    "{} blog ditolak, {} blog AI diperbaiki",
                    result.affected, result.ai_regenerate
                )
            } else {
                format!("{} blog ditolak", result.affected)
            };
            bus.emit(AppEvent::success(message));

            let job = (result.ai_regenerate > 0 && !ai_blogs.is_empty())
                .then(|| tracker.start_bulk_regenerate_job(&ai_blogs));

            Ok(BulkOutcome { result, job })
        }
        Err(e) => {
            bus.emit(AppEvent::error("Aksi massal gagal", Some(e.toast_message())));
            Err(e)
        }
    }
}
