// crates/client/src/source.rs
//! `BlogSource` implementation over the live API, for the watcher.

use async_trait::async_trait;

use aibys_console_tracker::BlogSource;
use aibys_console_types::BlogStatus;

use crate::http::ApiClient;

#[async_trait]
impl BlogSource for ApiClient {
    async fn ai_blog_count(&self) -> Result<u64, String> {
        let blogs = self.list_blogs(None).await.map_err(|e| e.to_string())?;
        Ok(blogs.iter().filter(|b| b.is_ai()).count() as u64)
    }

    async fn blog_status(&self, id: i64) -> Result<Option<BlogStatus>, String> {
        match self.get_blog(id).await {
            Ok(blog) => Ok(Some(blog.status)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.to_string()),
        }
    }
}
