// crates/client/src/blogs.rs
//! Typed blog endpoints.
//!
//! Trigger endpoints (`generate`, `reject`, `bulk`) are 202-style: the server
//! accepts the request and does the actual AI work in the background. The
//! read endpoints feed both the admin views and the completion watcher.

use aibys_console_types::{
    Blog, BlogStats, BulkAction, BulkRequest, BulkResult, GenerateRequest, RejectRequest,
};

use crate::error::ClientError;
use crate::http::ApiClient;

impl ApiClient {
    /// `GET /blogs` — the full list; the dashboard filters and paginates
    /// client-side. `search` narrows by title server-side when given.
    pub async fn list_blogs(&self, search: Option<&str>) -> Result<Vec<Blog>, ClientError> {
        let path = match search {
            Some(q) if !q.trim().is_empty() => {
                format!("/blogs?search={}", urlencoding::encode(q.trim()))
            }
            _ => "/blogs".to_string(),
        };
        self.get(&path).await
    }

    /// `GET /blogs/:id`.
    pub async fn get_blog(&self, id: i64) -> Result<Blog, ClientError> {
        self.get(&format!("/blogs/{id}")).await
    }

    /// `GET /blogs/stats`.
    pub async fn blog_stats(&self) -> Result<BlogStats, ClientError> {
        self.get("/blogs/stats").await
    }

    /// `POST /blogs/generate` — ask the AI to write `total` posts about
    /// `keyword`. Returns once the server has accepted the work.
    pub async fn generate(&self, keyword: &str, total: u32) -> Result<(), ClientError> {
        self.post_no_content(
            "/blogs/generate",
            &GenerateRequest {
                keyword: keyword.to_string(),
                total,
            },
        )
        .await
    }

    /// `PUT /blogs/:id/reject` — reject one post with a review comment.
    /// AI-authored posts get queued for regeneration server-side.
    pub async fn reject(&self, id: i64, comment: &str) -> Result<(), ClientError> {
        self.put_no_content(
            &format!("/blogs/{id}/reject"),
            &RejectRequest {
                comment: comment.to_string(),
            },
        )
        .await
    }

    /// `POST /blogs/bulk` — apply one action to many posts.
    pub async fn bulk(
        &self,
        ids: Vec<i64>,
        action: BulkAction,
        comment: Option<String>,
    ) -> Result<BulkResult, ClientError> {
        self.post("/blogs/bulk", &BulkRequest { ids, action, comment })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_list_blogs_encodes_search() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/blogs?search=rust%20backend")
            .with_status(200)
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), None).unwrap();
        let blogs = client.list_blogs(Some("rust backend")).await.unwrap();

        assert!(blogs.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_sends_keyword_and_total() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/blogs/generate")
            .match_body(mockito::Matcher::JsonString(
                r#"{"keyword":"rust backend","total":5}"#.to_string(),
            ))
            .with_status(202)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), None).unwrap();
        client.generate("rust backend", 5).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bulk_decodes_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/blogs/bulk")
            .match_body(mockito::Matcher::JsonString(
                r#"{"ids":[1,2,3],"action":"reject","comment":"salah fakta"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"data":{"affected":3,"ai_regenerate":2}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), None).unwrap();
        let result = client
            .bulk(vec![1, 2, 3], BulkAction::Reject, Some("salah fakta".to_string()))
            .await
            .unwrap();

        assert_eq!(result.affected, 3);
        assert_eq!(result.ai_regenerate, 2);
    }
}
