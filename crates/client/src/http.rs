// crates/client/src/http.rs
//! Thin REST client for `${API_URL}`.
//!
//! Every successful payload arrives wrapped in `{ "data": ... }`; every
//! failure in `{ "message": ... }`. The verbs here decode both envelopes so
//! the typed endpoints in `blogs` stay one-liners.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use aibys_console_types::{ApiErrorBody, Envelope};

use crate::error::ClientError;

/// Request timeout for every call. Triggers are 202-style and cheap; list
/// polls are the heaviest thing this client does.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the portfolio API.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the API at `base_url` (e.g. `https://api.aibys.dev/api`).
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.http.get(self.url(path));
        self.execute(req, path).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.http.post(self.url(path)).json(body);
        self.execute(req, path).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.http.put(self.url(path)).json(body);
        self.execute(req, path).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.http.delete(self.url(path));
        self.execute(req, path).await
    }

    /// POST where the response body is irrelevant (202-style triggers).
    pub async fn post_no_content<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let req = self.http.post(self.url(path)).json(body);
        self.send_checked(req, path).await.map(|_| ())
    }

    /// PUT where the response body is irrelevant.
    pub async fn put_no_content<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let req = self.http.put(self.url(path)).json(body);
        self.send_checked(req, path).await.map(|_| ())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ClientError> {
        let body = self.send_checked(req, path).await?;
        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(|e| ClientError::decode(path, e))?;
        Ok(envelope.data)
    }

    /// Send the request, map non-2xx responses to `ClientError::Api` using
    /// the server's error envelope when present.
    async fn send_checked(
        &self,
        req: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<bytes::Bytes, ClientError> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
            tracing::warn!(path, status = status.as_u16(), message = %message, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = ApiClient::new("ftp://example.com", None).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/api/", None).unwrap();
        assert_eq!(client.url("/blogs"), "http://localhost:3000/api/blogs");
    }

    #[tokio::test]
    async fn test_get_unwraps_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .with_status(200)
            .with_body(r#"{"data":42}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), None).unwrap();
        let value: u64 = client.get("/ping").await.unwrap();

        assert_eq!(value, 42);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_envelope_surfaces_server_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/blogs/99")
            .with_status(404)
            .with_body(r#"{"message":"blog not found"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), None).unwrap();
        let err = client.get::<serde_json::Value>("/blogs/99").await.unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "blog not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_envelope_error_body_falls_back_to_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/boom")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), None).unwrap();
        let err = client.get::<serde_json::Value>("/boom").await.unwrap_err();

        assert_eq!(err.toast_message(), "HTTP 502");
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/secure")
            .match_header("authorization", "Bearer sekrit")
            .with_status(200)
            .with_body(r#"{"data":null}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), Some("sekrit".to_string())).unwrap();
        let _: Option<u8> = client.get("/secure").await.unwrap();
        mock.assert_async().await;
    }
}
