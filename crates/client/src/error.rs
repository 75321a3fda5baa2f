// crates/client/src/error.rs
use thiserror::Error;

/// Errors from the portfolio API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response; `message` is the server's error envelope when it
    /// sent one, otherwise a generic fallback.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub fn decode(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }

    /// Message suitable for an error toast: the server's words when we have
    /// them, the error display otherwise.
    pub fn toast_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_not_found_detection() {
        let err = ClientError::Api {
            status: 404,
            message: "blog not found".to_string(),
        };
        assert!(err.is_not_found());

        let err = ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_toast_message_prefers_server_words() {
        let err = ClientError::Api {
            status: 422,
            message: "keyword is required".to_string(),
        };
        assert_eq!(err.toast_message(), "keyword is required");

        let err = ClientError::Invalid("jumlah blog harus 1-10".to_string());
        assert_eq!(err.toast_message(), "invalid input: jumlah blog harus 1-10");
    }
}
