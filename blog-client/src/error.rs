use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// A non-2xx answer from the server, carrying the server's own error
    /// message so callers can surface it verbatim.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    #[error("not logged in")]
    NotLoggedIn,
    #[error("token store: {0}")]
    TokenStore(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl BlogApiError {
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        BlogApiError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_carries_the_server_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Blog not found"}"#).expect("parse");
        assert_eq!(body.error, "Blog not found");
    }

    #[test]
    fn api_error_displays_the_message_only() {
        let err = BlogApiError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Blog not found".into(),
        };
        assert_eq!(err.to_string(), "Blog not found");
    }
}
