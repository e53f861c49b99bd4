use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Every failure an API operation can surface. Each handler maps its own
/// failures into one of these before they cross the HTTP boundary; the
/// client renders the `error` string of the body directly.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authorized to access this route")]
    Unauthenticated,
    /// Non-author mutation attempt. Answered with 401, not 403, so the
    /// response is indistinguishable from a missing token.
    #[error("User not authorized")]
    Forbidden,
    /// Token verified but its subject no longer exists.
    #[error("User not found")]
    UserNotFound,
    #[error("Blog not found")]
    BlogNotFound,
    #[error("User already exists")]
    EmailTaken,
    /// Covers both unknown email and wrong password, so login failures do
    /// not leak account existence.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Store or other unexpected failure. The inner detail is logged at the
    /// point of failure and never serialized to clients.
    #[error("Server error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated | ApiError::Forbidden => StatusCode::UNAUTHORIZED,
            ApiError::UserNotFound | ApiError::BlogNotFound => StatusCode::NOT_FOUND,
            ApiError::EmailTaken | ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: message.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn forbidden_is_answered_with_401_like_unauthenticated() {
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn internal_detail_never_reaches_the_body() {
        let err = ApiError::Internal("connection refused at 10.0.0.3".into());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body()).await.expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["error"], "Server error");
    }

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(ApiError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BlogNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
