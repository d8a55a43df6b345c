//! Unified error handling for page and mutation handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::upstream::UpstreamError;

/// JSON body returned by mutation endpoints on failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: message.into(),
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rendered as a plain-text page, not JSON.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream answered with an error status; mirrored back to the caller.
    #[error("Upstream error {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// Upstream could not be reached or answered with garbage.
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, body } => Self::Upstream { status, body },
            other => Self::Unavailable(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new(msg)).into_response()
            }
            AppError::Upstream { status, body } => {
                tracing::warn!(status = status.as_u16(), body = %body, "Upstream rejected request");
                (status, ErrorBody::new(body)).into_response()
            }
            AppError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Upstream unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg)).into_response()
            }
            AppError::Template(e) => {
                tracing::error!(error = %e, "Template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Template rendering failed",
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upstream_status_is_mirrored() {
        let err = AppError::Upstream {
            status: StatusCode::NOT_FOUND,
            body: "Coupon not found".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Coupon not found");
    }

    #[tokio::test]
    async fn unavailable_is_500_with_message() {
        let response = AppError::Unavailable("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "connection refused");
    }

    #[tokio::test]
    async fn not_found_is_plain_text() {
        let response = AppError::NotFound("User not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"User not found");
    }

    #[test]
    fn upstream_status_error_converts() {
        let err: AppError = UpstreamError::Status {
            status: StatusCode::CONFLICT,
            body: "exists".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream { status, .. } if status == StatusCode::CONFLICT));
    }

    #[test]
    fn decode_error_converts_to_unavailable() {
        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        let err: AppError = UpstreamError::Decode(json_err).into();
        assert!(matches!(err, AppError::Unavailable(_)));
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("body must be a JSON object".to_string());
        assert_eq!(err.to_string(), "Validation error: body must be a JSON object");
    }
}
