//! Error handling utilities for route handlers

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Errors a handler can answer with. Every variant renders as a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotConfigured(String),
    /// WordPress answered with something other than success; passed through as-is
    #[error("WordPress returned {status}")]
    Upstream { status: StatusCode, body: String },
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
    /// The remote post exists but the local record could not be updated
    #[error("post {post_id} created but not recorded: {detail}")]
    Unrecorded {
        post_id: i64,
        link: String,
        detail: String,
    },
}

impl ApiError {
    pub fn internal(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, json!({ "error": error })),
            ApiError::NotFound(error) => (StatusCode::NOT_FOUND, json!({ "error": error })),
            ApiError::NotConfigured(error) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": error }))
            }
            ApiError::Upstream { status, body } => {
                let details = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
                (
                    status,
                    json!({ "error": "Failed to create WordPress post", "details": details }),
                )
            }
            ApiError::Internal { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "message": detail }),
            ),
            ApiError::Unrecorded {
                post_id,
                link,
                detail,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Post was created on WordPress but its publish status could not be saved",
                    "message": detail,
                    "post_id": post_id,
                    "link": link,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Extension trait for logging errors and converting to an ApiError
pub trait LogErr<T> {
    /// Log error with context and return a 500 carrying the context
    fn log_500(self, context: &str) -> Result<T, ApiError>;
}

impl<T, E: std::fmt::Display> LogErr<T> for Result<T, E> {
    fn log_500(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|e| {
            tracing::error!(error = %e, "{}", context);
            ApiError::internal(context, e)
        })
    }
}

/// Response for panics caught by the top-level layer
pub fn panic_response(_: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    ApiError::internal("Internal server error", "unexpected failure").into_response()
}
