use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Failure modes of a contact submission. Each maps to a status code and a
/// `{ success: false, error }` body.
#[derive(thiserror::Error, Debug)]
pub enum ContactError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid request body")]
    InvalidBody,

    /// Anything unexpected. The detail is logged, never returned.
    #[error("Failed to process your message. Please try again.")]
    Internal(String),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidEmail | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(detail) => tracing::error!(%detail, "contact form error"),
            other => tracing::debug!(error = %other, "contact form rejected"),
        }
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
