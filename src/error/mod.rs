// Error types for image-extractor
// Author: kelexine (https://github.com/kelexine)

use crate::server::page;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Unsupported image type: {0} (expected JPEG or PNG)")]
    UnsupportedMediaType(String),

    #[error("Uploaded image is empty")]
    EmptyImage,

    #[error("Image size {size} bytes exceeds maximum of {max} bytes")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Rate limited: {0}")]
    TooManyRequests(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// How an error is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Incomplete input; the user fixes it and submits again.
    Warning,
    /// Something failed; the message is shown as an error.
    Error,
}

impl ExtractorError {
    pub fn severity(&self) -> Severity {
        match self {
            ExtractorError::MissingInput(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// True for failures raised by the remote call (network, auth, quota, model).
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            ExtractorError::Authentication(_)
                | ExtractorError::GeminiApi(_)
                | ExtractorError::TooManyRequests(_)
                | ExtractorError::ServiceUnavailable(_)
                | ExtractorError::Http(_)
        )
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ExtractorError::MissingInput(_)
            | ExtractorError::UnsupportedMediaType(_)
            | ExtractorError::EmptyImage
            | ExtractorError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ExtractorError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ExtractorError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ExtractorError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ExtractorError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ExtractorError::GeminiApi(_) | ExtractorError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Errors that escape a handler are rendered as a bare HTML page
impl IntoResponse for ExtractorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Html(page::render_error_page(&self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;
