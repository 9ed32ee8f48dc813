use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::AnalysisError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures that reach the client as a non-2xx status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Provide the email text or upload a .txt or .pdf file.")]
    EmptyInput,
    #[error("Payload exceeds the maximum allowed size of {max_bytes} bytes.")]
    PayloadTooLarge { max_bytes: usize },
    #[error("Malformed request: {0}")]
    BadRequest(String),
    #[error("Failed to read uploaded file: {0}")]
    Extraction(String),
    #[error("An internal error occurred while processing the request.")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyInput | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Extraction(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn from_json_rejection(rejection: JsonRejection, max_bytes: usize) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge { max_bytes }
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }

    pub fn from_multipart_rejection(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }

    pub fn from_multipart_error(error: MultipartError, max_bytes: usize) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge { max_bytes }
        } else {
            ApiError::BadRequest(error.body_text())
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::EmptyInput => ApiError::EmptyInput,
            AnalysisError::Extraction(source) => ApiError::Extraction(source.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
