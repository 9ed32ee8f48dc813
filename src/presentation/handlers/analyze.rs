use axum::Json;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::{AnalysisOutcome, Submission, UploadedFile};
use crate::presentation::state::AppState;

use super::error::ApiError;

pub const FILE_FIELD: &str = "email_file";
pub const TEXT_FIELD: &str = "email_text";

#[derive(Deserialize)]
pub struct AnalyzeJsonRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub category: String,
    pub suggested_response: String,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            category: outcome.category_label().to_string(),
            suggested_response: outcome.suggested_response().to_string(),
        }
    }
}

/// `POST /analyze` with either a JSON `{"text": ...}` body or a multipart form
/// carrying `email_file` and/or `email_text`.
#[tracing::instrument(skip(state, request))]
pub async fn analyze_handler<F, L>(
    State(state): State<AppState<F, L>>,
    request: Request,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let submission = match read_submission(request, state.max_upload_bytes).await {
        Ok(submission) => submission,
        Err(e) => return e.into_response(),
    };

    match state.analysis_service.analyze(submission).await {
        Ok(outcome) => {
            if outcome.is_degraded() {
                tracing::warn!(category = outcome.category_label(), "Returning degraded analysis");
            }
            (StatusCode::OK, Json(AnalyzeResponse::from(outcome))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

async fn read_submission(request: Request, max_bytes: usize) -> Result<Submission, ApiError> {
    let declared_length = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if declared_length.is_some_and(|len| len > max_bytes as u64) {
        return Err(ApiError::PayloadTooLarge { max_bytes });
    }

    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(ApiError::from_multipart_rejection)?;
        read_multipart(multipart, max_bytes).await
    } else {
        let Json(body) = Json::<AnalyzeJsonRequest>::from_request(request, &())
            .await
            .map_err(|rejection| ApiError::from_json_rejection(rejection, max_bytes))?;
        Ok(Submission {
            text: body.text,
            file: None,
        })
    }
}

async fn read_multipart(mut multipart: Multipart, max_bytes: usize) -> Result<Submission, ApiError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_multipart_error(e, max_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            FILE_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::from_multipart_error(e, max_bytes))?;

                tracing::debug!(filename = %filename, bytes = data.len(), "File field received");
                if !filename.is_empty() {
                    submission.file = Some(UploadedFile::new(filename, data.to_vec()));
                }
            }
            TEXT_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::from_multipart_error(e, max_bytes))?;
                submission.text = Some(text);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
            }
        }
    }

    Ok(submission)
}
