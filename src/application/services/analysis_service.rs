use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError, LlmClient, LlmClientError};
use crate::domain::{AnalysisOutcome, PipelineStage, ResolvedInput, Sentinel, Submission};
use crate::infrastructure::observability::preview_for_log;

use super::prompt_builder::PromptBuilder;
use super::text_normalizer::normalize_email_text;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no email content was provided")]
    EmptyInput,
    #[error("failed to read uploaded file: {0}")]
    Extraction(#[source] FileLoaderError),
}

/// Runs one submission through extraction, normalization and classification.
pub struct AnalysisService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    file_loader: Arc<F>,
    llm_client: Arc<L>,
    prompt_builder: PromptBuilder,
}

impl<F, L> AnalysisService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    pub fn new(file_loader: Arc<F>, llm_client: Arc<L>, prompt_builder: PromptBuilder) -> Self {
        Self {
            file_loader,
            llm_client,
            prompt_builder,
        }
    }

    pub fn llm_configured(&self) -> bool {
        self.llm_client.is_configured()
    }

    /// Only input problems surface as errors; a failed classification comes back
    /// as [`AnalysisOutcome::Degraded`].
    #[tracing::instrument(skip_all)]
    pub async fn analyze(&self, submission: Submission) -> Result<AnalysisOutcome, AnalysisError> {
        tracing::debug!(stage = %PipelineStage::ReceivingInput, "Resolving submission");
        let input = submission.resolve().ok_or(AnalysisError::EmptyInput)?;

        let raw_text = match input {
            ResolvedInput::Text(text) => text,
            ResolvedInput::File { document, data } => {
                tracing::debug!(
                    stage = %PipelineStage::Extracting,
                    filename = %document.filename,
                    format = %document.format,
                    size_bytes = document.size_bytes,
                    "Extracting uploaded file"
                );
                self.file_loader
                    .extract_text(&data, &document)
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, filename = %document.filename, "Extraction failed");
                        AnalysisError::Extraction(e)
                    })?
            }
        };

        if raw_text.trim().is_empty() {
            tracing::warn!("Submission resolved to blank text");
            return Err(AnalysisError::EmptyInput);
        }

        tracing::debug!(stage = %PipelineStage::Normalizing, chars = raw_text.chars().count());
        let normalized = normalize_email_text(&raw_text);

        tracing::debug!(
            stage = %PipelineStage::Classifying,
            preview = %preview_for_log(&normalized),
            "Classifying email"
        );
        let prompt = self.prompt_builder.build(&normalized);

        let outcome = match self.llm_client.classify(&prompt).await {
            Ok(classification) => {
                tracing::info!(category = %classification.category, "Email classified");
                AnalysisOutcome::Classified(classification)
            }
            Err(e) => {
                tracing::error!(error = %e, "Classification failed");
                degrade(&e)
            }
        };

        tracing::debug!(stage = %PipelineStage::Done, category = outcome.category_label());
        Ok(outcome)
    }
}

fn degrade(error: &LlmClientError) -> AnalysisOutcome {
    match error {
        LlmClientError::ClientUninitialized => AnalysisOutcome::degraded(
            Sentinel::Error,
            "The classification service is not configured. Check the provider API key.",
        ),
        LlmClientError::RateLimited => AnalysisOutcome::degraded(
            Sentinel::ServiceError,
            "The classification service is receiving too many requests. Please try again in a few moments.",
        ),
        LlmClientError::ProviderError(_) | LlmClientError::Unreachable(_) => {
            AnalysisOutcome::degraded(
                Sentinel::ServiceError,
                "There was a problem communicating with the classification service. Please try again.",
            )
        }
        LlmClientError::SchemaInvalid(_) => AnalysisOutcome::degraded(
            Sentinel::UnexpectedError,
            "The classification service returned an answer in an unexpected format. Please try again.",
        ),
    }
}
