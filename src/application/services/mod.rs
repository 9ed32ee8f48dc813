mod analysis_service;
mod prompt_builder;
mod text_normalizer;

pub use analysis_service::{AnalysisError, AnalysisService};
pub use prompt_builder::{DEFAULT_REPLY_LANGUAGE, DEFAULT_SIGNATURE, PromptBuilder};
pub use text_normalizer::normalize_email_text;
