mod analysis_outcome;
mod category;
mod classification;
mod document;
mod pipeline_stage;
mod prompt;
mod sentinel;
mod submission;

pub use analysis_outcome::AnalysisOutcome;
pub use category::Category;
pub use classification::Classification;
pub use document::{Document, DocumentFormat};
pub use pipeline_stage::PipelineStage;
pub use prompt::Prompt;
pub use sentinel::Sentinel;
pub use submission::{ResolvedInput, Submission, UploadedFile};
