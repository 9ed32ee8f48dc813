mod analyze;
mod error;
mod health;

pub use analyze::{AnalyzeJsonRequest, AnalyzeResponse, FILE_FIELD, TEXT_FIELD, analyze_handler};
pub use error::{ApiError, ErrorResponse};
pub use health::health_handler;
