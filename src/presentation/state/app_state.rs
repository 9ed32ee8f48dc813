use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::AnalysisService;

pub struct AppState<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    pub analysis_service: Arc<AnalysisService<F, L>>,
    pub max_upload_bytes: usize,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
