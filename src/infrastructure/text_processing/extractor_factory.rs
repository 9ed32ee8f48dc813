use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::FileLoader;
use crate::domain::DocumentFormat;
use crate::presentation::config::ExtractionSettings;

use super::composite_file_loader::CompositeFileLoader;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;

pub struct ExtractorFactory;

impl ExtractorFactory {
    pub fn create(settings: &ExtractionSettings) -> CompositeFileLoader {
        let mut adapters: Vec<(DocumentFormat, Arc<dyn FileLoader>)> =
            vec![(DocumentFormat::Text, Arc::new(PlainTextAdapter))];

        if settings.pdf_enabled {
            let timeout = Duration::from_secs(settings.pdf_timeout_secs);
            adapters.push((DocumentFormat::Pdf, Arc::new(PdfAdapter::new(timeout))));
        } else {
            tracing::warn!("PDF extraction disabled, PDF uploads will be rejected");
        }

        CompositeFileLoader::new(adapters)
    }
}
