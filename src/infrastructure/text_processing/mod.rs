mod composite_file_loader;
mod extractor_factory;
mod pdf_adapter;
mod plain_text_adapter;

pub use composite_file_loader::CompositeFileLoader;
pub use extractor_factory::ExtractorFactory;
pub use pdf_adapter::{DEFAULT_EXTRACTION_TIMEOUT, PdfAdapter};
pub use plain_text_adapter::PlainTextAdapter;
