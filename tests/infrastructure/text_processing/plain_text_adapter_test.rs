use email_triage::application::ports::{FileLoader, FileLoaderError};
use email_triage::domain::{Document, DocumentFormat};
use email_triage::infrastructure::text_processing::PlainTextAdapter;

#[tokio::test]
async fn given_valid_utf8_bytes_when_extracting_then_returns_string() {
    let adapter = PlainTextAdapter;
    let text_bytes = "Olá, preciso de acesso ao sistema.".as_bytes();
    let document = Document::new(
        "email.txt".to_string(),
        DocumentFormat::Text,
        text_bytes.len() as u64,
    );

    let result = adapter.extract_text(text_bytes, &document).await;

    assert_eq!(result.unwrap(), "Olá, preciso de acesso ao sistema.");
}

#[tokio::test]
async fn given_invalid_utf8_bytes_when_extracting_then_returns_extraction_failed() {
    let adapter = PlainTextAdapter;
    let invalid_bytes: &[u8] = &[0xFF, 0xFE, 0xFD];
    let document = Document::new(
        "broken.txt".to_string(),
        DocumentFormat::Text,
        invalid_bytes.len() as u64,
    );

    let result = adapter.extract_text(invalid_bytes, &document).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_pdf_document_when_extracting_then_returns_unsupported() {
    let adapter = PlainTextAdapter;
    let data = b"some data";
    let document = Document::new("file.pdf".to_string(), DocumentFormat::Pdf, data.len() as u64);

    let result = adapter.extract_text(data, &document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedFormat(_))));
}
