use super::document::{Document, DocumentFormat};

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_filename(&self.filename)
    }
}

/// Raw input of an `/analyze` call: a typed text field, an uploaded file, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub text: Option<String>,
    pub file: Option<UploadedFile>,
}

/// The single source a submission resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedInput {
    Text(String),
    File { document: Document, data: Vec<u8> },
}

impl Submission {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file: None,
        }
    }

    pub fn from_file(file: UploadedFile) -> Self {
        Self {
            text: None,
            file: Some(file),
        }
    }

    /// Picks the input to analyze.
    ///
    /// A non-empty file with an accepted extension wins over the text field.
    /// Any other file is ignored. Only the byte count decides whether a file is
    /// usable here: a `.txt` holding only whitespace still wins over the text
    /// field and is rejected as empty after extraction. Returns `None` when
    /// nothing usable is left.
    pub fn resolve(self) -> Option<ResolvedInput> {
        if let Some(file) = self.file {
            match file.format() {
                Some(format) if !file.data.is_empty() => {
                    let document =
                        Document::new(file.filename, format, file.data.len() as u64);
                    return Some(ResolvedInput::File {
                        document,
                        data: file.data,
                    });
                }
                _ => {
                    tracing::debug!(filename = %file.filename, "Ignoring unusable upload");
                }
            }
        }

        self.text
            .filter(|text| !text.trim().is_empty())
            .map(ResolvedInput::Text)
    }
}
