//! Turns uploaded CV bytes into plain text.
//!
//! PDFs go through a two-tier chain: the embedded text layer first, then OCR of
//! rasterized pages when the text layer is missing or unusable. DOCX files are
//! read paragraph by paragraph. Everything in here is blocking; async callers
//! run it on `tokio::task::spawn_blocking`.

pub mod docx;
pub mod ocr;
pub mod pdf;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use ocr::{PageRecognizer, TesseractCli};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file type '{0}'. Only .pdf and .docx are accepted")]
    UnsupportedFormat(String),

    #[error("No text could be extracted from the document")]
    EmptyDocument,

    #[error("OCR engine unavailable: {0}")]
    ParserEngineMissing(String),

    #[error("Document could not be read: {0}")]
    DocumentCorrupt(String),

    #[error("I/O error while parsing: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Picks the format from the file name's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ParseError> {
        let ext = extension(filename);
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(ParseError::UnsupportedFormat(ext)),
        }
    }
}

/// Lower-cased extension without the dot, or an empty string.
pub fn extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// Format-dispatching parser. Cheap to clone.
#[derive(Clone)]
pub struct DocumentParser {
    recognizer: Arc<dyn PageRecognizer>,
}

impl DocumentParser {
    pub fn new(recognizer: Arc<dyn PageRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Extracts trimmed, non-empty text from `bytes`.
    ///
    /// The format is chosen from `filename` alone; content sniffing is not attempted.
    pub fn parse(&self, bytes: &[u8], filename: &str) -> Result<String, ParseError> {
        let format = DocumentFormat::from_filename(filename)?;
        if bytes.is_empty() {
            return Err(ParseError::EmptyDocument);
        }

        let text = match format {
            DocumentFormat::Pdf => pdf::extract_text(bytes, self.recognizer.as_ref())?,
            DocumentFormat::Docx => docx::extract_text(bytes)?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyDocument);
        }

        info!(
            filename,
            format = ?format,
            chars = text.chars().count(),
            "Document parsed"
        );
        Ok(text.to_string())
    }
}
