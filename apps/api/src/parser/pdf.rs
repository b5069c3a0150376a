use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, info_span, warn};

use super::{PageRecognizer, ParseError};

/// Text layer first, OCR second.
///
/// OCR runs when the text layer is absent, whitespace-only, or the extractor
/// fails on the input. OCR errors are not swallowed.
pub fn extract_text(bytes: &[u8], recognizer: &dyn PageRecognizer) -> Result<String, ParseError> {
    let _span = info_span!("parser.pdf", bytes = bytes.len()).entered();

    if let Some(text) = extract_text_layer(bytes) {
        debug!(chars = text.len(), "Using embedded text layer");
        return Ok(text);
    }

    let _ocr = info_span!("parser.ocr_fallback").entered();
    info!("No usable text layer, falling back to OCR");
    let pages = recognizer.recognize_pages(bytes)?;
    info!(pages = pages.len(), "OCR finished");
    Ok(join_pages(pages))
}

/// `None` when the extractor errors, panics, or yields only whitespace.
fn extract_text_layer(bytes: &[u8]) -> Option<String> {
    // pdf-extract panics on some malformed inputs
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    let pages = match result {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            debug!("Text layer extraction failed: {e}");
            return None;
        }
        Err(_) => {
            warn!("Text layer extractor panicked, treating document as having no text layer");
            return None;
        }
    };

    let text = join_pages(pages);
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
