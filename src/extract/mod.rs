//! Resume PDF text extraction.
//!
//! Thin wrapper over the `pdf-extract` crate. The rest of the crate only
//! ever sees the resulting text string; extraction failures surface as
//! [`AtsError::Extraction`] before any prompt is built, and are never
//! retried at this layer.

use tracing::{debug, warn};

use crate::error::{AtsError, Result};

/// Extract the text content of a resume PDF.
///
/// Page texts are concatenated with newline separators by the parser. A PDF
/// that yields no text at all (an image-only scan, typically) is an
/// extraction failure, not an empty success.
pub fn resume_text_from_pdf(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!(error = %e, "PDF parser failed");
        AtsError::Extraction(format!("could not read the PDF: {e}"))
    })?;
    debug!(extracted_len = text.len(), "Extracted text from PDF");
    ensure_readable(text)
}

/// Reject extraction output that contains no readable text.
fn ensure_readable(text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(AtsError::Extraction(
            "no readable text found in the PDF; is it an image-only scan?".to_string(),
        ));
    }
    Ok(text)
}
