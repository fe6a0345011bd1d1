use crate::error::{ExtractionError, Result};
use crate::parser::DocumentFormat;

/// Decode plain text as UTF-8. Invalid sequences are an error, never replaced.
pub fn extract_text(content: &[u8]) -> Result<String> {
    String::from_utf8(content.to_vec())
        .map_err(|e| ExtractionError::failed(DocumentFormat::Txt, e.utf8_error()))
}
