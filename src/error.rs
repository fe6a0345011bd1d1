use thiserror::Error;

use crate::parser::DocumentFormat;

/// Why a document produced no text.
///
/// Extraction is all-or-nothing: whenever one of these is returned the
/// caller gets no text at all, never a truncated string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Error extracting text from {format} document: {reason}")]
    ExtractionFailed {
        format: DocumentFormat,
        reason: String,
    },
}

impl ExtractionError {
    pub(crate) fn failed(format: DocumentFormat, reason: impl ToString) -> Self {
        ExtractionError::ExtractionFailed {
            format,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
