mod docx;
mod pdf;
mod text;

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::ExtractionError;

/// Formats the extractor knows how to read, keyed on file suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Resolve the format from a file name's lowercased suffix
    pub fn from_name(name: &str) -> crate::error::Result<Self> {
        let lowered = name.to_lowercase();
        let extension = lowered
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("");

        match extension {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            other => Err(ExtractionError::UnsupportedFormat {
                extension: if other.is_empty() {
                    "(none)".to_string()
                } else {
                    other.to_string()
                },
            }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Docx => write!(f, "DOCX"),
            DocumentFormat::Txt => write!(f, "TXT"),
        }
    }
}

/// A document handed to the extractor: its file name and raw bytes
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Read a document from disk, named after the path's file name
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .with_context(|| format!("Not a file path: {}", path.display()))?;

        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self::new(name, content))
    }

    pub fn extract(&self) -> crate::error::Result<String> {
        extract(&self.name, &self.content)
    }
}

/// Extract the raw text of a document, dispatching on its file suffix.
///
/// Unsupported suffixes fail before any bytes are inspected.
pub fn extract(name: &str, content: &[u8]) -> crate::error::Result<String> {
    let format = DocumentFormat::from_name(name)?;
    debug!(name, %format, bytes = content.len(), "extracting document");

    let text = match format {
        DocumentFormat::Pdf => pdf::extract_text(content)?,
        DocumentFormat::Docx => docx::extract_text(content)?,
        DocumentFormat::Txt => text::extract_text(content)?,
    };

    debug!(name, chars = text.chars().count(), "extraction finished");
    Ok(text)
}
