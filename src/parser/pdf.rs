use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::parser::DocumentFormat;

/// Extract text from a PDF held in memory, page by page.
///
/// `pdf_extract` panics on some malformed inputs instead of returning an
/// error, so the call runs behind `catch_unwind`.
pub fn extract_text(content: &[u8]) -> Result<String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(content)
    }));

    let pages = match result {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(ExtractionError::failed(DocumentFormat::Pdf, e)),
        Err(_) => {
            return Err(ExtractionError::failed(
                DocumentFormat::Pdf,
                "malformed document (parser panicked)",
            ));
        }
    };

    debug!(pages = pages.len(), "pdf pages extracted");
    Ok(join_pages(pages))
}

/// Join page texts in order with a single space, skipping pages without text
fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    pages
        .into_iter()
        .enumerate()
        .filter_map(|(index, page)| {
            if page.trim().is_empty() {
                debug!(page = index + 1, "page has no extractable text, skipping");
                None
            } else {
                Some(page)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    /// Build an in-memory PDF with one page per entry; `None` is a page with
    /// no text operators at all.
    fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let operations = match page {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_join_pages_skips_empty() {
        let pages = vec![
            "First page".to_string(),
            String::new(),
            "  \n ".to_string(),
            "Last page".to_string(),
        ];
        assert_eq!(join_pages(pages), "First page Last page");
    }

    #[test]
    fn test_join_pages_all_empty() {
        assert_eq!(join_pages(vec![String::new(), "\n".to_string()]), "");
        assert_eq!(join_pages(Vec::new()), "");
    }

    #[test]
    fn test_extract_single_page() {
        let bytes = build_pdf(&[Some("Hello Rust")]);
        let text = extract_text(&bytes).unwrap();
        assert!(text.contains("Hello"));
        assert!(text.contains("Rust"));
    }

    #[test]
    fn test_extract_skips_page_without_text() {
        let bytes = build_pdf(&[Some("Alpha"), None, Some("Omega")]);
        let text = extract_text(&bytes).unwrap();

        let alpha = text.find("Alpha").expect("page 1 text");
        let omega = text.find("Omega").expect("page 3 text");
        assert!(alpha < omega);
        assert_eq!(crate::normalize::clean(&text), "Alpha Omega");
    }

    #[test]
    fn test_truncated_pdf_fails() {
        let bytes = build_pdf(&[Some("Hello")]);
        let truncated = &bytes[..16];
        let err = extract_text(truncated).unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed { .. }));
    }

    #[test]
    fn test_garbage_fails() {
        let err = extract_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ExtractionFailed {
                format: DocumentFormat::Pdf,
                ..
            }
        ));
    }
}
