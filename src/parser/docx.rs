//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive of WordprocessingML parts. The body lives in
//! `word/document.xml`; page headers and footers live in `word/headerN.xml`
//! and `word/footerN.xml`. Parts are read headers first, then the body, then
//! footers. Text runs (`w:t`) are collected per paragraph (`w:p`), and
//! paragraphs are joined with blank lines.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read, Seek};
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::parser::DocumentFormat;

const DOCUMENT_XML: &str = "word/document.xml";

/// Extract the paragraph text of a DOCX document held in memory
pub fn extract_text(content: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;

    let mut paragraphs = Vec::new();
    for part in text_parts(archive.file_names()) {
        let xml = read_part(&mut archive, &part)?;
        let found = parse_paragraphs(&xml)?;
        debug!(part = %part, paragraphs = found.len(), "docx part parsed");
        paragraphs.extend(found);
    }

    Ok(paragraphs.join("\n\n"))
}

/// Parts holding document text, in reading order: headers, body, footers.
///
/// The body is always listed so a missing `word/document.xml` is reported.
fn text_parts<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers = Vec::new();
    let mut footers = Vec::new();
    for name in names {
        if is_numbered_part(name, "word/header") {
            headers.push(name.to_string());
        } else if is_numbered_part(name, "word/footer") {
            footers.push(name.to_string());
        }
    }
    // header2.xml before header10.xml
    headers.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    footers.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let mut parts = headers;
    parts.push(DOCUMENT_XML.to_string());
    parts.extend(footers);
    parts
}

fn is_numbered_part(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".xml"))
        .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_digit()))
}

fn read_part<R: Read + Seek>(archive: &mut zip::ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name).map_err(|e| {
        ExtractionError::failed(DocumentFormat::Docx, format!("cannot read {name}: {e}"))
    })?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;

    Ok(xml)
}

/// Collect paragraph texts in document order.
///
/// Paragraphs can nest (text boxes inside `w:txbxContent` sit within an outer
/// paragraph). Every paragraph boundary flushes the text gathered so far, so
/// an outer paragraph is split around its text box instead of losing text.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:p" => flush_paragraph(&mut current, &mut paragraphs),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => flush_paragraph(&mut current, &mut paragraphs),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::failed(
                    DocumentFormat::Docx,
                    format!("XML error at position {}: {e}", reader.buffer_position()),
                ));
            }
            _ => {}
        }
    }
    flush_paragraph(&mut current, &mut paragraphs);

    Ok(paragraphs)
}

fn flush_paragraph(current: &mut String, paragraphs: &mut Vec<String>) {
    if current.trim().is_empty() {
        current.clear();
    } else {
        paragraphs.push(std::mem::take(current));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    /// Package a `word/document.xml` body into a minimal DOCX archive
    pub(crate) fn build_docx(body: &str) -> Vec<u8> {
        build_docx_parts(body, &[])
    }

    /// Like `build_docx`, plus extra parts given as (zip name, root element, inner xml)
    fn build_docx_parts(body: &str, extra: &[(&str, &str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, root, inner) in extra {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            let xml = format!(
                r#"<?xml version="1.0"?><w:{root} xmlns:w="{W_NS}">{inner}</w:{root}>"#
            );
            writer.write_all(xml.as_bytes()).unwrap();
        }

        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>{body}</w:body></w:document>"#
        );
        writer
            .start_file(DOCUMENT_XML, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    #[test]
    fn test_text_box_keeps_outer_paragraph_text() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:pict></w:r><w:r><w:t>Tail</w:t></w:r></w:p></w:body></w:document>"#;

        let paragraphs = parse_paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["Jane Doe", "Boxed", "Tail"]);
    }

    #[test]
    fn test_headers_and_footers_are_included_in_order() {
        let bytes = build_docx_parts(
            &para("Experience"),
            &[
                ("word/footer1.xml", "ftr", para("Page footer").as_str()),
                ("word/header1.xml", "hdr", para("jane@example.com").as_str()),
                ("word/styles.xml", "styles", para("not text").as_str()),
            ],
        );

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "jane@example.com\n\nExperience\n\nPage footer");
    }

    #[test]
    fn test_text_parts_order() {
        let names = [
            "word/footer1.xml",
            "word/header10.xml",
            "word/document.xml",
            "word/header2.xml",
            "word/headerstyles.xml",
            "word/_rels/header2.xml.rels",
        ];
        assert_eq!(
            text_parts(names.into_iter()),
            vec![
                "word/header2.xml",
                "word/header10.xml",
                "word/document.xml",
                "word/footer1.xml",
            ]
        );
    }

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<?xml version="1.0"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p>
                    <w:r>
                        <w:t>Hello World</w:t>
                    </w:r>
                </w:p>
                <w:p>
                    <w:r>
                        <w:t>Second paragraph</w:t>
                    </w:r>
                </w:p>
            </w:body>
        </w:document>"#;

        let paragraphs = parse_paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["Hello World", "Second paragraph"]);
    }

    #[test]
    fn test_runs_are_concatenated_within_paragraph() {
        let bytes = build_docx(
            r#"<w:p><w:r><w:t>Rust</w:t></w:r><w:r><w:t xml:space="preserve"> &amp; Go</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_text(&bytes).unwrap(), "Rust & Go");
    }

    #[test]
    fn test_tabs_and_breaks_become_whitespace() {
        let bytes = build_docx(
            r#"<w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Rust</w:t><w:br/><w:t>SQL</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_text(&bytes).unwrap(), "Skills\tRust\nSQL");
    }

    #[test]
    fn test_empty_paragraphs_are_dropped() {
        let bytes = build_docx(
            r#"<w:p><w:r><w:t>One</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Two</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_text(&bytes).unwrap(), "One\n\nTwo");
    }

    #[test]
    fn test_missing_document_xml() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_text(&bytes).unwrap_err();
        match err {
            ExtractionError::ExtractionFailed { reason, .. } => {
                assert!(reason.contains(DOCUMENT_XML));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_a_zip() {
        let err = extract_text(b"plain bytes").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ExtractionFailed {
                format: DocumentFormat::Docx,
                ..
            }
        ));
    }
}
