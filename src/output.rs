use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::normalize::TextStats;

/// Cleaned text of one document with the figures shown alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub source: String,
    pub download_name: String,
    pub characters: usize,
    pub words: usize,
    pub text: String,
}

impl ExtractionReport {
    pub fn new(source: &str, download_name: String, cleaned: String) -> Self {
        let stats = TextStats::of(&cleaned);
        Self {
            source: source.to_string(),
            download_name,
            characters: stats.characters,
            words: stats.words,
            text: cleaned,
        }
    }
}

/// Name of the downloadable file for an uploaded document: the prefix, the
/// file name up to its first dot, then `.txt`.
pub fn download_name(original: &str, prefix: &str) -> String {
    let stem = original.split('.').next().unwrap_or_default();
    format!("{}{}.txt", prefix, stem)
}

/// Write cleaned text as a plain UTF-8 text file
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, text).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Write the report as pretty JSON
pub fn write_json(report: &ExtractionReport, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).context("Failed to write JSON")?;

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// First `max_chars` characters of `text`, cut on a character boundary
pub fn truncate_preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Render a standalone HTML page previewing the cleaned text
pub fn render_preview_html(report: &ExtractionReport, max_chars: usize) -> String {
    let preview = truncate_preview(&report.text, max_chars);
    let truncated_note = if preview.len() < report.text.len() {
        format!(
            r#"<p class="note">Showing the first {} of {} characters. The download holds the full text.</p>"#,
            max_chars, report.characters
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>SkillGap - {title}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #F4F7FB; color: #102A43; margin: 0; padding: 32px; }}
        .header {{ background: linear-gradient(90deg, #102A43, #243B53, #486581); padding: 25px; border-radius: 16px; color: white; margin-bottom: 32px; }}
        .header h1 {{ margin: 0 0 4px; font-size: 1.4em; }}
        .card {{ background: rgba(255, 255, 255, 0.85); padding: 22px; border-radius: 18px; box-shadow: 0 8px 18px rgba(0,0,0,0.06); }}
        .success {{ color: #1F7A4D; font-weight: 600; }}
        pre {{ white-space: pre-wrap; word-wrap: break-word; border-radius: 14px; padding: 12px; background: #FFFFFF; border: 1px solid #D9E2EC; max-height: 480px; overflow-y: auto; }}
        .caption {{ color: #6B7280; font-size: 0.9em; }}
        .note {{ color: #B7791F; font-size: 0.85em; }}
    </style>
</head>
<body>
    <div class="header">
        <h1>SkillGap - Extracted &amp; Cleaned Text</h1>
        <p>Extract &bull; Clean &bull; Download</p>
    </div>
    <div class="card">
        <p class="success">File parsed successfully: {title}</p>
        <pre>{preview}</pre>
        {truncated_note}
        <p class="caption">Characters: {characters} &bull; Words: {words}</p>
        <p class="caption">Download file: {download}</p>
    </div>
</body>
</html>
"#,
        title = escape_html(&report.source),
        preview = escape_html(preview),
        truncated_note = truncated_note,
        characters = report.characters,
        words = report.words,
        download = escape_html(&report.download_name),
    )
}

/// Escape special characters for HTML text content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
