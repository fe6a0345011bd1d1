use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// Tabs, newlines, carriage returns, form feeds and Unicode spaces all count
/// as whitespace. The result never holds two whitespace characters in a row,
/// and cleaning cleaned text is a no-op.
pub fn clean(text: &str) -> String {
    let collapsed = WHITESPACE_RUN_RE.replace_all(text, " ");
    collapsed
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}

/// Character and word counts shown next to cleaned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
}

impl TextStats {
    pub fn of(cleaned: &str) -> Self {
        Self {
            characters: cleaned.chars().count(),
            words: cleaned.split_whitespace().count(),
        }
    }
}
