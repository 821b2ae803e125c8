//! Main-content extraction from an HTML page.

use std::io::Cursor;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;

use crate::errors::RagError;

lazy_static! {
    static ref TITLE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Readable part of a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageText {
    pub title: Option<String>,
    pub text: String,
}

/// Runs readability over `html` and returns the article text.
///
/// Scripts, styles and boilerplate are dropped by the extractor; the text is
/// then normalized to single spaces inside lines and at most one blank line
/// between paragraphs. The title comes from readability, falling back to the
/// `<title>` element.
///
/// # Errors
/// `RagError::Extract` if the document cannot be parsed.
pub fn extract_page_text(html: &str, url: &Url) -> Result<PageText, RagError> {
    let mut cursor = Cursor::new(html.as_bytes());
    let product = readability::extractor::extract(&mut cursor, url)
        .map_err(|e| RagError::Extract(format!("{url}: {e}")))?;

    let title = Some(product.title.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| extract_title(html));

    Ok(PageText {
        title,
        text: normalize_whitespace(&product.text),
    })
}

/// `<title>` content, if any.
pub fn extract_title(html: &str) -> Option<String> {
    let caps = TITLE.captures(html)?;
    let raw = ANY_TAG.replace_all(&caps[1], "");
    let title = normalize_whitespace(&raw.replace("&amp;", "&"));
    (!title.is_empty()).then_some(title)
}

/// Collapses blanks inside lines and runs of empty lines.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_break = false;
    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            pending_break = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push_str(if pending_break { "\n\n" } else { "\n" });
        }
        out.push_str(&line);
        pending_break = false;
    }
    out
}
