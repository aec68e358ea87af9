//! HTML to readable text.
//!
//! Intentionally "good enough" and deterministic, not a full readability
//! engine: strip script/style blocks, prefer the largest low-link-density
//! container, fall back to converting the whole document.

use std::io::Cursor;

/// Text width passed to the HTML renderer.
pub const DEFAULT_WIDTH: usize = 100;

/// Containers this many text chars or larger qualify for the main-content
/// pick; smaller pages fall back to whole-document conversion.
const MAIN_MIN_TEXT_CHARS: usize = 200;

/// Convert an HTML fragment to plain text.
pub fn html_to_text(html: &str, width: usize) -> String {
    // html2text expects bytes; Cursor avoids allocating a second large buffer.
    html2text::from_read(Cursor::new(html.as_bytes()), width).unwrap_or_else(|_| html.to_string())
}

/// Readable body text of a page: script/style stripped, main-content picked
/// when one stands out. Returns an empty string for markup with no text.
pub fn readable_text(html: &str, width: usize) -> String {
    let cleaned = strip_tag_blocks(&strip_tag_blocks(html, "script"), "style");
    let text = match pick_main_html(&cleaned) {
        Some(main) => html_to_text(&main, width),
        None => html_to_text(&cleaned, width),
    };
    if text.chars().any(|c| !c.is_whitespace()) {
        text
    } else {
        String::new()
    }
}

pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    let ct = content_type.unwrap_or("").trim().to_ascii_lowercase();
    // Absent content-type: assume HTML rather than drop the page.
    ct.is_empty() || ct.starts_with("text/html") || ct.starts_with("application/xhtml")
}

/// Inner HTML of the largest container whose text is not dominated by link
/// anchors (navigation, footers, related-article rails).
fn pick_main_html(html: &str) -> Option<String> {
    let doc = html_scraper::Html::parse_document(html);
    let candidates = html_scraper::Selector::parse("main, article, div").ok()?;
    let anchors = html_scraper::Selector::parse("a").ok()?;

    let mut best: Option<(usize, String)> = None;
    for el in doc.select(&candidates) {
        let text_chars: usize = el.text().map(|t| t.trim().chars().count()).sum();
        if text_chars < MAIN_MIN_TEXT_CHARS {
            continue;
        }
        let link_chars: usize = el
            .select(&anchors)
            .flat_map(|a| a.text())
            .map(|t| t.trim().chars().count())
            .sum();
        if link_chars * 2 >= text_chars {
            continue;
        }
        if best.as_ref().map(|(n, _)| text_chars > *n).unwrap_or(true) {
            best = Some((text_chars, el.html()));
        }
    }
    best.map(|(_, html)| html)
}

/// Remove `<tag …>…</tag>` blocks, case-insensitively. An unterminated block
/// is dropped through end of input.
fn strip_tag_blocks(html: &str, tag: &str) -> String {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    // ASCII-lowercased copy keeps byte offsets aligned with the original.
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;
    while let Some(i) = lower[pos..].find(&open) {
        let start = pos + i;
        out.push_str(&html[pos..start]);
        match lower[start..].find(&close) {
            Some(j) => pos = start + j + close.len(),
            None => {
                pos = html.len();
                break;
            }
        }
    }
    out.push_str(&html[pos..]);
    out
}
