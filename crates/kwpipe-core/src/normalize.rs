//! Deterministic text normalization for candidate extraction.
//!
//! This is intentionally lossy: the output is used only for matching and
//! scoring, never for display.

/// Normalize raw text into a clean lowercase token sequence.
///
/// Steps, in order: lowercase; drop URL-like pieces (`http(s)://…`, `www.…`);
/// drop markup-tag spans (`<…>`); treat anything that is not a letter, digit
/// or whitespace as a separator; collapse whitespace runs.
///
/// Re-normalizing the joined output is a no-op.
pub fn tokenize(text: &str) -> Vec<String> {
    scrub(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// The cleaned single-spaced form of `tokenize` (exposed for callers that
/// want the flat string, e.g. logging and tests).
pub fn scrub(text: &str) -> String {
    let lower = text.to_lowercase();
    let no_urls = strip_url_pieces(&lower);
    let no_tags = strip_tag_spans(&no_urls);

    // Strict separator policy: anything non-alphanumeric becomes a space.
    let mut out = String::with_capacity(no_tags.len());
    let mut last_space = true;
    for ch in no_tags.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Drop whitespace-delimited pieces that look like URLs.
fn strip_url_pieces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for piece in s.split_whitespace() {
        if piece.starts_with("http://") || piece.starts_with("https://") || piece.starts_with("www.")
        {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(piece);
    }
    out
}

/// Replace `<…>` spans with a space. An unterminated `<` is left as-is and
/// falls to the separator pass.
fn strip_tag_spans(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find('<') {
        out.push_str(&rest[..i]);
        match rest[i..].find('>') {
            Some(j) => {
                out.push(' ');
                rest = &rest[i + j + 1..];
            }
            None => {
                out.push_str(&rest[i..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
