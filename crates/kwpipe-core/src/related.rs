//! Query-derived term synthesis.
//!
//! Runs unconditionally at the start of every query and is the sole signal
//! when the fetch collaborator returns nothing: a non-empty query always
//! yields at least one important-tier document.

use crate::RawDocument;

/// Intent prefixes applied to the query verbatim.
const INTENT_TEMPLATES: [&str; 5] = ["how to", "what is", "best", "top", "guide to"];

/// Synthesize important-tier documents from the raw query: the query itself,
/// each intent-template prefix, and every cyclic word-order rotation (as
/// alternate phrasings; a single-word query has none).
pub fn synthesize(query: &str) -> Vec<RawDocument> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(1 + INTENT_TEMPLATES.len());
    out.push(RawDocument::important(query));

    for prefix in INTENT_TEMPLATES {
        out.push(RawDocument::important(format!("{prefix} {query}")));
    }

    let words: Vec<&str> = query.split_whitespace().collect();
    for i in 1..words.len() {
        let mut rotated = words[i..].to_vec();
        rotated.extend_from_slice(&words[..i]);
        out.push(RawDocument::important(rotated.join(" ")));
    }

    out
}
