use serde::{Deserialize, Serialize};

pub mod ngram;
pub mod normalize;
pub mod rank;
pub mod related;
pub mod research;
pub mod score;
pub mod stopwords;

pub use rank::MAX_KEYWORDS;
pub use research::{rank_documents, research};
pub use score::ScoreTable;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Provenance of a document, driving the per-occurrence weight multipliers.
///
/// `Important` covers editorially curated or query-adjacent text ("people also
/// ask" questions, related-search terms, synthesized query variants);
/// `Normal` covers ordinary page-body prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceTier {
    Important,
    Normal,
}

/// One raw text fragment handed to the engine, tagged with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub text: String,
    pub tier: ImportanceTier,
}

impl RawDocument {
    pub fn important(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tier: ImportanceTier::Important,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tier: ImportanceTier::Normal,
        }
    }
}

/// One entry of the final ranked output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    pub score: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchOptions {
    /// Max result pages to fetch and mine for body text.
    pub max_sites: usize,
    /// Timeout per network operation (ms).
    pub timeout_ms: u64,
    /// Hard cap on bytes read per fetched body.
    pub max_bytes: u64,
    /// Cap on the ranked output length.
    pub max_keywords: usize,
}

impl Default for ResearchOptions {
    fn default() -> Self {
        Self {
            max_sites: 5,
            timeout_ms: 10_000,
            max_bytes: 2_000_000,
            max_keywords: rank::MAX_KEYWORDS,
        }
    }
}

/// External fetch collaborator: turns a query into raw documents.
///
/// Implementations own all I/O, retries and scraping assumptions; the engine
/// only ever sees plain text plus an importance tag. A failed fetch is
/// reported as an error and tolerated by the orchestrator, which degrades to
/// ranking synthesized terms only.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch_documents(
        &self,
        query: &str,
        opts: &ResearchOptions,
    ) -> Result<Vec<RawDocument>>;
}
