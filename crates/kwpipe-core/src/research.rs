//! Orchestration of one query run: synthesize, fetch, aggregate, rank.

use tracing::{debug, warn};

use crate::{rank, related, DocumentSource, RankedKeyword, RawDocument, ResearchOptions, ScoreTable};

/// Score and rank a finite document set against a query.
///
/// Pure and synchronous: no I/O, no shared state. The synthesized
/// query-derived terms are always scored alongside `documents`, so a
/// non-empty query yields a non-empty list even with zero documents. An
/// empty list is the "no keywords found" outcome, never a fault.
pub fn rank_documents(
    query: &str,
    documents: &[RawDocument],
    max_keywords: usize,
) -> Vec<RankedKeyword> {
    let mut table = ScoreTable::new();
    for doc in related::synthesize(query) {
        table.add_document(&doc);
    }
    for doc in documents {
        table.add_document(doc);
    }
    debug!(candidates = table.len(), documents = documents.len(), "aggregated score table");
    rank::rank(table, max_keywords)
}

/// Run the full pipeline for one query against an injected fetch
/// collaborator.
///
/// A collaborator failure is tolerated, not propagated: the run degrades to
/// ranking the synthesized terms only.
pub async fn research(
    query: &str,
    source: &dyn DocumentSource,
    opts: &ResearchOptions,
) -> Vec<RankedKeyword> {
    let documents = match source.fetch_documents(query, opts).await {
        Ok(docs) => {
            debug!(source = source.name(), count = docs.len(), "fetched documents");
            docs
        }
        Err(err) => {
            warn!(source = source.name(), %err, "document fetch failed; ranking synthesized terms only");
            Vec::new()
        }
    };
    rank_documents(query, &documents, opts.max_keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ImportanceTier, Result};

    struct FixedSource(Vec<RawDocument>);

    #[async_trait::async_trait]
    impl DocumentSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }
        async fn fetch_documents(
            &self,
            _query: &str,
            _opts: &ResearchOptions,
        ) -> Result<Vec<RawDocument>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl DocumentSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn fetch_documents(
            &self,
            _query: &str,
            _opts: &ResearchOptions,
        ) -> Result<Vec<RawDocument>> {
            Err(Error::Fetch("connection refused".to_string()))
        }
    }

    fn score_of<'a>(ranked: &'a [RankedKeyword], keyword: &str) -> Option<u64> {
        ranked.iter().find(|k| k.keyword == keyword).map(|k| k.score)
    }

    #[test]
    fn ranks_query_and_documents_together() {
        let docs = [
            RawDocument {
                text: "best coffee beans online".to_string(),
                tier: ImportanceTier::Important,
            },
            RawDocument {
                text: "buy coffee beans".to_string(),
                tier: ImportanceTier::Normal,
            },
        ];
        let ranked = rank_documents("coffee beans", &docs, rank::MAX_KEYWORDS);

        let coffee = score_of(&ranked, "coffee").expect("coffee ranked");
        let beans = score_of(&ranked, "beans").expect("beans ranked");
        let bigram = score_of(&ranked, "coffee beans").expect("bigram ranked");
        // The bigram weight multiplier keeps the phrase ahead of either
        // unigram even though all three occur in the same places.
        assert!(bigram > coffee, "bigram {bigram} <= unigram {coffee}");
        assert!(bigram > beans, "bigram {bigram} <= unigram {beans}");
    }

    #[test]
    fn empty_document_set_still_ranks_synthesized_terms() {
        let ranked = rank_documents("coffee beans", &[], rank::MAX_KEYWORDS);
        assert!(!ranked.is_empty());
        assert!(score_of(&ranked, "coffee beans").is_some());
        assert!(score_of(&ranked, "best coffee beans").is_some());
    }

    #[test]
    fn aggregation_is_document_order_independent() {
        let a = RawDocument::normal("buy coffee beans");
        let b = RawDocument::important("coffee grinder guide");
        let fwd = rank_documents("coffee", &[a.clone(), b.clone()], rank::MAX_KEYWORDS);
        let rev = rank_documents("coffee", &[b, a], rank::MAX_KEYWORDS);
        assert_eq!(fwd, rev);
    }

    #[tokio::test]
    async fn research_uses_fetched_documents() {
        let source = FixedSource(vec![RawDocument::normal(
            "espresso espresso espresso espresso espresso",
        )]);
        let ranked = research("coffee", &source, &ResearchOptions::default()).await;
        assert!(score_of(&ranked, "espresso").is_some());
    }

    #[tokio::test]
    async fn research_degrades_on_fetch_failure() {
        let ranked = research("coffee beans", &FailingSource, &ResearchOptions::default()).await;
        assert!(!ranked.is_empty());
        // Everything present derives from the synthesizer.
        assert!(score_of(&ranked, "coffee beans").is_some());
        assert!(score_of(&ranked, "espresso").is_none());
    }

    #[tokio::test]
    async fn research_respects_max_keywords() {
        let opts = ResearchOptions {
            max_keywords: 3,
            ..ResearchOptions::default()
        };
        let ranked = research("dark roast coffee beans", &FailingSource, &opts).await;
        assert!(ranked.len() <= 3);
    }
}
