//! Weighted aggregation of candidate occurrences into one score table.

use std::collections::HashMap;

use crate::ngram::candidates;
use crate::normalize::tokenize;
use crate::{ImportanceTier, RawDocument};

/// Weight of one occurrence.
///
/// Longer windows are rarer per document but carry more intent signal, so
/// each occurrence counts more; important-tier sources get a +1 bump.
///
/// | order | normal | important |
/// |-------|--------|-----------|
/// | 1     | 1      | 2         |
/// | 2     | 2      | 3         |
/// | 3     | 3      | 4         |
pub fn weight(order: usize, tier: ImportanceTier) -> u64 {
    let base = order as u64;
    match tier {
        ImportanceTier::Important => base + 1,
        ImportanceTier::Normal => base,
    }
}

/// Accumulated candidate scores for one query run.
///
/// Owned by the caller and threaded through the pipeline; there is no
/// process-wide keyword state, so concurrent runs cannot contaminate each
/// other. Accumulation is plain addition: commutative and associative, so
/// documents can be added in any order and partial tables can be `merge`d
/// in any order with identical results.
#[derive(Debug, Default, Clone)]
pub struct ScoreTable {
    scores: HashMap<String, u64>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize one document, generate its candidate windows and add their
    /// weighted occurrences.
    pub fn add_document(&mut self, doc: &RawDocument) {
        let tokens = tokenize(&doc.text);
        for occ in candidates(&tokens) {
            *self.scores.entry(occ.phrase).or_insert(0) += weight(occ.order, doc.tier);
        }
    }

    /// Fold another table into this one.
    pub fn merge(&mut self, other: ScoreTable) {
        for (phrase, score) in other.scores {
            *self.scores.entry(phrase).or_insert(0) += score;
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn score_of(&self, phrase: &str) -> Option<u64> {
        self.scores.get(phrase).copied()
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (String, u64)> {
        self.scores.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_table_matches_policy() {
        use ImportanceTier::{Important, Normal};
        assert_eq!(weight(1, Normal), 1);
        assert_eq!(weight(2, Normal), 2);
        assert_eq!(weight(3, Normal), 3);
        assert_eq!(weight(1, Important), 2);
        assert_eq!(weight(2, Important), 3);
        assert_eq!(weight(3, Important), 4);
    }

    #[test]
    fn accumulates_weighted_occurrences() {
        let mut t = ScoreTable::new();
        t.add_document(&RawDocument::normal("buy coffee beans"));
        // buy/coffee/beans unigrams at weight 1; two bigrams and one trigram.
        assert_eq!(t.score_of("coffee"), Some(1));
        assert_eq!(t.score_of("coffee beans"), Some(2));
        assert_eq!(t.score_of("buy coffee beans"), Some(3));

        t.add_document(&RawDocument::important("coffee beans"));
        assert_eq!(t.score_of("coffee"), Some(3));
        assert_eq!(t.score_of("coffee beans"), Some(5));
    }

    #[test]
    fn document_order_does_not_matter() {
        let docs = [
            RawDocument::important("best coffee beans online"),
            RawDocument::normal("buy coffee beans"),
            RawDocument::normal("coffee grinder guide"),
        ];

        let mut fwd = ScoreTable::new();
        for d in docs.iter() {
            fwd.add_document(d);
        }
        let mut rev = ScoreTable::new();
        for d in docs.iter().rev() {
            rev.add_document(d);
        }

        assert_eq!(fwd.len(), rev.len());
        let entries: Vec<_> = fwd.clone().into_entries().collect();
        for (phrase, score) in entries {
            assert_eq!(rev.score_of(&phrase), Some(score), "phrase {phrase:?}");
        }
    }

    #[test]
    fn merge_equals_sequential_aggregation() {
        let a = RawDocument::important("best coffee beans online");
        let b = RawDocument::normal("buy coffee beans");

        let mut sequential = ScoreTable::new();
        sequential.add_document(&a);
        sequential.add_document(&b);

        let mut left = ScoreTable::new();
        left.add_document(&a);
        let mut right = ScoreTable::new();
        right.add_document(&b);
        left.merge(right);

        assert_eq!(left.len(), sequential.len());
        for (phrase, score) in sequential.into_entries() {
            assert_eq!(left.score_of(&phrase), Some(score), "phrase {phrase:?}");
        }
    }

    #[test]
    fn empty_document_contributes_nothing() {
        let mut t = ScoreTable::new();
        t.add_document(&RawDocument::normal(""));
        t.add_document(&RawDocument::important("  <div> !!! </div> "));
        assert!(t.is_empty());
    }
}
