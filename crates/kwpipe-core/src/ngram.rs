//! Candidate phrase generation: contiguous 1–3-token windows.

use crate::stopwords::is_stop_word;

/// Shortest unigram (in chars) worth scoring. Bigrams/trigrams are screened
/// only for stop words, so multi-word phrases built from short content words
/// still qualify.
const MIN_UNIGRAM_CHARS: usize = 3;

/// One accepted candidate occurrence: the space-joined phrase plus the
/// window length that produced it (1, 2 or 3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub phrase: String,
    pub order: usize,
}

/// Every accepted window of order 1..=3 over `tokens`, in document order.
///
/// A unigram is accepted when its token is not a stop word and is at least
/// three chars long; a bigram/trigram is accepted when none of its tokens is
/// a stop word.
pub fn candidates(tokens: &[String]) -> Vec<Occurrence> {
    let mut out = Vec::new();

    for tok in tokens {
        if !is_stop_word(tok) && tok.chars().count() >= MIN_UNIGRAM_CHARS {
            out.push(Occurrence {
                phrase: tok.clone(),
                order: 1,
            });
        }
    }

    for order in 2..=3usize {
        for window in tokens.windows(order) {
            if window.iter().any(|t| is_stop_word(t)) {
                continue;
            }
            out.push(Occurrence {
                phrase: window.join(" "),
                order,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::tokenize;
    use proptest::prelude::*;

    fn phrases_of_order(occs: &[Occurrence], order: usize) -> Vec<&str> {
        occs.iter()
            .filter(|o| o.order == order)
            .map(|o| o.phrase.as_str())
            .collect()
    }

    #[test]
    fn windows_over_a_clean_sequence() {
        let tokens = tokenize("best coffee beans online");
        let occs = candidates(&tokens);
        assert_eq!(
            phrases_of_order(&occs, 1),
            vec!["best", "coffee", "beans", "online"]
        );
        assert_eq!(
            phrases_of_order(&occs, 2),
            vec!["best coffee", "coffee beans", "beans online"]
        );
        assert_eq!(
            phrases_of_order(&occs, 3),
            vec!["best coffee beans", "coffee beans online"]
        );
    }

    #[test]
    fn stop_words_break_multiword_windows() {
        let tokens = tokenize("coffee for beans");
        let occs = candidates(&tokens);
        assert_eq!(phrases_of_order(&occs, 1), vec!["coffee", "beans"]);
        assert!(phrases_of_order(&occs, 2).is_empty());
        assert!(phrases_of_order(&occs, 3).is_empty());
    }

    #[test]
    fn short_tokens_are_dropped_as_unigrams_but_allowed_in_phrases() {
        // "ai" is two chars: no unigram, but "ai tools" is a valid bigram.
        let tokens = tokenize("ai tools");
        let occs = candidates(&tokens);
        assert_eq!(phrases_of_order(&occs, 1), vec!["tools"]);
        assert_eq!(phrases_of_order(&occs, 2), vec!["ai tools"]);
    }

    #[test]
    fn short_sequences_yield_no_higher_windows() {
        assert!(candidates(&[]).is_empty());
        let one = tokenize("coffee");
        assert_eq!(candidates(&one).len(), 1);
    }

    proptest! {
        #[test]
        fn no_candidate_contains_a_stop_word(s in "[a-z ]{0,80}") {
            let tokens = tokenize(&s);
            for occ in candidates(&tokens) {
                for tok in occ.phrase.split(' ') {
                    prop_assert!(!crate::stopwords::is_stop_word(tok));
                }
            }
        }

        #[test]
        fn unigrams_are_at_least_three_chars(s in "[a-z ]{0,80}") {
            let tokens = tokenize(&s);
            for occ in candidates(&tokens) {
                if occ.order == 1 {
                    prop_assert!(occ.phrase.chars().count() >= 3);
                }
            }
        }

        #[test]
        fn window_counts_match_sequence_length(n in 0usize..20) {
            // All-distinct non-stop tokens, all long enough.
            let tokens: Vec<String> = (0..n).map(|i| format!("tok{i}")).collect();
            let occs = candidates(&tokens);
            let count = |k: usize| occs.iter().filter(|o| o.order == k).count();
            prop_assert_eq!(count(1), n);
            prop_assert_eq!(count(2), n.saturating_sub(1));
            prop_assert_eq!(count(3), n.saturating_sub(2));
        }
    }
}
