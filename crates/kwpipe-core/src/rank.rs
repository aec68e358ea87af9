//! Final filtering, ordering and truncation of the score table.

use std::cmp::Reverse;

use crate::{RankedKeyword, ScoreTable};

/// Default cap on the ranked output length.
pub const MAX_KEYWORDS: usize = 100;

/// Turn a completed score table into the bounded ranked keyword list.
///
/// Drops entries with a non-positive score (cannot occur under the additive
/// weight scheme, but guards future weighting changes), all-digit phrases,
/// and phrases of two chars or fewer. Orders by score descending with an
/// explicit ascending lexicographic tie-break, then keeps the top `cap`.
pub fn rank(table: ScoreTable, cap: usize) -> Vec<RankedKeyword> {
    let mut out: Vec<RankedKeyword> = table
        .into_entries()
        .filter(|(keyword, score)| *score > 0 && keeps(keyword))
        .map(|(keyword, score)| RankedKeyword { keyword, score })
        .collect();

    out.sort_by_key(|k| (Reverse(k.score), k.keyword.clone()));
    out.truncate(cap);
    out
}

fn keeps(keyword: &str) -> bool {
    if keyword.chars().count() <= 2 {
        return false;
    }
    !keyword.chars().all(|c| c.is_ascii_digit())
}
