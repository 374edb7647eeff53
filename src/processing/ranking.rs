//! Descending, tie-stable ranking of scored entries

use crate::processing::scorer::AlignmentScore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry<T> {
    /// 1-based position in the ranking
    pub rank: usize,
    pub label: T,
    pub score: AlignmentScore,
}

/// Order entries by descending score.
///
/// Entries with equal scores keep their input order; ties are never broken
/// by label.
pub fn rank<T>(entries: Vec<(T, AlignmentScore)>) -> Vec<RankedEntry<T>> {
    let mut entries = entries;
    // sort_by is stable
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (label, score))| RankedEntry {
            rank: i + 1,
            label,
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(hundredths: u32) -> AlignmentScore {
        AlignmentScore::from_hundredths(hundredths)
    }

    #[test]
    fn test_descending_order() {
        let ranked = rank(vec![("A", score(4000)), ("B", score(9000)), ("C", score(6000))]);
        let labels: Vec<_> = ranked.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["B", "C", "A"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![
            ("Zoe", score(8000)),
            ("Adam", score(8000)),
            ("Mia", score(9000)),
        ]);
        let labels: Vec<_> = ranked.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Mia", "Zoe", "Adam"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank::<&str>(Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_ranking_is_a_stable_permutation(scores in prop::collection::vec(0u32..=10_000, 0..20)) {
            let entries: Vec<(usize, AlignmentScore)> =
                scores.iter().copied().map(score).enumerate().collect();
            let ranked = rank(entries.clone());

            prop_assert_eq!(ranked.len(), entries.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    prop_assert!(pair[0].label < pair[1].label);
                }
            }
            let mut seen: Vec<usize> = ranked.iter().map(|e| e.label).collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..entries.len()).collect::<Vec<_>>());
        }
    }
}
