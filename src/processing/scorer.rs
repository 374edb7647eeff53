//! Alignment scoring between a rating vector and a requirement vector

use crate::error::Result;
use crate::processing::scale::MAX_LEVEL;
use crate::processing::vector::RatingVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage of achievable weighted requirement met, in [0, 100].
///
/// Held as whole hundredths of a percent, so every score is already rounded
/// to two decimals and differences between scores are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct AlignmentScore(u32);

impl AlignmentScore {
    pub const ZERO: AlignmentScore = AlignmentScore(0);
    pub const FULL: AlignmentScore = AlignmentScore(10_000);

    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths.min(Self::FULL.0))
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Signed change from `baseline` to `self`
    pub fn delta_from(self, baseline: AlignmentScore) -> ScoreDelta {
        ScoreDelta(self.0 as i32 - baseline.0 as i32)
    }
}

impl From<AlignmentScore> for f64 {
    fn from(score: AlignmentScore) -> Self {
        score.as_percent()
    }
}

impl From<f64> for AlignmentScore {
    fn from(percent: f64) -> Self {
        let clamped = percent.clamp(0.0, 100.0);
        Self((clamped * 100.0).round() as u32)
    }
}

impl fmt::Display for AlignmentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Signed difference between two alignment scores, in hundredths of a percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct ScoreDelta(i32);

impl ScoreDelta {
    pub fn hundredths(self) -> i32 {
        self.0
    }

    pub fn as_percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl From<ScoreDelta> for f64 {
    fn from(delta: ScoreDelta) -> Self {
        delta.as_percent()
    }
}

impl From<f64> for ScoreDelta {
    fn from(percent: f64) -> Self {
        Self((percent * 100.0).round() as i32)
    }
}

impl fmt::Display for ScoreDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Score a person's ratings against one requirement vector.
///
/// `dot / max_dot * 100`, rounded half away from zero to two decimals, where
/// `max_dot` is the dot product a fully rated person would reach. A
/// requirement vector of all zeros scores 0.
pub fn score(rating: &RatingVector, requirement: &RatingVector) -> Result<AlignmentScore> {
    rating.ensure_compatible(requirement)?;

    let (dot, max_dot) = rating
        .levels()
        .iter()
        .zip(requirement.levels())
        .fold((0u64, 0u64), |(dot, max_dot), (&r, &q)| {
            (
                dot + u64::from(r) * u64::from(q),
                max_dot + u64::from(MAX_LEVEL) * u64::from(q),
            )
        });

    if max_dot == 0 {
        return Ok(AlignmentScore::ZERO);
    }

    let hundredths = (2 * dot * 10_000 + max_dot) / (2 * max_dot);
    Ok(AlignmentScore::from_hundredths(hundredths as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::vector::SkillSet;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn skills() -> Arc<SkillSet> {
        Arc::new(SkillSet::new(["Python", "SQL", "Git"]).unwrap())
    }

    #[test]
    fn test_worked_example() {
        let requirement = RatingVector::requirements(skills(), vec![5, 3, 0]).unwrap();
        let rating = RatingVector::ratings(skills(), vec![3, 3, 2]).unwrap();

        let result = score(&rating, &requirement).unwrap();
        assert_eq!(result.hundredths(), 6000);
        assert_eq!(result.to_string(), "60.00");
    }

    #[test]
    fn test_all_zero_requirement_scores_zero() {
        let requirement = RatingVector::requirements(skills(), vec![0, 0, 0]).unwrap();
        let rating = RatingVector::ratings(skills(), vec![5, 5, 5]).unwrap();
        assert_eq!(score(&rating, &requirement).unwrap(), AlignmentScore::ZERO);
    }

    #[test]
    fn test_full_ratings_score_hundred() {
        let requirement = RatingVector::requirements(skills(), vec![2, 4, 1]).unwrap();
        let rating = RatingVector::ratings(skills(), vec![5, 5, 5]).unwrap();
        assert_eq!(score(&rating, &requirement).unwrap(), AlignmentScore::FULL);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // 7 / 15 * 100 = 46.666...
        let requirement = RatingVector::requirements(skills(), vec![1, 1, 1]).unwrap();
        let rating = RatingVector::ratings(skills(), vec![3, 2, 2]).unwrap();
        assert_eq!(score(&rating, &requirement).unwrap().to_string(), "46.67");
    }

    #[test]
    fn test_mismatched_skills_are_rejected() {
        let other = Arc::new(SkillSet::new(["Python", "SQL"]).unwrap());
        let requirement = RatingVector::requirements(other, vec![5, 3]).unwrap();
        let rating = RatingVector::ratings(skills(), vec![3, 3, 2]).unwrap();
        assert!(score(&rating, &requirement).is_err());
    }

    #[test]
    fn test_display_and_serialization() {
        let score = AlignmentScore::from_hundredths(7250);
        assert_eq!(score.to_string(), "72.50");
        assert_eq!(serde_json::to_string(&score).unwrap(), "72.5");

        let delta = AlignmentScore::from_hundredths(6000).delta_from(score);
        assert_eq!(delta.to_string(), "-12.50");
        assert_eq!(delta.hundredths(), -1250);
    }

    proptest! {
        #[test]
        fn prop_score_is_a_percentage(
            rating in prop::collection::vec(1u8..=5, 3),
            requirement in prop::collection::vec(0u8..=5, 3),
        ) {
            let rating = RatingVector::ratings(skills(), rating).unwrap();
            let requirement = RatingVector::requirements(skills(), requirement).unwrap();
            let result = score(&rating, &requirement).unwrap();
            prop_assert!(result <= AlignmentScore::FULL);
            if requirement.total() == 0 {
                prop_assert_eq!(result, AlignmentScore::ZERO);
            }
        }

        #[test]
        fn prop_raising_a_rating_never_lowers_the_score(
            rating in prop::collection::vec(1u8..=5, 3),
            requirement in prop::collection::vec(0u8..=5, 3),
            index in 0usize..3,
        ) {
            let rating = RatingVector::ratings(skills(), rating).unwrap();
            let requirement = RatingVector::requirements(skills(), requirement).unwrap();
            let before = score(&rating, &requirement).unwrap();
            if let Some(raised) = rating.with_raised(index) {
                let after = score(&raised, &requirement).unwrap();
                prop_assert!(after >= before);
            }
        }
    }
}
