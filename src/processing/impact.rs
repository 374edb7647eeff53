//! Marginal benefit of raising each skill by one level

use crate::error::Result;
use crate::processing::scorer::{score, AlignmentScore, ScoreDelta};
use crate::processing::vector::RatingVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactRow {
    pub skill: String,
    /// Level the skill would be raised to
    pub raised_to: u8,
    pub new_score: AlignmentScore,
    pub delta: ScoreDelta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    pub baseline: AlignmentScore,
    pub rows: Vec<ImpactRow>,
}

/// Re-score with each improvable skill raised by one level, independently.
///
/// Skills already at the top of the scale are left out. Rows come back by
/// descending delta; equal deltas keep skill order.
pub fn impact(rating: &RatingVector, requirement: &RatingVector) -> Result<ImpactAnalysis> {
    let baseline = score(rating, requirement)?;

    let mut rows = Vec::new();
    for (index, skill) in rating.skills().iter().enumerate() {
        let Some(raised) = rating.with_raised(index) else {
            continue;
        };
        let new_score = score(&raised, requirement)?;
        rows.push(ImpactRow {
            skill: skill.to_string(),
            raised_to: raised.levels()[index],
            new_score,
            delta: new_score.delta_from(baseline),
        });
    }

    rows.sort_by(|a, b| b.delta.cmp(&a.delta));

    Ok(ImpactAnalysis { baseline, rows })
}
