//! Per-skill gap status and improvement priority against one requirement vector

use crate::error::Result;
use crate::processing::vector::RatingVector;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapStatus {
    /// Requirement is above the rating by this many levels
    NeedLevels(u8),
    PerfectMatch,
    ExceedsRequirement,
}

impl GapStatus {
    pub fn from_gap(gap: i8) -> Self {
        match gap {
            g if g > 0 => GapStatus::NeedLevels(g as u8),
            0 => GapStatus::PerfectMatch,
            _ => GapStatus::ExceedsRequirement,
        }
    }
}

impl fmt::Display for GapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapStatus::NeedLevels(levels) => write!(f, "Need +{} levels", levels),
            GapStatus::PerfectMatch => write!(f, "Perfect Match"),
            GapStatus::ExceedsRequirement => write!(f, "Exceeds Requirement"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityBucket {
    High,
    Medium,
    None,
}

impl PriorityBucket {
    /// Bucket a skill on the fixed 1-5 thresholds; independent of gap status.
    ///
    /// Only requirement 3 qualifies for Medium. Requirements of 1-2 are never
    /// prioritized, however low the rating.
    pub fn assign(required: u8, current: u8) -> Self {
        if required >= 4 && current <= 3 {
            PriorityBucket::High
        } else if required == 3 && current <= 3 {
            PriorityBucket::Medium
        } else {
            PriorityBucket::None
        }
    }
}

impl fmt::Display for PriorityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriorityBucket::High => "High",
            PriorityBucket::Medium => "Medium",
            PriorityBucket::None => "None",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapRow {
    pub skill: String,
    pub required: u8,
    pub current: u8,
    pub gap: i8,
    pub status: GapStatus,
    pub bucket: PriorityBucket,
}

/// Compare a rating vector with a requirement vector, skill by skill, in skill order
pub fn classify(rating: &RatingVector, requirement: &RatingVector) -> Result<Vec<GapRow>> {
    rating.ensure_compatible(requirement)?;

    let rows = rating
        .iter()
        .zip(requirement.levels())
        .map(|((skill, current), &required)| {
            let gap = required as i8 - current as i8;
            GapRow {
                skill: skill.to_string(),
                required,
                current,
                gap,
                status: GapStatus::from_gap(gap),
                bucket: PriorityBucket::assign(required, current),
            }
        })
        .collect();

    Ok(rows)
}

/// Split classified rows into the High and Medium priority skill lists, keeping skill order
pub fn priority_lists(rows: &[GapRow]) -> (Vec<String>, Vec<String>) {
    let pick = |bucket: PriorityBucket| {
        rows.iter()
            .filter(|row| row.bucket == bucket)
            .map(|row| row.skill.clone())
            .collect::<Vec<_>>()
    };
    (pick(PriorityBucket::High), pick(PriorityBucket::Medium))
}
