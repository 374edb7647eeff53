//! Skill sequences and the rating vectors defined over them

use crate::error::{Result, SkillAlignerError};
use crate::processing::scale::{self, MAX_LEVEL, MIN_LEVEL, MIN_REQUIREMENT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered, duplicate-free sequence of skill names shared by every vector of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new<I, S>(skills: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let skills: Vec<String> = skills
            .into_iter()
            .map(|s| s.into().trim().to_string())
            .collect();

        if skills.is_empty() {
            return Err(SkillAlignerError::InvalidInput(
                "Skill set must name at least one skill".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for skill in &skills {
            if skill.is_empty() {
                return Err(SkillAlignerError::InvalidInput(
                    "Skill names must not be empty".to_string(),
                ));
            }
            if !seen.insert(skill.as_str()) {
                return Err(SkillAlignerError::InvalidInput(format!(
                    "Duplicate skill: {}",
                    skill
                )));
            }
        }

        Ok(Self { skills })
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.skills
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn position(&self, skill: &str) -> Option<usize> {
        self.skills.iter().position(|s| s == skill)
    }
}

impl TryFrom<Vec<String>> for SkillSet {
    type Error = SkillAlignerError;

    fn try_from(skills: Vec<String>) -> Result<Self> {
        Self::new(skills)
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.skills
    }
}

/// Integer levels, one per skill of a [`SkillSet`], in skill order.
///
/// Used both for a person's self ratings (1..=5) and for an entity's
/// requirement levels (0..=5, where 0 means "not required").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingVector {
    skills: Arc<SkillSet>,
    levels: Vec<u8>,
}

impl RatingVector {
    /// Build a person's rating vector; every level must be on the 1-5 scale
    pub fn ratings(skills: Arc<SkillSet>, levels: Vec<u8>) -> Result<Self> {
        Self::checked(skills, levels, scale::is_valid_rating, MIN_LEVEL, "rating")
    }

    /// Build a requirement vector; levels may be 0
    pub fn requirements(skills: Arc<SkillSet>, levels: Vec<u8>) -> Result<Self> {
        Self::checked(skills, levels, scale::is_valid_requirement, MIN_REQUIREMENT, "requirement")
    }

    /// Build a person's rating vector from `(skill, level)` pairs in any order.
    ///
    /// Every skill of the set must be rated exactly once; unknown skills are
    /// rejected rather than ignored.
    pub fn from_named<I, S>(skills: Arc<SkillSet>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: AsRef<str>,
    {
        let mut slots: Vec<Option<u8>> = vec![None; skills.len()];

        for (name, level) in pairs {
            let name = name.as_ref().trim();
            let index = skills.position(name).ok_or_else(|| {
                SkillAlignerError::InvalidInput(format!("Unknown skill: {}", name))
            })?;
            if slots[index].replace(level).is_some() {
                return Err(SkillAlignerError::InvalidInput(format!(
                    "Skill rated more than once: {}",
                    name
                )));
            }
        }

        let missing: Vec<&str> = skills
            .iter()
            .zip(&slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(skill, _)| skill)
            .collect();
        if !missing.is_empty() {
            return Err(SkillAlignerError::InvalidInput(format!(
                "Missing ratings for: {}",
                missing.join(", ")
            )));
        }

        let levels = slots.into_iter().flatten().collect();
        Self::ratings(skills, levels)
    }

    fn checked(
        skills: Arc<SkillSet>,
        levels: Vec<u8>,
        valid: fn(u8) -> bool,
        floor: u8,
        kind: &str,
    ) -> Result<Self> {
        if levels.len() != skills.len() {
            return Err(SkillAlignerError::InvalidInput(format!(
                "Expected {} {} values, got {}",
                skills.len(),
                kind,
                levels.len()
            )));
        }

        for (skill, &level) in skills.iter().zip(&levels) {
            if !valid(level) {
                return Err(SkillAlignerError::InvalidInput(format!(
                    "{} for {} must be between {} and {}, got {}",
                    kind, skill, floor, MAX_LEVEL, level
                )));
            }
        }

        Ok(Self { skills, levels })
    }

    pub fn skills(&self) -> &Arc<SkillSet> {
        &self.skills
    }

    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn level(&self, skill: &str) -> Option<u8> {
        self.skills.position(skill).map(|i| self.levels[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.skills.iter().zip(self.levels.iter().copied())
    }

    /// Sum of all levels; zero for a requirement vector that asks for nothing
    pub fn total(&self) -> u32 {
        self.levels.iter().map(|&l| u32::from(l)).sum()
    }

    /// Copy of this vector with one skill raised by a single level.
    ///
    /// Returns `None` when the skill is already at the top of the scale.
    pub fn with_raised(&self, index: usize) -> Option<Self> {
        let current = *self.levels.get(index)?;
        if current >= MAX_LEVEL {
            return None;
        }
        let mut levels = self.levels.clone();
        levels[index] = current + 1;
        Some(Self {
            skills: Arc::clone(&self.skills),
            levels,
        })
    }

    /// Fail unless both vectors are defined over the same ordered skills
    pub fn ensure_compatible(&self, other: &RatingVector) -> Result<()> {
        if Arc::ptr_eq(&self.skills, &other.skills) || self.skills == other.skills {
            Ok(())
        } else {
            Err(SkillAlignerError::InvalidInput(format!(
                "Skill sequences differ: [{}] vs [{}]",
                self.skills.names().join(", "),
                other.skills.names().join(", ")
            )))
        }
    }

    /// Re-check every level against the rating scale
    pub fn is_valid_rating(&self) -> bool {
        self.levels.iter().all(|&l| scale::is_valid_rating(l))
    }
}
