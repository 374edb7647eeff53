//! Rating input: `Skill=Level` arguments and TOML ratings files

use crate::error::{Result, SkillAlignerError};
use crate::processing::vector::{RatingVector, SkillSet};
use log::info;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Parse one `Skill=Level` argument
pub fn parse_rating_arg(arg: &str) -> std::result::Result<(String, u8), String> {
    let (skill, level) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("Expected SKILL=LEVEL, got '{}'", arg))?;

    let skill = skill.trim();
    if skill.is_empty() {
        return Err(format!("Missing skill name in '{}'", arg));
    }

    let level = level
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("Level for {} must be a number between 1 and 5", skill))?;

    Ok((skill.to_string(), level))
}

/// Build a rating vector from parsed `(skill, level)` pairs
pub fn ratings_from_pairs(skills: &Arc<SkillSet>, pairs: &[(String, u8)]) -> Result<RatingVector> {
    RatingVector::from_named(
        Arc::clone(skills),
        pairs.iter().map(|(skill, level)| (skill.as_str(), *level)),
    )
}

/// Load ratings from a TOML file of `Skill = Level` entries
pub fn load_ratings_file(path: &Path, skills: &Arc<SkillSet>) -> Result<RatingVector> {
    let content = std::fs::read_to_string(path)?;
    let ratings = parse_ratings_toml(&content, skills)?;
    info!("Loaded ratings for {} skills from {}", skills.len(), path.display());
    Ok(ratings)
}

pub fn parse_ratings_toml(content: &str, skills: &Arc<SkillSet>) -> Result<RatingVector> {
    let raw: BTreeMap<String, i64> = toml::from_str(content).map_err(|e| {
        SkillAlignerError::InvalidInput(format!("Failed to parse ratings file: {}", e))
    })?;

    let mut pairs = Vec::with_capacity(raw.len());
    for (skill, level) in raw {
        let level = u8::try_from(level).map_err(|_| {
            SkillAlignerError::InvalidInput(format!(
                "rating for {} must be between 1 and 5, got {}",
                skill, level
            ))
        })?;
        pairs.push((skill, level));
    }

    ratings_from_pairs(skills, &pairs)
}
