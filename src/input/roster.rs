//! Student rosters for college ranking

use crate::error::{Result, SkillAlignerError};
use crate::processing::vector::{RatingVector, SkillSet};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub roll: String,
    pub ratings: RatingVector,
}

pub fn load_roster(path: &Path, skills: &Arc<SkillSet>) -> Result<Vec<Student>> {
    let file = File::open(path)
        .map_err(|e| SkillAlignerError::table_load(path.display().to_string(), e.to_string()))?;
    let students = parse_roster(&path.display().to_string(), file, skills)?;
    info!("Loaded {} students from {}", students.len(), path.display());
    Ok(students)
}

/// Parse a `Name,Roll No,<skill>...` CSV.
///
/// Skill columns are matched by name, so their order need not follow the
/// requirement table, but together they must cover it exactly.
pub fn parse_roster<R: Read>(source: &str, reader: R, skills: &Arc<SkillSet>) -> Result<Vec<Student>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| SkillAlignerError::table_load(source, e.to_string()))?
        .clone();

    if headers.len() < 3 {
        return Err(SkillAlignerError::table_load(
            source,
            "header must be Name, Roll No, then one column per skill",
        ));
    }
    let skill_columns: Vec<String> = headers.iter().skip(2).map(str::to_string).collect();

    let mut students = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| SkillAlignerError::table_load(source, e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let at_line = |reason: String| {
            SkillAlignerError::table_load(source, format!("line {}: {}", line, reason))
        };

        if record.len() != headers.len() {
            return Err(at_line(format!(
                "expected {} fields, found {}",
                headers.len(),
                record.len()
            )));
        }

        let name = record.get(0).unwrap_or_default().to_string();
        let roll = record.get(1).unwrap_or_default().to_string();

        let mut pairs = Vec::with_capacity(skill_columns.len());
        for (skill, field) in skill_columns.iter().zip(record.iter().skip(2)) {
            let level = field
                .parse::<u8>()
                .map_err(|_| at_line(format!("{} for {} is not a rating: '{}'", skill, name, field)))?;
            pairs.push((skill.as_str(), level));
        }

        let ratings = RatingVector::from_named(Arc::clone(skills), pairs)
            .map_err(|e| at_line(e.to_string()))?;

        students.push(Student { name, roll, ratings });
    }

    if students.is_empty() {
        return Err(SkillAlignerError::InvalidInput(format!(
            "{} lists no students",
            source
        )));
    }

    Ok(students)
}
