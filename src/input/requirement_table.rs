//! Company requirement tables loaded from CSV

use crate::error::{Result, SkillAlignerError};
use crate::processing::vector::{RatingVector, SkillSet};
use log::{info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// A named target (company) with its required level per skill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementEntity {
    pub name: String,
    pub requirements: RatingVector,
}

/// Immutable set of requirement entities sharing one skill sequence
#[derive(Debug, Clone)]
pub struct RequirementTable {
    label: String,
    name_column: String,
    skills: Arc<SkillSet>,
    entities: Vec<RequirementEntity>,
}

impl RequirementTable {
    pub fn new(
        label: impl Into<String>,
        skills: Arc<SkillSet>,
        entities: Vec<RequirementEntity>,
    ) -> Result<Self> {
        let label = label.into();
        if entities.is_empty() {
            return Err(SkillAlignerError::table_load(label, "table has no entities"));
        }

        let mut names = HashSet::new();
        for entity in &entities {
            if !names.insert(entity.name.as_str()) {
                return Err(SkillAlignerError::table_load(
                    label,
                    format!("duplicate entity name: {}", entity.name),
                ));
            }
            if entity.requirements.skills().as_ref() != skills.as_ref() {
                return Err(SkillAlignerError::table_load(
                    label,
                    format!("{} is defined over a different skill sequence", entity.name),
                ));
            }
        }

        Ok(Self {
            label,
            name_column: "Company".to_string(),
            skills,
            entities,
        })
    }

    /// Load a table from a CSV file; the file stem becomes the table label
    pub fn from_path(path: &Path) -> Result<Self> {
        let label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let file = File::open(path).map_err(|e| {
            SkillAlignerError::table_load(path.display().to_string(), e.to_string())
        })?;

        let table = Self::from_reader(label, file)?;
        info!(
            "Loaded {} companies over {} skills from {}",
            table.len(),
            table.skills.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse CSV: a name column followed by one integer column per skill.
    ///
    /// Any malformed row fails the whole load; rows are never skipped.
    pub fn from_reader<R: Read>(label: impl Into<String>, reader: R) -> Result<Self> {
        let label = label.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| SkillAlignerError::table_load(&label, e.to_string()))?
            .clone();

        if headers.len() < 2 {
            return Err(SkillAlignerError::table_load(
                label,
                "header must name the entity column and at least one skill",
            ));
        }

        let name_column = headers.get(0).unwrap_or("Company").to_string();
        let skills = SkillSet::new(headers.iter().skip(1))
            .map_err(|e| SkillAlignerError::table_load(&label, format!("header: {}", e)))?;
        let skills = Arc::new(skills);

        let mut entities = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| SkillAlignerError::table_load(&label, e.to_string()))?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let at_line = |reason: String| {
                SkillAlignerError::table_load(&label, format!("line {}: {}", line, reason))
            };

            if record.len() != headers.len() {
                return Err(at_line(format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                )));
            }

            let name = record.get(0).unwrap_or_default().to_string();
            if name.is_empty() {
                return Err(at_line("missing entity name".to_string()));
            }

            let mut levels = Vec::with_capacity(skills.len());
            for (skill, field) in skills.iter().zip(record.iter().skip(1)) {
                let level = field.parse::<u8>().map_err(|_| {
                    at_line(format!("{} for {} is not a level: '{}'", skill, name, field))
                })?;
                levels.push(level);
            }

            let requirements = RatingVector::requirements(Arc::clone(&skills), levels)
                .map_err(|e| at_line(e.to_string()))?;
            if requirements.total() == 0 {
                warn!("{} requires no skills and will always score 0%", name);
            }

            entities.push(RequirementEntity { name, requirements });
        }

        let mut table = Self::new(label, skills, entities)?;
        table.name_column = name_column;
        Ok(table)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Header of the entity name column, usually "Company"
    pub fn name_column(&self) -> &str {
        &self.name_column
    }

    pub fn skills(&self) -> &Arc<SkillSet> {
        &self.skills
    }

    pub fn entities(&self) -> &[RequirementEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }

    pub fn get(&self, name: &str) -> Result<&RequirementEntity> {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| SkillAlignerError::UnknownEntity(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Company,Python,SQL,Git\nAcme,5,3,0\nGlobex, 4 ,4,2\n";

    #[test]
    fn test_parse_table() {
        let table = RequirementTable::from_reader("CSE_companies", SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.label(), "CSE_companies");
        assert_eq!(table.name_column(), "Company");
        assert_eq!(table.skills().names().len(), 3);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Globex").unwrap().requirements.levels(), &[4, 4, 2]);
        assert_eq!(table.entity_names().collect::<Vec<_>>(), vec!["Acme", "Globex"]);
    }

    #[test]
    fn test_unknown_entity() {
        let table = RequirementTable::from_reader("t", SAMPLE.as_bytes()).unwrap();
        assert!(matches!(
            table.get("Initech"),
            Err(SkillAlignerError::UnknownEntity(name)) if name == "Initech"
        ));
    }

    #[test]
    fn test_malformed_rows_fail_the_load() {
        let cases = [
            "Company,Python,SQL\nAcme,5\n",
            "Company,Python,SQL\nAcme,5,x\n",
            "Company,Python,SQL\nAcme,5,9\n",
            "Company,Python,SQL\nAcme,5,-1\n",
            "Company,Python,SQL\n,5,3\n",
            "Company,Python,SQL\nAcme,5,3\nAcme,1,1\n",
            "Company,Python,Python\nAcme,5,3\n",
            "Company\nAcme\n",
            "Company,Python,SQL\n",
        ];
        for case in cases {
            let result = RequirementTable::from_reader("t", case.as_bytes());
            assert!(
                matches!(result, Err(SkillAlignerError::TableLoad { .. })),
                "expected load failure for {:?}",
                case
            );
        }
    }

    #[test]
    fn test_error_names_the_line() {
        let err = RequirementTable::from_reader("t", "Company,Python\nAcme,5\nGlobex,7\n".as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[test]
    fn test_zero_requirement_row_is_accepted() {
        let table = RequirementTable::from_reader("t", "Company,Python\nIdle,0\n".as_bytes()).unwrap();
        assert_eq!(table.get("Idle").unwrap().requirements.total(), 0);
    }
}
