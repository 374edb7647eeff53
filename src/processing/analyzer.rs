//! Analysis engine combining scoring, gap classification, ranking and impact simulation

use crate::error::{Result, SkillAlignerError};
use crate::input::requirement_table::RequirementTable;
use crate::input::roster::Student;
use crate::processing::gap_classifier::{classify, priority_lists, GapRow};
use crate::processing::impact::{impact, ImpactAnalysis};
use crate::processing::ranking::{rank, RankedEntry};
use crate::processing::scorer::{score, AlignmentScore};
use crate::processing::vector::RatingVector;
use log::debug;
use serde::{Deserialize, Serialize};

/// Stateless engine over one loaded requirement table.
///
/// The table is only read, so one table can back any number of engines.
pub struct AnalysisEngine<'a> {
    table: &'a RequirementTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub company: String,
    pub alignment: AlignmentScore,
    pub rows: Vec<GapRow>,
    pub high_priority: Vec<String>,
    pub medium_priority: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualAnalysis {
    /// Every company, best aligned first
    pub alignment: Vec<RankedEntry<String>>,
    pub selected_company: String,
    pub gaps: GapAnalysis,
    pub impact: ImpactAnalysis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLabel {
    pub name: String,
    pub roll: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeAnalysis {
    pub company: String,
    pub ranking: Vec<RankedEntry<StudentLabel>>,
}

impl<'a> AnalysisEngine<'a> {
    pub fn new(table: &'a RequirementTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RequirementTable {
        self.table
    }

    /// Score one person against every company, best first; ties keep table order
    pub fn alignment(&self, rating: &RatingVector) -> Result<Vec<RankedEntry<String>>> {
        self.check_rating(rating)?;

        let scored = self
            .table
            .entities()
            .iter()
            .map(|entity| -> Result<(String, AlignmentScore)> {
                Ok((entity.name.clone(), score(rating, &entity.requirements)?))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Scored {} companies", scored.len());
        Ok(rank(scored))
    }

    pub fn gap_analysis(&self, rating: &RatingVector, company: &str) -> Result<GapAnalysis> {
        self.check_rating(rating)?;
        let entity = self.table.get(company)?;

        let rows = classify(rating, &entity.requirements)?;
        let (high_priority, medium_priority) = priority_lists(&rows);

        Ok(GapAnalysis {
            company: entity.name.clone(),
            alignment: score(rating, &entity.requirements)?,
            rows,
            high_priority,
            medium_priority,
        })
    }

    pub fn impact_analysis(&self, rating: &RatingVector, company: &str) -> Result<ImpactAnalysis> {
        self.check_rating(rating)?;
        let entity = self.table.get(company)?;
        impact(rating, &entity.requirements)
    }

    /// Full single-person run: alignment table plus gap and impact analysis.
    ///
    /// Without an explicit company the best-aligned one is analysed.
    pub fn individual(&self, rating: &RatingVector, company: Option<&str>) -> Result<IndividualAnalysis> {
        let alignment = self.alignment(rating)?;

        let selected_company = match company {
            Some(name) => self.table.get(name)?.name.clone(),
            None => alignment
                .first()
                .map(|entry| entry.label.clone())
                .ok_or_else(|| SkillAlignerError::InvalidInput("No companies to analyse".to_string()))?,
        };
        debug!("Detailed analysis for {}", selected_company);

        let gaps = self.gap_analysis(rating, &selected_company)?;
        let impact = self.impact_analysis(rating, &selected_company)?;

        Ok(IndividualAnalysis {
            alignment,
            selected_company,
            gaps,
            impact,
        })
    }

    /// Rank students against one company; ties keep roster order
    pub fn college(&self, company: &str, students: &[Student]) -> Result<CollegeAnalysis> {
        if students.is_empty() {
            return Err(SkillAlignerError::InvalidInput(
                "College ranking needs at least one student".to_string(),
            ));
        }
        let entity = self.table.get(company)?;

        let scored = students
            .iter()
            .map(|student| -> Result<(StudentLabel, AlignmentScore)> {
                self.check_rating(&student.ratings)?;
                let label = StudentLabel {
                    name: student.name.clone(),
                    roll: student.roll.clone(),
                };
                Ok((label, score(&student.ratings, &entity.requirements)?))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Ranked {} students for {}", scored.len(), entity.name);
        Ok(CollegeAnalysis {
            company: entity.name.clone(),
            ranking: rank(scored),
        })
    }

    fn check_rating(&self, rating: &RatingVector) -> Result<()> {
        if !rating.is_valid_rating() {
            return Err(SkillAlignerError::InvalidInput(
                "Ratings must be between 1 and 5".to_string(),
            ));
        }
        if rating.skills().as_ref() != self.table.skills().as_ref() {
            return Err(SkillAlignerError::InvalidInput(format!(
                "Ratings must cover exactly: {}",
                self.table.skills().names().join(", ")
            )));
        }
        Ok(())
    }
}
