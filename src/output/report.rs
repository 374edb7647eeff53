//! Report structures handed to the formatters

use crate::processing::analyzer::{CollegeAnalysis, IndividualAnalysis};
use crate::processing::gap_classifier::PriorityBucket;
use crate::processing::scorer::{AlignmentScore, ScoreDelta};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Any report the tool can emit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnalysisReport {
    Individual(IndividualReport),
    College(CollegeReport),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualReport {
    pub metadata: ReportMetadata,

    /// Every company, best aligned first
    pub alignment: Vec<AlignmentRow>,

    /// Company chosen for the detailed sections below
    pub selected_company: String,

    pub gap_analysis: GapTable,

    /// Person vs. company level per skill, in skill order
    pub skill_comparison: Vec<SkillComparison>,

    pub impact: ImpactTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeReport {
    pub metadata: ReportMetadata,
    pub company: String,
    pub ranking: Vec<RankingRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    /// Label of the requirement table the run used, e.g. `CSE_companies`
    pub table: String,
    pub aligner_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRow {
    pub rank: usize,
    pub company: String,
    pub alignment: AlignmentScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapTable {
    pub company: String,
    pub alignment: AlignmentScore,
    pub rows: Vec<GapReportRow>,
    pub high_priority: Vec<String>,
    pub medium_priority: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReportRow {
    pub skill: String,
    pub required: u8,
    pub your_level: u8,
    pub gap: i8,
    pub status: String,
    pub priority: PriorityBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillComparison {
    pub skill: String,
    pub student: u8,
    pub company: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactTable {
    pub company: String,
    pub baseline: AlignmentScore,
    pub rows: Vec<ImpactReportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReportRow {
    pub skill: String,
    pub raised_to: u8,
    pub new_alignment: AlignmentScore,
    pub alignment_increase: ScoreDelta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: usize,
    pub name: String,
    pub roll: String,
    pub alignment: AlignmentScore,
}

/// Turns engine results into report tables without recomputing anything
pub struct ReportAssembler {
    table: String,
}

impl ReportAssembler {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    fn metadata(&self) -> ReportMetadata {
        ReportMetadata {
            generated_at: Utc::now(),
            table: self.table.clone(),
            aligner_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn individual(&self, analysis: &IndividualAnalysis) -> IndividualReport {
        let alignment = analysis
            .alignment
            .iter()
            .map(|entry| AlignmentRow {
                rank: entry.rank,
                company: entry.label.clone(),
                alignment: entry.score,
            })
            .collect();

        let gaps = &analysis.gaps;
        let gap_analysis = GapTable {
            company: gaps.company.clone(),
            alignment: gaps.alignment,
            rows: gaps
                .rows
                .iter()
                .map(|row| GapReportRow {
                    skill: row.skill.clone(),
                    required: row.required,
                    your_level: row.current,
                    gap: row.gap,
                    status: row.status.to_string(),
                    priority: row.bucket,
                })
                .collect(),
            high_priority: gaps.high_priority.clone(),
            medium_priority: gaps.medium_priority.clone(),
        };

        let skill_comparison = gaps
            .rows
            .iter()
            .map(|row| SkillComparison {
                skill: row.skill.clone(),
                student: row.current,
                company: row.required,
            })
            .collect();

        let impact = ImpactTable {
            company: analysis.selected_company.clone(),
            baseline: analysis.impact.baseline,
            rows: analysis
                .impact
                .rows
                .iter()
                .map(|row| ImpactReportRow {
                    skill: row.skill.clone(),
                    raised_to: row.raised_to,
                    new_alignment: row.new_score,
                    alignment_increase: row.delta,
                })
                .collect(),
        };

        IndividualReport {
            metadata: self.metadata(),
            alignment,
            selected_company: analysis.selected_company.clone(),
            gap_analysis,
            skill_comparison,
            impact,
        }
    }

    pub fn college(&self, analysis: &CollegeAnalysis) -> CollegeReport {
        CollegeReport {
            metadata: self.metadata(),
            company: analysis.company.clone(),
            ranking: analysis
                .ranking
                .iter()
                .map(|entry| RankingRow {
                    rank: entry.rank,
                    name: entry.label.name.clone(),
                    roll: entry.label.roll.clone(),
                    alignment: entry.score,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::requirement_table::RequirementTable;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::vector::RatingVector;

    fn individual_report() -> IndividualReport {
        let table = RequirementTable::from_reader(
            "CSE_companies",
            "Company,Python,SQL,Git\nAcme,5,3,0\nGlobex,2,2,2\n".as_bytes(),
        )
        .unwrap();
        let rating = RatingVector::ratings(table.skills().clone(), vec![3, 3, 2]).unwrap();
        let analysis = AnalysisEngine::new(&table).individual(&rating, None).unwrap();
        ReportAssembler::new(table.label()).individual(&analysis)
    }

    #[test]
    fn test_individual_report_preserves_order() {
        let report = individual_report();

        assert_eq!(report.metadata.table, "CSE_companies");
        assert_eq!(report.alignment[0].company, "Acme");
        assert_eq!(report.alignment[0].rank, 1);
        assert_eq!(report.alignment[1].company, "Globex");
        assert_eq!(report.selected_company, "Acme");

        let skills: Vec<_> = report.gap_analysis.rows.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(skills, vec!["Python", "SQL", "Git"]);
        assert_eq!(report.gap_analysis.rows[0].status, "Need +2 levels");
        assert_eq!(report.skill_comparison[2].company, 0);
        assert_eq!(report.impact.rows[0].skill, "Python");
    }

    #[test]
    fn test_report_serializes_scores_as_numbers() {
        let report = AnalysisReport::Individual(individual_report());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["mode"], "individual");
        assert_eq!(json["alignment"][0]["alignment"], 60.0);
        assert_eq!(json["impact"]["rows"][0]["alignment_increase"], 12.5);
        assert_eq!(json["gap_analysis"]["rows"][0]["priority"], "High");
    }
}
