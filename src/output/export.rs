//! CSV exports of the report tables

use crate::error::{Result, SkillAlignerError};
use crate::output::report::*;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const ALIGNMENT_FILE: &str = "alignment_report.csv";
pub const GAP_FILE: &str = "gap_analysis_report.csv";
pub const IMPACT_FILE: &str = "impact_analysis_report.csv";
pub const RANKING_FILE: &str = "college_ranking_report.csv";

fn to_csv<I, R>(header: &[&str], records: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for record in records {
        writer.write_record(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SkillAlignerError::OutputFormatting(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SkillAlignerError::OutputFormatting(e.to_string()))
}

pub fn alignment_csv(rows: &[AlignmentRow]) -> Result<String> {
    to_csv(
        &["Company", "Alignment %"],
        rows.iter()
            .map(|row| vec![row.company.clone(), row.alignment.to_string()]),
    )
}

pub fn gap_csv(table: &GapTable) -> Result<String> {
    to_csv(
        &["Skill", "Required", "Your Level", "Gap", "Status", "Priority"],
        table.rows.iter().map(|row| {
            vec![
                row.skill.clone(),
                row.required.to_string(),
                row.your_level.to_string(),
                row.gap.to_string(),
                row.status.clone(),
                row.priority.to_string(),
            ]
        }),
    )
}

pub fn impact_csv(table: &ImpactTable) -> Result<String> {
    to_csv(
        &["Skill", "Alignment Increase (%)"],
        table
            .rows
            .iter()
            .map(|row| vec![row.skill.clone(), row.alignment_increase.to_string()]),
    )
}

pub fn ranking_csv(rows: &[RankingRow]) -> Result<String> {
    to_csv(
        &["Name", "Roll No", "Alignment %"],
        rows.iter()
            .map(|row| vec![row.name.clone(), row.roll.clone(), row.alignment.to_string()]),
    )
}

/// Write every CSV table of a report into `dir`, returning the files written
pub fn write_exports(report: &AnalysisReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let files = match report {
        AnalysisReport::Individual(individual) => vec![
            (ALIGNMENT_FILE, alignment_csv(&individual.alignment)?),
            (GAP_FILE, gap_csv(&individual.gap_analysis)?),
            (IMPACT_FILE, impact_csv(&individual.impact)?),
        ],
        AnalysisReport::College(college) => vec![(RANKING_FILE, ranking_csv(&college.ranking)?)],
    };

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        fs::write(&path, content)?;
        info!("Exported {}", path.display());
        written.push(path);
    }
    Ok(written)
}
