//! Menu-driven interactive session.
//!
//! Mirrors the classic placement-desk flow:
//! - pick a mode from the main menu,
//! - pick a branch (or go back),
//! - enter ratings, then pick companies until "back".

use crate::config::{Config, OutputFormat};
use crate::error::{Result, SkillAlignerError};
use crate::input::registry::BranchRegistry;
use crate::input::requirement_table::RequirementTable;
use crate::input::roster::Student;
use crate::output::{AnalysisReport, ReportAssembler, ReportGenerator};
use crate::processing::analyzer::AnalysisEngine;
use crate::processing::scale;
use crate::processing::vector::{RatingVector, SkillSet};
use inquire::{CustomType, InquireError, Select, Text};
use log::{debug, error};
use std::fmt;
use std::io::IsTerminal;
use std::sync::Arc;

const BACK: &str = "« Back";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Individual,
    College,
    Exit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuChoice::Individual => "Individual Student Mode",
            MenuChoice::College => "College Mode",
            MenuChoice::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Esc on a prompt means "back", not failure
fn cancelled_as_none<T>(result: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Operator mistakes inside a mode are reported and the menu resumes.
/// Prompt failures (Ctrl-C, lost terminal) still end the session.
fn recover(result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e @ SkillAlignerError::Prompt(_)) => Err(e),
        Err(e) => {
            error!("{}", e);
            Ok(())
        }
    }
}

pub struct InteractiveSession {
    registry: BranchRegistry,
    generator: ReportGenerator,
}

impl InteractiveSession {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: BranchRegistry::from_config(&config.branches),
            generator: ReportGenerator::with_options(
                config.output.color_output,
                config.output.detailed,
                config.output.pretty_json,
                true,
            ),
        }
    }

    /// Main menu loop; returns when the operator chooses Exit
    pub fn run(&self) -> Result<()> {
        if !std::io::stdout().is_terminal() {
            return Err(SkillAlignerError::Prompt(
                "Interactive mode requires a terminal".to_string(),
            ));
        }
        if self.registry.is_empty() {
            return Err(SkillAlignerError::Configuration(
                "No branches configured".to_string(),
            ));
        }

        loop {
            let options = vec![MenuChoice::Individual, MenuChoice::College, MenuChoice::Exit];
            let choice = cancelled_as_none(Select::new("===== MAIN MENU =====", options).prompt())?;

            match choice {
                Some(MenuChoice::Individual) => recover(self.individual_mode())?,
                Some(MenuChoice::College) => recover(self.college_mode())?,
                Some(MenuChoice::Exit) | None => {
                    println!("Exiting program...");
                    return Ok(());
                }
            }
        }
    }

    /// Ask for a branch until its table loads or the operator goes back
    fn select_table(&self) -> Result<Option<RequirementTable>> {
        loop {
            let mut options = self.registry.branches();
            options.push(BACK.to_string());

            let Some(branch) = cancelled_as_none(Select::new("Select your branch", options).prompt())?
            else {
                return Ok(None);
            };
            if branch == BACK {
                return Ok(None);
            }
            if let Some(table) = self.load_branch(&branch) {
                return Ok(Some(table));
            }
        }
    }

    fn load_branch(&self, branch: &str) -> Option<RequirementTable> {
        debug!("Branch selected: {}", branch);
        match self.registry.load(branch) {
            Ok(table) => Some(table),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    fn select_company(&self, table: &RequirementTable, message: &str) -> Result<Option<String>> {
        let mut options: Vec<String> = table.entity_names().map(str::to_string).collect();
        options.push(BACK.to_string());

        let selection = cancelled_as_none(Select::new(message, options).prompt())?;
        Ok(selection.filter(|company| company != BACK))
    }

    fn individual_mode(&self) -> Result<()> {
        let Some(table) = self.select_table()? else {
            return Ok(());
        };

        println!("\n{}", scale::guide_text());
        println!("Enter your skill levels:");
        let Some(rating) = prompt_ratings(table.skills())? else {
            return Ok(());
        };

        let engine = AnalysisEngine::new(&table);
        let assembler = ReportAssembler::new(table.label());

        let alignment = engine.alignment(&rating)?;
        println!("\nAlignment Results:");
        for entry in &alignment {
            println!("{} → {}%", entry.label, entry.score);
        }

        while let Some(company) =
            self.select_company(&table, "Company for detailed analysis")?
        {
            let analysis = engine.individual(&rating, Some(&company))?;
            let mut report = assembler.individual(&analysis);
            // ranking was printed above
            report.alignment.clear();
            let report = AnalysisReport::Individual(report);
            println!("{}", self.generator.generate_report(&report, &OutputFormat::Console)?);
        }
        Ok(())
    }

    fn college_mode(&self) -> Result<()> {
        let Some(table) = self.select_table()? else {
            return Ok(());
        };

        let count = loop {
            let Some(count) = cancelled_as_none(
                CustomType::<usize>::new("Enter number of students:")
                    .with_error_message("Invalid input.")
                    .prompt(),
            )?
            else {
                return Ok(());
            };
            if count > 0 {
                break count;
            }
            println!("Enter a positive number.");
        };

        println!("\n{}", scale::guide_text());
        let mut students = Vec::with_capacity(count);
        for i in 0..count {
            println!("\nEntering data for Student {}", i + 1);
            let Some(name) = cancelled_as_none(Text::new("Enter Name:").prompt())? else {
                return Ok(());
            };
            let Some(roll) = cancelled_as_none(Text::new("Enter Roll Number:").prompt())? else {
                return Ok(());
            };
            let Some(ratings) = prompt_ratings(table.skills())? else {
                return Ok(());
            };
            students.push(Student { name, roll, ratings });
        }

        let engine = AnalysisEngine::new(&table);
        let assembler = ReportAssembler::new(table.label());
        while let Some(company) = self.select_company(&table, "Company for ranking")? {
            let analysis = engine.college(&company, &students)?;
            let report = AnalysisReport::College(assembler.college(&analysis));
            println!("{}", self.generator.generate_report(&report, &OutputFormat::Console)?);
        }
        Ok(())
    }
}

/// Ask for every skill in order; `None` when the operator backs out
fn prompt_ratings(skills: &Arc<SkillSet>) -> Result<Option<RatingVector>> {
    collect_ratings(skills, |skill| {
        cancelled_as_none(
            CustomType::<u8>::new(&format!("{} (1-5):", skill))
                .with_error_message("Invalid input. Enter numbers only.")
                .prompt(),
        )
    })
}

/// Re-asks until each value is on the scale
fn collect_ratings<F>(skills: &Arc<SkillSet>, mut ask: F) -> Result<Option<RatingVector>>
where
    F: FnMut(&str) -> Result<Option<u8>>,
{
    let mut levels = Vec::with_capacity(skills.len());
    for skill in skills.iter() {
        let level = loop {
            let Some(value) = ask(skill)? else {
                return Ok(None);
            };
            if scale::is_valid_rating(value) {
                break value;
            }
            println!("Please enter a value between 1 and 5.");
        };
        levels.push(level);
    }
    RatingVector::ratings(Arc::clone(skills), levels).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels() {
        assert_eq!(MenuChoice::Individual.to_string(), "Individual Student Mode");
        assert_eq!(MenuChoice::College.to_string(), "College Mode");
        assert_eq!(MenuChoice::Exit.to_string(), "Exit");
    }

    #[test]
    fn test_cancel_means_back() {
        let cancelled: std::result::Result<u8, InquireError> = Err(InquireError::OperationCanceled);
        assert!(matches!(cancelled_as_none(cancelled), Ok(None)));
        assert!(matches!(cancelled_as_none(Ok(3u8)), Ok(Some(3))));

        let interrupted: std::result::Result<u8, InquireError> = Err(InquireError::OperationInterrupted);
        assert!(matches!(
            cancelled_as_none(interrupted),
            Err(SkillAlignerError::Prompt(_))
        ));
    }

    fn skills() -> Arc<SkillSet> {
        Arc::new(SkillSet::new(["Python", "SQL", "Git"]).unwrap())
    }

    fn scripted(answers: Vec<Option<u8>>) -> impl FnMut(&str) -> Result<Option<u8>> {
        let mut answers = answers.into_iter();
        move |_: &str| Ok(answers.next().flatten())
    }

    #[test]
    fn test_out_of_range_rating_is_asked_again() {
        let rating = collect_ratings(&skills(), scripted(vec![Some(4), Some(9), Some(0), Some(3), Some(2)]))
            .unwrap()
            .unwrap();
        assert_eq!(rating.levels(), &[4, 3, 2]);
    }

    #[test]
    fn test_cancelled_rating_backs_out() {
        let result = collect_ratings(&skills(), scripted(vec![Some(4), None]));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_mode_errors_keep_the_menu_alive() {
        assert!(recover(Err(SkillAlignerError::UnknownEntity("Hooli".to_string()))).is_ok());
        assert!(recover(Err(SkillAlignerError::table_load("MECH_companies.csv", "missing"))).is_ok());
        assert!(matches!(
            recover(Err(SkillAlignerError::Prompt("interrupted".to_string()))),
            Err(SkillAlignerError::Prompt(_))
        ));
    }

    #[test]
    fn test_missing_branch_table_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CSE_companies.csv"), "Company,Python,SQL\nAcme,5,3\n").unwrap();

        let mut config = Config::default();
        config.branches.data_dir = dir.path().to_path_buf();
        let session = InteractiveSession::new(&config);

        assert!(session.load_branch("EEE").is_none());
        assert!(session.load_branch("CIVIL").is_none());
        assert_eq!(session.load_branch("cse").map(|t| t.len()), Some(1));
    }
}
