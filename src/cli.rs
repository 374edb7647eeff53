//! CLI interface for the skill aligner

use crate::input::ratings::parse_rating_arg;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-aligner")]
#[command(about = "Skill alignment analysis against company requirement tables")]
#[command(long_about = "Score self-rated skills against company requirements, rank companies or students, and show which skill improvements raise alignment the most")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Where the requirement table comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TableSource {
    /// Branch whose requirement table to use (e.g. CSE, EEE, ECE, MECH)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Requirement table CSV, bypassing the branch registry
    #[arg(short, long)]
    pub table: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: console, json, markdown
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Write CSV reports into this directory
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Output detailed analysis
    #[arg(short, long)]
    pub detailed: bool,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align one person's ratings with every company of a branch
    Align {
        #[command(flatten)]
        source: TableSource,

        /// Skill rating as SKILL=LEVEL (repeat for every skill)
        #[arg(short, long = "rating", value_parser = parse_rating_arg, conflicts_with = "ratings_file")]
        ratings: Vec<(String, u8)>,

        /// TOML file of `Skill = Level` ratings
        #[arg(short = 'f', long)]
        ratings_file: Option<PathBuf>,

        /// Company for the detailed gap and impact analysis (default: best aligned)
        #[arg(long)]
        company: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rank a roster of students against one company
    Rank {
        #[command(flatten)]
        source: TableSource,

        /// Company to rank against
        #[arg(long)]
        company: String,

        /// Student roster CSV: Name, Roll No, then one column per skill
        #[arg(long)]
        students: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the companies of a requirement table
    Companies {
        #[command(flatten)]
        source: TableSource,
    },

    /// List configured branches
    Branches,

    /// Show the skill rating guide
    Guide,

    /// Menu-driven interactive session
    Interactive,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_align_command() {
        let cli = Cli::try_parse_from([
            "skill-aligner",
            "align",
            "--branch",
            "cse",
            "--rating",
            "Python=4",
            "-r",
            "SQL=2",
            "--company",
            "Acme",
            "--output",
            "md",
        ])
        .unwrap();

        match cli.command {
            Commands::Align { source, ratings, company, output, .. } => {
                assert_eq!(source.branch.as_deref(), Some("cse"));
                assert_eq!(ratings, vec![("Python".to_string(), 4), ("SQL".to_string(), 2)]);
                assert_eq!(company.as_deref(), Some("Acme"));
                assert_eq!(output.output.as_deref(), Some("md"));
            }
            _ => panic!("expected align"),
        }
    }

    #[test]
    fn test_table_source_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["skill-aligner", "companies"]).is_err());
        assert!(Cli::try_parse_from([
            "skill-aligner",
            "companies",
            "--branch",
            "CSE",
            "--table",
            "x.csv"
        ])
        .is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }
}
