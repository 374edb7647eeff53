//! Skill aligner: skill alignment, gap and impact analysis against company requirements

use clap::Parser;
use log::{error, info};
use skill_aligner::cli::{self, Cli, Commands, ConfigAction, OutputArgs, TableSource};
use skill_aligner::config::Config;
use skill_aligner::error::{Result, SkillAlignerError};
use skill_aligner::input::ratings::{load_ratings_file, ratings_from_pairs};
use skill_aligner::input::roster::load_roster;
use skill_aligner::input::{BranchRegistry, RequirementTable};
use skill_aligner::interactive::InteractiveSession;
use skill_aligner::output::export::write_exports;
use skill_aligner::output::formatter::{format_requirement_table, save_report_to_file, suggest_filename};
use skill_aligner::output::{AnalysisReport, ReportAssembler, ReportGenerator};
use skill_aligner::processing::analyzer::AnalysisEngine;
use skill_aligner::processing::scale;
use std::path::PathBuf;
use std::process;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Align {
            source,
            ratings,
            ratings_file,
            company,
            output,
        } => {
            let table = load_table(&source, &config)?;
            let rating = match ratings_file {
                Some(path) => load_ratings_file(&path, table.skills())?,
                None if ratings.is_empty() => {
                    return Err(SkillAlignerError::InvalidInput(format!(
                        "Provide --rating SKILL=LEVEL for each of: {}",
                        table.skills().names().join(", ")
                    )));
                }
                None => ratings_from_pairs(table.skills(), &ratings)?,
            };

            info!("Aligning ratings against {} companies", table.len());
            let analysis = AnalysisEngine::new(&table).individual(&rating, company.as_deref())?;
            let report = AnalysisReport::Individual(ReportAssembler::new(table.label()).individual(&analysis));
            emit_report(&report, &output, &config)?;
        }

        Commands::Rank {
            source,
            company,
            students,
            output,
        } => {
            let table = load_table(&source, &config)?;
            let roster = load_roster(&students, table.skills())?;

            info!("Ranking {} students for {}", roster.len(), company);
            let analysis = AnalysisEngine::new(&table).college(&company, &roster)?;
            let report = AnalysisReport::College(ReportAssembler::new(table.label()).college(&analysis));
            emit_report(&report, &output, &config)?;
        }

        Commands::Companies { source } => {
            let table = load_table(&source, &config)?;
            print!("{}", format_requirement_table(&table));
        }

        Commands::Branches => {
            let registry = BranchRegistry::from_config(&config.branches);
            println!("📚 Configured Branches\n");
            for branch in registry.branches() {
                let path = registry.resolve(&branch)?;
                let status = if path.exists() { "✅" } else { "⚠️  missing" };
                println!("  • {} → {} [{}]", branch, path.display(), status);
            }
        }

        Commands::Guide => {
            println!("{}", scale::guide_text());
        }

        Commands::Interactive => {
            InteractiveSession::new(&config).run()?;
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", config.to_toml()?);
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }
            }
        }
    }

    Ok(())
}

fn load_table(source: &TableSource, config: &Config) -> Result<RequirementTable> {
    match (&source.table, &source.branch) {
        (Some(path), _) => RequirementTable::from_path(path),
        (None, Some(branch)) => BranchRegistry::from_config(&config.branches).load(branch),
        (None, None) => Err(SkillAlignerError::InvalidInput(
            "Specify --branch or --table".to_string(),
        )),
    }
}

fn emit_report(report: &AnalysisReport, args: &OutputArgs, config: &Config) -> Result<()> {
    let format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(SkillAlignerError::InvalidInput)?,
        None => config.output.format,
    };

    let generator = ReportGenerator::with_options(
        config.output.color_output && !args.no_color && args.save.is_none(),
        config.output.detailed || args.detailed,
        config.output.pretty_json,
        true,
    );
    let content = generator.generate_report(report, &format)?;

    match &args.save {
        Some(path) => {
            let path = if path.is_dir() {
                let base_name = match report {
                    AnalysisReport::Individual(_) => "alignment_report",
                    AnalysisReport::College(_) => "college_ranking_report",
                };
                path.join(suggest_filename(&format, base_name, true))
            } else {
                path.clone()
            };
            save_report_to_file(&content, &path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    if let Some(dir) = &args.export_dir {
        for path in write_exports(report, dir)? {
            println!("📥 {}", path.display());
        }
    }

    Ok(())
}
