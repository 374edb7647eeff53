//! Output formatters - console, JSON and Markdown presentation of reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::input::requirement_table::RequirementTable;
use crate::output::report::*;
use crate::processing::gap_classifier::PriorityBucket;
use crate::processing::scale::MAX_LEVEL;
use crate::processing::scorer::{AlignmentScore, ScoreDelta};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and text bar charts
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: AlignmentScore) -> String {
        let (badge, color) = match score.hundredths() / 100 {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_status(&self, row: &GapReportRow) -> String {
        let color = match row.gap {
            g if g > 0 => Color::Red,
            0 => Color::Cyan,
            _ => Color::Green,
        };
        self.colorize(&row.status, color)
    }

    fn format_delta(&self, delta: ScoreDelta) -> String {
        let text = if delta.hundredths() >= 0 {
            format!("+{}%", delta)
        } else {
            format!("{}%", delta)
        };
        let color = if delta.hundredths() > 0 {
            Color::Green
        } else {
            Color::BrightBlack
        };
        self.colorize(&text, color)
    }

    fn format_bar(level: u8) -> String {
        let filled = usize::from(level.min(MAX_LEVEL));
        let empty = usize::from(MAX_LEVEL) - filled;
        format!("{}{}", "█".repeat(filled), "░".repeat(empty))
    }

    fn format_skill_list(&self, skills: &[String], color: Color) -> String {
        if skills.is_empty() {
            return "  None\n".to_string();
        }
        skills
            .iter()
            .map(|skill| format!("  • {}\n", self.colorize(skill, color)))
            .collect()
    }

    fn format_individual(&self, report: &IndividualReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 SKILL ALIGNMENT ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Table: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.table
        ));

        if !report.alignment.is_empty() {
            output.push_str(&self.format_header("Alignment Results", 2));
            for row in &report.alignment {
                output.push_str(&format!(
                    "{:>3}. {} → {}% {}\n",
                    row.rank,
                    row.company,
                    row.alignment,
                    self.format_score_badge(row.alignment)
                ));
            }
        }

        let gaps = &report.gap_analysis;
        output.push_str(&self.format_header(
            &format!("📌 Detailed Skill Analysis for {} ({}%)", gaps.company, gaps.alignment),
            2,
        ));
        for row in &gaps.rows {
            output.push_str(&format!(
                "  {} → Required: {}, Your Level: {}, Status: {}\n",
                row.skill,
                row.required,
                row.your_level,
                self.format_status(row)
            ));
        }

        output.push_str(&self.format_header("🔥 High Priority Skills", 3));
        output.push_str(&self.format_skill_list(&gaps.high_priority, Color::Red));
        output.push_str(&self.format_header("⚡ Medium Priority Skills", 3));
        output.push_str(&self.format_skill_list(&gaps.medium_priority, Color::Yellow));

        if self.detailed {
            output.push_str(&self.format_header(
                &format!("Skill Comparison with {}", report.selected_company),
                3,
            ));
            let width = report
                .skill_comparison
                .iter()
                .map(|c| c.skill.chars().count())
                .max()
                .unwrap_or(0);
            for comparison in &report.skill_comparison {
                output.push_str(&format!(
                    "  {:<width$}  Student {} {}\n",
                    comparison.skill,
                    self.colorize(&Self::format_bar(comparison.student), Color::Blue),
                    comparison.student,
                    width = width
                ));
                output.push_str(&format!(
                    "  {:<width$}  Company {} {}\n",
                    "",
                    self.colorize(&Self::format_bar(comparison.company), Color::Magenta),
                    comparison.company,
                    width = width
                ));
            }
        }

        output.push_str(&self.format_header(
            &format!(
                "📈 Skill Improvement Impact Analysis (current: {}%)",
                report.impact.baseline
            ),
            2,
        ));
        if report.impact.rows.is_empty() {
            output.push_str("  Every skill is already at the top of the scale.\n");
        }
        for row in &report.impact.rows {
            output.push_str(&format!(
                "  {} → {} (to level {}: {}%)\n",
                row.skill,
                self.format_delta(row.alignment_increase),
                row.raised_to,
                row.new_alignment
            ));
        }

        output
    }

    fn format_college(&self, report: &CollegeReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("🏫 COLLEGE RANKING", 1));
        output.push_str(&format!(
            "Generated: {} | Table: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.table
        ));

        output.push_str(&self.format_header(&format!("📊 Ranking for {}", report.company), 2));
        for row in &report.ranking {
            output.push_str(&format!(
                "{}. {} ({}) → {}% {}\n",
                row.rank,
                row.name,
                row.roll,
                row.alignment,
                self.format_score_badge(row.alignment)
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(match report {
            AnalysisReport::Individual(individual) => self.format_individual(individual),
            AnalysisReport::College(college) => self.format_college(college),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn metadata_block(&self, metadata: &ReportMetadata) -> String {
        if !self.include_metadata {
            return String::new();
        }
        format!(
            "**Generated:** {} | **Table:** `{}`\n\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.table
        )
    }

    fn footer(&self, metadata: &ReportMetadata) -> String {
        if !self.include_metadata {
            return String::new();
        }
        format!("---\n\n*Generated by Skill Aligner v{}*\n", metadata.aligner_version)
    }

    fn markdown_priority(bucket: PriorityBucket) -> &'static str {
        match bucket {
            PriorityBucket::High => "🔥 High",
            PriorityBucket::Medium => "⚡ Medium",
            PriorityBucket::None => "-",
        }
    }

    fn skill_list(skills: &[String]) -> String {
        if skills.is_empty() {
            "None\n\n".to_string()
        } else {
            let mut output: String = skills.iter().map(|s| format!("- {}\n", s)).collect();
            output.push('\n');
            output
        }
    }

    fn format_individual(&self, report: &IndividualReport) -> String {
        let mut output = String::new();

        output.push_str("# 📊 Skill Alignment Report\n\n");
        output.push_str(&self.metadata_block(&report.metadata));

        if !report.alignment.is_empty() {
            output.push_str("## Alignment Results\n\n");
            output.push_str("| Rank | Company | Alignment % |\n");
            output.push_str("|------|---------|-------------|\n");
            for row in &report.alignment {
                output.push_str(&format!("| {} | {} | {} |\n", row.rank, row.company, row.alignment));
            }
            output.push('\n');
        }

        let gaps = &report.gap_analysis;
        output.push_str(&format!(
            "## 📌 Detailed Skill Analysis for {}\n\n**Alignment:** {}%\n\n",
            gaps.company, gaps.alignment
        ));
        output.push_str("| Skill | Required | Your Level | Status | Priority |\n");
        output.push_str("|-------|----------|------------|--------|----------|\n");
        for row in &gaps.rows {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                row.skill,
                row.required,
                row.your_level,
                row.status,
                Self::markdown_priority(row.priority)
            ));
        }
        output.push('\n');

        output.push_str("### 🔥 High Priority Skills\n\n");
        output.push_str(&Self::skill_list(&gaps.high_priority));
        output.push_str("### ⚡ Medium Priority Skills\n\n");
        output.push_str(&Self::skill_list(&gaps.medium_priority));

        output.push_str("## 📈 Skill Improvement Impact Analysis\n\n");
        output.push_str(&format!("**Current alignment:** {}%\n\n", report.impact.baseline));
        output.push_str("| Skill | Raised To | New Alignment % | Alignment Increase (%) |\n");
        output.push_str("|-------|-----------|-----------------|------------------------|\n");
        for row in &report.impact.rows {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                row.skill, row.raised_to, row.new_alignment, row.alignment_increase
            ));
        }
        output.push('\n');

        output.push_str(&self.footer(&report.metadata));
        output
    }

    fn format_college(&self, report: &CollegeReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("# 🏫 Ranking for {}\n\n", report.company));
        output.push_str(&self.metadata_block(&report.metadata));

        output.push_str("| Rank | Name | Roll No | Alignment % |\n");
        output.push_str("|------|------|---------|-------------|\n");
        for row in &report.ranking {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                row.rank, row.name, row.roll, row.alignment
            ));
        }
        output.push('\n');

        output.push_str(&self.footer(&report.metadata));
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(match report {
            AnalysisReport::Individual(individual) => self.format_individual(individual),
            AnalysisReport::College(college) => self.format_college(college),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Holds one formatter per output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain listing of a requirement table, one line per entity
pub fn format_requirement_table(table: &RequirementTable) -> String {
    let mut output = format!("🏢 {} requirements in {}\n\n", table.name_column(), table.label());
    output.push_str(&format!("Skills: {}\n\n", table.skills().names().join(", ")));
    for entity in table.entities() {
        let levels: Vec<String> = entity
            .requirements
            .iter()
            .map(|(skill, level)| format!("{}={}", skill, level))
            .collect();
        output.push_str(&format!("  • {}: {}\n", entity.name, levels.join(", ")));
    }
    output
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, base_name: &str, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}{}.md", base_name, timestamp_suffix),
    }
}
