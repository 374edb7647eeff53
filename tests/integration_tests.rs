//! Integration tests for the skill aligner

use skill_aligner::config::{Config, OutputFormat};
use skill_aligner::input::ratings::load_ratings_file;
use skill_aligner::input::roster::load_roster;
use skill_aligner::input::{BranchRegistry, RequirementTable};
use skill_aligner::output::export::{write_exports, ALIGNMENT_FILE, GAP_FILE, IMPACT_FILE};
use skill_aligner::output::{AnalysisReport, ReportAssembler, ReportGenerator};
use skill_aligner::processing::analyzer::AnalysisEngine;
use skill_aligner::processing::gap_classifier::PriorityBucket;
use skill_aligner::SkillAlignerError;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn cse_table() -> RequirementTable {
    RequirementTable::from_path(&fixture("CSE_companies.csv")).unwrap()
}

#[test]
fn test_alignment_over_fixture_table() {
    let table = cse_table();
    let rating = load_ratings_file(&fixture("ratings.toml"), table.skills()).unwrap();

    let ranked = AnalysisEngine::new(&table).alignment(&rating).unwrap();
    let rows: Vec<(String, String)> = ranked
        .iter()
        .map(|e| (e.label.clone(), e.score.to_string()))
        .collect();

    let expected = [
        ("Google", "70.83"),
        ("TCS", "69.41"),
        ("Infosys", "68.89"),
        ("Zoho", "66.67"),
        ("Dormant Ltd", "0.00"),
    ];
    assert_eq!(rows.len(), expected.len());
    for ((label, score), (want_label, want_score)) in rows.iter().zip(expected) {
        assert_eq!(label, want_label);
        assert_eq!(score, want_score);
    }
}

#[test]
fn test_individual_analysis_for_top_company() {
    let table = cse_table();
    let rating = load_ratings_file(&fixture("ratings.toml"), table.skills()).unwrap();

    let analysis = AnalysisEngine::new(&table).individual(&rating, None).unwrap();
    assert_eq!(analysis.selected_company, "Google");

    let gaps = &analysis.gaps;
    assert_eq!(gaps.high_priority, vec!["Java".to_string(), "DSA".to_string()]);
    assert_eq!(gaps.medium_priority, vec!["Web Development".to_string()]);

    let python = &gaps.rows[0];
    assert_eq!(python.status.to_string(), "Need +1 levels");
    assert_eq!(python.bucket, PriorityBucket::None);
    assert_eq!(gaps.rows[3].status.to_string(), "Exceeds Requirement");

    // Git is already at 5
    let impact: Vec<(&str, String)> = analysis
        .impact
        .rows
        .iter()
        .map(|r| (r.skill.as_str(), r.delta.to_string()))
        .collect();
    assert_eq!(
        impact,
        vec![
            ("Python", "4.17".to_string()),
            ("DSA", "4.17".to_string()),
            ("Java", "3.34".to_string()),
            ("SQL", "2.50".to_string()),
            ("Web Development", "2.50".to_string()),
        ]
    );
    for row in &analysis.impact.rows {
        assert_eq!(
            row.new_score.hundredths() as i32 - row.delta.hundredths(),
            analysis.impact.baseline.hundredths() as i32
        );
    }
}

#[test]
fn test_college_ranking_preserves_roster_order_on_ties() {
    let table = cse_table();
    let students = load_roster(&fixture("students.csv"), table.skills()).unwrap();

    let analysis = AnalysisEngine::new(&table).college("Google", &students).unwrap();
    let ranking: Vec<(&str, String)> = analysis
        .ranking
        .iter()
        .map(|e| (e.label.name.as_str(), e.score.to_string()))
        .collect();

    assert_eq!(
        ranking,
        vec![
            ("Asha", "80.00".to_string()),
            ("Meera", "80.00".to_string()),
            ("Ravi", "68.33".to_string()),
        ]
    );
}

#[test]
fn test_unknown_company_does_not_poison_the_session() {
    let table = cse_table();
    let rating = load_ratings_file(&fixture("ratings.toml"), table.skills()).unwrap();
    let engine = AnalysisEngine::new(&table);

    let result = engine.individual(&rating, Some("Wayne Enterprises"));
    assert!(matches!(result, Err(SkillAlignerError::UnknownEntity(name)) if name == "Wayne Enterprises"));

    // same engine, valid selection
    assert!(engine.individual(&rating, Some("Zoho")).is_ok());
}

#[test]
fn test_registry_resolves_fixture_branch() {
    let mut config = Config::default();
    config.branches.data_dir = fixture("");

    let registry = BranchRegistry::from_config(&config.branches);
    let table = registry.load("cse").unwrap();
    assert_eq!(table.label(), "CSE_companies");
    assert_eq!(table.len(), 5);

    assert!(matches!(
        registry.load("CIVIL"),
        Err(SkillAlignerError::UnknownBranch { .. })
    ));
}

#[test]
fn test_reports_and_exports() {
    let table = cse_table();
    let rating = load_ratings_file(&fixture("ratings.toml"), table.skills()).unwrap();
    let analysis = AnalysisEngine::new(&table).individual(&rating, Some("TCS")).unwrap();
    let report = AnalysisReport::Individual(ReportAssembler::new(table.label()).individual(&analysis));

    let generator = ReportGenerator::with_options(false, true, true, true);
    let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
    assert!(console.contains("Detailed Skill Analysis for TCS"));

    let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["alignment"][0]["company"], "Google");
    assert_eq!(value["selected_company"], "TCS");

    let dir = tempfile::tempdir().unwrap();
    let written = write_exports(&report, dir.path()).unwrap();
    assert_eq!(written.len(), 3);

    let alignment = std::fs::read_to_string(dir.path().join(ALIGNMENT_FILE)).unwrap();
    assert!(alignment.starts_with("Company,Alignment %\nGoogle,70.83\n"));
    let impact = std::fs::read_to_string(dir.path().join(IMPACT_FILE)).unwrap();
    assert!(impact.starts_with("Skill,Alignment Increase (%)\n"));
    let gaps = std::fs::read_to_string(dir.path().join(GAP_FILE)).unwrap();
    assert!(gaps.contains("Python,3,4,-1,Exceeds Requirement,None"));
}

#[test]
fn test_nonexistent_table() {
    let result = RequirementTable::from_path(&fixture("nonexistent.csv"));
    assert!(matches!(result, Err(SkillAlignerError::TableLoad { .. })));
}
