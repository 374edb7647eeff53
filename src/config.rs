//! Configuration management for the skill aligner

use crate::error::{Result, SkillAlignerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub branches: BranchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchConfig {
    /// Directory relative table paths are resolved against
    pub data_dir: PathBuf,
    /// Branch identifier to requirement table file
    pub tables: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let tables = ["CSE", "EEE", "ECE", "MECH"]
            .into_iter()
            .map(|branch| {
                (
                    branch.to_string(),
                    PathBuf::from(format!("{}_companies.csv", branch)),
                )
            })
            .collect();

        Self {
            branches: BranchConfig {
                data_dir: PathBuf::from("."),
                tables,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit configuration file; nothing is written
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SkillAlignerError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SkillAlignerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SkillAlignerError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-aligner")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registers_four_branches() {
        let config = Config::default();
        let branches: Vec<_> = config.branches.tables.keys().cloned().collect();
        assert_eq!(branches, vec!["CSE", "ECE", "EEE", "MECH"]);
        assert_eq!(
            config.branches.tables["MECH"],
            PathBuf::from("MECH_companies.csv")
        );
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Markdown;
        config.branches.data_dir = PathBuf::from("/srv/placement");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
        assert_eq!(loaded.branches.data_dir, PathBuf::from("/srv/placement"));
        assert_eq!(loaded.branches.tables.len(), 4);
    }

    #[test]
    fn test_invalid_config_is_a_configuration_error() {
        assert!(matches!(
            Config::from_toml("branches = 3"),
            Err(SkillAlignerError::Configuration(_))
        ));
        assert!(Config::load_from(Path::new("/nonexistent/skill-aligner.toml")).is_err());
    }
}
