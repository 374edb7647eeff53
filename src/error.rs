//! Error handling for the skill aligner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillAlignerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown company: {0}")]
    UnknownEntity(String),

    #[error("Unknown branch: {branch} (known branches: {})", .known.join(", "))]
    UnknownBranch { branch: String, known: Vec<String> },

    #[error("Failed to load table {path}: {reason}")]
    TableLoad { path: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, SkillAlignerError>;

impl SkillAlignerError {
    pub(crate) fn table_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SkillAlignerError::TableLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Convert prompt failures to our custom error type
impl From<inquire::InquireError> for SkillAlignerError {
    fn from(err: inquire::InquireError) -> Self {
        SkillAlignerError::Prompt(err.to_string())
    }
}
