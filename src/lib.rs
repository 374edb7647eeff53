//! Skill aligner library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod interactive;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, SkillAlignerError};
