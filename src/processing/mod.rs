//! Alignment scoring and gap/impact analysis engine

pub mod scale;
pub mod vector;
pub mod scorer;
pub mod gap_classifier;
pub mod ranking;
pub mod impact;
pub mod analyzer;
