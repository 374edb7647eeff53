//! Input processing module
//! Handles requirement tables, branch lookup, ratings and student rosters

pub mod registry;
pub mod requirement_table;
pub mod ratings;
pub mod roster;

pub use registry::BranchRegistry;
pub use requirement_table::{RequirementEntity, RequirementTable};
pub use roster::Student;
