//! Branch registry: which requirement table belongs to which branch

use crate::config::BranchConfig;
use crate::error::{Result, SkillAlignerError};
use crate::input::requirement_table::RequirementTable;
use log::debug;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Branch identifier to table location, resolved once from configuration
#[derive(Debug, Clone)]
pub struct BranchRegistry {
    tables: BTreeMap<String, PathBuf>,
}

impl BranchRegistry {
    pub fn from_config(config: &BranchConfig) -> Self {
        let tables = config
            .tables
            .iter()
            .map(|(branch, file)| {
                let path = if file.is_absolute() {
                    file.clone()
                } else {
                    config.data_dir.join(file)
                };
                (branch.trim().to_uppercase(), path)
            })
            .collect();
        Self { tables }
    }

    /// Known branch identifiers, sorted
    pub fn branches(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table location for a branch; lookup ignores case and surrounding whitespace
    pub fn resolve(&self, branch: &str) -> Result<&PathBuf> {
        let key = branch.trim().to_uppercase();
        self.tables
            .get(&key)
            .ok_or_else(|| SkillAlignerError::UnknownBranch {
                branch: branch.trim().to_string(),
                known: self.branches(),
            })
    }

    pub fn load(&self, branch: &str) -> Result<RequirementTable> {
        let path = self.resolve(branch)?;
        debug!("Branch {} resolves to {}", branch, path.display());
        RequirementTable::from_path(path)
    }
}
