//! Repair engine retry bounds and backup location.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_max_replace_rounds() -> u32 {
    5
}

const fn default_batch_size() -> usize {
    8
}

const fn default_fill_slack() -> usize {
    2
}

const fn default_fill_multiplier() -> usize {
    10
}

fn default_backup_dir() -> String {
    "backups".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepairConfig {
    /// Generator rounds per invalid question before it is dropped unreplaced.
    #[serde(default = "default_max_replace_rounds")]
    pub max_replace_rounds: u32,

    /// Candidates requested from the generator per round.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Fill loop budget is `(total_deficit + fill_slack) * fill_multiplier`.
    #[serde(default = "default_fill_slack")]
    pub fill_slack: usize,

    #[serde(default = "default_fill_multiplier")]
    pub fill_multiplier: usize,

    /// Directory receiving pre-mutation backup artifacts.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_replace_rounds: default_max_replace_rounds(),
            batch_size: default_batch_size(),
            fill_slack: default_fill_slack(),
            fill_multiplier: default_fill_multiplier(),
            backup_dir: default_backup_dir(),
        }
    }
}

impl RepairConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_replace_rounds == 0 {
            return Err(ConfigError::invalid(
                "repair.max_replace_rounds",
                "must be at least 1",
            ));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::invalid("repair.batch_size", "must be at least 1"));
        }
        if self.fill_multiplier == 0 {
            return Err(ConfigError::invalid(
                "repair.fill_multiplier",
                "must be at least 1",
            ));
        }
        if self.backup_dir.trim().is_empty() {
            return Err(ConfigError::invalid("repair.backup_dir", "must not be empty"));
        }
        Ok(())
    }
}
