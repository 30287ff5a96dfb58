//! Audit thresholds and artifact directories.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_min_lesson_score() -> u32 {
    60
}

const fn default_script_ratio() -> f64 {
    0.6
}

fn default_out_dir() -> String {
    "reports".to_string()
}

fn default_tasklist_dir() -> String {
    "reports/tasks".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Lessons scoring below this (0-100) are flagged `QUALITY_BELOW_THRESHOLD`.
    #[serde(default = "default_min_lesson_score")]
    pub min_lesson_score: u32,

    /// Include inactive courses and lessons in the traversal.
    #[serde(default)]
    pub include_inactive: bool,

    /// Directory for the structured JSON report.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Directory for the remediation checklist.
    #[serde(default = "default_tasklist_dir")]
    pub tasklist_dir: String,

    /// Minimum share of letters in the lesson's script for non-Latin languages.
    #[serde(default = "default_script_ratio")]
    pub script_ratio: f64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_lesson_score: default_min_lesson_score(),
            include_inactive: false,
            out_dir: default_out_dir(),
            tasklist_dir: default_tasklist_dir(),
            script_ratio: default_script_ratio(),
        }
    }
}

impl AuditConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.min_lesson_score > 100 {
            return Err(ConfigError::invalid(
                "audit.min_lesson_score",
                format!("{} is outside 0-100", self.min_lesson_score),
            ));
        }
        if !(0.0..=1.0).contains(&self.script_ratio) {
            return Err(ConfigError::invalid(
                "audit.script_ratio",
                format!("{} is outside 0.0-1.0", self.script_ratio),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = AuditConfig::default();
        assert_eq!(config.min_lesson_score, 60);
        assert!(!config.include_inactive);
        assert_eq!(config.out_dir, "reports");
        assert_eq!(config.tasklist_dir, "reports/tasks");
    }

    #[test]
    fn ratio_out_of_range_is_rejected() {
        let config = AuditConfig {
            script_ratio: 1.5,
            ..AuditConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
