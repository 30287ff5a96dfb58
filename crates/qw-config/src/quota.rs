//! Per-lesson quota policy.

use qw_core::QuotaTarget;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_total_min() -> usize {
    7
}

const fn default_application_min() -> usize {
    5
}

const fn default_critical_thinking_min() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotaConfig {
    /// Minimum number of active valid questions per lesson.
    #[serde(default = "default_total_min")]
    pub total_min: usize,

    /// Minimum number of application questions.
    #[serde(default = "default_application_min")]
    pub application_min: usize,

    /// Minimum number of critical-thinking questions.
    #[serde(default = "default_critical_thinking_min")]
    pub critical_thinking_min: usize,

    /// Maximum number of recall questions. Anything other than zero is rejected.
    #[serde(default)]
    pub recall_max: usize,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            total_min: default_total_min(),
            application_min: default_application_min(),
            critical_thinking_min: default_critical_thinking_min(),
            recall_max: 0,
        }
    }
}

impl QuotaConfig {
    #[must_use]
    pub const fn target(&self) -> QuotaTarget {
        QuotaTarget {
            total_min: self.total_min,
            application_min: self.application_min,
            critical_thinking_min: self.critical_thinking_min,
            recall_max: self.recall_max,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.application_min + self.critical_thinking_min > self.total_min {
            return Err(ConfigError::invalid(
                "quota.total_min",
                format!(
                    "{} is smaller than application_min + critical_thinking_min ({})",
                    self.total_min,
                    self.application_min + self.critical_thinking_min
                ),
            ));
        }
        if self.recall_max != 0 {
            return Err(ConfigError::invalid(
                "quota.recall_max",
                "recall questions are never allowed; must be 0",
            ));
        }
        Ok(())
    }
}
