//! Candidate generator settings.

use serde::{Deserialize, Serialize};

const fn default_min_content_chars() -> usize {
    200
}

const fn default_bespoke_pool_surplus() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Lessons whose stripped body is shorter than this get no generic candidates.
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,

    /// Extra items a bespoke bank returns beyond the requested count.
    #[serde(default = "default_bespoke_pool_surplus")]
    pub bespoke_pool_surplus: usize,

    /// Directories scanned for `*.toml` question banks.
    #[serde(default)]
    pub bank_dirs: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_content_chars: default_min_content_chars(),
            bespoke_pool_surplus: default_bespoke_pool_surplus(),
            bank_dirs: Vec::new(),
        }
    }
}
