use std::path::{Path, PathBuf};

use anyhow::Context;
use qw_config::QwConfig;
use qw_generate::CandidateGenerator;
use qw_oracle::{RuleOracle, RuleSettings};
use qw_store::QuizDb;

/// Shared resources initialized once per invocation.
pub struct AppContext {
    pub config: QwConfig,
    pub db: QuizDb,
    pub db_path: PathBuf,
    pub generator: CandidateGenerator,
    pub oracle: RuleOracle,
}

impl AppContext {
    /// Open the store at `--db` or `store.db_path` and build the generator
    /// and oracle from config.
    pub async fn init(config: QwConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        let db_path = PathBuf::from(db_override.unwrap_or(&config.store.db_path));
        Self::open(config, &db_path).await
    }

    pub async fn open(config: QwConfig, db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let path = db_path.to_string_lossy();
        let db = QuizDb::open_local(&path)
            .await
            .with_context(|| format!("failed to open quiz store at {path}"))?;

        let generator = CandidateGenerator::from_config(&config.generator)
            .context("failed to build candidate generator")?;
        let oracle = RuleOracle::new(RuleSettings {
            script_ratio: config.audit.script_ratio,
            quota: config.quota.target(),
            ..RuleSettings::default()
        });
        tracing::debug!(db = %db_path.display(), oracle = "rules-v1", "context ready");

        Ok(Self {
            config,
            db,
            db_path: db_path.to_path_buf(),
            generator,
            oracle,
        })
    }
}
