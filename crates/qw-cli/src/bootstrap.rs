use std::path::Path;

use anyhow::Context;
use qw_config::QwConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, then any `--config` file on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QwConfig> {
    load_dotenv()?;
    match &flags.config {
        Some(path) => QwConfig::load_with_file(Path::new(path))
            .with_context(|| format!("failed to load config from {path}")),
        None => QwConfig::load().context("failed to load quizwright config"),
    }
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    for candidate in [cwd.join(".env"), cwd.join(".quizwright").join(".env")] {
        if candidate.exists() {
            dotenvy::from_path(&candidate).with_context(|| {
                format!("failed to load dotenv file at {}", candidate.display())
            })?;
            return Ok(());
        }
    }
    Ok(())
}

/// Tracing to stderr. `QUIZWRIGHT_LOG` wins over `--quiet` / `--verbose`.
pub fn init_tracing(quiet: bool, verbose: bool, json: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("QUIZWRIGHT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
