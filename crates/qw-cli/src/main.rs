use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use qw_repair::RunStatus;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(error) => {
            eprintln!("qw error: {error:#}");
            ExitCode::from(RunStatus::Fatal.exit_code())
        }
    }
}

async fn run() -> anyhow::Result<RunStatus> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let config = bootstrap::load_config(&flags)?;
    bootstrap::init_tracing(flags.quiet, flags.verbose, config.general.json_logs())?;
    ui::init(&flags);
    context::warn_unconfigured(&config);

    let ctx = context::AppContext::init(config, flags.db.as_deref())
        .await
        .context("failed to initialize quizwright context")?;

    commands::dispatch::dispatch(&cli.command, &ctx, &flags).await
}
