use qw_repair::RunStatus;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to its handler. The returned status becomes the
/// process exit code.
pub async fn dispatch(
    command: &Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<RunStatus> {
    match command {
        Commands::Repair(args) => commands::repair::handle(args, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(args, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(args, ctx, flags).await,
        Commands::Restore(args) => commands::restore::handle(args, ctx, flags).await,
    }
}
