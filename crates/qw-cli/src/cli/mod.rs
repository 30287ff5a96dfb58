use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `qw` binary.
#[derive(Debug, Parser)]
#[command(
    name = "qw",
    version,
    about = "quizwright - keep lesson quiz pools compliant"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (defaults to store.db_path)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Extra config file layered above the discovered ones
    #[arg(long, global = true)]
    pub config: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "qw",
            "--format",
            "table",
            "--verbose",
            "--db",
            "/tmp/q.db",
            "repair",
            "prompt-craft-en",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert_eq!(cli.db.as_deref(), Some("/tmp/q.db"));
        assert!(matches!(cli.command, Commands::Repair(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["qw", "audit", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Audit(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["qw", "--format", "xml", "audit"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_accepts_all_supported_values() {
        for value in ["json", "table", "raw"] {
            let cli =
                Cli::try_parse_from(["qw", "--format", value, "audit"]).expect("cli should parse");
            assert!(matches!(cli.command, Commands::Audit(_)));
        }
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["qw", "--config", "/tmp/qw.toml", "audit"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.config.as_deref(), Some("/tmp/qw.toml"));
        assert_eq!(flags.format, OutputFormat::Json);
        assert!(flags.db.is_none());
    }
}
