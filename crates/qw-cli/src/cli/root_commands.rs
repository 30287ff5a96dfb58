use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Bring a course's lesson quizzes up to quota.
    Repair(RepairArgs),
    /// Read-only compliance audit across families and courses.
    Audit(AuditArgs),
    /// Load families, courses, lessons, and questions from a TOML or JSON file.
    Import(ImportArgs),
    /// Put a lesson's active questions back to a backup snapshot.
    Restore(RestoreArgs),
}

/// Arguments for `qw repair`.
#[derive(Clone, Debug, Args)]
pub struct RepairArgs {
    /// Course identifier.
    pub course: String,
    /// Only repair the lesson for this day.
    #[arg(long)]
    pub day: Option<u32>,
    /// Regenerate every active question, not just invalid ones.
    #[arg(long)]
    pub force_rewrite: bool,
    /// Decide and back up, but do not write to the store.
    #[arg(long)]
    pub dry_run: bool,
    /// Backup directory (defaults to repair.backup_dir).
    #[arg(long)]
    pub backup_dir: Option<String>,
}

/// Arguments for `qw audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Only audit this family (`unassigned` for courses without one).
    #[arg(long)]
    pub family: Option<String>,
    /// Lessons scoring below this are flagged (defaults to audit.min_lesson_score).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_lesson_score: Option<u8>,
    /// Include inactive courses and lessons.
    #[arg(long)]
    pub include_inactive: bool,
    /// Report directory (defaults to audit.out_dir).
    #[arg(long)]
    pub out_dir: Option<String>,
    /// Checklist directory (defaults to audit.tasklist_dir).
    #[arg(long)]
    pub tasklist_dir: Option<String>,
}

/// Arguments for `qw import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Catalog file (`.json`, otherwise parsed as TOML).
    pub file: String,
}

/// Arguments for `qw restore`.
#[derive(Clone, Debug, Args)]
pub struct RestoreArgs {
    /// Backup artifact written by `qw repair`.
    pub backup: String,
    /// Report what would change without writing.
    #[arg(long)]
    pub dry_run: bool,
    /// Where the pre-restore snapshot goes (defaults to repair.backup_dir).
    #[arg(long)]
    pub backup_dir: Option<String>,
}
