//! # qw-repair
//!
//! Repair engine for lesson question pools.
//!
//! For each lesson the engine:
//! 1. snapshots the active pool to a write-once backup (always, even in dry-run),
//! 2. classifies it with the quality oracle into valid / invalid / duplicate,
//! 3. stops early when the valid set already meets quota (only invalid and
//!    duplicate items are removed),
//! 4. otherwise replaces invalid items in their display slots and fills the
//!    remaining deficits, with every generator call drawn from a [`RetryPolicy`],
//! 5. runs the oracle's batch check over the resulting pool, and
//! 6. commits the [`MutationPlan`] as one delete-then-insert.
//!
//! Generator seeds are derived from the lesson id ([`seed`]), so repeated and
//! dry runs over the same state pick the same candidates.

mod accepted;
mod backup;
mod classify;
mod engine;
mod error;
mod outcome;
mod plan;
mod policy;
mod restore;
pub mod seed;
mod select;

pub use accepted::AcceptedSet;
pub use backup::{BACKUP_FORMAT_VERSION, BackupArtifact, BackupWriter};
pub use classify::{Classification, Duplicate, Rejected, classify};
pub use engine::{RepairEngine, RepairOptions};
pub use error::RepairError;
pub use outcome::{LessonOutcome, LessonStatus, RunStatus, RunSummary};
pub use plan::{Insertion, MutationPlan, Removal, RemovalReason};
pub use policy::{Attempts, RetryPolicy};
pub use restore::{RestoreOutcome, restore};
pub use select::{accept_batch, first_acceptable, is_acceptable};
