//! # qw-store
//!
//! Persistence gateway for quizwright.
//!
//! Two implementations share the traits in [`gateway`]:
//! - [`QuizDb`]: libSQL (embedded `SQLite` fork, v0.9.29) with embedded
//!   migrations, catalog reads, lesson-scoped question CRUD, and transactional
//!   delete-then-insert.
//! - [`MemoryStore`]: in-process, for tests and fixtures.
//!
//! Catalog data enters through [`CatalogSeed`] files (TOML or JSON).

pub mod error;
pub mod gateway;
pub mod helpers;
pub mod memory;
mod migrations;
mod repos;
pub mod seed;

use libsql::Builder;

pub use error::StoreError;
pub use gateway::{
    CatalogReader, CatalogWriter, ImportSummary, LessonScope, NewQuestion, QuestionFilter,
    QuestionGateway,
};
pub use memory::MemoryStore;
pub use seed::{CatalogSeed, SeedCourse, SeedLesson, SeedQuestion};

/// Central database handle for quizwright state.
pub struct QuizDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl QuizDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let quiz_db = Self { db, conn };
        quiz_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(quiz_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
