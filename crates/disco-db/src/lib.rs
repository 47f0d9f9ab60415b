//! # disco-db
//!
//! libSQL storage for Disco state.
//!
//! Handles all relational state: problems, their research findings, and their
//! experiments. One table per entity; children reference their owning problem
//! with `ON DELETE CASCADE`, so deleting a problem removes its children.
//!
//! Uses the `libsql` crate in local mode. Each call is an independent
//! statement against a single shared connection; there are no cross-record
//! transactions.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use service::DiscoService;

/// Central database handle for all Disco state operations.
///
/// Wraps a libSQL database and its connection. Repository methods live on
/// [`DiscoService`], which adds workflow policy on top of this handle.
pub struct DiscoDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl DiscoDb {
    /// Open a local database at the given path, or `":memory:"` for tests.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite; cascade deletes depend on them.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let disco_db = Self { db, conn };
        disco_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(disco_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
