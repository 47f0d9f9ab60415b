//! Service layer applying workflow policy on top of `DiscoDb`.
//!
//! `DiscoService` wraps `DiscoDb` (raw database access) and the workflow
//! settings. All repo methods are implemented as `impl DiscoService` blocks in
//! [`crate::repos`].

use crate::DiscoDb;
use crate::error::DatabaseError;

/// Orchestrates validated reads and writes for every entity.
///
/// Every mutation method follows this protocol:
/// 1. Validate the payload (required text, update not empty where relevant)
/// 2. Check workflow rules that need the current row (strict transitions)
/// 3. Execute a single SQL statement
/// 4. Treat zero affected rows as `NotFound`
pub struct DiscoService {
    db: DiscoDb,
    strict_transitions: bool,
}

impl DiscoService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `strict_transitions` - Reject experiment status changes off the
    ///   forward path.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, strict_transitions: bool) -> Result<Self, DatabaseError> {
        let db = DiscoDb::open_local(db_path).await?;
        Ok(Self::from_db(db, strict_transitions))
    }

    /// Create from an existing `DiscoDb`.
    #[must_use]
    pub const fn from_db(db: DiscoDb, strict_transitions: bool) -> Self {
        Self {
            db,
            strict_transitions,
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &DiscoDb {
        &self.db
    }

    /// Whether experiment status transitions are enforced.
    #[must_use]
    pub const fn strict_transitions(&self) -> bool {
        self.strict_transitions
    }
}
