//! Problem repository: CRUD, investigate filter, child hydration.

use std::collections::HashMap;

use chrono::Utc;

use disco_core::EntityId;
use disco_core::entities::Problem;
use disco_core::enums::EntityType;
use disco_core::errors::require_text;
use disco_core::updates::ProblemUpdate;

use crate::error::DatabaseError;
use crate::helpers::{encode_string_list, get_bool, parse_datetime, parse_string_list};
use crate::service::DiscoService;

const PROBLEM_COLUMNS: &str =
    "id, brief, is_investigate, related_experiments, created_at, updated_at";

/// Which problems a listing covers. Child rows for the same set are loaded
/// through a subquery on this filter, so no per-id parameters are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProblemScope {
    All,
    Investigate,
}

impl ProblemScope {
    pub(crate) const fn filter(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Investigate => "WHERE is_investigate = 1",
        }
    }

    /// `SELECT id FROM problems ...` for an `IN (...)` clause.
    pub(crate) fn id_subquery(self) -> String {
        format!("SELECT id FROM problems {}", self.filter())
    }
}

fn row_to_problem(row: &libsql::Row) -> Result<Problem, DatabaseError> {
    Ok(Problem {
        id: row.get::<i64>(0)?,
        brief: row.get::<String>(1)?,
        is_investigate: get_bool(row, 2)?,
        related_experiments: parse_string_list(&row.get::<String>(3)?)?,
        research: Vec::new(),
        experiments: Vec::new(),
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl DiscoService {
    /// Create a new problem from its brief. Children start empty and
    /// `is_investigate` starts false.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` (wrapped) if `brief` is blank, or
    /// `DatabaseError` if the INSERT fails.
    pub async fn create_problem(&self, brief: &str) -> Result<Problem, DatabaseError> {
        let brief = require_text("brief", brief)?;
        let now = Utc::now();

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO problems (brief, is_investigate, related_experiments, created_at, updated_at)
                 VALUES (?1, 0, '[]', ?2, ?2) RETURNING id",
                libsql::params![brief, now.to_rfc3339()],
            )
            .await?;
        let id = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;

        tracing::debug!(id, "problem created");

        Ok(Problem {
            id,
            brief: brief.to_string(),
            is_investigate: false,
            related_experiments: Vec::new(),
            research: Vec::new(),
            experiments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a problem by ID with its research and experiments loaded.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the problem does not exist.
    pub async fn get_problem(&self, id: EntityId) -> Result<Problem, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PROBLEM_COLUMNS} FROM problems WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Problem, id))?;
        let mut problem = row_to_problem(&row)?;
        problem.research = self.list_research(id).await?;
        problem.experiments = self.list_experiments(id).await?;
        Ok(problem)
    }

    /// List all problems in creation order, children loaded.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_problems(&self) -> Result<Vec<Problem>, DatabaseError> {
        self.query_problems(ProblemScope::All).await
    }

    /// List problems promoted for active research (`is_investigate = true`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_investigate_problems(&self) -> Result<Vec<Problem>, DatabaseError> {
        self.query_problems(ProblemScope::Investigate).await
    }

    /// Apply a partial update. Only `Some` fields generate SET clauses.
    ///
    /// An empty update is a read: it returns the current problem.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the problem does not exist (nothing is written),
    /// or a validation error if a supplied `brief` is blank.
    pub async fn update_problem(
        &self,
        id: EntityId,
        update: ProblemUpdate,
    ) -> Result<Problem, DatabaseError> {
        update.validate()?;
        if update.is_empty() {
            return self.get_problem(id).await;
        }

        let now = Utc::now();
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref brief) = update.brief {
            params.push(libsql::Value::Text(brief.trim().to_string()));
            sets.push(format!("brief = ?{idx}"));
            idx += 1;
        }
        if let Some(flag) = update.is_investigate {
            params.push(libsql::Value::Integer(i64::from(flag)));
            sets.push(format!("is_investigate = ?{idx}"));
            idx += 1;
        }
        if let Some(ref related) = update.related_experiments {
            params.push(libsql::Value::Text(encode_string_list(related)?));
            sets.push(format!("related_experiments = ?{idx}"));
            idx += 1;
        }

        params.push(libsql::Value::Text(now.to_rfc3339()));
        sets.push(format!("updated_at = ?{idx}"));
        idx += 1;

        params.push(libsql::Value::Integer(id));
        let sql = format!("UPDATE problems SET {} WHERE id = ?{idx}", sets.join(", "));

        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found(EntityType::Problem, id));
        }

        tracing::debug!(id, "problem updated");
        self.get_problem(id).await
    }

    /// Delete a problem. Its research and experiments are removed with it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the problem does not exist.
    pub async fn delete_problem(&self, id: EntityId) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM problems WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found(EntityType::Problem, id));
        }
        tracing::debug!(id, "problem deleted (children cascaded)");
        Ok(())
    }

    /// Check that a problem exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not.
    pub(crate) async fn require_problem(&self, id: EntityId) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM problems WHERE id = ?1", [id])
            .await?;
        match rows.next().await? {
            Some(_) => Ok(()),
            None => Err(DatabaseError::not_found(EntityType::Problem, id)),
        }
    }

    async fn query_problems(&self, scope: ProblemScope) -> Result<Vec<Problem>, DatabaseError> {
        let sql = format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems {} ORDER BY id ASC",
            scope.filter()
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut problems = Vec::new();
        while let Some(row) = rows.next().await? {
            problems.push(row_to_problem(&row)?);
        }
        self.hydrate(problems, scope).await
    }

    /// Attach children to a batch of problems with one query per child table.
    async fn hydrate(
        &self,
        mut problems: Vec<Problem>,
        scope: ProblemScope,
    ) -> Result<Vec<Problem>, DatabaseError> {
        if problems.is_empty() {
            return Ok(problems);
        }

        let mut research: HashMap<EntityId, Vec<_>> = HashMap::new();
        for item in self.research_for_scope(scope).await? {
            research.entry(item.problem_id).or_default().push(item);
        }
        let mut experiments: HashMap<EntityId, Vec<_>> = HashMap::new();
        for item in self.experiments_for_scope(scope).await? {
            experiments.entry(item.problem_id).or_default().push(item);
        }

        for problem in &mut problems {
            problem.research = research.remove(&problem.id).unwrap_or_default();
            problem.experiments = experiments.remove(&problem.id).unwrap_or_default();
        }
        Ok(problems)
    }
}
