//! Research repository: findings attached to a problem, with approval flag.

use chrono::Utc;

use disco_core::EntityId;
use disco_core::entities::Research;
use disco_core::enums::EntityType;
use disco_core::errors::require_text;
use disco_core::updates::{ResearchUpdate, ResearchUpdateBuilder};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_datetime};
use crate::repos::problem::ProblemScope;
use crate::service::DiscoService;

const RESEARCH_COLUMNS: &str = "id, problem_id, content, is_approved, created_at, updated_at";

fn row_to_research(row: &libsql::Row) -> Result<Research, DatabaseError> {
    Ok(Research {
        id: row.get::<i64>(0)?,
        problem_id: row.get::<i64>(1)?,
        content: row.get::<String>(2)?,
        is_approved: get_bool(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl DiscoService {
    /// Attach a research finding to a problem. New findings are unapproved.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (problem) if the parent does not exist, or a
    /// validation error if `content` is blank.
    pub async fn create_research(
        &self,
        problem_id: EntityId,
        content: &str,
    ) -> Result<Research, DatabaseError> {
        let content = require_text("content", content)?;
        self.require_problem(problem_id).await?;
        let now = Utc::now();

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO research (problem_id, content, is_approved, created_at, updated_at)
                 VALUES (?1, ?2, 0, ?3, ?3) RETURNING id",
                libsql::params![problem_id, content, now.to_rfc3339()],
            )
            .await?;
        let id = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;

        tracing::debug!(problem_id, id, "research created");

        Ok(Research {
            id,
            problem_id,
            content: content.to_string(),
            is_approved: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// All research for a problem, in creation order. Empty for an unknown problem.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_research(&self, problem_id: EntityId) -> Result<Vec<Research>, DatabaseError> {
        let sql = format!(
            "SELECT {RESEARCH_COLUMNS} FROM research WHERE problem_id = ?1 ORDER BY id ASC"
        );
        self.query_research(&sql, [problem_id]).await
    }

    /// Approved research for a problem, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_approved_research(
        &self,
        problem_id: EntityId,
    ) -> Result<Vec<Research>, DatabaseError> {
        let sql = format!(
            "SELECT {RESEARCH_COLUMNS} FROM research
             WHERE problem_id = ?1 AND is_approved = 1 ORDER BY id ASC"
        );
        self.query_research(&sql, [problem_id]).await
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no research with `id` belongs to `problem_id`.
    pub async fn get_research(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<Research, DatabaseError> {
        let sql =
            format!("SELECT {RESEARCH_COLUMNS} FROM research WHERE id = ?1 AND problem_id = ?2");
        self.query_research(&sql, [id, problem_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DatabaseError::not_found(EntityType::Research, id))
    }

    /// Apply a partial update to a research item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist under `problem_id`, or a
    /// validation error if a supplied `content` is blank.
    pub async fn update_research(
        &self,
        problem_id: EntityId,
        id: EntityId,
        update: ResearchUpdate,
    ) -> Result<Research, DatabaseError> {
        update.validate()?;
        if update.is_empty() {
            return self.get_research(problem_id, id).await;
        }

        let now = Utc::now();
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref content) = update.content {
            params.push(libsql::Value::Text(content.trim().to_string()));
            sets.push(format!("content = ?{idx}"));
            idx += 1;
        }
        if let Some(approved) = update.is_approved {
            params.push(libsql::Value::Integer(i64::from(approved)));
            sets.push(format!("is_approved = ?{idx}"));
            idx += 1;
        }

        params.push(libsql::Value::Text(now.to_rfc3339()));
        sets.push(format!("updated_at = ?{idx}"));
        idx += 1;

        params.push(libsql::Value::Integer(id));
        params.push(libsql::Value::Integer(problem_id));
        let sql = format!(
            "UPDATE research SET {} WHERE id = ?{idx} AND problem_id = ?{}",
            sets.join(", "),
            idx + 1
        );

        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found(EntityType::Research, id));
        }

        tracing::debug!(problem_id, id, "research updated");
        self.get_research(problem_id, id).await
    }

    /// Set the approval flag. Setting the current value again is a no-op
    /// apart from `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist under `problem_id`.
    pub async fn set_research_approval(
        &self,
        problem_id: EntityId,
        id: EntityId,
        approved: bool,
    ) -> Result<Research, DatabaseError> {
        let update = ResearchUpdateBuilder::new().is_approved(approved).build();
        self.update_research(problem_id, id, update).await
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist under `problem_id`.
    pub async fn delete_research(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "DELETE FROM research WHERE id = ?1 AND problem_id = ?2",
                [id, problem_id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found(EntityType::Research, id));
        }
        tracing::debug!(problem_id, id, "research deleted");
        Ok(())
    }

    /// Research belonging to every problem in `scope`, used to hydrate listings.
    pub(crate) async fn research_for_scope(
        &self,
        scope: ProblemScope,
    ) -> Result<Vec<Research>, DatabaseError> {
        let sql = format!(
            "SELECT {RESEARCH_COLUMNS} FROM research WHERE problem_id IN ({}) ORDER BY id ASC",
            scope.id_subquery()
        );
        self.query_research(&sql, ()).await
    }

    async fn query_research(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Research>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, params).await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_research(&row)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_problem, test_service};
    use disco_core::errors::CoreError;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_research_defaults_unapproved() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "Onboarding drop-off").await;

        let item = svc
            .create_research(problem.id, "Interviewed 5 users")
            .await
            .unwrap();
        assert_eq!(item.problem_id, problem.id);
        assert_eq!(item.content, "Interviewed 5 users");
        assert!(!item.is_approved);

        let hydrated = svc.get_problem(problem.id).await.unwrap();
        assert_eq!(hydrated.research, vec![item]);
    }

    #[tokio::test]
    async fn create_research_for_missing_problem() {
        let svc = test_service().await;
        let err = svc.create_research(77, "orphan").await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::NotFound {
                entity_type: EntityType::Problem,
                id: 77
            })
        ));
    }

    #[tokio::test]
    async fn create_research_rejects_blank_content() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let err = svc.create_research(problem.id, "").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn approved_subset_preserves_order() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let a = svc.create_research(problem.id, "a").await.unwrap();
        let b = svc.create_research(problem.id, "b").await.unwrap();
        let c = svc.create_research(problem.id, "c").await.unwrap();

        svc.set_research_approval(problem.id, c.id, true).await.unwrap();
        svc.set_research_approval(problem.id, a.id, true).await.unwrap();

        let approved: Vec<EntityId> = svc
            .list_approved_research(problem.id)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(approved, vec![a.id, c.id]);

        let all = svc.list_research(problem.id).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(!all.iter().find(|r| r.id == b.id).unwrap().is_approved);
    }

    #[tokio::test]
    async fn approval_is_idempotent() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let item = svc.create_research(problem.id, "x").await.unwrap();

        svc.set_research_approval(problem.id, item.id, true).await.unwrap();
        let again = svc.set_research_approval(problem.id, item.id, true).await.unwrap();
        assert!(again.is_approved);
        assert_eq!(svc.list_approved_research(problem.id).await.unwrap().len(), 1);

        let revoked = svc.set_research_approval(problem.id, item.id, false).await.unwrap();
        assert!(!revoked.is_approved);
        assert!(svc.list_approved_research(problem.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn research_is_scoped_to_its_problem() {
        let svc = test_service().await;
        let owner = seed_problem(&svc, "Owner").await;
        let other = seed_problem(&svc, "Other").await;
        let item = svc.create_research(owner.id, "x").await.unwrap();

        assert!(svc.get_research(other.id, item.id).await.unwrap_err().is_not_found());
        assert!(
            svc.set_research_approval(other.id, item.id, true)
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(svc.delete_research(other.id, item.id).await.unwrap_err().is_not_found());
        assert!(!svc.get_research(owner.id, item.id).await.unwrap().is_approved);
    }

    #[tokio::test]
    async fn update_research_content() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let item = svc.create_research(problem.id, "draft").await.unwrap();

        let updated = svc
            .update_research(
                problem.id,
                item.id,
                ResearchUpdateBuilder::new().content("  final  ").build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.content, "final");
        assert!(!updated.is_approved);
    }

    #[tokio::test]
    async fn delete_research_removes_from_lists() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let item = svc.create_research(problem.id, "x").await.unwrap();
        svc.set_research_approval(problem.id, item.id, true).await.unwrap();

        svc.delete_research(problem.id, item.id).await.unwrap();

        assert!(svc.list_research(problem.id).await.unwrap().is_empty());
        assert!(svc.list_approved_research(problem.id).await.unwrap().is_empty());
        assert!(svc.get_problem(problem.id).await.unwrap().research.is_empty());
        assert!(
            svc.delete_research(problem.id, item.id)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn list_research_for_unknown_problem_is_empty() {
        let svc = test_service().await;
        assert!(svc.list_research(123).await.unwrap().is_empty());
    }
}
