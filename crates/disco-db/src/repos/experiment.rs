//! Experiment repository: proposals, approval, status lifecycle, result link.

use chrono::Utc;

use disco_core::EntityId;
use disco_core::entities::Experiment;
use disco_core::enums::{EntityType, ExperimentStatus};
use disco_core::errors::{CoreError, require_text};
use disco_core::updates::ExperimentUpdate;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime, parse_enum};
use crate::repos::problem::ProblemScope;
use crate::service::DiscoService;

const EXPERIMENT_COLUMNS: &str =
    "id, problem_id, proposal, is_approved, status, url, created_at, updated_at";

fn row_to_experiment(row: &libsql::Row) -> Result<Experiment, DatabaseError> {
    Ok(Experiment {
        id: row.get::<i64>(0)?,
        problem_id: row.get::<i64>(1)?,
        proposal: row.get::<String>(2)?,
        is_approved: get_bool(row, 3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        url: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl DiscoService {
    /// Propose an experiment for a problem. New experiments are unapproved,
    /// `NOT STARTED`, and have no result link.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (problem) if the parent does not exist, or a
    /// validation error if `proposal` is blank.
    pub async fn create_experiment(
        &self,
        problem_id: EntityId,
        proposal: &str,
    ) -> Result<Experiment, DatabaseError> {
        let proposal = require_text("proposal", proposal)?;
        self.require_problem(problem_id).await?;
        let now = Utc::now();
        let status = ExperimentStatus::default();

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO experiments (problem_id, proposal, is_approved, status, url, created_at, updated_at)
                 VALUES (?1, ?2, 0, ?3, NULL, ?4, ?4) RETURNING id",
                libsql::params![problem_id, proposal, status.as_str(), now.to_rfc3339()],
            )
            .await?;
        let id = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;

        tracing::debug!(problem_id, id, "experiment created");

        Ok(Experiment {
            id,
            problem_id,
            proposal: proposal.to_string(),
            is_approved: false,
            status,
            url: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// All experiments for a problem, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_experiments(
        &self,
        problem_id: EntityId,
    ) -> Result<Vec<Experiment>, DatabaseError> {
        let sql = format!(
            "SELECT {EXPERIMENT_COLUMNS} FROM experiments WHERE problem_id = ?1 ORDER BY id ASC"
        );
        self.query_experiments(&sql, [problem_id]).await
    }

    /// Approved experiments for a problem, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_approved_experiments(
        &self,
        problem_id: EntityId,
    ) -> Result<Vec<Experiment>, DatabaseError> {
        let sql = format!(
            "SELECT {EXPERIMENT_COLUMNS} FROM experiments
             WHERE problem_id = ?1 AND is_approved = 1 ORDER BY id ASC"
        );
        self.query_experiments(&sql, [problem_id]).await
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no experiment with `id` belongs to `problem_id`.
    pub async fn get_experiment(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<Experiment, DatabaseError> {
        let sql = format!(
            "SELECT {EXPERIMENT_COLUMNS} FROM experiments WHERE id = ?1 AND problem_id = ?2"
        );
        self.query_experiments(&sql, [id, problem_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DatabaseError::not_found(EntityType::Experiment, id))
    }

    /// Apply a partial update to an experiment.
    ///
    /// With strict transitions enabled, a status change off the forward path
    /// (`NOT STARTED` -> `IN PROGRESS` -> `FINISHED`) is rejected before
    /// anything is written. Re-applying the current status is always allowed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the experiment does not exist under `problem_id`,
    /// `InvalidTransition` under strict mode, or a validation error if a
    /// supplied `proposal` or `url` is blank.
    pub async fn update_experiment(
        &self,
        problem_id: EntityId,
        id: EntityId,
        update: ExperimentUpdate,
    ) -> Result<Experiment, DatabaseError> {
        update.validate()?;
        if update.is_empty() {
            return self.get_experiment(problem_id, id).await;
        }

        if let Some(next) = update.status {
            if self.strict_transitions() {
                let current = self.get_experiment(problem_id, id).await?;
                if !current.status.can_transition_to(next) {
                    tracing::warn!(
                        id,
                        from = %current.status,
                        to = %next,
                        "rejected experiment status transition"
                    );
                    return Err(CoreError::InvalidTransition {
                        entity_type: EntityType::Experiment,
                        id,
                        from: current.status,
                        to: next,
                    }
                    .into());
                }
            }
        }

        let now = Utc::now();
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref proposal) = update.proposal {
            params.push(libsql::Value::Text(proposal.trim().to_string()));
            sets.push(format!("proposal = ?{idx}"));
            idx += 1;
        }
        if let Some(approved) = update.is_approved {
            params.push(libsql::Value::Integer(i64::from(approved)));
            sets.push(format!("is_approved = ?{idx}"));
            idx += 1;
        }
        if let Some(status) = update.status {
            params.push(libsql::Value::Text(status.as_str().to_string()));
            sets.push(format!("status = ?{idx}"));
            idx += 1;
        }
        if let Some(ref url) = update.url {
            params.push(
                url.as_deref()
                    .map_or(libsql::Value::Null, |u| libsql::Value::Text(u.trim().to_string())),
            );
            sets.push(format!("url = ?{idx}"));
            idx += 1;
        }

        params.push(libsql::Value::Text(now.to_rfc3339()));
        sets.push(format!("updated_at = ?{idx}"));
        idx += 1;

        params.push(libsql::Value::Integer(id));
        params.push(libsql::Value::Integer(problem_id));
        let sql = format!(
            "UPDATE experiments SET {} WHERE id = ?{idx} AND problem_id = ?{}",
            sets.join(", "),
            idx + 1
        );

        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found(EntityType::Experiment, id));
        }

        tracing::debug!(problem_id, id, status = ?update.status, "experiment updated");
        self.get_experiment(problem_id, id).await
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the experiment does not exist under `problem_id`.
    pub async fn delete_experiment(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "DELETE FROM experiments WHERE id = ?1 AND problem_id = ?2",
                [id, problem_id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found(EntityType::Experiment, id));
        }
        tracing::debug!(problem_id, id, "experiment deleted");
        Ok(())
    }

    /// Experiments belonging to every problem in `scope`, used to hydrate listings.
    pub(crate) async fn experiments_for_scope(
        &self,
        scope: ProblemScope,
    ) -> Result<Vec<Experiment>, DatabaseError> {
        let sql = format!(
            "SELECT {EXPERIMENT_COLUMNS} FROM experiments WHERE problem_id IN ({}) ORDER BY id ASC",
            scope.id_subquery()
        );
        self.query_experiments(&sql, ()).await
    }

    async fn query_experiments(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Experiment>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, params).await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_experiment(&row)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_problem, strict_service, test_service};
    use disco_core::updates::ExperimentUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn status(s: ExperimentStatus) -> ExperimentUpdate {
        ExperimentUpdateBuilder::new().status(s).build()
    }

    #[tokio::test]
    async fn create_experiment_defaults() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;

        let exp = svc
            .create_experiment(problem.id, "A/B test the signup button")
            .await
            .unwrap();
        assert_eq!(exp.status, ExperimentStatus::NotStarted);
        assert!(!exp.is_approved);
        assert_eq!(exp.url, None);

        let stored = svc.get_experiment(problem.id, exp.id).await.unwrap();
        assert_eq!(stored, exp);
    }

    #[tokio::test]
    async fn create_experiment_for_missing_problem() {
        let svc = test_service().await;
        let err = svc.create_experiment(9, "x").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn lifecycle_start_then_complete_with_url() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let exp = svc.create_experiment(problem.id, "x").await.unwrap();

        svc.update_experiment(
            problem.id,
            exp.id,
            ExperimentUpdateBuilder::new().is_approved(true).build(),
        )
        .await
        .unwrap();
        let started = svc
            .update_experiment(problem.id, exp.id, status(ExperimentStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(started.status, ExperimentStatus::InProgress);

        let finished = svc
            .update_experiment(
                problem.id,
                exp.id,
                ExperimentUpdateBuilder::new()
                    .status(ExperimentStatus::Finished)
                    .url(Some("https://example.com/r".into()))
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(finished.status, ExperimentStatus::Finished);
        assert_eq!(finished.url.as_deref(), Some("https://example.com/r"));
        assert!(finished.is_approved);
    }

    #[tokio::test]
    async fn url_can_be_cleared() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let exp = svc.create_experiment(problem.id, "x").await.unwrap();
        svc.update_experiment(
            problem.id,
            exp.id,
            ExperimentUpdateBuilder::new().url(Some("https://r".into())).build(),
        )
        .await
        .unwrap();

        let cleared = svc
            .update_experiment(
                problem.id,
                exp.id,
                ExperimentUpdateBuilder::new().url(None).build(),
            )
            .await
            .unwrap();
        assert_eq!(cleared.url, None);
    }

    #[tokio::test]
    async fn blank_url_is_rejected_and_link_kept() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let exp = svc.create_experiment(problem.id, "x").await.unwrap();
        svc.update_experiment(
            problem.id,
            exp.id,
            ExperimentUpdateBuilder::new().url(Some(" https://r ".into())).build(),
        )
        .await
        .unwrap();

        let err = svc
            .update_experiment(
                problem.id,
                exp.id,
                ExperimentUpdateBuilder::new().url(Some(String::new())).build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::Validation(_))
        ));

        let current = svc.get_experiment(problem.id, exp.id).await.unwrap();
        assert_eq!(current.url.as_deref(), Some("https://r"));
    }

    #[tokio::test]
    async fn permissive_mode_allows_backward_transition() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let exp = svc.create_experiment(problem.id, "x").await.unwrap();
        svc.update_experiment(problem.id, exp.id, status(ExperimentStatus::Finished))
            .await
            .unwrap();

        let reverted = svc
            .update_experiment(problem.id, exp.id, status(ExperimentStatus::NotStarted))
            .await
            .unwrap();
        assert_eq!(reverted.status, ExperimentStatus::NotStarted);
    }

    #[tokio::test]
    async fn strict_mode_rejects_illegal_transition_without_writing() {
        let svc = strict_service().await;
        let problem = seed_problem(&svc, "P").await;
        let exp = svc.create_experiment(problem.id, "x").await.unwrap();

        let err = svc
            .update_experiment(
                problem.id,
                exp.id,
                ExperimentUpdateBuilder::new()
                    .status(ExperimentStatus::Finished)
                    .proposal("changed")
                    .build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidTransition {
                from: ExperimentStatus::NotStarted,
                to: ExperimentStatus::Finished,
                ..
            })
        ));

        let unchanged = svc.get_experiment(problem.id, exp.id).await.unwrap();
        assert_eq!(unchanged.status, ExperimentStatus::NotStarted);
        assert_eq!(unchanged.proposal, "x");
    }

    #[tokio::test]
    async fn strict_mode_allows_forward_path_and_same_state() {
        let svc = strict_service().await;
        let problem = seed_problem(&svc, "P").await;
        let exp = svc.create_experiment(problem.id, "x").await.unwrap();

        for next in [
            ExperimentStatus::NotStarted,
            ExperimentStatus::InProgress,
            ExperimentStatus::InProgress,
            ExperimentStatus::Finished,
        ] {
            let updated = svc
                .update_experiment(problem.id, exp.id, status(next))
                .await
                .unwrap();
            assert_eq!(updated.status, next);
        }
    }

    #[tokio::test]
    async fn strict_mode_missing_experiment_is_not_found() {
        let svc = strict_service().await;
        let problem = seed_problem(&svc, "P").await;
        let err = svc
            .update_experiment(problem.id, 404, status(ExperimentStatus::InProgress))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn approved_experiments_subset() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let a = svc.create_experiment(problem.id, "a").await.unwrap();
        svc.create_experiment(problem.id, "b").await.unwrap();
        svc.update_experiment(
            problem.id,
            a.id,
            ExperimentUpdateBuilder::new().is_approved(true).build(),
        )
        .await
        .unwrap();

        let approved = svc.list_approved_experiments(problem.id).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, a.id);
        assert_eq!(svc.list_experiments(problem.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn experiment_is_scoped_to_its_problem() {
        let svc = test_service().await;
        let owner = seed_problem(&svc, "Owner").await;
        let other = seed_problem(&svc, "Other").await;
        let exp = svc.create_experiment(owner.id, "x").await.unwrap();

        assert!(
            svc.update_experiment(other.id, exp.id, status(ExperimentStatus::InProgress))
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert_eq!(
            svc.get_experiment(owner.id, exp.id).await.unwrap().status,
            ExperimentStatus::NotStarted
        );
    }

    #[tokio::test]
    async fn delete_experiment_removes_from_lists() {
        let svc = test_service().await;
        let problem = seed_problem(&svc, "P").await;
        let exp = svc.create_experiment(problem.id, "x").await.unwrap();

        svc.delete_experiment(problem.id, exp.id).await.unwrap();

        assert!(svc.list_experiments(problem.id).await.unwrap().is_empty());
        assert!(svc.get_experiment(problem.id, exp.id).await.unwrap_err().is_not_found());
        assert!(
            svc.delete_experiment(problem.id, exp.id)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}
