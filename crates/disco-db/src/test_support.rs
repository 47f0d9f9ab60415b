//! Shared test utilities for disco-db unit tests.

pub(crate) mod helpers {
    use disco_core::entities::Problem;

    use crate::service::DiscoService;

    /// In-memory service with the permissive (default) workflow policy.
    pub async fn test_service() -> DiscoService {
        DiscoService::new_local(":memory:", false).await.unwrap()
    }

    /// In-memory service that enforces forward-only experiment transitions.
    pub async fn strict_service() -> DiscoService {
        DiscoService::new_local(":memory:", true).await.unwrap()
    }

    /// Create a problem and return it (convenience for child-entity tests).
    pub async fn seed_problem(svc: &DiscoService, brief: &str) -> Problem {
        svc.create_problem(brief).await.unwrap()
    }
}
