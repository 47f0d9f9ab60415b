//! Client round trips against a real API server on an ephemeral port.

use pretty_assertions::assert_eq;

use disco_api::{AppState, router};
use disco_client::{ApiClient, ClientError};
use disco_config::{ClientConfig, ServerConfig};
use disco_core::enums::ExperimentStatus;
use disco_core::updates::ProblemUpdateBuilder;
use disco_db::DiscoService;

async fn spawn_api() -> ApiClient {
    let service = DiscoService::new_local(":memory:", false).await.unwrap();
    let app = router(AppState::new(service), &ServerConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(&ClientConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn health_check() {
    let client = spawn_api().await;
    assert_eq!(client.health().await.unwrap().status, "ok");
}

#[tokio::test]
async fn problem_round_trip() {
    let client = spawn_api().await;

    let created = client.create_problem("Users churn after trial").await.unwrap();
    assert!(!created.is_investigate);

    let updated = client
        .update_problem(
            created.id,
            &ProblemUpdateBuilder::new().is_investigate(true).build(),
        )
        .await
        .unwrap();
    assert!(updated.is_investigate);

    let promoted = client.list_investigate_problems().await.unwrap();
    assert_eq!(promoted.len(), 1);

    let deleted = client.delete_problem(created.id).await.unwrap();
    assert_eq!(
        deleted.message,
        format!("problem {} deleted successfully", created.id)
    );
    assert!(client.list_problems().await.unwrap().is_empty());
}

#[tokio::test]
async fn research_approval_round_trip() {
    let client = spawn_api().await;
    let problem = client.create_problem("P").await.unwrap();

    let item = client.add_research(problem.id, "finding").await.unwrap();
    client
        .set_research_approval(problem.id, item.id, true)
        .await
        .unwrap();

    let approved = client.list_approved_research(problem.id).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert!(approved[0].is_approved);

    client.delete_research(problem.id, item.id).await.unwrap();
    assert!(client.list_research(problem.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn experiment_start_and_complete() {
    let client = spawn_api().await;
    let problem = client.create_problem("P").await.unwrap();
    let exp = client.add_experiment(problem.id, "Try it").await.unwrap();

    let started = client.start_experiment(problem.id, exp.id).await.unwrap();
    assert_eq!(started.status, ExperimentStatus::InProgress);

    let done = client
        .complete_experiment(problem.id, exp.id, Some("https://example.com/r".into()))
        .await
        .unwrap();
    assert_eq!(done.status, ExperimentStatus::Finished);
    assert_eq!(done.url.as_deref(), Some("https://example.com/r"));

    let again = client
        .complete_experiment(problem.id, exp.id, None)
        .await
        .unwrap();
    assert_eq!(again.url.as_deref(), Some("https://example.com/r"));
}

#[tokio::test]
async fn missing_problem_surfaces_upstream_404() {
    let client = spawn_api().await;
    let err = client.get_problem(999).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ClientError::Upstream { status: 404, .. }));
    assert!(err.to_string().contains("problem 999"));
}

#[tokio::test]
async fn unreachable_api_is_http_error() {
    let client = ApiClient::new(&ClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 1,
    })
    .unwrap();
    let err = client.list_problems().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert_eq!(err.status(), None);
}
