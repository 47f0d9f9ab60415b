//! REST surface tests, driving the router in-process with `oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use disco_api::{AppState, router};
use disco_config::ServerConfig;
use disco_db::DiscoService;

async fn test_app(strict: bool) -> Router {
    let service = DiscoService::new_local(":memory:", strict).await.unwrap();
    router(AppState::new(service), &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_problem(app: &Router, brief: &str) -> i64 {
    let (status, body) = send(app, Method::POST, "/problems", Some(json!({ "brief": brief }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app(false).await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ---------------------------------------------------------------------------
// Problems
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_problem_returns_defaults() {
    let app = test_app(false).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/problems",
        Some(json!({ "brief": "Users abandon checkout" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["brief"], "Users abandon checkout");
    assert_eq!(body["isInvestigate"], false);
    assert_eq!(body["research"], json!([]));
    assert_eq!(body["experiments"], json!([]));
}

#[rstest]
#[case::patch(Method::PATCH)]
#[case::put(Method::PUT)]
#[tokio::test]
async fn promote_problem_for_investigation(#[case] method: Method) {
    let app = test_app(false).await;
    let id = create_problem(&app, "Onboarding drop-off").await;
    create_problem(&app, "Not yet").await;

    let (status, body) = send(
        &app,
        method,
        &format!("/problems/{id}"),
        Some(json!({ "isInvestigate": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isInvestigate"], true);
    assert_eq!(body["brief"], "Onboarding drop-off");

    let (status, body) = send(&app, Method::GET, "/problems/investigate", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![id]);
}

#[tokio::test]
async fn update_missing_problem_is_404_and_creates_nothing() {
    let app = test_app(false).await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/problems/999",
        Some(json!({ "brief": "ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (_, list) = send(&app, Method::GET, "/problems", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn blank_brief_is_400() {
    let app = test_app(false).await;
    let (status, body) = send(&app, Method::POST, "/problems", Some(json!({ "brief": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = test_app(false).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/problems")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = test_app(false).await;
    let (status, body) = send(&app, Method::GET, "/problems/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation");
}

#[tokio::test]
async fn delete_problem_cascades() {
    let app = test_app(false).await;
    let id = create_problem(&app, "Doomed").await;
    send(
        &app,
        Method::POST,
        &format!("/problems/{id}/research"),
        Some(json!({ "content": "finding" })),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, &format!("/problems/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("problem {id} deleted successfully"));

    let (status, _) = send(&app, Method::GET, &format!("/problems/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, Method::GET, &format!("/problems/{id}/research"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(&app, Method::DELETE, &format!("/problems/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Research
// ---------------------------------------------------------------------------

#[tokio::test]
async fn research_review_flow() {
    let app = test_app(false).await;
    let pid = create_problem(&app, "Checkout is slow").await;

    let (status, first) = send(
        &app,
        Method::POST,
        &format!("/problems/{pid}/research"),
        Some(json!({ "content": "p95 latency is 4s" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["isApproved"], false);
    assert_eq!(first["problemId"], pid);
    let rid = first["id"].as_i64().unwrap();

    send(
        &app,
        Method::POST,
        &format!("/problems/{pid}/research"),
        Some(json!({ "content": "Competitors load in 1s" })),
    )
    .await;

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/problems/{pid}/research/{rid}"),
            Some(json!({ "isApproved": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isApproved"], true);
    }

    let (_, approved) = send(
        &app,
        Method::GET,
        &format!("/problems/{pid}/research/approved"),
        None,
    )
    .await;
    assert_eq!(approved.as_array().unwrap().len(), 1);
    assert_eq!(approved[0]["content"], "p95 latency is 4s");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/problems/{pid}/research/{rid}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("research {rid} deleted successfully"));

    let (_, all) = send(&app, Method::GET, &format!("/problems/{pid}/research"), None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/problems/{pid}/research/{rid}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn research_for_missing_problem_is_404() {
    let app = test_app(false).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/problems/42/research",
        Some(json!({ "content": "orphan" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn research_under_wrong_problem_is_404() {
    let app = test_app(false).await;
    let owner = create_problem(&app, "Owner").await;
    let other = create_problem(&app, "Other").await;
    let (_, item) = send(
        &app,
        Method::POST,
        &format!("/problems/{owner}/research"),
        Some(json!({ "content": "x" })),
    )
    .await;
    let rid = item["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/problems/{other}/research/{rid}"),
        Some(json!({ "isApproved": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Experiments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn experiment_lifecycle() {
    let app = test_app(false).await;
    let pid = create_problem(&app, "Low activation").await;

    let (status, exp) = send(
        &app,
        Method::POST,
        &format!("/problems/{pid}/experiments"),
        Some(json!({ "proposal": "Guided tour" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(exp["status"], "NOT STARTED");
    assert_eq!(exp["isApproved"], false);
    assert_eq!(exp["url"], Value::Null);
    let eid = exp["id"].as_i64().unwrap();
    let uri = format!("/problems/{pid}/experiments/{eid}");

    let (_, body) = send(&app, Method::PATCH, &uri, Some(json!({ "isApproved": true }))).await;
    assert_eq!(body["isApproved"], true);

    let (_, body) = send(&app, Method::PATCH, &uri, Some(json!({ "status": "IN PROGRESS" }))).await;
    assert_eq!(body["status"], "IN PROGRESS");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "status": "FINISHED", "url": "https://example.com/results" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "FINISHED");
    assert_eq!(body["url"], "https://example.com/results");

    let (_, approved) = send(
        &app,
        Method::GET,
        &format!("/problems/{pid}/experiments/approved"),
        None,
    )
    .await;
    assert_eq!(approved.as_array().unwrap().len(), 1);

    let (_, problem) = send(&app, Method::GET, &format!("/problems/{pid}"), None).await;
    assert_eq!(problem["experiments"][0]["status"], "FINISHED");
}

#[tokio::test]
async fn unknown_status_is_400() {
    let app = test_app(false).await;
    let pid = create_problem(&app, "P").await;
    let (_, exp) = send(
        &app,
        Method::POST,
        &format!("/problems/{pid}/experiments"),
        Some(json!({ "proposal": "x" })),
    )
    .await;
    let eid = exp["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/problems/{pid}/experiments/{eid}"),
        Some(json!({ "status": "DONE" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_url_is_400() {
    let app = test_app(false).await;
    let pid = create_problem(&app, "P").await;
    let (_, exp) = send(
        &app,
        Method::POST,
        &format!("/problems/{pid}/experiments"),
        Some(json!({ "proposal": "x" })),
    )
    .await;
    let eid = exp["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/problems/{pid}/experiments/{eid}"),
        Some(json!({ "url": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation");

    let (status, cleared) = send(
        &app,
        Method::PATCH,
        &format!("/problems/{pid}/experiments/{eid}"),
        Some(json!({ "url": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["url"].is_null());
}

#[tokio::test]
async fn strict_mode_rejects_skipping_in_progress() {
    let app = test_app(true).await;
    let pid = create_problem(&app, "P").await;
    let (_, exp) = send(
        &app,
        Method::POST,
        &format!("/problems/{pid}/experiments"),
        Some(json!({ "proposal": "x" })),
    )
    .await;
    let eid = exp["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/problems/{pid}/experiments/{eid}"),
        Some(json!({ "status": "FINISHED" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "invalid_transition");
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = test_app(false).await;
    let request = Request::builder()
        .uri("/problems")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
