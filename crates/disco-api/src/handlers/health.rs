use axum::Json;
use disco_core::responses::HealthResponse;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(env!("CARGO_PKG_VERSION")))
}
