//! Route table.
//!
//! Children are nested under their problem; the path parameter in the
//! problem position is always `:problem_id` so the routes do not conflict.

use axum::Router;
use axum::routing::get;
use disco_config::ServerConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{experiments, health, problems, research};
use crate::state::AppState;

/// Build the API router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/health", get(health::health))
        .route("/problems", get(problems::list).post(problems::create))
        .route("/problems/investigate", get(problems::list_investigate))
        .route(
            "/problems/:problem_id",
            get(problems::get)
                .put(problems::update)
                .patch(problems::update)
                .delete(problems::delete),
        )
        .route(
            "/problems/:problem_id/research",
            get(research::list).post(research::create),
        )
        .route(
            "/problems/:problem_id/research/approved",
            get(research::list_approved),
        )
        .route(
            "/problems/:problem_id/research/:id",
            get(research::get)
                .patch(research::update)
                .delete(research::delete),
        )
        .route(
            "/problems/:problem_id/experiments",
            get(experiments::list).post(experiments::create),
        )
        .route(
            "/problems/:problem_id/experiments/approved",
            get(experiments::list_approved),
        )
        .route(
            "/problems/:problem_id/experiments/:id",
            get(experiments::get)
                .patch(experiments::update)
                .delete(experiments::delete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.permissive_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
