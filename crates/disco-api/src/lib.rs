//! # disco-api
//!
//! REST surface for Disco. The only component with write access to the
//! stores: every other client (CLI, agent-tool adapter, browser) goes through
//! the routes built here.
//!
//! - [`router`] builds the axum `Router` for a given [`AppState`]
//! - [`serve`] opens the database from configuration, binds, and runs until
//!   Ctrl-C
//! - [`ApiError`] maps store errors onto HTTP status codes and the
//!   `{"error": {"code", "message"}}` body

pub mod error;
mod handlers;
pub mod router;
pub mod state;

use disco_config::DiscoConfig;
use disco_db::DiscoService;
use disco_db::error::DatabaseError;
use thiserror::Error;
use tokio::net::TcpListener;

pub use error::ApiError;
pub use router::router;
pub use state::AppState;

/// Errors that stop the server from starting or keep it from running.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] disco_config::ConfigError),

    #[error("failed to open database: {0}")]
    Database(#[from] DatabaseError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Open the store described by `config` and serve the API until Ctrl-C.
///
/// # Errors
///
/// Returns `ServeError` if the database cannot be opened, the bind address
/// is invalid or taken, or the server fails while running.
pub async fn serve(config: &DiscoConfig) -> Result<(), ServeError> {
    if let Some(dir) = config.database.parent_dir() {
        std::fs::create_dir_all(&dir)?;
    }
    let service = DiscoService::new_local(
        &config.database.path,
        config.workflow.strict_transitions,
    )
    .await?;

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    tracing::info!(
        %addr,
        database = %config.database.path,
        strict_transitions = config.workflow.strict_transitions,
        "disco api listening"
    );

    let app = router(AppState::new(service), &config.server);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("disco api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}
