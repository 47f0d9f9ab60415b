//! HTTP error mapping.
//!
//! | Source                                   | Status | `code`               |
//! |------------------------------------------|--------|----------------------|
//! | `CoreError::NotFound`                    | 404    | `not_found`          |
//! | `CoreError::Validation`, bad JSON / path | 400    | `validation`         |
//! | `CoreError::InvalidTransition`           | 409    | `invalid_transition` |
//! | anything else                            | 500    | `internal`           |
//!
//! Internal errors are logged and their message is withheld from the body.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use disco_core::errors::CoreError;
use disco_core::responses::ErrorBody;
use disco_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Request body or path could not be decoded.
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Database(DatabaseError::Core(core)) => match core {
                CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::InvalidTransition { .. } => StatusCode::CONFLICT,
                CoreError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::BAD_REQUEST => "validation",
            StatusCode::CONFLICT => "invalid_transition",
            _ => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
            self.to_string()
        };
        (status, Json(ErrorBody::new(self.code(), message))).into_response()
    }
}
