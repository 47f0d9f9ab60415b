//! Small response envelopes returned by the REST surface.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::enums::EntityType;

/// Returned by every `DELETE` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    #[must_use]
    pub fn deleted(entity_type: EntityType, id: EntityId) -> Self {
        Self {
            message: format!("{entity_type} {id} deleted successfully"),
        }
    }
}

/// Returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    #[must_use]
    pub fn ok(version: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            version: version.into(),
        }
    }
}

/// Body of every non-2xx REST response: `{"error": {"code", "message"}}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorDetail {
    /// One of `not_found`, `validation`, `invalid_transition`, `internal`.
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}
