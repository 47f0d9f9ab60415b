//! Read-only resources.
//!
//! - `disco://problems/investigate`: problems flagged for research
//! - `disco://problems/{id}`: one problem (resource template)

use disco_client::ApiClient;
use disco_core::EntityId;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::McpError;

pub const INVESTIGATE_URI: &str = "disco://problems/investigate";
pub const PROBLEM_URI_TEMPLATE: &str = "disco://problems/{id}";

const PROBLEM_URI_PREFIX: &str = "disco://problems/";
const MIME_JSON: &str = "application/json";

/// Entry of `resources/list`.
#[must_use]
pub fn list() -> Value {
    json!({
        "resources": [{
            "uri": INVESTIGATE_URI,
            "name": "Problems to investigate",
            "description": "Problems flagged for active research, with their research and experiments.",
            "mimeType": MIME_JSON,
        }]
    })
}

/// Entry of `resources/templates/list`.
#[must_use]
pub fn templates() -> Value {
    json!({
        "resourceTemplates": [{
            "uriTemplate": PROBLEM_URI_TEMPLATE,
            "name": "Problem",
            "description": "One problem with its research and experiments.",
            "mimeType": MIME_JSON,
        }]
    })
}

/// A parsed resource URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Investigate,
    Problem(EntityId),
}

impl Resource {
    /// # Errors
    ///
    /// Returns `UnknownResource` for any URI outside the two shapes above.
    pub fn parse(uri: &str) -> Result<Self, McpError> {
        if uri == INVESTIGATE_URI {
            return Ok(Self::Investigate);
        }
        uri.strip_prefix(PROBLEM_URI_PREFIX)
            .and_then(|id| id.parse::<EntityId>().ok())
            .map(Self::Problem)
            .ok_or_else(|| McpError::UnknownResource(uri.to_string()))
    }

    /// Fetch the resource and wrap it in a `resources/read` result.
    ///
    /// # Errors
    ///
    /// Returns `McpError::Client` if the REST call fails.
    pub async fn read(self, uri: &str, client: &ApiClient) -> Result<Value, McpError> {
        let text = match self {
            Self::Investigate => pretty(&client.list_investigate_problems().await?),
            Self::Problem(id) => pretty(&client.get_problem(id).await?),
        };
        Ok(json!({
            "contents": [{ "uri": uri, "mimeType": MIME_JSON, "text": text }]
        }))
    }
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("disco://problems/investigate", Resource::Investigate)]
    #[case("disco://problems/7", Resource::Problem(7))]
    fn parses_known_uris(#[case] uri: &str, #[case] expected: Resource) {
        assert_eq!(Resource::parse(uri).unwrap(), expected);
    }

    #[rstest]
    #[case("disco://problems/")]
    #[case("disco://problems/seven")]
    #[case("file:///etc/passwd")]
    fn rejects_other_uris(#[case] uri: &str) {
        let err = Resource::parse(uri).unwrap_err();
        assert_eq!(err.code(), -32002);
    }

    #[test]
    fn listings_advertise_json() {
        assert_eq!(list()["resources"][0]["mimeType"], MIME_JSON);
        assert_eq!(
            templates()["resourceTemplates"][0]["uriTemplate"],
            PROBLEM_URI_TEMPLATE
        );
    }
}
