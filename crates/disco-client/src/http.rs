//! Shared request/response plumbing.
//!
//! Centralizes status-code checks (non-success → [`ClientError::Upstream`])
//! and body decoding so the resource modules stay focused on paths and
//! payloads.

use disco_core::responses::ErrorBody;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ApiClient;
use crate::error::ClientError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise the body is read and,
/// when it carries the API's `{"error": {...}}` envelope, its message is
/// surfaced; any other body is passed through verbatim.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(ClientError::Upstream {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

impl ApiClient {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        tracing::debug!(path, "GET");
        let resp = check_response(self.http.get(self.url(path)).send().await?).await?;
        decode(resp).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(%method, path, "sending");
        let resp = check_response(
            self.http
                .request(method, self.url(path))
                .json(body)
                .send()
                .await?,
        )
        .await?;
        decode(resp).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        tracing::debug!(path, "DELETE");
        let resp = check_response(self.http.delete(self.url(path)).send().await?).await?;
        decode(resp).await
    }
}
