//! HTTP transport
//!
//! One POST per call, no retries. Dropping the future returned by
//! [`Transport::post_json`] aborts the in-flight request.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use prism_utils::redact_headers;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use crate::{LLMError, Result};

/// Sends a JSON body and yields the parsed JSON reply
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `payload` to `url`
    ///
    /// Non-2xx statuses fail with [`LLMError::RequestFailed`] without the
    /// body being parsed. A 2xx body that is not JSON fails with
    /// [`LLMError::MalformedResponse`].
    async fn post_json(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        payload: &Value,
        timeout: Duration,
    ) -> Result<Value>;
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a fresh client
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Reuse an existing client (and its connection pool)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

// reqwest errors print the request URL, which carries the Google API key
fn map_send_error(err: reqwest::Error, timeout: Duration) -> LLMError {
    if err.is_timeout() {
        LLMError::Timeout(timeout)
    } else {
        LLMError::HttpError(err.without_url())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        payload: &Value,
        timeout: Duration,
    ) -> Result<Value> {
        let body = serde_json::to_vec(payload)?;

        let mut request = self.client.post(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !headers.keys().any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE.as_str())) {
            request = request.header(CONTENT_TYPE, "application/json");
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| map_send_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let headers = redact_headers(
                response
                    .headers()
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.to_str().unwrap_or("<non-ascii>"))),
            );
            let body = response.text().await.unwrap_or_else(|e| {
                let e = e.without_url();
                debug!(error = %e, "error body could not be read");
                format!("<unreadable body: {e}>")
            });
            return Err(LLMError::RequestFailed {
                status: status.as_u16(),
                headers,
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_send_error(e, timeout))?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "response body received");

        serde_json::from_slice(&bytes).map_err(|e| LLMError::MalformedResponse {
            reason: e.to_string(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
