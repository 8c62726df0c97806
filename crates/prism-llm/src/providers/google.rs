//! Google Gemini provider implementation
//!
//! Uses the `generateContent` endpoint with the API key in the query string.
//! See: https://ai.google.dev/api/generate-content
//!
//! Only `user` messages are sent: their contents are joined with newlines
//! into a single prompt part. System and assistant turns are dropped, so
//! multi-turn context does not reach Gemini through this adapter.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;

use super::merge_payload;
use crate::{
    ChatMessage, LLMError, LLMProvider, Options, ProviderConfig, ProviderKind, Result, Role,
    Usage,
    transport::{HttpTransport, Transport},
};

/// Default Gemini API base URL
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider
pub struct GoogleProvider {
    config: ProviderConfig,
    transport: Arc<dyn Transport>,
}

impl GoogleProvider {
    /// Create a new Google provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ProviderConfig::new(api_key, DEFAULT_API_BASE))
    }

    /// Create a new Google provider with custom configuration
    pub fn with_config(config: ProviderConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    /// Create a provider that sends requests through `transport`
    pub fn with_transport(config: ProviderConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: config.with_vendor_headers([("Content-Type", "application/json".to_string())]),
            transport,
        }
    }

    /// Create a provider from `GOOGLE_API_KEY` (and optional `GOOGLE_API_BASE`)
    pub fn from_env() -> Result<Self> {
        Self::with_config(ProviderKind::Google.config_from_env()?)
    }
}

impl fmt::Debug for GoogleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Newline-join the contents of all user messages
fn flatten_user_prompt(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.has_role(Role::User))
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn first_candidate(raw: &Value) -> Option<&Value> {
    raw.get("candidates")?.get(0)
}

#[async_trait]
impl LLMProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn build_url(&self, model: &str, _messages: &[ChatMessage], _options: &Options) -> Result<String> {
        let endpoint = format!("{}/models/{model}:generateContent", self.config.base_url);
        let mut url = Url::parse(&endpoint)
            .map_err(|e| LLMError::InvalidRequest(format!("invalid endpoint {endpoint}: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url.into())
    }

    fn build_payload(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        options: &Options,
    ) -> Result<Value> {
        let prompt = flatten_user_prompt(messages);
        Ok(merge_payload(
            options,
            vec![("contents", json!([{ "parts": [{ "text": prompt }] }]))],
        ))
    }

    fn extract_text(&self, raw: &Value) -> Option<String> {
        let parts = first_candidate(raw)?.get("content")?.get("parts")?.as_array()?;
        if parts.is_empty() {
            return None;
        }
        Some(
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect(),
        )
    }

    fn extract_usage(&self, raw: &Value) -> Option<Usage> {
        raw.get("usageMetadata")?.as_object().cloned()
    }

    fn extract_finish_reason(&self, raw: &Value) -> Option<String> {
        first_candidate(raw)?
            .get("finishReason")?
            .as_str()
            .map(str::to_string)
    }
}
