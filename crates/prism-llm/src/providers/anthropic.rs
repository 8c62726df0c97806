//! Anthropic Claude provider implementation
//!
//! This module implements the LLMProvider trait for Anthropic's Claude models.
//! See: https://docs.anthropic.com/en/api/messages

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::merge_payload;
use crate::{
    ChatMessage, LLMProvider, Options, ProviderConfig, ProviderKind, Result, Usage,
    transport::{HttpTransport, Transport},
};

/// Default Anthropic API base URL
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";

/// Value of the `anthropic-version` header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// `max_tokens` is mandatory on the Messages API
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Adapter for the Anthropic Messages API
///
/// The model name is passed through as given.
pub struct AnthropicProvider {
    config: ProviderConfig,
    transport: Arc<dyn Transport>,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ProviderConfig::new(api_key, DEFAULT_API_BASE))
    }

    /// Create a new Anthropic provider with custom configuration
    pub fn with_config(config: ProviderConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    /// Create a provider that sends requests through `transport`
    pub fn with_transport(config: ProviderConfig, transport: Arc<dyn Transport>) -> Self {
        let auth = [
            ("x-api-key", config.api_key.clone()),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
            ("content-type", "application/json".to_string()),
        ];
        Self {
            config: config.with_vendor_headers(auth),
            transport,
        }
    }

    /// Create a provider from environment variable
    ///
    /// Reads the API key from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ProviderKind::Anthropic.config_from_env()?)
    }
}

impl fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn build_url(&self, _model: &str, _messages: &[ChatMessage], _options: &Options) -> Result<String> {
        Ok(format!("{}/messages", self.config.base_url))
    }

    fn build_payload(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &Options,
    ) -> Result<Value> {
        let mut payload = merge_payload(
            options,
            vec![
                ("model", json!(model)),
                ("messages", serde_json::to_value(messages)?),
            ],
        );
        if let Some(body) = payload.as_object_mut() {
            body.entry("max_tokens").or_insert(json!(DEFAULT_MAX_TOKENS));
        }
        Ok(payload)
    }

    fn extract_text(&self, raw: &Value) -> Option<String> {
        let blocks = raw.get("content")?.as_array()?;
        if blocks.is_empty() {
            return None;
        }
        Some(
            blocks
                .iter()
                .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect(),
        )
    }

    fn extract_usage(&self, raw: &Value) -> Option<Usage> {
        raw.get("usage")?.as_object().cloned()
    }

    fn extract_finish_reason(&self, raw: &Value) -> Option<String> {
        raw.get("stop_reason")?.as_str().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use crate::{LLMError, tools};

    fn message_response() -> Value {
        json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-opus-20240229",
            "content": [
                {"type": "text", "text": "Let me check "},
                {"type": "tool_use", "id": "toolu_01", "name": "get_stock_price", "input": {"ticker": "NVDA"}},
                {"type": "text", "text": "that for you."}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 20, "output_tokens": 8}
        })
    }

    #[test]
    fn test_provider_creation() {
        let provider = AnthropicProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.headers()["x-api-key"], "test-key");
        assert_eq!(provider.headers()["anthropic-version"], "2023-06-01");
        assert!(!provider.headers().contains_key("Authorization"));
        assert_eq!(
            provider.build_url("claude-3-opus-20240229", &[], &Options::new()).unwrap(),
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[test]
    fn test_from_env_without_key() {
        // SAFETY: This is a test that modifies env vars, which is safe in single-threaded test context
        unsafe {
            std::env::remove_var("ANTHROPIC_API_KEY");
        }
        let result = AnthropicProvider::from_env();
        assert!(matches!(result, Err(LLMError::ConfigurationError(_))));
    }

    #[test]
    fn test_max_tokens_default_and_override() {
        let provider = AnthropicProvider::new("test-key").unwrap();
        let messages = [ChatMessage::user("Hello")];

        let payload = provider
            .build_payload("claude-3-opus-20240229", &messages, &Options::new())
            .unwrap();
        assert_eq!(payload["max_tokens"], 1024);

        let mut options = Options::new();
        options.insert("max_tokens".to_string(), json!(256));
        options.insert(
            "tools".to_string(),
            tools::anthropic_tools(&[crate::ToolDefinition::new(
                "get_stock_price",
                "Get a stock price",
                json!({"type": "object"}),
            )]),
        );
        let payload = provider
            .build_payload("claude-3-opus-20240229", &messages, &options)
            .unwrap();
        assert_eq!(payload["max_tokens"], 256);
        assert_eq!(payload["model"], "claude-3-opus-20240229");
        assert_eq!(payload["tools"][0]["input_schema"]["type"], "object");
    }

    #[test]
    fn test_system_messages_are_sent_as_is() {
        let provider = AnthropicProvider::new("test-key").unwrap();
        let messages = [ChatMessage::system("Be brief"), ChatMessage::user("Hi")];
        let payload = provider
            .build_payload("claude-3-5-sonnet-20241022", &messages, &Options::new())
            .unwrap();
        assert_eq!(payload["messages"][0], json!({"role": "system", "content": "Be brief"}));
    }

    #[test]
    fn test_text_concatenates_text_blocks_only() {
        let provider = AnthropicProvider::new("test-key").unwrap();
        let raw = message_response();

        assert_eq!(
            provider.extract_text(&raw),
            Some("Let me check that for you.".to_string())
        );
        assert_eq!(provider.extract_finish_reason(&raw), Some("tool_use".to_string()));
        assert_eq!(
            provider.extract_usage(&raw),
            json!({"input_tokens": 20, "output_tokens": 8}).as_object().cloned()
        );
    }

    #[test]
    fn test_malformed_content() {
        let provider = AnthropicProvider::new("test-key").unwrap();
        assert_eq!(provider.extract_text(&json!({})), None);
        assert_eq!(provider.extract_text(&json!({"content": []})), None);
        assert_eq!(provider.extract_text(&json!({"content": "text"})), None);
        assert_eq!(
            provider.extract_text(&json!({"content": [{"type": "text"}, {"text": "no type"}, 7]})),
            Some(String::new())
        );
    }

    #[tokio::test]
    async fn test_complete_reports_anthropic_tag() {
        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .withf(|url, headers, payload, _| {
                url == "https://api.anthropic.com/v1/messages"
                    && headers["x-api-key"] == "test-key"
                    && payload["max_tokens"] == 1024
            })
            .times(1)
            .returning(|_, _, _, _| Ok(message_response()));
        let provider = AnthropicProvider::with_transport(
            ProviderConfig::new("test-key", DEFAULT_API_BASE),
            Arc::new(transport),
        );

        let result = provider
            .complete(&[ChatMessage::user("NVDA?")], "claude-3-opus-20240229", &Options::new())
            .await
            .unwrap();

        assert_eq!(result.provider, "anthropic");
        assert_eq!(result.text.as_deref(), Some("Let me check that for you."));
        assert_eq!(result.total_tokens(), Some(28));
        assert_eq!(result.raw_response, message_response());
    }
}
