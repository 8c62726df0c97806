//! xAI (Grok) provider implementation
//!
//! See: https://docs.x.ai/api

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::chat_completions;
use crate::{
    ChatMessage, LLMProvider, Options, ProviderConfig, ProviderKind, Result, Usage,
    transport::{HttpTransport, Transport},
};

/// Default xAI API base URL
pub const DEFAULT_API_BASE: &str = "https://api.x.ai/v1";

/// xAI provider
pub struct XAIProvider {
    config: ProviderConfig,
    transport: Arc<dyn Transport>,
}

impl XAIProvider {
    /// Create a new xAI provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ProviderConfig::new(api_key, DEFAULT_API_BASE))
    }

    /// Create a new xAI provider with custom configuration
    pub fn with_config(config: ProviderConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    /// Create a provider that sends requests through `transport`
    pub fn with_transport(config: ProviderConfig, transport: Arc<dyn Transport>) -> Self {
        let auth = chat_completions::bearer_headers(&config.api_key);
        Self {
            config: config.with_vendor_headers(auth),
            transport,
        }
    }

    /// Create a provider from `XAI_API_KEY` (and optional `XAI_API_BASE`)
    pub fn from_env() -> Result<Self> {
        Self::with_config(ProviderKind::XAI.config_from_env()?)
    }
}

impl fmt::Debug for XAIProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XAIProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LLMProvider for XAIProvider {
    fn name(&self) -> &'static str {
        "xai"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn build_url(&self, _model: &str, _messages: &[ChatMessage], _options: &Options) -> Result<String> {
        Ok(chat_completions::url(&self.config.base_url))
    }

    fn build_payload(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &Options,
    ) -> Result<Value> {
        chat_completions::payload(model, messages, options)
    }

    fn extract_text(&self, raw: &Value) -> Option<String> {
        chat_completions::content(raw).map(str::to_string)
    }

    fn extract_usage(&self, raw: &Value) -> Option<Usage> {
        chat_completions::usage(raw)
    }

    fn extract_finish_reason(&self, raw: &Value) -> Option<String> {
        chat_completions::finish_reason(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    #[test]
    fn test_provider_creation() {
        let provider = XAIProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "xai");
        assert_eq!(
            provider.build_url("grok-2", &[], &Options::new()).unwrap(),
            "https://api.x.ai/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_tool_calls_survive_in_raw_response() {
        let body = json!({
            "model": "grok-2-1212",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [{
                        "id": "call_0",
                        "type": "function",
                        "function": {"name": "get_stock_price", "arguments": "{\"ticker\":\"NVDA\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 30, "completion_tokens": 12, "total_tokens": 42}
        });
        let expected = body.clone();

        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .withf(|_, _, payload, _| payload["tools"][0]["type"] == "function")
            .returning(move |_, _, _, _| Ok(body.clone()));
        let provider = XAIProvider::with_transport(
            ProviderConfig::new("test-key", DEFAULT_API_BASE),
            Arc::new(transport),
        );

        let options = json!({"tools": [{"type": "function", "function": {"name": "get_stock_price"}}]})
            .as_object()
            .cloned()
            .unwrap();
        let result = provider
            .complete(&[ChatMessage::user("NVDA price?")], "grok-2", &options)
            .await
            .unwrap();

        assert_eq!(result.text, None);
        assert_eq!(result.finish_reason.as_deref(), Some("tool_calls"));
        assert_eq!(result.raw_response, expected);
        assert_eq!(
            result.raw_response["choices"][0]["message"]["tool_calls"][0]["function"]["name"],
            "get_stock_price"
        );
        assert_eq!(result.total_tokens(), Some(42));
    }
}
