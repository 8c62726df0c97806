//! DeepSeek provider implementation
//!
//! DeepSeek exposes an OpenAI-compatible chat completions endpoint.
//! See: https://api-docs.deepseek.com/api/create-chat-completion

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::chat_completions;
use crate::{
    ChatMessage, LLMProvider, Options, ProviderConfig, ProviderKind, Result, Usage,
    transport::{HttpTransport, Transport},
};

/// Default DeepSeek API base URL
pub const DEFAULT_API_BASE: &str = "https://api.deepseek.com/v1";

/// DeepSeek provider
pub struct DeepSeekProvider {
    config: ProviderConfig,
    transport: Arc<dyn Transport>,
}

impl DeepSeekProvider {
    /// Create a new DeepSeek provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ProviderConfig::new(api_key, DEFAULT_API_BASE))
    }

    /// Create a new DeepSeek provider with custom configuration
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

    /// Create a provider from `DEEPSEEK_API_KEY` (and optional `DEEPSEEK_API_BASE`)
    pub fn from_env() -> Result<Self> {
        Self::with_config(ProviderKind::DeepSeek.config_from_env()?)
    }
}

impl fmt::Debug for DeepSeekProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LLMProvider for DeepSeekProvider {
    fn name(&self) -> &'static str {
        "deepseek"
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

    // Trimmed, unlike the other chat-completions vendors
    fn extract_text(&self, raw: &Value) -> Option<String> {
        chat_completions::content(raw).map(|text| text.trim().to_string())
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
        let provider = DeepSeekProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "deepseek");
        assert_eq!(
            provider.build_url("deepseek-chat", &[], &Options::new()).unwrap(),
            "https://api.deepseek.com/v1/chat/completions"
        );
        assert_eq!(provider.headers()["Authorization"], "Bearer test-key");
    }

    #[test]
    fn test_text_is_trimmed() {
        let provider = DeepSeekProvider::new("test-key").unwrap();
        let raw = json!({"choices": [{"message": {"content": "\n\n  Hello!  \n"}}]});
        assert_eq!(provider.extract_text(&raw), Some("Hello!".to_string()));
    }

    #[test]
    fn test_missing_text_path() {
        let provider = DeepSeekProvider::new("test-key").unwrap();
        assert_eq!(provider.extract_text(&json!({"choices": [{"delta": {}}]})), None);
        assert_eq!(provider.extract_finish_reason(&json!({})), None);
    }

    #[tokio::test]
    async fn test_complete_with_whitespace_only_answer() {
        let mut transport = MockTransport::new();
        transport.expect_post_json().times(1).returning(|_, _, _, _| {
            Ok(json!({
                "object": "chat.completion",
                "choices": [{"message": {"content": "   "}, "finish_reason": "length"}]
            }))
        });
        let provider = DeepSeekProvider::with_transport(
            ProviderConfig::new("test-key", DEFAULT_API_BASE),
            Arc::new(transport),
        );

        let result = provider
            .complete(&[ChatMessage::user("Hello DeepSeek")], "deepseek-chat", &Options::new())
            .await
            .unwrap();

        assert_eq!(result.text, None);
        assert_eq!(result.provider, "deepseek");
        assert_eq!(result.usage, None);
        assert_eq!(result.finish_reason.as_deref(), Some("length"));
    }
}
