//! OpenAI provider implementation
//!
//! This module implements the LLMProvider trait for OpenAI's chat
//! completions API.
//! See: https://platform.openai.com/docs/api-reference/chat
//!
//! # Examples
//!
//! ## Basic usage with environment variable
//!
//! ```no_run
//! use prism_llm::{ChatMessage, LLMProvider, Options};
//! use prism_llm::providers::OpenAIProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create provider from OPENAI_API_KEY environment variable
//!     let provider = OpenAIProvider::from_env()?;
//!
//!     let result = provider
//!         .complete(&[ChatMessage::user("Hello!")], "gpt-4o-mini", &Options::new())
//!         .await?;
//!     println!("{}", result.text_or_empty());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Using with OpenAI-compatible APIs
//!
//! ```no_run
//! use prism_llm::ProviderConfig;
//! use prism_llm::providers::OpenAIProvider;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // For local deployments (e.g., llama.cpp, vLLM, LM Studio)
//! let local_config = ProviderConfig::new("not-needed", "http://localhost:8000/v1")
//!     .with_timeout(180);
//!
//! let provider = OpenAIProvider::with_config(local_config)?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::chat_completions;
use crate::{
    ChatMessage, LLMProvider, Options, ProviderConfig, ProviderKind, Result, Usage,
    transport::{HttpTransport, Transport},
};

/// Default OpenAI API base URL
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI provider
///
/// Also usable against OpenAI-compatible servers through a custom base URL.
pub struct OpenAIProvider {
    config: ProviderConfig,
    transport: Arc<dyn Transport>,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ProviderConfig::new(api_key, DEFAULT_API_BASE))
    }

    /// Create a new OpenAI provider with custom configuration
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

    /// Create a provider from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY`.
    /// Optionally reads base URL from `OPENAI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ProviderKind::OpenAI.config_from_env()?)
    }
}

impl fmt::Debug for OpenAIProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
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
