//! Provider lookup by tag
//!
//! [`ProviderKind`] names each supported vendor and knows its defaults and
//! environment variables, so callers can pick a provider at runtime.

use std::fmt;
use std::str::FromStr;

use prism_utils::{env_var, require_env_var};

use crate::providers::{
    AnthropicProvider, DeepSeekProvider, GoogleProvider, OpenAIProvider, XAIProvider, anthropic,
    deepseek, google, openai, xai,
};
use crate::{LLMError, LLMProvider, ProviderConfig, Result};

/// Supported vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI chat completions
    OpenAI,
    /// Anthropic Messages API
    Anthropic,
    /// Google Gemini generateContent
    Google,
    /// DeepSeek chat completions
    DeepSeek,
    /// xAI chat completions
    XAI,
}

impl ProviderKind {
    /// Every supported vendor
    pub const ALL: [Self; 5] = [
        Self::OpenAI,
        Self::Anthropic,
        Self::Google,
        Self::DeepSeek,
        Self::XAI,
    ];

    /// Lowercase tag reported in [`crate::NormalizedResult::provider`]
    pub fn tag(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::DeepSeek => "deepseek",
            Self::XAI => "xai",
        }
    }

    /// Vendor base URL used when none is configured
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAI => openai::DEFAULT_API_BASE,
            Self::Anthropic => anthropic::DEFAULT_API_BASE,
            Self::Google => google::DEFAULT_API_BASE,
            Self::DeepSeek => deepseek::DEFAULT_API_BASE,
            Self::XAI => xai::DEFAULT_API_BASE,
        }
    }

    /// Environment variable holding the API key
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::XAI => "XAI_API_KEY",
        }
    }

    /// Environment variable overriding the base URL
    pub fn base_url_env(self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_BASE",
            Self::Anthropic => "ANTHROPIC_API_BASE",
            Self::Google => "GOOGLE_API_BASE",
            Self::DeepSeek => "DEEPSEEK_API_BASE",
            Self::XAI => "XAI_API_BASE",
        }
    }

    /// Config with this vendor's default base URL
    pub fn config(self, api_key: impl Into<String>) -> ProviderConfig {
        ProviderConfig::new(api_key, self.default_base_url())
    }

    /// Config read from the environment
    ///
    /// The API key is required; the base URL falls back to the vendor default.
    pub fn config_from_env(self) -> Result<ProviderConfig> {
        let api_key = require_env_var(self.api_key_env())?;
        let base_url =
            env_var(self.base_url_env()).unwrap_or_else(|| self.default_base_url().to_string());
        Ok(ProviderConfig::new(api_key, base_url))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for ProviderKind {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LLMError::ConfigurationError(format!("unknown provider: {wanted}")))
    }
}

/// Build the adapter for `kind`
pub fn create_provider(kind: ProviderKind, config: ProviderConfig) -> Result<Box<dyn LLMProvider>> {
    let provider: Box<dyn LLMProvider> = match kind {
        ProviderKind::OpenAI => Box::new(OpenAIProvider::with_config(config)?),
        ProviderKind::Anthropic => Box::new(AnthropicProvider::with_config(config)?),
        ProviderKind::Google => Box::new(GoogleProvider::with_config(config)?),
        ProviderKind::DeepSeek => Box::new(DeepSeekProvider::with_config(config)?),
        ProviderKind::XAI => Box::new(XAIProvider::with_config(config)?),
    };
    Ok(provider)
}

/// Build the adapter for `kind` from its environment variables
pub fn create_provider_from_env(kind: ProviderKind) -> Result<Box<dyn LLMProvider>> {
    create_provider(kind, kind.config_from_env()?)
}
