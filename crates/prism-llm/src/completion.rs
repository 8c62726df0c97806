//! Completion options and the normalized result record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ToolDefinition;

/// Extra vendor parameters forwarded opaquely into the request payload
pub type Options = Map<String, Value>;

/// Token accounting exactly as the vendor reported it
pub type Usage = Map<String, Value>;

/// A fully built vendor request, alive for the duration of one call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Target URL, including any query-string credentials
    pub url: String,

    /// JSON body
    pub payload: Value,
}

/// Vendor-agnostic outcome of one completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Generated text, absent when the vendor returned none we could find
    pub text: Option<String>,

    /// Lowercase tag of the adapter that produced this result
    pub provider: String,

    /// Model identifier as requested by the caller
    pub model: String,

    /// Untouched vendor body
    pub raw_response: Value,

    /// Usage block as reported by the vendor
    pub usage: Option<Usage>,

    /// Finish reason as reported by the vendor
    pub finish_reason: Option<String>,
}

impl NormalizedResult {
    /// Generated text, or an empty string when absent
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Total token count, when the vendor reports one
    ///
    /// Understands OpenAI-style `total_tokens`, Google's `totalTokenCount`
    /// and Anthropic's split `input_tokens`/`output_tokens`.
    pub fn total_tokens(&self) -> Option<u64> {
        let usage = self.usage.as_ref()?;
        if let Some(total) = usage
            .get("total_tokens")
            .or_else(|| usage.get("totalTokenCount"))
            .and_then(Value::as_u64)
        {
            return Some(total);
        }
        let input = usage.get("input_tokens").and_then(Value::as_u64)?;
        let output = usage.get("output_tokens").and_then(Value::as_u64)?;
        Some(input + output)
    }
}

/// Builder for [`Options`]
///
/// ```
/// use prism_llm::CompletionOptions;
///
/// let options = CompletionOptions::new()
///     .temperature(0.2)
///     .max_tokens(256)
///     .build();
/// assert_eq!(options["max_tokens"], 256);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    options: Options,
}

impl CompletionOptions {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the temperature
    pub fn temperature(self, temperature: f64) -> Self {
        self.set("temperature", temperature)
    }

    /// Set the maximum tokens
    pub fn max_tokens(self, max_tokens: u32) -> Self {
        self.set("max_tokens", max_tokens)
    }

    /// Set an already vendor-shaped `tools` declaration
    pub fn tools(self, tools: Value) -> Self {
        self.set("tools", tools)
    }

    /// Declare tools in OpenAI-compatible function format
    pub fn openai_tools(self, tools: &[ToolDefinition]) -> Self {
        self.tools(crate::tools::openai_tools(tools))
    }

    /// Set an arbitrary vendor parameter
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Build the options map
    pub fn build(self) -> Options {
        self.options
    }
}
