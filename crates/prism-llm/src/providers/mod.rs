//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait for
//! various LLM services.

pub mod anthropic;
mod chat_completions;
pub mod deepseek;
pub mod google;
pub mod openai;
pub mod xai;

pub use anthropic::AnthropicProvider;
pub use deepseek::DeepSeekProvider;
pub use google::GoogleProvider;
pub use openai::OpenAIProvider;
pub use xai::XAIProvider;

use serde_json::Value;

use crate::Options;

/// Merge caller options under the vendor-required fields
///
/// Required fields are written last so a same-named option key can never
/// replace them.
fn merge_payload(options: &Options, required: Vec<(&'static str, Value)>) -> Value {
    let mut payload = options.clone();
    for (key, value) in required {
        payload.insert(key.to_string(), value);
    }
    Value::Object(payload)
}
