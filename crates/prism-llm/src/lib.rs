//! Provider-agnostic chat completion for prism
//!
//! This crate puts several vendor text-generation APIs behind one contract:
//! send chat messages and a model name, get back text plus optional usage
//! and finish-reason metadata, whichever vendor answered. It includes:
//!
//! - Message and result types
//! - The [`LLMProvider`] trait, which fixes the request lifecycle
//! - A [`Transport`](transport::Transport) seam over `reqwest`
//! - Adapters for OpenAI, Anthropic, Google, DeepSeek and xAI
//! - A registry for picking an adapter by tag
//!
//! ```no_run
//! use prism_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderKind, create_provider_from_env};
//!
//! # async fn run() -> prism_llm::Result<()> {
//! let provider = create_provider_from_env(ProviderKind::Anthropic)?;
//! let options = CompletionOptions::new().max_tokens(128).build();
//! let result = provider
//!     .complete(&[ChatMessage::user("2+2?")], "claude-3-5-sonnet-20241022", &options)
//!     .await?;
//! println!("{}: {:?}", result.provider, result.text);
//! # Ok(())
//! # }
//! ```

pub mod completion;
pub mod config;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod tools;
pub mod transport;

// Re-export main types
pub use completion::{CompletionOptions, NormalizedResult, Options, RequestSpec, Usage};
pub use config::{DEFAULT_TIMEOUT_SECS, ProviderConfig};
pub use error::{LLMError, Result};
pub use messages::{ChatMessage, Role};
pub use provider::LLMProvider;
pub use registry::{ProviderKind, create_provider, create_provider_from_env};
pub use tools::ToolDefinition;
pub use transport::{HttpTransport, Transport};
