//! Fan one prompt out to every configured provider
//!
//! Builds a provider for each vendor whose API key is present in the
//! environment and sends them all the same question concurrently.
//!
//! ```bash
//! export OPENAI_API_KEY=...        # and/or ANTHROPIC_API_KEY, GOOGLE_API_KEY,
//! export DEEPSEEK_API_KEY=...      # DEEPSEEK_API_KEY, XAI_API_KEY
//! RUST_LOG=prism_llm=debug cargo run -p prism-llm --example fan_out
//! ```

use futures::future::join_all;
use prism_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderKind, create_provider_from_env};

fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAI => "gpt-4o-mini",
        ProviderKind::Anthropic => "claude-3-5-haiku-20241022",
        ProviderKind::Google => "gemini-1.5-flash",
        ProviderKind::DeepSeek => "deepseek-chat",
        ProviderKind::XAI => "grok-2",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    prism_utils::init_tracing();

    let providers: Vec<_> = ProviderKind::ALL
        .into_iter()
        .filter_map(|kind| match create_provider_from_env(kind) {
            Ok(provider) => Some((kind, provider)),
            Err(e) => {
                println!("skipping {kind}: {e}");
                None
            }
        })
        .collect();

    if providers.is_empty() {
        anyhow::bail!("no provider API keys found in the environment");
    }

    let messages = vec![ChatMessage::user("What is 2+2? Answer with the number only.")];
    let options = CompletionOptions::new().max_tokens(16).build();

    let calls = providers
        .iter()
        .map(|(kind, provider)| provider.complete(&messages, default_model(*kind), &options));

    for ((kind, _), outcome) in providers.iter().zip(join_all(calls).await) {
        match outcome {
            Ok(result) => println!(
                "{kind:<10} text={:?} finish_reason={:?} total_tokens={:?}",
                result.text,
                result.finish_reason,
                result.total_tokens()
            ),
            Err(e) => println!("{kind:<10} failed: {e}"),
        }
    }

    Ok(())
}
