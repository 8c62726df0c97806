//! LLM provider trait definition
//!
//! Every vendor adapter implements [`LLMProvider`] by supplying the
//! vendor-specific steps (URL, payload, field extraction). The call
//! sequence itself lives in the provided [`LLMProvider::complete`] and is
//! the same for all vendors.

use std::collections::BTreeMap;

use async_trait::async_trait;
use prism_utils::{redact_headers, redact_url_query};
use serde_json::Value;
use tracing::{Instrument, debug, debug_span, error};

use crate::{
    ChatMessage, LLMError, NormalizedResult, Options, ProviderConfig, RequestSpec, Result, Usage,
    transport::Transport,
};

/// Trait for LLM providers
///
/// Implementations provide access to one vendor's text-generation API.
/// Extractors must be total: a missing or mistyped field yields `None`,
/// never a panic or an error.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Stable lowercase provider tag (e.g., "anthropic", "openai")
    fn name(&self) -> &'static str;

    /// Connection settings of this adapter
    fn config(&self) -> &ProviderConfig;

    /// Transport used to reach the vendor
    fn transport(&self) -> &dyn Transport;

    /// Headers sent with every request
    fn headers(&self) -> &BTreeMap<String, String> {
        &self.config().headers
    }

    /// Build the endpoint URL for a call
    fn build_url(&self, model: &str, messages: &[ChatMessage], options: &Options) -> Result<String>;

    /// Build the JSON body for a call
    ///
    /// `options` are merged in; vendor-required fields win over same-named
    /// option keys.
    fn build_payload(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &Options,
    ) -> Result<Value>;

    /// Generated text from a raw vendor body
    fn extract_text(&self, raw: &Value) -> Option<String>;

    /// Usage block from a raw vendor body
    fn extract_usage(&self, _raw: &Value) -> Option<Usage> {
        None
    }

    /// Finish reason from a raw vendor body
    fn extract_finish_reason(&self, _raw: &Value) -> Option<String> {
        None
    }

    /// Build URL and payload for a call
    fn build_request(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &Options,
    ) -> Result<RequestSpec> {
        Ok(RequestSpec {
            url: self.build_url(model, messages, options)?,
            payload: self.build_payload(model, messages, options)?,
        })
    }

    /// Assemble the normalized result for a raw vendor body
    ///
    /// Empty text counts as absent.
    fn normalize(&self, model: &str, raw_response: Value) -> NormalizedResult {
        let text = self.extract_text(&raw_response).filter(|t| !t.is_empty());
        let usage = self.extract_usage(&raw_response);
        let finish_reason = self.extract_finish_reason(&raw_response);

        NormalizedResult {
            text,
            provider: self.name().to_string(),
            model: model.to_string(),
            raw_response,
            usage,
            finish_reason,
        }
    }

    /// Generate a completion from the LLM
    ///
    /// # Arguments
    ///
    /// * `messages` - Conversation so far; must not be empty
    /// * `model` - Vendor model identifier
    /// * `options` - Extra vendor parameters (temperature, max_tokens, tools, ...)
    ///
    /// # Returns
    ///
    /// The normalized result. Transport failures are returned unchanged.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        options: &Options,
    ) -> Result<NormalizedResult> {
        if messages.is_empty() {
            return Err(LLMError::InvalidRequest(
                "messages must not be empty".to_string(),
            ));
        }
        if model.trim().is_empty() {
            return Err(LLMError::InvalidRequest("model must not be empty".to_string()));
        }

        let span = debug_span!("complete", provider = self.name(), model = %model);
        async move {
            let request = self.build_request(model, messages, options)?;
            let headers = self.headers();

            debug!(
                url = %redact_url_query(&request.url),
                headers = ?redact_headers(headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
                payload = %request.payload,
                "request issued"
            );

            let raw = self
                .transport()
                .post_json(&request.url, headers, &request.payload, self.config().timeout())
                .await
                .inspect_err(|e| error!(error = %e, "request failed"))?;

            debug!(body = %raw, "response received");
            Ok::<_, LLMError>(self.normalize(model, raw))
        }
        .instrument(span)
        .await
    }
}
