//! Error types for LLM operations

use std::collections::BTreeMap;
use std::time::Duration;

use prism_utils::EnvError;
use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during LLM operations
///
/// Missing fields in an otherwise valid vendor response are not errors;
/// they surface as `None` on [`crate::NormalizedResult`].
#[derive(Error, Debug)]
pub enum LLMError {
    /// Vendor answered with a non-2xx status
    #[error("API request failed with HTTP {status}: {body}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Response headers, credentials masked
        headers: BTreeMap<String, String>,
        /// Raw response body, unparsed
        body: String,
    },

    /// Vendor answered 2xx but the body is not JSON
    #[error("Malformed response body: {reason}")]
    MalformedResponse {
        /// Decoder error
        reason: String,
        /// Raw response body
        body: String,
    },

    /// The per-call timeout elapsed
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LLMError {
    /// HTTP status of a failed request, if the vendor answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body returned by the vendor alongside the failure
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { body, .. } | Self::MalformedResponse { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<EnvError> for LLMError {
    fn from(err: EnvError) -> Self {
        Self::ConfigurationError(err.to_string())
    }
}
