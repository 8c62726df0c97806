//! Per-adapter configuration

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use prism_utils::{mask_secret, redact_headers};

/// Default per-call timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings owned by one adapter
///
/// Vendor auth headers are merged in when the adapter is constructed and the
/// config is read-only from then on. `Debug` output masks the API key and
/// credential headers.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the vendor API, without a trailing slash
    pub base_url: String,

    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create a config with the given key and base URL
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: BTreeMap::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set custom base URL
    ///
    /// Useful for proxies, regional endpoints and OpenAI-compatible servers.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Add an extra header sent with every request
    ///
    /// Vendor auth headers set by the adapter win over same-named headers
    /// added here.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Merge vendor headers, replacing caller headers with the same name
    /// regardless of case
    pub(crate) fn with_vendor_headers<I>(mut self, vendor: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        for (name, value) in vendor {
            self.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
            self.headers.insert(name.to_string(), value);
        }
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = redact_headers(self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        f.debug_struct("ProviderConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("base_url", &self.base_url)
            .field("headers", &headers)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
