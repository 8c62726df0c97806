//! Shared utilities for prism
//!
//! This crate provides common functionality used across the prism workspace:
//! tracing setup, environment variable access, and masking of credentials
//! before they reach a log sink.

pub mod env;
pub mod logging;
pub mod redact;

pub use env::{EnvError, env_var, require_env_var};
pub use logging::{LogFormat, init_tracing, init_tracing_with_format};
pub use redact::{is_sensitive_header, mask_secret, redact_headers, redact_url_query};
