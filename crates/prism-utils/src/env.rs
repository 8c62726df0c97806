//! Environment variable access
//!
//! Credentials and endpoint overrides come from the process environment.
//! Empty values are treated the same as unset ones.

use thiserror::Error;

/// Error raised when a required environment variable is unavailable
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvError {
    /// Variable is unset or empty
    #[error("{0} environment variable not set")]
    Missing(String),

    /// Variable holds bytes that are not valid unicode
    #[error("{0} environment variable is not valid unicode")]
    NotUnicode(String),
}

/// Read an optional environment variable, ignoring empty values
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a required environment variable
pub fn require_env_var(name: &str) -> Result<String, EnvError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Ok(_) | Err(std::env::VarError::NotPresent) => Err(EnvError::Missing(name.to_string())),
        Err(std::env::VarError::NotUnicode(_)) => Err(EnvError::NotUnicode(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_present_variable() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PRISM_UTILS_TEST_PRESENT", "  value ");
        }
        assert_eq!(
            env_var("PRISM_UTILS_TEST_PRESENT"),
            Some("value".to_string())
        );
        let value = assert_ok!(require_env_var("PRISM_UTILS_TEST_PRESENT"));
        assert_eq!(value, "value");
        unsafe {
            std::env::remove_var("PRISM_UTILS_TEST_PRESENT");
        }
    }

    #[test]
    fn test_empty_variable_is_missing() {
        unsafe {
            std::env::set_var("PRISM_UTILS_TEST_EMPTY", "");
        }
        assert_eq!(env_var("PRISM_UTILS_TEST_EMPTY"), None);
        let err = assert_err!(require_env_var("PRISM_UTILS_TEST_EMPTY"));
        assert_eq!(err, EnvError::Missing("PRISM_UTILS_TEST_EMPTY".to_string()));
        unsafe {
            std::env::remove_var("PRISM_UTILS_TEST_EMPTY");
        }
    }

    #[test]
    fn test_unset_variable() {
        unsafe {
            std::env::remove_var("PRISM_UTILS_TEST_UNSET");
        }
        assert_eq!(env_var("PRISM_UTILS_TEST_UNSET"), None);
        assert_eq!(
            require_env_var("PRISM_UTILS_TEST_UNSET").unwrap_err().to_string(),
            "PRISM_UTILS_TEST_UNSET environment variable not set"
        );
    }
}
