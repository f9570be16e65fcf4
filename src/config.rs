//! Credential loading for the nearby-places API

use std::env;
use thiserror::Error;

/// Environment variable holding the MapQuest API key
const API_KEY_VAR: &str = "MAPQUEST_API_KEY";

/// Errors raised when the execution environment is missing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was supplied via flag or environment
    #[error("No MapQuest API key configured; set {API_KEY_VAR} or pass --api-key")]
    MissingApiKey,
}

/// Resolves the MapQuest API key
///
/// A CLI-supplied value wins over the environment. Absence is an error
/// surfaced at the first nearby-places lookup, not at startup, so browsing
/// site listings works without a credential.
pub fn api_key(override_key: Option<&str>) -> Result<String, ConfigError> {
    if let Some(key) = override_key {
        return Ok(key.to_string());
    }
    env::var(API_KEY_VAR)
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or(ConfigError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_key_wins() {
        let key = api_key(Some("flag-key")).expect("Override should resolve");
        assert_eq!(key, "flag-key");
    }

    #[test]
    fn test_missing_key_reports_both_sources() {
        // Only meaningful when the variable is unset in the test environment.
        if env::var(API_KEY_VAR).is_err() {
            let err = api_key(None).expect_err("Missing key should be an error");
            assert!(err.to_string().contains(API_KEY_VAR));
            assert!(err.to_string().contains("--api-key"));
        }
    }
}
