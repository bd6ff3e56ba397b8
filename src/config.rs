//! Configuration management for the Freshdesk MCP server.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use crate::error::FreshdeskError;
use std::env;

/// Environment variable holding the Freshdesk domain.
pub const DOMAIN_VAR: &str = "FRESHDESK_DOMAIN";

/// Environment variable holding the Freshdesk API key.
pub const API_KEY_VAR: &str = "FRESHDESK_API_KEY";

/// Configuration for connecting to Freshdesk.
///
/// Built once at startup and handed to [`FreshdeskClient::new`](crate::fd_client::FreshdeskClient::new).
/// The API key is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Freshdesk domain, normalized to include a scheme
    /// (e.g., `https://acme.freshdesk.com`).
    pub domain: String,

    /// Agent API key used as the Basic auth username.
    /// This value must never be logged or included in error messages.
    pub api_key: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `FRESHDESK_DOMAIN`: The helpdesk domain (e.g. `acme.freshdesk.com`)
    /// - `FRESHDESK_API_KEY`: The agent API key
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, FreshdeskError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through a variable lookup function.
    ///
    /// [`Config::from_env`] passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FreshdeskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = Self::get_required(&lookup, DOMAIN_VAR)?;
        let api_key = Self::get_required(&lookup, API_KEY_VAR)?;

        Self::new(domain, api_key)
    }

    /// Builds a configuration from explicit values, applying the same
    /// validation as [`Config::from_env`].
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FreshdeskError> {
        let domain = Self::normalize_domain(domain.into())?;
        let api_key = api_key.into().trim().to_string();

        Self::validate_api_key(&api_key)?;

        Ok(Config { domain, api_key })
    }

    /// Returns the API root, e.g. `https://acme.freshdesk.com/api/v2`.
    pub fn api_base_url(&self) -> String {
        format!("{}/api/v2", self.domain)
    }

    /// Lists the required environment variables that are absent or empty.
    pub fn missing_vars() -> Vec<&'static str> {
        Self::missing_vars_in(|name| env::var(name).ok())
    }

    /// Lists the required variables that `lookup` reports as absent or empty.
    pub fn missing_vars_in<F>(lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        [DOMAIN_VAR, API_KEY_VAR]
            .into_iter()
            .filter(|name| Self::get_required(&lookup, name).is_err())
            .collect()
    }

    /// Gets a required variable, returning an error if missing or empty.
    fn get_required<F>(lookup: &F, name: &str) -> Result<String, FreshdeskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(FreshdeskError::missing_env(name)),
        }
    }

    /// Validates and normalizes the domain.
    ///
    /// A bare host gets `https://`; an explicit scheme is kept as given.
    fn normalize_domain(domain: String) -> Result<String, FreshdeskError> {
        let domain = domain.trim().trim_end_matches('/');

        if domain.is_empty() {
            return Err(FreshdeskError::missing_env(DOMAIN_VAR));
        }

        let domain = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        };

        let parsed = url::Url::parse(&domain).map_err(|e| {
            FreshdeskError::invalid_config(format!("{} is not a valid host: {}", DOMAIN_VAR, e))
        })?;
        if parsed.host_str().is_none() || parsed.path() != "/" {
            return Err(FreshdeskError::invalid_config(format!(
                "{} must be a bare domain such as acme.freshdesk.com",
                DOMAIN_VAR
            )));
        }

        Ok(domain)
    }

    /// Validates the API key is not a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), FreshdeskError> {
        if key.is_empty() {
            return Err(FreshdeskError::missing_env(API_KEY_VAR));
        }

        let key_lower = key.to_lowercase();
        let placeholder_patterns = ["your_api_key", "your_key", "placeholder", "changeme"];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(FreshdeskError::invalid_config(
                    "FRESHDESK_API_KEY appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    // Tests avoid touching process environment so they can run in parallel.

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_missing_vars_reports_absent_and_empty() {
        let missing = Config::missing_vars_in(lookup_from(&[]));
        assert_eq!(missing, vec![DOMAIN_VAR, API_KEY_VAR]);

        let missing = Config::missing_vars_in(lookup_from(&[
            (DOMAIN_VAR, "acme.freshdesk.com"),
            (API_KEY_VAR, "   "),
        ]));
        assert_eq!(missing, vec![API_KEY_VAR]);
    }

    #[test]
    fn test_missing_vars_empty_when_present() {
        let missing = Config::missing_vars_in(lookup_from(&[
            (DOMAIN_VAR, "acme.freshdesk.com"),
            (API_KEY_VAR, "abc123"),
        ]));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_from_lookup_builds_config() {
        let config = Config::from_lookup(lookup_from(&[
            (DOMAIN_VAR, "acme.freshdesk.com"),
            (API_KEY_VAR, "abc123"),
        ]))
        .unwrap();
        assert_eq!(config.domain, "https://acme.freshdesk.com");
        assert_eq!(config.api_key, "abc123");
    }

    #[test]
    fn test_from_lookup_missing_domain() {
        let err = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "abc123")])).err().unwrap();
        assert!(err.to_string().contains(DOMAIN_VAR));
    }

    #[test]
    fn test_normalize_domain_adds_scheme() {
        let result = Config::normalize_domain("acme.freshdesk.com".to_string()).unwrap();
        assert_eq!(result, "https://acme.freshdesk.com");
    }

    #[test]
    fn test_normalize_domain_removes_trailing_slash() {
        let result = Config::normalize_domain("https://acme.freshdesk.com/".to_string()).unwrap();
        assert_eq!(result, "https://acme.freshdesk.com");
    }

    #[test]
    fn test_normalize_domain_keeps_explicit_http() {
        let result = Config::normalize_domain("http://127.0.0.1:8080".to_string()).unwrap();
        assert_eq!(result, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_normalize_domain_rejects_path() {
        let result = Config::normalize_domain("acme.freshdesk.com/api/v2".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_domain_rejects_empty() {
        assert!(Config::normalize_domain("  ".to_string()).is_err());
    }

    #[test]
    fn test_api_base_url() {
        let config = Config::new("acme.freshdesk.com", "abc123").unwrap();
        assert_eq!(config.api_base_url(), "https://acme.freshdesk.com/api/v2");
    }

    #[test]
    fn test_validate_api_key_rejects_placeholder() {
        let result = Config::validate_api_key("your_api_key_here");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_api_key_accepts_real_key() {
        let result = Config::validate_api_key("abc123def456");
        assert!(result.is_ok());
    }
}
