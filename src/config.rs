//! Client configuration.
//!
//! Defaults suit a local drafts API; every field can be overridden through
//! `TWIGG_*` environment variables or the builder methods.
//!
//! ```ignore
//! use twigg::config::{ClientConfig, EndOfStreamPolicy};
//!
//! let config = ClientConfig::from_env()?
//!     .with_token("abc")
//!     .with_end_of_stream(EndOfStreamPolicy::LeaveAsIs);
//! ```

use std::time::Duration;

use crate::error::RequestError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_URL: &str = "TWIGG_API_URL";
pub const ENV_TOKEN: &str = "TWIGG_TOKEN";
pub const ENV_IDLE_TIMEOUT: &str = "TWIGG_IDLE_TIMEOUT_SECS";
pub const ENV_END_OF_STREAM: &str = "TWIGG_END_OF_STREAM";

/// What to do when the stream closes before `complete` or `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndOfStreamPolicy {
    /// Mark the session `Failed` (default)
    #[default]
    MarkFailed,
    /// Leave the status as is; the caller decides
    LeaveAsIs,
}

impl EndOfStreamPolicy {
    /// Parse `fail` / `ignore` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail" | "failed" | "mark_failed" => Some(EndOfStreamPolicy::MarkFailed),
            "ignore" | "leave" | "leave_as_is" => Some(EndOfStreamPolicy::LeaveAsIs),
            _ => None,
        }
    }
}

/// Configuration for talking to the drafts API.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the drafts API, without trailing slash
    pub base_url: String,
    /// Bearer token of the signed-in user
    pub token: Option<String>,
    /// Maximum wait for the next frame; `None` waits forever
    pub idle_timeout: Option<Duration>,
    pub end_of_stream: EndOfStreamPolicy,
    /// Upper bound for the whole publish call
    pub publish_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            idle_timeout: None,
            end_of_stream: EndOfStreamPolicy::default(),
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, RequestError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RequestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config = config.with_base_url(&url);
        }
        if let Some(token) = get(ENV_TOKEN) {
            config = config.with_token(token.trim());
        }
        if let Some(raw) = get(ENV_IDLE_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| invalid(ENV_IDLE_TIMEOUT, &raw))?;
            config.idle_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(raw) = get(ENV_END_OF_STREAM) {
            config.end_of_stream =
                EndOfStreamPolicy::parse(&raw).ok_or_else(|| invalid(ENV_END_OF_STREAM, &raw))?;
        }

        Ok(config)
    }

    /// Set the base URL (builder pattern); trailing slashes are dropped
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn with_end_of_stream(mut self, policy: EndOfStreamPolicy) -> Self {
        self.end_of_stream = policy;
        self
    }

    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }

    /// Full URL for an API path such as `/drafts/stream`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn invalid(name: &str, value: &str) -> RequestError {
    RequestError::InvalidSetting {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.token.is_none());
        assert!(config.idle_timeout.is_none());
        assert_eq!(config.end_of_stream, EndOfStreamPolicy::MarkFailed);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_base_url("https://api.twigg.dev/")
            .with_token("tok")
            .with_idle_timeout(Some(Duration::from_secs(5)))
            .with_end_of_stream(EndOfStreamPolicy::LeaveAsIs);

        assert_eq!(config.base_url, "https://api.twigg.dev");
        assert_eq!(config.endpoint("/drafts/stream"), "https://api.twigg.dev/drafts/stream");
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://example.test:9000/"),
            (ENV_TOKEN, " secret "),
            (ENV_IDLE_TIMEOUT, "45"),
            (ENV_END_OF_STREAM, "ignore"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://example.test:9000");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.end_of_stream, EndOfStreamPolicy::LeaveAsIs);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config =
            ClientConfig::from_lookup(lookup(&[(ENV_TOKEN, "  "), (ENV_API_URL, "")])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_IDLE_TIMEOUT, "0")])).unwrap();
        assert!(config.idle_timeout.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_IDLE_TIMEOUT, "soon")])).unwrap_err();
        assert_eq!(
            err,
            RequestError::InvalidSetting {
                name: ENV_IDLE_TIMEOUT.to_string(),
                value: "soon".to_string()
            }
        );

        assert!(ClientConfig::from_lookup(lookup(&[(ENV_END_OF_STREAM, "maybe")])).is_err());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(EndOfStreamPolicy::parse("FAIL"), Some(EndOfStreamPolicy::MarkFailed));
        assert_eq!(EndOfStreamPolicy::parse("leave"), Some(EndOfStreamPolicy::LeaveAsIs));
        assert_eq!(EndOfStreamPolicy::parse("retry"), None);
    }
}
