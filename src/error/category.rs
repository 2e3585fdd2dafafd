//! Coarse classification used when reporting a failure.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connectivity, timeouts, lost streams
    Network,
    /// Missing or rejected bearer token
    Auth,
    /// 5xx responses, in-stream `error` events, streams ending early
    Server,
    /// Data this client could not interpret
    Client,
    /// Input the user has to fix first
    User,
    /// Unusable `TWIGG_*` settings
    Configuration,
}

impl ErrorCategory {
    /// Whether the same request may succeed if sent again unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "check that the drafts API is reachable, then retry",
            ErrorCategory::Auth => "set TWIGG_TOKEN to a valid access token",
            ErrorCategory::Server => "the generation service may be busy, retry in a moment",
            ErrorCategory::Client => "this client may be out of date with the drafts API",
            ErrorCategory::User => "fix the input and run the command again",
            ErrorCategory::Configuration => "check the TWIGG_* environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transient_categories_are_retryable() {
        let retryable: Vec<_> = [
            ErrorCategory::Network,
            ErrorCategory::Auth,
            ErrorCategory::Server,
            ErrorCategory::Client,
            ErrorCategory::User,
            ErrorCategory::Configuration,
        ]
        .into_iter()
        .filter(ErrorCategory::is_retryable)
        .collect();
        assert_eq!(retryable, vec![ErrorCategory::Network, ErrorCategory::Server]);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Network.to_string(), "network");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }

    #[test]
    fn test_auth_hint_mentions_token_variable() {
        assert!(ErrorCategory::Auth.recovery_hint().contains("TWIGG_TOKEN"));
    }
}
