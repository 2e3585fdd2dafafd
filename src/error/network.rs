//! Transport failures talking to the drafts API.
//!
//! Any of these ends the generation request that hit it.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("could not connect to {url}: {message}")]
    ConnectionFailed { url: String, message: String },

    /// The HTTP layer gave up waiting.
    #[error("request to {operation} timed out")]
    Timeout { operation: String },

    /// Non-2xx response; `message` is the response body when there is one.
    #[error("server answered {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("unreadable response: {message}")]
    InvalidResponse { message: String },

    #[error("network error: {message}")]
    Other { message: String },
}

impl NetworkError {
    /// Transient failures: connection problems, timeouts, 408, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } | NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                matches!(*status, 408 | 429) || *status >= 500
            }
            NetworkError::InvalidResponse { .. } | NetworkError::Other { .. } => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NetworkError::HttpStatus { status: 401, .. })
    }

    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { url, .. } => {
                format!("Could not reach the drafts API at {}.", url)
            }
            NetworkError::Timeout { .. } => "The drafts API did not answer in time.".to_string(),
            NetworkError::HttpStatus { status, .. } => status_message(*status)
                .map(str::to_string)
                .unwrap_or_else(|| format!("The drafts API answered with HTTP {}.", status)),
            NetworkError::InvalidResponse { .. } => {
                "The drafts API sent a response that could not be read.".to_string()
            }
            NetworkError::Other { message } => format!("Request failed: {}", message),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

fn status_message(status: u16) -> Option<&'static str> {
    let message = match status {
        400 => "The drafts API rejected the request as invalid.",
        401 => "Your session has expired. Please sign in again.",
        403 => "You are not allowed to do that.",
        404 => "That draft does not exist.",
        429 => "Too many generation requests. Wait a moment and retry.",
        500..=599 => "Course generation is unavailable right now. Please try again later.",
        _ => return None,
    };
    Some(message)
}

/// Map a reqwest failure on `url` onto [`NetworkError`].
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> NetworkError {
    let message = err.to_string();
    if err.is_connect() {
        return NetworkError::ConnectionFailed {
            url: url.to_string(),
            message,
        };
    }
    if err.is_timeout() {
        return NetworkError::Timeout {
            operation: url.to_string(),
        };
    }
    match err.status() {
        Some(status) => NetworkError::HttpStatus {
            status: status.as_u16(),
            message,
        },
        None if err.is_decode() || err.is_body() => NetworkError::InvalidResponse { message },
        None => NetworkError::Other { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> NetworkError {
        NetworkError::HttpStatus {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_retryable_statuses() {
        for status in [408, 429, 500, 503] {
            assert!(http(status).is_retryable(), "{} should be retryable", status);
        }
        for status in [400, 401, 404] {
            assert!(!http(status).is_retryable(), "{} should not be retryable", status);
        }
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(http(401).is_unauthorized());
        assert!(!http(403).is_unauthorized());
        assert!(!NetworkError::Timeout {
            operation: "stream".to_string()
        }
        .is_unauthorized());
    }

    #[test]
    fn test_user_message_for_unmapped_status() {
        assert_eq!(http(418).user_message(), "The drafts API answered with HTTP 418.");
        assert!(http(502).user_message().contains("try again later"));
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let err = NetworkError::HttpStatus {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "server answered 500: Internal Server Error");
    }

    #[tokio::test]
    async fn test_classify_connection_refused() {
        let url = "http://127.0.0.1:1/drafts/stream";
        let err = reqwest::Client::new().get(url).send().await.unwrap_err();
        let classified = classify_reqwest_error(&err, url);
        assert!(matches!(classified, NetworkError::ConnectionFailed { .. }));
        assert_eq!(classified.error_code(), "E_NET_CONN");
    }
}
