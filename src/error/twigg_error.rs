//! Unified error type for the Twigg client.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::request::RequestError;
use super::stream::StreamError;

/// Unified error type for the Twigg client.
#[derive(Debug)]
pub enum TwiggError {
    /// Transport failures talking to the drafts API.
    Network(NetworkError),

    /// Failures while consuming the generation stream.
    Stream(StreamError),

    /// Requests refused before being sent.
    Request(RequestError),
}

impl TwiggError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            TwiggError::Network(err) if err.is_unauthorized() => ErrorCategory::Auth,
            TwiggError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            TwiggError::Network(NetworkError::HttpStatus { .. }) => ErrorCategory::Client,
            TwiggError::Network(_) => ErrorCategory::Network,
            TwiggError::Stream(err) => match err {
                StreamError::ConnectionLost { .. } | StreamError::Timeout { .. } => {
                    ErrorCategory::Network
                }
                StreamError::BackendError { .. } | StreamError::EndedEarly { .. } => {
                    ErrorCategory::Server
                }
                StreamError::InvalidJson { .. } | StreamError::InvalidPayload { .. } => {
                    ErrorCategory::Client
                }
                StreamError::Cancelled => ErrorCategory::User,
            },
            TwiggError::Request(RequestError::NotAuthenticated) => ErrorCategory::Auth,
            TwiggError::Request(RequestError::InvalidSetting { .. }) => {
                ErrorCategory::Configuration
            }
            TwiggError::Request(_) => ErrorCategory::User,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            TwiggError::Network(err) => err.is_retryable(),
            TwiggError::Stream(err) => err.is_retryable(),
            TwiggError::Request(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TwiggError::Network(err) => err.user_message(),
            TwiggError::Stream(err) => err.user_message(),
            TwiggError::Request(err) => err.to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TwiggError::Network(err) => err.error_code(),
            TwiggError::Stream(err) => err.error_code(),
            TwiggError::Request(err) => err.error_code(),
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for TwiggError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwiggError::Network(err) => write!(f, "{}", err),
            TwiggError::Stream(err) => write!(f, "{}", err),
            TwiggError::Request(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TwiggError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TwiggError::Network(err) => Some(err),
            TwiggError::Stream(err) => Some(err),
            TwiggError::Request(err) => Some(err),
        }
    }
}

impl From<NetworkError> for TwiggError {
    fn from(err: NetworkError) -> Self {
        TwiggError::Network(err)
    }
}

impl From<StreamError> for TwiggError {
    fn from(err: StreamError) -> Self {
        TwiggError::Stream(err)
    }
}

impl From<RequestError> for TwiggError {
    fn from(err: RequestError) -> Self {
        TwiggError::Request(err)
    }
}
