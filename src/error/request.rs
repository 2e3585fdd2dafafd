//! Validation errors for requests built before anything goes on the wire.

use thiserror::Error;

/// Reasons a generation or publish request is refused locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Please enter a course title")]
    MissingTitle,

    #[error("Please enter a prompt for course generation")]
    MissingPrompt,

    #[error("Course duration must be at least one week")]
    InvalidDuration,

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("You must be logged in to generate a course")]
    NotAuthenticated,

    #[error("No draft ID found")]
    MissingDraftId,

    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: String, value: String },
}

impl RequestError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::MissingTitle => "E_REQ_TITLE",
            RequestError::MissingPrompt => "E_REQ_PROMPT",
            RequestError::InvalidDuration => "E_REQ_DURATION",
            RequestError::UnsupportedLanguage(_) => "E_REQ_LANGUAGE",
            RequestError::NotAuthenticated => "E_REQ_AUTH",
            RequestError::MissingDraftId => "E_REQ_DRAFT_ID",
            RequestError::InvalidSetting { .. } => "E_REQ_SETTING",
        }
    }
}
