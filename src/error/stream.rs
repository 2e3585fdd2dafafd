//! Failures while consuming the generation event stream.
//!
//! `InvalidJson` and `InvalidPayload` describe a single discarded frame;
//! the rest end the session.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// Reading the response body failed mid-stream.
    #[error("stream connection lost: {message}")]
    ConnectionLost { message: String },

    #[error("invalid JSON in {event_type} frame: {message}")]
    InvalidJson { event_type: String, message: String },

    /// Valid JSON without the shape its event requires.
    #[error("invalid {event_type} payload: {message}")]
    InvalidPayload { event_type: String, message: String },

    /// Reported by the server through an `error` event.
    #[error("backend error: {message}")]
    BackendError { message: String },

    /// Nothing arrived within the idle timeout.
    #[error("no frame for {duration_secs}s")]
    Timeout { duration_secs: u64 },

    /// Closed before `complete` or `error`.
    #[error("stream ended while session was {last_status}")]
    EndedEarly { last_status: String },

    #[error("generation cancelled")]
    Cancelled,
}

impl StreamError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamError::ConnectionLost { .. }
                | StreamError::Timeout { .. }
                | StreamError::EndedEarly { .. }
        )
    }

    /// Recovered locally by skipping the frame.
    pub fn is_frame_level(&self) -> bool {
        matches!(
            self,
            StreamError::InvalidJson { .. } | StreamError::InvalidPayload { .. }
        )
    }

    /// Text for the user. Backend errors are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::BackendError { message } => message.clone(),
            StreamError::ConnectionLost { .. } => {
                "Lost the connection while the course was being generated.".to_string()
            }
            StreamError::InvalidJson { .. } | StreamError::InvalidPayload { .. } => {
                "The server sent a frame that could not be read.".to_string()
            }
            StreamError::Timeout { duration_secs } => format!(
                "No progress from the server for {} seconds, giving up.",
                duration_secs
            ),
            StreamError::EndedEarly { .. } => "Stream ended before generation completed".to_string(),
            StreamError::Cancelled => "Generation was cancelled.".to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::InvalidJson { .. } => "E_STREAM_JSON",
            StreamError::InvalidPayload { .. } => "E_STREAM_PAYLOAD",
            StreamError::BackendError { .. } => "E_STREAM_BACKEND",
            StreamError::Timeout { .. } => "E_STREAM_TIMEOUT",
            StreamError::EndedEarly { .. } => "E_STREAM_EARLY_END",
            StreamError::Cancelled => "E_STREAM_CANCELLED",
        }
    }
}
