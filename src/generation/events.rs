//! Typed generation events and the structural sniff for unnamed frames.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::StreamError;
use crate::models::{CourseDraft, CourseOutline, Module};
use crate::sse::StreamFrame;

/// Message used when an `error` event carries no text.
pub const DEFAULT_ERROR_MESSAGE: &str = "Stream error";

/// The five event kinds the drafts API emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DraftStarted,
    Outline,
    Module,
    Complete,
    Error,
}

impl EventKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "draft_started" => Some(EventKind::DraftStarted),
            "outline" => Some(EventKind::Outline),
            "module" => Some(EventKind::Module),
            "complete" => Some(EventKind::Complete),
            "error" => Some(EventKind::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::DraftStarted => "draft_started",
            EventKind::Outline => "outline",
            EventKind::Module => "module",
            EventKind::Complete => "complete",
            EventKind::Error => "error",
        }
    }
}

/// A decoded frame, ready to be applied to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    DraftStarted {
        draft_id: Option<String>,
    },
    Outline(CourseOutline),
    Module(Module),
    Complete {
        draft_id: Option<String>,
        draft: Option<CourseDraft>,
    },
    Error {
        message: String,
    },
    /// Valid JSON that matched neither a known name nor a known shape
    Unknown {
        event: Option<String>,
        payload: Value,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletePayload {
    #[serde(default)]
    draft_id: Option<String>,
    #[serde(default)]
    draft: Option<CourseDraft>,
}

impl GenerationEvent {
    /// Decode a frame. Fails only on invalid JSON or a payload that does not
    /// fit its event; both are frame-level errors.
    pub fn from_frame(frame: &StreamFrame) -> Result<Self, StreamError> {
        let payload: Value =
            serde_json::from_str(&frame.data).map_err(|e| StreamError::InvalidJson {
                event_type: frame.event_name().to_string(),
                message: e.to_string(),
            })?;

        let kind = frame
            .event
            .as_deref()
            .and_then(EventKind::from_name)
            .or_else(|| classify_payload(&payload));

        match kind {
            Some(kind) => Self::from_payload(kind, payload),
            None => Ok(GenerationEvent::Unknown {
                event: frame.event.clone(),
                payload,
            }),
        }
    }

    /// Build the event for `kind` from an already parsed payload.
    pub fn from_payload(kind: EventKind, payload: Value) -> Result<Self, StreamError> {
        match kind {
            EventKind::DraftStarted => Ok(GenerationEvent::DraftStarted {
                draft_id: string_field(&payload, "draftId"),
            }),
            EventKind::Outline => {
                let outline: CourseOutline = typed(kind, payload)?;
                if outline.duration_weeks == 0 {
                    return Err(invalid(kind, "durationWeeks must be positive"));
                }
                Ok(GenerationEvent::Outline(outline))
            }
            EventKind::Module => {
                let module: Module = typed(kind, payload)?;
                if module.module_number == 0 {
                    return Err(invalid(kind, "moduleNumber must be positive"));
                }
                Ok(GenerationEvent::Module(module))
            }
            EventKind::Complete => {
                let complete: CompletePayload = typed(kind, payload)?;
                Ok(GenerationEvent::Complete {
                    draft_id: complete.draft_id.filter(|id| !id.is_empty()),
                    draft: complete.draft,
                })
            }
            EventKind::Error => Ok(GenerationEvent::Error {
                message: string_field(&payload, "message")
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            }),
        }
    }

    pub fn kind(&self) -> Option<EventKind> {
        match self {
            GenerationEvent::DraftStarted { .. } => Some(EventKind::DraftStarted),
            GenerationEvent::Outline(_) => Some(EventKind::Outline),
            GenerationEvent::Module(_) => Some(EventKind::Module),
            GenerationEvent::Complete { .. } => Some(EventKind::Complete),
            GenerationEvent::Error { .. } => Some(EventKind::Error),
            GenerationEvent::Unknown { .. } => None,
        }
    }
}

/// Guess the event kind of a payload from its shape.
///
/// Only used for frames without a recognised `event:` name:
/// - `modules` and `courseTitle` but no `topics` -> outline
/// - `moduleNumber` and `topics` -> module
/// - `draft.modules` -> complete
pub fn classify_payload(payload: &Value) -> Option<EventKind> {
    let has = |key: &str| is_truthy(payload.get(key));

    if has("modules") && has("courseTitle") && payload.get("topics").is_none() {
        Some(EventKind::Outline)
    } else if has("moduleNumber") && has("topics") {
        Some(EventKind::Module)
    } else if has("draft") && is_truthy(payload.get("draft").and_then(|d| d.get("modules"))) {
        Some(EventKind::Complete)
    } else {
        None
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn typed<T: DeserializeOwned>(kind: EventKind, payload: Value) -> Result<T, StreamError> {
    serde_json::from_value(payload).map_err(|e| invalid(kind, &e.to_string()))
}

fn invalid(kind: EventKind, message: &str) -> StreamError {
    StreamError::InvalidPayload {
        event_type: kind.as_str().to_string(),
        message: message.to_string(),
    }
}
