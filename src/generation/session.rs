//! Generation session state and the frame-by-frame assembler.
//!
//! A [`GenerationSession`] is owned by exactly one generation request. Every
//! frame is applied in decoder order; failures of a single frame are recorded
//! and skipped, so the session is always inspectable after any call.

use std::fmt;

use crate::config::EndOfStreamPolicy;
use crate::error::StreamError;
use crate::models::{CourseDraft, CourseOutline, Module};
use crate::sse::StreamFrame;

use super::events::{EventKind, GenerationEvent};

/// Lifecycle of a session.
///
/// `Idle -> Started -> OutlineReceived -> ModulesStreaming -> Completed`,
/// with `Failed` reachable from any non-idle state. `Completed` and `Failed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Started,
    OutlineReceived,
    ModulesStreaming,
    Completed,
    Failed,
}

impl GenerationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::Started => "started",
            GenerationStatus::OutlineReceived => "outline_received",
            GenerationStatus::ModulesStreaming => "modules_streaming",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
        }
    }

    /// Progress line shown while this status is current.
    pub fn step_message(&self) -> &'static str {
        match self {
            GenerationStatus::Idle => "Starting course generation...",
            GenerationStatus::Started => "Generating course outline...",
            GenerationStatus::OutlineReceived | GenerationStatus::ModulesStreaming => {
                "Generating course modules..."
            }
            GenerationStatus::Completed => "Course generation completed!",
            GenerationStatus::Failed => "Course generation failed",
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What applying one frame did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The frame was dispatched as this kind of event
    Applied(EventKind),
    /// Decoding failed; the session is unchanged
    Discarded(StreamError),
    /// Valid JSON with no recognisable name or shape
    Unrecognized,
    /// The session had already reached a terminal status
    AfterTerminal,
}

impl FrameOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FrameOutcome::Applied(_))
    }
}

/// In-memory state of one generation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationSession {
    draft_id: Option<String>,
    outline: Option<CourseOutline>,
    /// Ordered by first arrival; at most one entry per module number
    modules: Vec<Module>,
    draft: Option<CourseDraft>,
    status: GenerationStatus,
    last_error: Option<String>,
    frames_applied: usize,
    frames_discarded: usize,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_id(&self) -> Option<&str> {
        self.draft_id.as_deref()
    }

    pub fn outline(&self) -> Option<&CourseOutline> {
        self.outline.as_ref()
    }

    /// Modules collected while streaming, in first-arrival order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, module_number: u32) -> Option<&Module> {
        self.modules
            .iter()
            .find(|m| m.module_number == module_number)
    }

    /// Authoritative draft from the `complete` event, if one arrived.
    pub fn draft(&self) -> Option<&CourseDraft> {
        self.draft.as_ref()
    }

    /// Modules to show: the final draft's list once complete, otherwise the
    /// streamed ones.
    pub fn display_modules(&self) -> &[Module] {
        match &self.draft {
            Some(draft) => &draft.modules,
            None => &self.modules,
        }
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn frames_applied(&self) -> usize {
        self.frames_applied
    }

    pub fn frames_discarded(&self) -> usize {
        self.frames_discarded
    }

    /// Human-readable progress line for the current state.
    pub fn step_message(&self) -> &str {
        match (&self.status, &self.last_error) {
            (GenerationStatus::Failed, Some(message)) => message.as_str(),
            (status, _) => status.step_message(),
        }
    }

    /// Decode and apply one frame.
    pub fn apply_frame(&mut self, frame: &StreamFrame) -> FrameOutcome {
        if self.status.is_terminal() {
            tracing::debug!(
                "Ignoring {} frame after session reached {}",
                frame.event_name(),
                self.status
            );
            return FrameOutcome::AfterTerminal;
        }

        match GenerationEvent::from_frame(frame) {
            Ok(event) => self.apply_event(event),
            Err(err) => {
                tracing::warn!("Discarding {} frame: {} (raw: {})", frame.event_name(), err, frame.data);
                self.frames_discarded += 1;
                FrameOutcome::Discarded(err)
            }
        }
    }

    /// Apply an already decoded event.
    pub fn apply_event(&mut self, event: GenerationEvent) -> FrameOutcome {
        if self.status.is_terminal() {
            return FrameOutcome::AfterTerminal;
        }

        let kind = match event {
            GenerationEvent::DraftStarted { draft_id } => {
                if draft_id.is_some() {
                    self.draft_id = draft_id;
                }
                self.status = GenerationStatus::Started;
                EventKind::DraftStarted
            }
            GenerationEvent::Outline(outline) => {
                if self.outline.is_some() {
                    tracing::info!("Outline replaced, discarding {} modules", self.modules.len());
                }
                self.outline = Some(outline);
                self.modules.clear();
                self.status = GenerationStatus::OutlineReceived;
                EventKind::Outline
            }
            GenerationEvent::Module(module) => {
                self.upsert_module(module);
                self.status = GenerationStatus::ModulesStreaming;
                EventKind::Module
            }
            GenerationEvent::Complete { draft_id, draft } => {
                if draft_id.is_some() {
                    self.draft_id = draft_id;
                }
                if let Some(draft) = draft {
                    if self.outline.is_none() {
                        self.outline = Some(draft.outline());
                    }
                    self.draft = Some(draft);
                    self.status = GenerationStatus::Completed;
                }
                EventKind::Complete
            }
            GenerationEvent::Error { message } => {
                tracing::error!("Generation failed: {}", message);
                self.last_error = Some(message);
                self.status = GenerationStatus::Failed;
                EventKind::Error
            }
            GenerationEvent::Unknown { event, .. } => {
                tracing::debug!(
                    "Ignoring unrecognized frame (event: {})",
                    event.as_deref().unwrap_or("<none>")
                );
                return FrameOutcome::Unrecognized;
            }
        };

        self.frames_applied += 1;
        tracing::debug!("Applied {} frame, status now {}", kind.as_str(), self.status);
        FrameOutcome::Applied(kind)
    }

    /// Record end of stream. In a non-terminal status this is an implicit
    /// failure unless the policy leaves the decision to the caller.
    pub fn finish_stream(&mut self, policy: EndOfStreamPolicy) -> Option<StreamError> {
        if self.status.is_terminal() {
            return None;
        }

        let err = StreamError::EndedEarly {
            last_status: self.status.as_str().to_string(),
        };
        tracing::warn!("{}", err);

        if policy == EndOfStreamPolicy::MarkFailed {
            self.fail(err.user_message());
        }
        Some(err)
    }

    /// Move to `Failed` with `message`. No effect once terminal.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.last_error = Some(message.into());
        self.status = GenerationStatus::Failed;
        true
    }

    /// Forget everything and return to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn upsert_module(&mut self, module: Module) {
        match self
            .modules
            .iter_mut()
            .find(|m| m.module_number == module.module_number)
        {
            Some(existing) => *existing = module,
            None => self.modules.push(module),
        }
    }
}

/// Value-style wrapper around [`GenerationSession::apply_frame`].
pub fn apply_frame(mut session: GenerationSession, frame: &StreamFrame) -> GenerationSession {
    session.apply_frame(frame);
    session
}
