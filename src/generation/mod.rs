//! Course draft assembly from a generation stream.
//!
//! Frames from [`crate::sse`] are decoded into [`GenerationEvent`]s and
//! applied to a [`GenerationSession`]:
//!
//! | Event | Effect |
//! |-------|--------|
//! | `draft_started` | status `Started`, stores `draftId` |
//! | `outline` | stores the outline, clears modules, status `OutlineReceived` |
//! | `module` | upserts by `moduleNumber`, status `ModulesStreaming` |
//! | `complete` | stores `draftId`; with a `draft`, status `Completed` |
//! | `error` | status `Failed`, stores the message |
//!
//! Frames without a known name are classified by shape, see
//! [`classify_payload`].

mod events;
mod observer;
mod runner;
mod session;

pub use events::{classify_payload, EventKind, GenerationEvent, DEFAULT_ERROR_MESSAGE};
pub use observer::{CancelToken, NoopObserver, SessionObserver};
pub use runner::{run_generation, RunOptions};
pub use session::{apply_frame, FrameOutcome, GenerationSession, GenerationStatus};
