//! Progress notification and cancellation for a running generation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use super::session::{FrameOutcome, GenerationSession};

/// Receives the session after every processed frame.
///
/// Closures `FnMut(&GenerationSession, &FrameOutcome)` implement this trait.
pub trait SessionObserver {
    /// Called after each frame, whatever its outcome.
    fn on_frame(&mut self, session: &GenerationSession, outcome: &FrameOutcome);

    /// Called once when the transport has physically ended, after any
    /// end-of-stream flush and policy have been applied.
    fn on_stream_end(&mut self, _session: &GenerationSession) {}
}

impl<F> SessionObserver for F
where
    F: FnMut(&GenerationSession, &FrameOutcome),
{
    fn on_frame(&mut self, session: &GenerationSession, outcome: &FrameOutcome) {
        self(session, outcome)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_frame(&mut self, _session: &GenerationSession, _outcome: &FrameOutcome) {}
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable handle used to abandon a generation.
///
/// Once cancelled, the runner stops before the next state mutation and the
/// session is left exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.state.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.state.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
