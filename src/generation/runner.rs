//! The pull loop that feeds frames from the transport into a session.

use std::time::Duration;

use futures_util::{Stream, StreamExt};

use crate::config::{ClientConfig, EndOfStreamPolicy};
use crate::error::{StreamError, TwiggError, TwiggResult};
use crate::sse::StreamFrame;

use super::observer::{CancelToken, SessionObserver};
use super::session::{GenerationSession, GenerationStatus};

/// Knobs for [`run_generation`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum wait for the next frame
    pub idle_timeout: Option<Duration>,
    pub end_of_stream: EndOfStreamPolicy,
}

impl From<&ClientConfig> for RunOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            idle_timeout: config.idle_timeout,
            end_of_stream: config.end_of_stream,
        }
    }
}

/// Consume `frames` into `session` until a terminal status, end of stream,
/// transport failure, timeout or cancellation.
///
/// Returns `Ok(())` when the session completed, or when the stream ended
/// early under [`EndOfStreamPolicy::LeaveAsIs`]; the session status tells
/// the two apart. Every failure is also recorded on the session, except
/// cancellation, which leaves the session untouched.
pub async fn run_generation<S, E, O>(
    mut frames: S,
    session: &mut GenerationSession,
    observer: &mut O,
    options: RunOptions,
    cancel: &CancelToken,
) -> TwiggResult<()>
where
    S: Stream<Item = Result<StreamFrame, E>> + Unpin,
    E: Into<TwiggError>,
    O: SessionObserver + ?Sized,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Generation cancelled with session in {}", session.status());
                return Err(StreamError::Cancelled.into());
            }
            next = next_frame(&mut frames, options.idle_timeout) => next,
        };

        if cancel.is_cancelled() {
            return Err(StreamError::Cancelled.into());
        }

        match next {
            Err(elapsed) => {
                let err = StreamError::Timeout {
                    duration_secs: elapsed.as_secs(),
                };
                tracing::error!("{}", err);
                session.fail(err.user_message());
                observer.on_stream_end(session);
                return Err(err.into());
            }
            Ok(Some(Ok(frame))) => {
                let outcome = session.apply_frame(&frame);
                observer.on_frame(session, &outcome);

                match session.status() {
                    GenerationStatus::Completed => {
                        tracing::info!(
                            "Generation completed (draft {})",
                            session.draft_id().unwrap_or("<unknown>")
                        );
                        return Ok(());
                    }
                    GenerationStatus::Failed => {
                        return Err(StreamError::BackendError {
                            message: session.last_error().unwrap_or_default().to_string(),
                        }
                        .into());
                    }
                    _ => {}
                }
            }
            Ok(Some(Err(err))) => {
                let err: TwiggError = err.into();
                tracing::error!("Transport failure during generation: {}", err);
                session.fail(err.user_message());
                observer.on_stream_end(session);
                return Err(err);
            }
            Ok(None) => {
                let early = session.finish_stream(options.end_of_stream);
                observer.on_stream_end(session);
                return match early {
                    Some(err) if session.status() == GenerationStatus::Failed => Err(err.into()),
                    _ => Ok(()),
                };
            }
        }
    }
}

async fn next_frame<S>(frames: &mut S, idle_timeout: Option<Duration>) -> Result<Option<S::Item>, Duration>
where
    S: Stream + Unpin,
{
    match idle_timeout {
        Some(limit) => tokio::time::timeout(limit, frames.next())
            .await
            .map_err(|_| limit),
        None => Ok(frames.next().await),
    }
}
