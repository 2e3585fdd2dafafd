//! Drafts API client.
//!
//! Starts course generation (`POST /drafts/stream`, answered with an event
//! stream) and publishes finished drafts (`POST /drafts/publish`).

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::Stream;
use futures_util::StreamExt;
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{
    classify_reqwest_error, NetworkError, RequestError, StreamError, TwiggError, TwiggResult,
};
use crate::generation::{run_generation, CancelToken, GenerationSession, RunOptions, SessionObserver};
use crate::models::{GenerationRequest, PublishRequest};
use crate::sse::{frame_stream, StreamFrame};

pub const STREAM_PATH: &str = "/drafts/stream";
pub const PUBLISH_PATH: &str = "/drafts/publish";

/// Bounds the TCP/TLS handshake of every request; once connected, streams
/// are bounded by the idle timeout and publishing by its own timeout
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Frames of one generation response, in arrival order.
pub type FrameStream = Pin<Box<dyn Stream<Item = TwiggResult<StreamFrame>> + Send>>;

/// Operations the generation flow needs from the drafts API.
#[async_trait]
pub trait DraftsApi: Send + Sync {
    /// Start generating a course and return its frame stream.
    async fn stream_draft(&self, request: &GenerationRequest) -> TwiggResult<FrameStream>;

    /// Publish a generated draft.
    async fn publish_draft(&self, draft_id: Option<&str>) -> TwiggResult<()>;
}

/// HTTP client for the drafts API.
pub struct DraftsClient {
    config: ClientConfig,
    /// Reusable HTTP client
    client: Client,
}

impl DraftsClient {
    pub fn new(config: ClientConfig) -> TwiggResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| NetworkError::Other {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn token(&self) -> Result<&str, RequestError> {
        self.config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(RequestError::NotAuthenticated)
    }

    async fn check_status(response: reqwest::Response) -> TwiggResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(NetworkError::HttpStatus { status, message }.into())
    }
}

#[async_trait]
impl DraftsApi for DraftsClient {
    async fn stream_draft(&self, request: &GenerationRequest) -> TwiggResult<FrameStream> {
        request.validate()?;
        let token = self.token()?;
        let url = self.config.endpoint(STREAM_PATH);

        tracing::info!("Requesting course generation for '{}'", request.course_title);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Accept", "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url))?;
        let response = Self::check_status(response).await?;

        let chunks = Box::pin(response.bytes_stream().map(|chunk| {
            chunk.map_err(|e| StreamError::ConnectionLost {
                message: e.to_string(),
            })
        }));

        Ok(Box::pin(
            frame_stream(chunks).map(|frame| frame.map_err(TwiggError::from)),
        ))
    }

    async fn publish_draft(&self, draft_id: Option<&str>) -> TwiggResult<()> {
        let body = PublishRequest::new(draft_id)?;
        let token = self.token()?;
        let url = self.config.endpoint(PUBLISH_PATH);

        let response = self
            .client
            .post(&url)
            .timeout(self.config.publish_timeout)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url))?;
        Self::check_status(response).await?;

        tracing::info!("Published draft {}", body.draft_id);
        Ok(())
    }
}

/// Run one generation end to end: reset `session`, open the stream and
/// consume it.
///
/// Requests refused locally leave the session untouched; any later failure
/// is recorded on it. Once `cancel` fires the session is no longer touched,
/// including while the stream is still being opened.
pub async fn generate_course<A, O>(
    api: &A,
    request: &GenerationRequest,
    options: RunOptions,
    session: &mut GenerationSession,
    observer: &mut O,
    cancel: &CancelToken,
) -> TwiggResult<()>
where
    A: DraftsApi + ?Sized,
    O: SessionObserver + ?Sized,
{
    if cancel.is_cancelled() {
        return Err(StreamError::Cancelled.into());
    }
    session.reset();

    let opened = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::info!("Generation cancelled while opening the stream");
            return Err(StreamError::Cancelled.into());
        }
        opened = api.stream_draft(request) => opened,
    };

    let frames = match opened {
        Ok(frames) => frames,
        Err(err @ TwiggError::Request(_)) => return Err(err),
        Err(err) if cancel.is_cancelled() => {
            tracing::debug!("Ignoring failure after cancellation: {}", err);
            return Err(StreamError::Cancelled.into());
        }
        Err(err) => {
            tracing::error!("Course generation error: {}", err);
            session.fail(err.user_message());
            observer.on_stream_end(session);
            return Err(err);
        }
    };

    run_generation(frames, session, observer, options, cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationStatus;

    #[test]
    fn test_client_uses_config() {
        let client = DraftsClient::new(ClientConfig::new().with_base_url("http://localhost:9999/")).unwrap();
        assert_eq!(
            client.config().endpoint(STREAM_PATH),
            "http://localhost:9999/drafts/stream"
        );
    }

    #[tokio::test]
    async fn test_stream_requires_token() {
        let client = DraftsClient::new(ClientConfig::new()).unwrap();
        let result = client
            .stream_draft(&GenerationRequest::new("Intro", "Teach me"))
            .await;
        assert!(matches!(
            result,
            Err(TwiggError::Request(RequestError::NotAuthenticated))
        ));
    }

    #[tokio::test]
    async fn test_stream_validates_before_sending() {
        let client = DraftsClient::new(ClientConfig::new().with_token("t")).unwrap();
        let result = client.stream_draft(&GenerationRequest::new("", "Teach me")).await;
        assert!(matches!(
            result,
            Err(TwiggError::Request(RequestError::MissingTitle))
        ));
    }

    #[tokio::test]
    async fn test_publish_requires_draft_id() {
        let client = DraftsClient::new(ClientConfig::new().with_token("t")).unwrap();
        let result = client.publish_draft(None).await;
        assert!(matches!(
            result,
            Err(TwiggError::Request(RequestError::MissingDraftId))
        ));
    }

    #[tokio::test]
    async fn test_stream_with_unreachable_server() {
        let client = DraftsClient::new(
            ClientConfig::new()
                .with_base_url("http://127.0.0.1:1")
                .with_token("t"),
        )
        .unwrap();
        let result = client
            .stream_draft(&GenerationRequest::new("Intro", "Teach me"))
            .await;
        assert!(matches!(
            result,
            Err(TwiggError::Network(NetworkError::ConnectionFailed { .. }))
        ));
    }

    /// Never answers, like a backend that is slow to send headers.
    struct HangingApi;

    #[async_trait]
    impl DraftsApi for HangingApi {
        async fn stream_draft(&self, _request: &GenerationRequest) -> TwiggResult<FrameStream> {
            futures_util::future::pending().await
        }

        async fn publish_draft(&self, _draft_id: Option<&str>) -> TwiggResult<()> {
            Ok(())
        }
    }

    /// Answers 502; optionally cancels `cancel` first, as if the user hit
    /// Ctrl-C while the response was on its way.
    struct BadGatewayApi {
        cancel: Option<CancelToken>,
    }

    #[async_trait]
    impl DraftsApi for BadGatewayApi {
        async fn stream_draft(&self, _request: &GenerationRequest) -> TwiggResult<FrameStream> {
            if let Some(cancel) = &self.cancel {
                cancel.cancel();
            }
            Err(NetworkError::HttpStatus {
                status: 502,
                message: "Bad Gateway".to_string(),
            }
            .into())
        }

        async fn publish_draft(&self, _draft_id: Option<&str>) -> TwiggResult<()> {
            Ok(())
        }
    }

    async fn generate(
        api: &dyn DraftsApi,
        session: &mut GenerationSession,
        cancel: &CancelToken,
    ) -> TwiggResult<()> {
        generate_course(
            api,
            &GenerationRequest::new("Intro", "Teach me"),
            RunOptions::default(),
            session,
            &mut crate::generation::NoopObserver,
            cancel,
        )
        .await
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_connect() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut session = GenerationSession::new();

        let result = tokio::time::timeout(
            Duration::from_millis(500),
            generate(&HangingApi, &mut session, &cancel),
        )
        .await
        .expect("returns without waiting for the server");

        assert!(matches!(
            result,
            Err(TwiggError::Stream(StreamError::Cancelled))
        ));
        assert_eq!(session, GenerationSession::new());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_connecting() {
        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            trigger.cancel();
        });
        let mut session = GenerationSession::new();

        let result = generate(&HangingApi, &mut session, &cancel).await;

        assert!(matches!(
            result,
            Err(TwiggError::Stream(StreamError::Cancelled))
        ));
        assert_eq!(session.status(), GenerationStatus::Idle);
    }

    #[tokio::test]
    async fn test_connect_failure_after_cancel_leaves_session_idle() {
        let cancel = CancelToken::new();
        let api = BadGatewayApi {
            cancel: Some(cancel.clone()),
        };
        let mut session = GenerationSession::new();

        let result = generate(&api, &mut session, &cancel).await;

        assert!(matches!(
            result,
            Err(TwiggError::Stream(StreamError::Cancelled))
        ));
        assert_eq!(session.status(), GenerationStatus::Idle);
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_connect_failure_fails_session() {
        let mut session = GenerationSession::new();

        let result = generate(&BadGatewayApi { cancel: None }, &mut session, &CancelToken::new()).await;

        assert!(matches!(
            result,
            Err(TwiggError::Network(NetworkError::HttpStatus { status: 502, .. }))
        ));
        assert_eq!(session.status(), GenerationStatus::Failed);
    }
}
