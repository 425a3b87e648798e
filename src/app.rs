//! Conversation controller: readiness gate, lazy session, one streamed reply
//! per submitted query.

use adk_api::{AdkApiClient, AdkApiError, RetryPolicy, RunRequest, SseFrameAssembler};
use futures_util::StreamExt;

use crate::backend::ChatBackend;
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::interpreter::PayloadInterpreter;
use crate::readiness::{BackendReadinessPoller, Readiness};
use crate::session::{Session, SessionBootstrapper};
use crate::store::{Message, MessageId, MessageStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    /// Readiness has not been established yet.
    Checking,
    Ready,
    /// Probe budget spent; only [`ChatApp::reload`] leaves this state.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank query; nothing was sent.
    Ignored,
    Completed { reply_id: MessageId, frames: usize },
}

pub struct ChatApp<B> {
    backend: B,
    store: MessageStore,
    bootstrapper: SessionBootstrapper,
    poller: BackendReadinessPoller,
    dispatch: RetryPolicy,
    state: BackendState,
    sequence: u64,
}

impl ChatApp<AdkApiClient> {
    pub fn from_config(config: &ChatConfig) -> Result<Self, AdkApiError> {
        Ok(Self::new(config.client()?, config))
    }
}

impl<B: ChatBackend> ChatApp<B> {
    pub fn new(backend: B, config: &ChatConfig) -> Self {
        Self::with_policies(backend, config.retry, config.readiness)
    }

    pub fn with_policies(backend: B, retry: RetryPolicy, poller: BackendReadinessPoller) -> Self {
        Self {
            backend,
            store: MessageStore::new(),
            bootstrapper: SessionBootstrapper::new(retry),
            poller,
            dispatch: retry,
            state: BackendState::Checking,
            sequence: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn session(&self) -> Option<&Session> {
        self.bootstrapper.session()
    }

    pub fn state(&self) -> BackendState {
        self.state
    }

    /// Poll the backend until it answers or the probe budget runs out.
    pub async fn check_backend(&mut self) -> Readiness {
        self.state = BackendState::Checking;
        let readiness = self.poller.wait_until_ready(&self.backend).await;
        self.state = if readiness.is_ready() {
            BackendState::Ready
        } else {
            BackendState::Unavailable
        };
        readiness
    }

    /// Send `query` and stream the reply into the store.
    ///
    /// Failures after retry exhaustion are also appended to the store as an
    /// error notice before being returned.
    pub async fn submit(&mut self, query: &str) -> Result<SubmitOutcome, ChatError> {
        if self.state != BackendState::Ready {
            return Err(ChatError::NotReady);
        }
        if query.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        let abandoned = self.store.finish_streaming();
        if abandoned > 0 {
            tracing::debug!(abandoned, "closing replies left open by a dropped submission");
        }

        self.sequence += 1;
        let sequence = self.sequence;
        let reply_id = MessageId::reply(sequence);

        match self.run_turn(sequence, query, &reply_id).await {
            Ok(frames) => {
                self.finish_reply(&reply_id);
                tracing::debug!(%reply_id, frames, "reply complete");
                Ok(SubmitOutcome::Completed { reply_id, frames })
            }
            Err(error) => {
                tracing::error!(sequence, %error, "query failed");
                self.finish_reply(&reply_id);
                self.store.append(Message::ai(
                    MessageId::error(sequence),
                    error.user_message(),
                ));
                Err(error)
            }
        }
    }

    /// Discard the session, every message and the readiness verdict.
    ///
    /// An abandoned in-flight submission leaves nothing behind; callers run
    /// [`check_backend`](Self::check_backend) again afterwards.
    pub fn reload(&mut self) {
        tracing::info!("reloading conversation");
        self.store.reset();
        self.bootstrapper.reset();
        self.state = BackendState::Checking;
    }

    async fn run_turn(
        &mut self,
        sequence: u64,
        query: &str,
        reply_id: &MessageId,
    ) -> Result<usize, ChatError> {
        let session = self.bootstrapper.ensure_session(&self.backend).await?;

        self.store
            .append(Message::human(MessageId::human(sequence), query));
        self.store.append(Message::ai_placeholder(reply_id.clone()));

        let request = RunRequest::new(
            session.app_name(),
            session.user_id(),
            session.session_id(),
            query,
        );
        let backend = &self.backend;
        let mut chunks = self
            .dispatch
            .execute(|| backend.open_stream(&request))
            .await
            .map_err(ChatError::Dispatch)?;

        let mut assembler = SseFrameAssembler::default();
        let mut frames = 0;
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(ChatError::Stream)?;
            for payload in assembler.feed(&chunk) {
                frames += 1;
                PayloadInterpreter::interpret(&payload, reply_id, &mut self.store);
            }
        }
        if let Some(payload) = assembler.finish() {
            frames += 1;
            PayloadInterpreter::interpret(&payload, reply_id, &mut self.store);
        }

        Ok(frames)
    }

    fn finish_reply(&mut self, reply_id: &MessageId) {
        self.store.update_by_id(reply_id, |message| {
            message.streaming = false;
        });
    }
}
