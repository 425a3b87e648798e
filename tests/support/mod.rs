#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use adk_api::{AdkApiError, ChunkStream, RunRequest, SessionRecord, StatusCode};
use adk_chat::ChatBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};

pub const USER_ID: &str = "u_999";
pub const APP_NAME: &str = "app";

/// Scripted body for one dispatched query.
#[derive(Debug, Clone, Default)]
pub struct ReplyScript {
    chunks: Vec<Vec<u8>>,
    error: Option<String>,
    hang: bool,
}

impl ReplyScript {
    pub fn chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            ..Self::default()
        }
    }

    /// Deliver `body` cut into pieces of `size` bytes.
    pub fn split(body: &str, size: usize) -> Self {
        Self::chunks(body.as_bytes().chunks(size.max(1)))
    }

    pub fn then_error(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    /// Keep the stream open forever after the scripted chunks.
    pub fn then_hang(mut self) -> Self {
        self.hang = true;
        self
    }

    fn into_stream(self) -> ChunkStream {
        let mut items: Vec<Result<Bytes, AdkApiError>> = self
            .chunks
            .into_iter()
            .map(|chunk| Ok(Bytes::from(chunk)))
            .collect();
        if let Some(message) = self.error {
            items.push(Err(AdkApiError::Stream(message)));
        }

        let body = stream::iter(items);
        if self.hang {
            Box::pin(body.chain(stream::pending()))
        } else {
            Box::pin(body)
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    failing_probes: Option<usize>,
    failing_sessions: usize,
    failing_dispatches: usize,
    probe_calls: usize,
    session_calls: usize,
    dispatch_calls: usize,
    session_ids: Vec<String>,
    requests: Vec<RunRequest>,
    replies: VecDeque<ReplyScript>,
}

/// In-memory backend with scripted failures and replies.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every liveness probe fails.
    pub fn never_ready(self) -> Self {
        self.lock().failing_probes = Some(usize::MAX);
        self
    }

    /// The first `failures` liveness probes fail.
    pub fn ready_after(self, failures: usize) -> Self {
        self.lock().failing_probes = Some(failures);
        self
    }

    pub fn failing_sessions(self, failures: usize) -> Self {
        self.lock().failing_sessions = failures;
        self
    }

    pub fn failing_dispatches(self, failures: usize) -> Self {
        self.lock().failing_dispatches = failures;
        self
    }

    pub fn reply(self, script: ReplyScript) -> Self {
        self.push_reply(script);
        self
    }

    pub fn push_reply(&self, script: ReplyScript) {
        self.lock().replies.push_back(script);
    }

    pub fn set_failing_sessions(&self, failures: usize) {
        self.lock().failing_sessions = failures;
    }

    pub fn probe_calls(&self) -> usize {
        self.lock().probe_calls
    }

    pub fn session_calls(&self) -> usize {
        self.lock().session_calls
    }

    pub fn dispatch_calls(&self) -> usize {
        self.lock().dispatch_calls
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.lock().session_ids.clone()
    }

    pub fn requests(&self) -> Vec<RunRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }
}

fn unavailable() -> AdkApiError {
    AdkApiError::Status(StatusCode::SERVICE_UNAVAILABLE, "backend starting".into())
}

fn take_failure(remaining: &mut usize) -> bool {
    if *remaining == 0 {
        return false;
    }
    if *remaining != usize::MAX {
        *remaining -= 1;
    }
    true
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn create_session(&self, session_id: &str) -> Result<SessionRecord, AdkApiError> {
        let mut state = self.lock();
        state.session_calls += 1;
        state.session_ids.push(session_id.to_string());
        if take_failure(&mut state.failing_sessions) {
            return Err(unavailable());
        }
        Ok(SessionRecord {
            id: session_id.to_string(),
            user_id: USER_ID.to_string(),
            app_name: APP_NAME.to_string(),
        })
    }

    async fn probe_health(&self) -> Result<(), AdkApiError> {
        let mut state = self.lock();
        state.probe_calls += 1;
        let failing = match state.failing_probes.as_mut() {
            Some(remaining) => take_failure(remaining),
            None => false,
        };
        if failing {
            Err(unavailable())
        } else {
            Ok(())
        }
    }

    async fn open_stream(&self, request: &RunRequest) -> Result<ChunkStream, AdkApiError> {
        let mut state = self.lock();
        state.dispatch_calls += 1;
        if take_failure(&mut state.failing_dispatches) {
            return Err(unavailable());
        }
        state.requests.push(request.clone());
        let script = state.replies.pop_front().unwrap_or_default();
        Ok(script.into_stream())
    }
}

/// One `data:` frame carrying an envelope with a single text part.
pub fn frame(author: &str, text: &str) -> String {
    let envelope = serde_json::json!({
        "author": author,
        "content": { "parts": [{ "text": text }], "role": "model" },
    });
    format!("data: {envelope}\n\n")
}
