//! Seam between the conversation core and the backend transport.

use adk_api::{AdkApiClient, AdkApiError, ChunkStream, RunRequest, SessionRecord};
use async_trait::async_trait;

/// Backend operations the conversation core depends on.
///
/// Every call is a suspension point. Implementations must tolerate repeated
/// invocation because callers wrap them in a retry policy.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Create the session keyed by the client-generated `session_id`.
    async fn create_session(&self, session_id: &str) -> Result<SessionRecord, AdkApiError>;

    /// Liveness probe. `Ok` means a response was received.
    async fn probe_health(&self) -> Result<(), AdkApiError>;

    /// Dispatch one query and return the reply body as raw chunks.
    async fn open_stream(&self, request: &RunRequest) -> Result<ChunkStream, AdkApiError>;
}

#[async_trait]
impl ChatBackend for AdkApiClient {
    async fn create_session(&self, session_id: &str) -> Result<SessionRecord, AdkApiError> {
        AdkApiClient::create_session(self, session_id).await
    }

    async fn probe_health(&self) -> Result<(), AdkApiError> {
        AdkApiClient::probe_health(self).await.map(|_| ())
    }

    async fn open_stream(&self, request: &RunRequest) -> Result<ChunkStream, AdkApiError> {
        AdkApiClient::open_stream(self, request).await
    }
}
