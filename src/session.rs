//! Lazily created, immutable conversation session.

use adk_api::{RetryPolicy, SessionRecord};
use uuid::Uuid;

use crate::backend::ChatBackend;
use crate::error::ChatError;

/// Backend conversation identity. All three fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    session_id: String,
    app_name: String,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Self {
            user_id: record.user_id,
            session_id: record.id,
            app_name: record.app_name,
        }
    }
}

/// Creates the session on first use and caches it until [`reset`].
///
/// [`reset`]: SessionBootstrapper::reset
#[derive(Debug, Clone)]
pub struct SessionBootstrapper {
    policy: RetryPolicy,
    session: Option<Session>,
}

impl SessionBootstrapper {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Return the cached session, creating it under the retry policy first if
    /// none is held. Each attempt uses a fresh conversation id so a retried
    /// create never collides with one the backend already accepted.
    pub async fn ensure_session<B>(&mut self, backend: &B) -> Result<Session, ChatError>
    where
        B: ChatBackend + ?Sized,
    {
        if let Some(session) = &self.session {
            return Ok(session.clone());
        }

        let record = self
            .policy
            .execute(|| async move {
                let conversation_id = Uuid::new_v4().to_string();
                backend
                    .create_session(&conversation_id)
                    .await
                    .and_then(SessionRecord::validate)
            })
            .await
            .map_err(ChatError::SessionBootstrap)?;

        let session = Session::from(record);
        tracing::info!(
            session_id = session.session_id(),
            user_id = session.user_id(),
            app_name = session.app_name(),
            "session created"
        );
        self.session = Some(session.clone());
        Ok(session)
    }

    pub fn reset(&mut self) {
        self.session = None;
    }
}
