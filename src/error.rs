use adk_api::{AdkApiError, RetryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to create session: {0}")]
    SessionBootstrap(#[source] RetryError<AdkApiError>),

    #[error("failed to send message: {0}")]
    Dispatch(#[source] RetryError<AdkApiError>),

    #[error("reply stream interrupted: {0}")]
    Stream(#[source] AdkApiError),

    #[error("backend is not ready")]
    NotReady,
}

impl ChatError {
    /// Text of the notice appended to the conversation for this failure.
    pub fn user_message(&self) -> String {
        format!("Sorry, there was an error processing your request: {self}")
    }
}
