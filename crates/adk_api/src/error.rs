use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdkApiError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid header {0}")]
    InvalidHeader(String),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {}: {}", .0.as_u16(), .1)]
    Status(StatusCode, String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid session response: missing {0}")]
    InvalidSession(&'static str),

    #[error("stream read failure: {0}")]
    Stream(String),
}

impl AdkApiError {
    /// HTTP status carried by a non-success response, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status, _) => Some(*status),
            Self::Request(error) => error.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: Option<ErrorPayloadFields>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayloadFields {
    Structured { message: Option<String> },
    Plain(String),
}

/// Reduce an error response body to a short human-readable message.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        let from_error = match payload.error {
            Some(ErrorPayloadFields::Structured { message }) => message,
            Some(ErrorPayloadFields::Plain(message)) => Some(message),
            None => None,
        };
        let from_detail = payload.detail.map(|detail| match detail {
            serde_json::Value::String(message) => message,
            other => other.to_string(),
        });

        if let Some(message) = from_error
            .or(from_detail)
            .filter(|message| !message.trim().is_empty())
        {
            return message;
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
