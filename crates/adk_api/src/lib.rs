//! Transport-only client primitives for an agent development kit backend.
//!
//! This crate owns request building, response decoding and stream framing for
//! the session, liveness and streaming-run endpoints. It holds no conversation
//! state; callers own sessions and message history.
//!
//! Streaming runs answer with `data:`-prefixed JSON envelopes separated by blank
//! lines. [`SseFrameAssembler`] rebuilds those frames from arbitrarily chunked
//! bytes, and [`events::Event`] decodes one envelope.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod headers;
pub mod payload;
pub mod retry;
pub mod sse;
pub mod url;

pub use client::{AdkApiClient, ChunkStream, SessionRecord};
pub use config::{AdkApiConfig, AdkEndpoints};
pub use error::AdkApiError;
pub use events::{Event, GeneratedResource};
pub use payload::{Content, Part, RunRequest};
pub use retry::{RetryError, RetryPolicy};
pub use sse::SseFrameAssembler;
pub use url::normalize_base_url;

pub use reqwest::StatusCode;
