//! Conversation core for agent development kit backends.
//!
//! Invariant: the [`MessageStore`] is the only state a renderer reads, and it is
//! mutated only through [`ChatApp`] and [`PayloadInterpreter`].
//!
//! # Public API Overview
//! - Gate interaction on backend liveness with [`ChatApp::check_backend`]
//!   ([`BackendReadinessPoller`]).
//! - Submit queries with [`ChatApp::submit`]; the first one creates the
//!   [`Session`] through [`SessionBootstrapper`].
//! - Reply frames are assembled by [`adk_api::SseFrameAssembler`] and applied to
//!   the in-flight reply by [`PayloadInterpreter`].
//! - [`ChatApp::reload`] is the only cancellation: it drops the session and
//!   every message.
//!
//! Transport lives in the [`adk_api`] crate behind the [`ChatBackend`] trait.

pub mod config;
pub mod logging;

pub mod app;
pub mod backend;
pub mod error;
pub mod interpreter;
pub mod readiness;
pub mod session;
pub mod store;

pub use adk_api;

pub use crate::app::{BackendState, ChatApp, SubmitOutcome};
pub use crate::backend::ChatBackend;
pub use crate::config::ChatConfig;
pub use crate::error::ChatError;
pub use crate::interpreter::{DropReason, FrameOutcome, PayloadInterpreter};
pub use crate::readiness::{BackendReadinessPoller, Readiness};
pub use crate::session::{Session, SessionBootstrapper};
pub use crate::store::{Message, MessageId, MessageStore, Role};
