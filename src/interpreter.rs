//! Decoding of one frame payload into a message-store mutation.
//!
//! A frame carries an envelope whose text parts are themselves a streamed JSON
//! document. When the joined text decodes on its own it is a complete answer
//! and replaces the reply; when it does not, it is a fragment and is appended.

use adk_api::{Event, GeneratedResource};
use serde_json::Value;

use crate::store::{MessageId, MessageStore};

/// Why a frame left the store untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MalformedEnvelope,
    NoContent,
    UnknownMessage,
}

/// What interpreting one frame did to the target message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Dropped(DropReason),
    /// Fragment appended; `agent` left as it was.
    Appended,
    /// Complete inner document replaced the content.
    Replaced,
    /// Generated-resource shape replaced the content with a reference.
    GeneratedResource,
}

pub struct PayloadInterpreter;

impl PayloadInterpreter {
    /// Apply one frame payload to the message `target`.
    ///
    /// Never fails: malformed frames are logged and dropped.
    pub fn interpret(payload: &str, target: &MessageId, store: &mut MessageStore) -> FrameOutcome {
        let event = match Event::parse(payload) {
            Ok(event) => event,
            Err(error) => {
                tracing::debug!(%error, "dropping frame with malformed envelope");
                return FrameOutcome::Dropped(DropReason::MalformedEnvelope);
            }
        };

        let Some(text) = event.text_content() else {
            tracing::debug!(author = ?event.author, "dropping frame without content parts");
            return FrameOutcome::Dropped(DropReason::NoContent);
        };

        let (outcome, applied) = match serde_json::from_str::<Value>(&text) {
            Ok(inner) => match GeneratedResource::from_value(&inner) {
                Some(resource) => {
                    let applied = store.update_by_id(target, |message| {
                        message.content = resource.reference();
                        message.resource_url = Some(resource.url);
                        message.agent = event.author;
                    });
                    (FrameOutcome::GeneratedResource, applied)
                }
                None => {
                    let applied = store.update_by_id(target, |message| {
                        message.content = text;
                        message.agent = event.author;
                    });
                    (FrameOutcome::Replaced, applied)
                }
            },
            Err(_) => {
                let applied = store.update_by_id(target, |message| {
                    message.content.push_str(&text);
                });
                (FrameOutcome::Appended, applied)
            }
        };

        if applied {
            outcome
        } else {
            tracing::debug!(%target, "dropping frame for a message that no longer exists");
            FrameOutcome::Dropped(DropReason::UnknownMessage)
        }
    }
}
