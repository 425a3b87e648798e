//! Ordered conversation messages, the only state a renderer reads.

use std::fmt;

/// Stable message identifier, unique for the lifetime of one [`MessageStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Id of the human turn for submission `sequence`.
    pub fn human(sequence: u64) -> Self {
        Self(sequence.to_string())
    }

    /// Id of the streamed reply to submission `sequence`.
    pub fn reply(sequence: u64) -> Self {
        Self(format!("{sequence}_ai"))
    }

    /// Id of an error notice for submission `sequence`.
    pub fn error(sequence: u64) -> Self {
        Self(format!("{sequence}_ai_error"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Human,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Author of the envelope that last replaced the content.
    pub agent: Option<String>,
    /// Generated resource announced by the reply, if any.
    pub resource_url: Option<String>,
    /// True while the reply stream is still feeding this message.
    pub streaming: bool,
}

impl Message {
    pub fn human(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Human,
            content: content.into(),
            agent: None,
            resource_url: None,
            streaming: false,
        }
    }

    /// Empty in-flight reply that stream fragments grow in place.
    pub fn ai_placeholder(id: MessageId) -> Self {
        Self {
            id,
            role: Role::Ai,
            content: String::new(),
            agent: None,
            resource_url: None,
            streaming: true,
        }
    }

    pub fn ai(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Ai,
            content: content.into(),
            agent: None,
            resource_url: None,
            streaming: false,
        }
    }
}

/// Insertion-ordered message sequence.
///
/// Messages are never reordered or removed individually; [`MessageStore::reset`]
/// is the only way to drop them. Every effective mutation bumps
/// [`MessageStore::version`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageStore {
    messages: Vec<Message>,
    version: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Returns `false` and leaves the store untouched when
    /// the id is already present.
    pub fn append(&mut self, message: Message) -> bool {
        if self.get(&message.id).is_some() {
            tracing::warn!(id = %message.id, "ignoring message with duplicate id");
            return false;
        }

        self.messages.push(message);
        self.version += 1;
        true
    }

    /// Apply `mutator` to the message with `id`.
    ///
    /// Unknown ids are ignored, which covers frames arriving after a reset.
    pub fn update_by_id<F>(&mut self, id: &MessageId, mutator: F) -> bool
    where
        F: FnOnce(&mut Message),
    {
        let Some(message) = self.messages.iter_mut().find(|message| &message.id == id) else {
            return false;
        };

        mutator(message);
        self.version += 1;
        true
    }

    pub fn reset(&mut self) {
        self.messages.clear();
        self.version += 1;
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| &message.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Mark every in-flight reply as finished. Returns how many were closed.
    pub fn finish_streaming(&mut self) -> usize {
        let mut closed = 0;
        for message in self.messages.iter_mut().filter(|message| message.streaming) {
            message.streaming = false;
            closed += 1;
        }
        if closed > 0 {
            self.version += 1;
        }
        closed
    }

    /// Number of replies still being streamed.
    pub fn streaming_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.streaming)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Message, MessageId, MessageStore, Role};

    #[test]
    fn append_preserves_insertion_order() {
        let mut store = MessageStore::new();
        store.append(Message::human(MessageId::human(1), "first"));
        store.append(Message::ai_placeholder(MessageId::reply(1)));
        store.append(Message::human(MessageId::human(2), "second"));

        let ids: Vec<&str> = store.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "1_ai", "2"]);
        assert_eq!(store.messages()[1].role, Role::Ai);
        assert_eq!(store.version(), 3);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut store = MessageStore::new();
        assert!(store.append(Message::human(MessageId::human(1), "a")));
        assert!(!store.append(Message::human(MessageId::human(1), "b")));

        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].content, "a");
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn update_by_unknown_id_is_a_no_op() {
        let mut store = MessageStore::new();
        store.append(Message::ai_placeholder(MessageId::reply(1)));
        store.reset();
        let version = store.version();

        let applied = store.update_by_id(&MessageId::reply(1), |message| {
            message.content.push_str("late");
        });

        assert!(!applied);
        assert!(store.is_empty());
        assert_eq!(store.version(), version);
    }

    #[test]
    fn update_mutates_in_place_and_bumps_version() {
        let mut store = MessageStore::new();
        let id = MessageId::reply(4);
        store.append(Message::ai_placeholder(id.clone()));
        assert_eq!(store.streaming_count(), 1);

        assert!(store.update_by_id(&id, |message| {
            message.content.push_str("hello");
            message.streaming = false;
        }));

        let message = store.get(&id).expect("message");
        assert_eq!(message.content, "hello");
        assert_eq!(store.streaming_count(), 0);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn finish_streaming_closes_only_open_replies() {
        let mut store = MessageStore::new();
        store.append(Message::human(MessageId::human(1), "q"));
        store.append(Message::ai_placeholder(MessageId::reply(1)));
        store.append(Message::ai_placeholder(MessageId::reply(2)));
        let version = store.version();

        assert_eq!(store.finish_streaming(), 2);
        assert_eq!(store.streaming_count(), 0);
        assert_eq!(store.version(), version + 1);

        assert_eq!(store.finish_streaming(), 0);
        assert_eq!(store.version(), version + 1);
    }
}
