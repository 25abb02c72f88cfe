//! Companion chat transcript persisted alongside the depot records.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub author: String,
    pub time: String,
    pub body: String,
}

/// Append-only message list. No further semantics attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChatTranscript {
    #[serde(default)]
    messages: Vec<ChatMessage>,
    #[serde(default)]
    next_id: u64,
}

impl ChatTranscript {
    pub fn post(&mut self, author: &str, body: &str, time: &str) -> u64 {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            author: author.to_string(),
            time: time.to_string(),
            body: body.trim().to_string(),
        });
        self.next_id
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_append_in_order() {
        let mut chat = ChatTranscript::default();
        chat.post("Alice", "Convoi prêt", "18:00");
        chat.post("Bob", "  Reçu  ", "18:01");

        assert_eq!(chat.len(), 2);
        assert_eq!(chat.messages()[0].author, "Alice");
        assert_eq!(chat.messages()[1].body, "Reçu");
    }
}
