use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    User,
    Agent,
}

/// One entry in the append-only chat transcript, ordered by
/// submission/resolution order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(author: Author, text: &str, timestamp: DateTime<Utc>) -> ChatMessage {
        return ChatMessage {
            author,
            text: text.to_string(),
            timestamp,
        };
    }
}
