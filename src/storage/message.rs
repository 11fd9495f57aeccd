//! Message record and classification status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification status of a message
///
/// Each status corresponds to exactly one collection in the
/// [`MessageStore`](crate::storage::MessageStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    /// Message was sent (persisted)
    Sent,
    /// Message is stored for later (persisted)
    Pending,
    /// Message was discarded (kept in memory only)
    Disregarded,
}

impl MessageStatus {
    /// Wire/display name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Sent => "SENT",
            MessageStatus::Pending => "PENDING",
            MessageStatus::Disregarded => "DISREGARDED",
        }
    }

    /// Whether messages with this status are mirrored to the data file
    pub fn is_persisted(&self) -> bool {
        !matches!(self, MessageStatus::Disregarded)
    }
}

impl Default for MessageStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a single composed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message ID
    pub id: String,
    /// Display name of the author
    #[serde(default)]
    pub sender: String,
    /// Recipient phone number in international format
    pub recipient: String,
    /// Message body
    #[serde(rename = "messageText")]
    pub text: String,
    /// Deterministic fingerprint used as the deletion handle
    #[serde(rename = "hash")]
    pub token: String,
    /// Classification status
    pub status: MessageStatus,
}

impl MessageRecord {
    /// Create a new message record
    pub fn new(
        id: String,
        sender: String,
        recipient: String,
        text: String,
        token: String,
        status: MessageStatus,
    ) -> Self {
        Self {
            id,
            sender,
            recipient,
            text,
            token,
            status,
        }
    }

    /// Length of the message body in characters
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, sender: {}, recipient: {}, Message: {}, Hash: {}, Status: {}",
            self.id, self.sender, self.recipient, self.text, self.token, self.status
        )
    }
}
