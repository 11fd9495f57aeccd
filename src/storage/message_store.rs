//! In-memory message store with a JSON mirror of sent and stored messages
//!
//! Sent and stored records share one insertion-ordered list. The `sent`,
//! `stored`, `ids` and `tokens` views are all read from that list, so adding
//! or deleting a record keeps every view in step. Disregarded records live in
//! a separate list that is never written to disk.

use crate::{
    storage::{
        data_file::{DataFile, DEFAULT_DATA_FILE},
        message::{MessageRecord, MessageStatus},
        settings::Settings,
    },
    Result,
};
use std::path::Path;

/// Class order used by every lookup that spans all three collections
const SEARCH_ORDER: [MessageStatus; 3] = [
    MessageStatus::Sent,
    MessageStatus::Disregarded,
    MessageStatus::Pending,
];

/// Sender, recipient and id of a sent message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentSummary<'a> {
    /// Display name of the author
    pub sender: &'a str,
    /// Recipient phone number
    pub recipient: &'a str,
    /// Message ID
    pub id: &'a str,
}

/// Owner of every message record in the process
///
/// # Example
/// ```rust,no_run
/// use quickchat::storage::{MessageRecord, MessageStatus, MessageStore};
///
/// # fn example() -> quickchat::Result<()> {
/// let mut store = MessageStore::new("quickChatData.json");
/// store.load()?;
///
/// let msg = MessageRecord::new(
///     "MSG123456701".to_string(),
///     "Dev".to_string(),
///     "+27838884567".to_string(),
///     "Did you get the cake?".to_string(),
///     "MS:1:DIDCAKE?".to_string(),
///     MessageStatus::Sent,
/// );
/// store.add_sent(msg)?;
///
/// assert!(store.delete_by_token("ms:1:didcake?")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MessageStore {
    /// Sent and stored messages in insertion order
    persisted: Vec<MessageRecord>,
    /// Disregarded messages in insertion order
    disregarded: Vec<MessageRecord>,
    /// Mirror of the persisted messages
    data_file: DataFile,
}

impl MessageStore {
    /// Create an empty store backed by the given data file
    ///
    /// Nothing is read until [`MessageStore::load`] is called.
    pub fn new<P: AsRef<Path>>(data_path: P) -> Self {
        Self {
            persisted: Vec::new(),
            disregarded: Vec::new(),
            data_file: DataFile::new(data_path),
        }
    }

    /// Create an empty store backed by the data file named in the settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.data_file)
    }

    /// Path of the backing data file
    pub fn data_path(&self) -> &Path {
        self.data_file.path()
    }

    // ========== Classification ==========

    /// Record a message as sent and rewrite the data file
    ///
    /// The record is appended even if the rewrite fails; the error is
    /// returned so the caller can report it.
    pub fn add_sent(&mut self, msg: MessageRecord) -> Result<()> {
        self.push_persisted(msg, MessageStatus::Sent);
        self.save()
    }

    /// Record a message as stored for later and rewrite the data file
    ///
    /// The record is appended even if the rewrite fails.
    pub fn add_stored(&mut self, msg: MessageRecord) -> Result<()> {
        self.push_persisted(msg, MessageStatus::Pending);
        self.save()
    }

    /// Record a message as disregarded (memory only)
    pub fn add_disregarded(&mut self, mut msg: MessageRecord) {
        msg.status = MessageStatus::Disregarded;
        tracing::debug!(id = %msg.id, "Disregarded message");
        self.disregarded.push(msg);
    }

    fn push_persisted(&mut self, mut msg: MessageRecord, status: MessageStatus) {
        if msg.status != status {
            tracing::debug!(id = %msg.id, from = %msg.status, to = %status, "Classifying message");
        }
        msg.status = status;
        self.persisted.push(msg);
    }

    // ========== Queries ==========

    /// Iterate one class in insertion order
    fn class(&self, status: MessageStatus) -> impl Iterator<Item = &MessageRecord> {
        let source = match status {
            MessageStatus::Disregarded => &self.disregarded,
            MessageStatus::Sent | MessageStatus::Pending => &self.persisted,
        };
        source.iter().filter(move |m| m.status == status)
    }

    /// Find a message by id, searching sent, then disregarded, then stored
    pub fn find_by_id(&self, id: &str) -> Option<&MessageRecord> {
        SEARCH_ORDER
            .iter()
            .find_map(|&status| self.class(status).find(|m| m.id == id))
    }

    /// All messages to a recipient: sent first, then disregarded, then stored
    pub fn find_by_recipient(&self, recipient: &str) -> Vec<&MessageRecord> {
        SEARCH_ORDER
            .iter()
            .flat_map(|&status| self.class(status).filter(move |m| m.recipient == recipient))
            .collect()
    }

    /// The sent message with the longest text; ties go to the earliest one
    pub fn longest_sent(&self) -> Option<&MessageRecord> {
        self.class(MessageStatus::Sent)
            .reduce(|longest, m| if m.text_len() > longest.text_len() { m } else { longest })
    }

    /// Every sent message in insertion order
    pub fn all_sent_report(&self) -> Vec<&MessageRecord> {
        self.sent()
    }

    /// Sender, recipient and id of every sent message in insertion order
    pub fn sent_sender_recipient_pairs(&self) -> Vec<SentSummary<'_>> {
        self.class(MessageStatus::Sent)
            .map(|m| SentSummary {
                sender: &m.sender,
                recipient: &m.recipient,
                id: &m.id,
            })
            .collect()
    }

    // ========== Deletion ==========

    /// Delete the first message whose token matches, ignoring case
    ///
    /// Sent messages are searched first, then disregarded, then stored. Only
    /// one message is removed per call. Removing a sent or stored message
    /// rewrites the data file.
    ///
    /// # Returns
    /// True if a message was removed
    ///
    /// # Errors
    /// Returns an error if the rewrite fails; the message stays removed
    pub fn delete_by_token(&mut self, token: &str) -> Result<bool> {
        let wanted = token.to_uppercase();

        for status in SEARCH_ORDER {
            let list = match status {
                MessageStatus::Disregarded => &mut self.disregarded,
                MessageStatus::Sent | MessageStatus::Pending => &mut self.persisted,
            };
            let Some(pos) = list
                .iter()
                .position(|m| m.status == status && m.token.to_uppercase() == wanted)
            else {
                continue;
            };

            let removed = list.remove(pos);
            tracing::info!(id = %removed.id, %status, "Deleted message {}", removed.token);

            if status.is_persisted() {
                self.save()?;
            }
            return Ok(true);
        }

        Ok(false)
    }

    // ========== Persistence ==========

    /// Rewrite the data file from the current sent and stored messages
    pub fn save(&self) -> Result<()> {
        self.data_file
            .write(self.class(MessageStatus::Sent), self.class(MessageStatus::Pending))
    }

    /// Replace sent and stored messages with the contents of the data file
    ///
    /// Disregarded messages are kept. If the file cannot be read or parsed
    /// the store is left exactly as it was.
    ///
    /// # Returns
    /// True if at least one message was loaded; false for a missing or
    /// empty file, or a document without any decodable message
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load(&mut self) -> Result<bool> {
        let Some(snapshot) = self.data_file.read()? else {
            tracing::debug!(path = %self.data_path().display(), "No data file to load");
            return Ok(false);
        };

        self.persisted.clear();
        self.persisted.extend(snapshot.sent);
        self.persisted.extend(snapshot.stored);

        tracing::info!(
            path = %self.data_path().display(),
            sent = self.class(MessageStatus::Sent).count(),
            stored = self.class(MessageStatus::Pending).count(),
            skipped = snapshot.skipped,
            "Loaded messages"
        );

        Ok(!self.persisted.is_empty())
    }

    // ========== Accessors ==========

    /// Sent messages in insertion order
    pub fn sent(&self) -> Vec<&MessageRecord> {
        self.class(MessageStatus::Sent).collect()
    }

    /// Stored (pending) messages in insertion order
    pub fn stored(&self) -> Vec<&MessageRecord> {
        self.class(MessageStatus::Pending).collect()
    }

    /// Disregarded messages in insertion order
    pub fn disregarded(&self) -> &[MessageRecord] {
        &self.disregarded
    }

    /// Ids of all sent and stored messages
    pub fn ids(&self) -> Vec<&str> {
        self.persisted.iter().map(|m| m.id.as_str()).collect()
    }

    /// Tokens of all sent and stored messages
    pub fn tokens(&self) -> Vec<&str> {
        self.persisted.iter().map(|m| m.token.as_str()).collect()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}
