//! Message composition
//!
//! This module turns user input into message records ready for the store:
//! - Message id generation
//! - Draft validation and token assignment
//! - Classification of a finished record (send, disregard, store)
//! - The per-session message quota

use crate::{
    storage::{
        derive_token, valid_message_text, valid_recipient, valid_sender, MessageRecord,
        MessageStatus, MessageStore, MAX_MESSAGE_LENGTH,
    },
    Error, Result,
};
use rand::Rng;
use std::str::FromStr;

/// Prefix of every generated message id
pub const MESSAGE_ID_PREFIX: &str = "MSG";

/// Generate a message id: `MSG`, seven random digits, and the two-digit sequence number
///
/// The sequence number is taken modulo 100, so the id is always 12 characters.
///
/// # Example
/// ```rust
/// use quickchat::compose::generate_message_id;
///
/// let id = generate_message_id(7, &mut rand::thread_rng());
/// assert_eq!(id.len(), 12);
/// assert!(id.starts_with("MSG"));
/// assert!(id.ends_with("07"));
/// ```
pub fn generate_message_id<R: Rng + ?Sized>(seq: u32, rng: &mut R) -> String {
    let random_part: u32 = rng.gen_range(1_000_000..=9_999_999);
    format!("{}{}{:02}", MESSAGE_ID_PREFIX, random_part, seq % 100)
}

/// User input for a message that has not been classified yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    /// Display name of the author
    pub sender: String,
    /// Recipient phone number
    pub recipient: String,
    /// Message body
    pub text: String,
}

impl MessageDraft {
    /// Create a new draft
    pub fn new(sender: String, recipient: String, text: String) -> Self {
        Self {
            sender,
            recipient,
            text,
        }
    }

    /// Check the draft fields
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the first field that is rejected
    pub fn validate(&self) -> Result<()> {
        if !valid_sender(&self.sender) {
            return Err(Error::Validation("Sender name cannot be empty.".to_string()));
        }
        if !valid_recipient(Some(&self.recipient)) {
            return Err(Error::Validation(
                "Recipient must be an international number: '+' followed by 10 to 15 digits."
                    .to_string(),
            ));
        }
        if self.text.trim().is_empty() {
            return Err(Error::Validation("Message cannot be empty.".to_string()));
        }
        if !valid_message_text(&self.text) {
            let excess = self.text.chars().count() - MAX_MESSAGE_LENGTH;
            return Err(Error::Validation(format!(
                "Message exceeds {} characters by {}, please reduce size.",
                MAX_MESSAGE_LENGTH, excess
            )));
        }
        Ok(())
    }

    /// Validate the draft and turn it into a record with a fresh id and token
    ///
    /// The record starts as `PENDING`; the store stamps the final status when
    /// the record is classified.
    ///
    /// # Arguments
    /// * `seq` - Position of the message within the session (1-based)
    /// * `rng` - Source of the random id digits
    pub fn into_record<R: Rng + ?Sized>(self, seq: u32, rng: &mut R) -> Result<MessageRecord> {
        self.validate()?;

        let id = generate_message_id(seq, rng);
        let token = derive_token(Some(&id), seq, &self.text);

        Ok(MessageRecord::new(
            id,
            self.sender.trim().to_string(),
            self.recipient,
            self.text,
            token,
            MessageStatus::Pending,
        ))
    }
}

/// What to do with a composed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Send now (persisted as `SENT`)
    Send,
    /// Discard (kept in memory as `DISREGARDED`)
    Disregard,
    /// Store for later (persisted as `PENDING`)
    Store,
}

impl Classification {
    /// Hand the record to the store entry point matching this classification
    pub fn apply(self, store: &mut MessageStore, record: MessageRecord) -> Result<()> {
        match self {
            Classification::Send => store.add_sent(record),
            Classification::Disregard => {
                store.add_disregarded(record);
                Ok(())
            }
            Classification::Store => store.add_stored(record),
        }
    }

    /// Status a record ends up with
    pub fn status(self) -> MessageStatus {
        match self {
            Classification::Send => MessageStatus::Sent,
            Classification::Disregard => MessageStatus::Disregarded,
            Classification::Store => MessageStatus::Pending,
        }
    }
}

impl FromStr for Classification {
    type Err = Error;

    /// Parse the menu choice `1` (send), `2` (disregard) or `3` (store)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(Classification::Send),
            "2" => Ok(Classification::Disregard),
            "3" => Ok(Classification::Store),
            other => Err(Error::Validation(format!("Unknown message action '{}'", other))),
        }
    }
}

/// Number of messages the user intends to process in one messaging session
///
/// A limit of zero means no limit has been chosen yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionQuota {
    allowed: u32,
    processed: u32,
}

impl SessionQuota {
    /// Create a quota with the given limit
    pub fn new(allowed: u32) -> Self {
        Self {
            allowed,
            processed: 0,
        }
    }

    /// Choose a new limit and restart counting
    ///
    /// # Errors
    /// Returns `Error::Validation` if the limit is zero
    pub fn set_limit(&mut self, allowed: u32) -> Result<()> {
        if allowed == 0 {
            return Err(Error::Validation(
                "Please enter a positive number of messages.".to_string(),
            ));
        }
        self.allowed = allowed;
        self.processed = 0;
        Ok(())
    }

    /// Whether a limit has been chosen
    pub fn has_limit(&self) -> bool {
        self.allowed > 0
    }

    /// Count one processed message
    ///
    /// # Errors
    /// Returns `Error::Validation` if the quota is already exhausted
    pub fn record(&mut self) -> Result<()> {
        if self.is_exhausted() {
            return Err(Error::Validation(format!(
                "Reached the limit of {} message(s).",
                self.allowed
            )));
        }
        self.processed += 1;
        Ok(())
    }

    /// Whether a limit is set and every allowed message has been processed
    pub fn is_exhausted(&self) -> bool {
        self.has_limit() && self.processed >= self.allowed
    }

    /// Messages left before the quota is exhausted
    pub fn remaining(&self) -> u32 {
        self.allowed.saturating_sub(self.processed)
    }

    /// Sequence number of the next message (1-based)
    pub fn next_seq(&self) -> u32 {
        self.processed + 1
    }

    /// Chosen limit
    pub fn allowed(&self) -> u32 {
        self.allowed
    }

    /// Messages processed so far
    pub fn processed(&self) -> u32 {
        self.processed
    }

    /// Forget the limit and the count
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
