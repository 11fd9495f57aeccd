//! Local storage module
//!
//! This module handles the message-management core:
//! - Message records and their classification status
//! - Recipient/text validation and token derivation
//! - The in-memory message store
//! - The JSON data file mirroring sent and stored messages
//! - Application settings
//!
//! The module is organized into submodules:
//! - `message` - Message record and status
//! - `validation` - Pure validators and the token tokenizer
//! - `message_store` - Sent/stored/disregarded collections and queries
//! - `data_file` - Persistence adapter for the consolidated JSON document
//! - `settings` - Application settings and configuration

// Submodules
pub mod data_file;
pub mod message;
pub mod message_store;
pub mod settings;
pub mod validation;

// Re-export commonly used types
pub use data_file::{DataFile, DEFAULT_DATA_FILE};
pub use message::{MessageRecord, MessageStatus};
pub use message_store::{MessageStore, SentSummary};
pub use settings::Settings;

// Re-export main functions
pub use validation::{
    derive_token, valid_id_length, valid_message_text, valid_recipient, valid_sender,
    INVALID_TOKEN, MAX_MESSAGE_LENGTH,
};
