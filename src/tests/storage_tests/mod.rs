// Storage Tests Module - Testing the storage module
// Tests organized by storage module functionality:
// - message_tests: MessageRecord and MessageStatus (display, serde field names)
// - validation_tests: Recipient/id/text checks and token derivation
// - message_store_tests: Classification, queries, deletion and index views
// - data_file_tests: Reading and writing the consolidated JSON document
// - settings_tests: Settings defaults and persistence

mod data_file_tests;
mod validation_tests;

use crate::storage::{MessageRecord, MessageStatus};

/// Build a record with the given fields and a fixed sender
pub(super) fn record(id: &str, recipient: &str, text: &str, token: &str, status: MessageStatus) -> MessageRecord {
    MessageRecord::new(
        id.to_string(),
        "Dev".to_string(),
        recipient.to_string(),
        text.to_string(),
        token.to_string(),
        status,
    )
}
