//! QuickChat - a single-user message composer and store
//!
//! This library provides the core functionality for QuickChat: composing
//! short text messages, classifying them as sent, stored or disregarded,
//! and keeping the persistable ones in a JSON data file.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod account;
pub mod compose;
pub mod storage;

/// Result type alias for QuickChat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for QuickChat operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Storage operation error (reading or writing the data file)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected by the composer or the account checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Initialize the QuickChat library with logging
///
/// Logs go to stderr so they do not interleave with the interactive prompts.
pub fn init() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
}

#[cfg(test)]
mod tests;
