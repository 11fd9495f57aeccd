//! Persistence adapter for the consolidated JSON data file
//!
//! The data file holds a single JSON object with two arrays:
//!
//! ```json
//! {
//!     "sentMessages": [ ... ],
//!     "storedMessages": [ ... ]
//! }
//! ```
//!
//! Disregarded messages are never written. Every write is a full rewrite
//! through a temporary sibling file that is renamed over the data file.

use crate::{
    storage::message::{MessageRecord, MessageStatus},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Default data file name
pub const DEFAULT_DATA_FILE: &str = "quickChatData.json";

const SENT_KEY: &str = "sentMessages";
const STORED_KEY: &str = "storedMessages";

/// Borrowed view of the document used for writing
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    sent_messages: Vec<&'a MessageRecord>,
    stored_messages: Vec<&'a MessageRecord>,
}

/// One message element as found on disk
///
/// `status` is kept as free text: the array an element sits in decides its
/// status, so any string is accepted here.
#[derive(Deserialize)]
struct StoredElement {
    id: String,
    #[serde(default)]
    sender: String,
    recipient: String,
    #[serde(rename = "messageText")]
    text: String,
    #[serde(rename = "hash")]
    token: String,
    status: String,
}

impl StoredElement {
    fn into_record(self, status: MessageStatus) -> MessageRecord {
        if self.status != status.as_str() {
            tracing::warn!(
                id = %self.id,
                found = %self.status,
                expected = %status,
                "Message status disagrees with its array, using the array's status"
            );
        }
        MessageRecord::new(self.id, self.sender, self.recipient, self.text, self.token, status)
    }
}

/// Records decoded from the data file, one list per persisted class
#[derive(Debug, Default)]
pub struct Snapshot {
    /// Records from `sentMessages`, in file order
    pub sent: Vec<MessageRecord>,
    /// Records from `storedMessages`, in file order
    pub stored: Vec<MessageRecord>,
    /// Number of array elements that could not be decoded
    pub skipped: usize,
}

/// Handle to the on-disk data file
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    /// Create a handle for the given path (nothing is touched on disk)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the data file with the given sent and stored messages
    ///
    /// The document is written with four-space indentation to a temporary
    /// file next to the data file and then renamed over it.
    ///
    /// # Errors
    /// Returns an error if serialization, the write or the rename fails
    pub fn write<'a, S, T>(&self, sent: S, stored: T) -> Result<()>
    where
        S: IntoIterator<Item = &'a MessageRecord>,
        T: IntoIterator<Item = &'a MessageRecord>,
    {
        let document = DocumentRef {
            sent_messages: sent.into_iter().collect(),
            stored_messages: stored.into_iter().collect(),
        };

        let mut json = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
        document.serialize(&mut serializer)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("Failed to create data directory {}: {}", parent.display(), e))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|e| {
            Error::Storage(format!("Failed to write data file {}: {}", tmp.display(), e))
        })?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(Error::Storage(format!(
                "Failed to replace data file {}: {}",
                self.path.display(),
                e
            )));
        }

        tracing::debug!(
            path = %self.path.display(),
            sent = document.sent_messages.len(),
            stored = document.stored_messages.len(),
            "Rewrote data file"
        );
        Ok(())
    }

    /// Read the data file
    ///
    /// # Returns
    /// `None` if the file is missing or empty, otherwise the decoded records.
    /// Elements that fail to decode are skipped and counted in
    /// [`Snapshot::skipped`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, its
    /// root is not an object, or one of the two keys does not hold an array
    pub fn read(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Storage(format!("Failed to read data file {}: {}", self.path.display(), e))
        })?;

        if data.trim().is_empty() {
            return Ok(None);
        }

        let Value::Object(mut root) = serde_json::from_str::<Value>(&data)? else {
            return Err(Error::Storage(format!(
                "Data file {} does not contain a JSON object",
                self.path.display()
            )));
        };

        let mut snapshot = Snapshot::default();
        let sent_elements = take_array(&mut root, SENT_KEY)?;
        let stored_elements = take_array(&mut root, STORED_KEY)?;
        snapshot.sent = decode_class(sent_elements, MessageStatus::Sent, &mut snapshot.skipped);
        snapshot.stored = decode_class(stored_elements, MessageStatus::Pending, &mut snapshot.skipped);

        Ok(Some(snapshot))
    }
}

/// Remove an array from the root object; a missing key is an empty array
fn take_array(root: &mut Map<String, Value>, key: &str) -> Result<Vec<Value>> {
    match root.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(elements)) => Ok(elements),
        Some(_) => Err(Error::Storage(format!("'{}' is not a JSON array", key))),
    }
}

/// Decode the elements of one array, skipping the malformed ones
///
/// Array membership decides the status; a `status` field holding anything
/// else (including unknown or empty strings) is overwritten.
fn decode_class(elements: Vec<Value>, status: MessageStatus, skipped: &mut usize) -> Vec<MessageRecord> {
    let mut records = Vec::with_capacity(elements.len());

    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<StoredElement>(element) {
            Ok(stored) => records.push(stored.into_record(status)),
            Err(e) => {
                *skipped += 1;
                tracing::warn!(index, %status, "Skipping malformed message entry: {}", e);
            }
        }
    }

    records
}
