// DataFile Tests - Testing the consolidated JSON document reader and writer

use super::record;
use crate::storage::{DataFile, MessageStatus};
use crate::Error;
use tempfile::NamedTempFile;

#[test]
fn test_write_uses_four_space_indent_and_documented_keys() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let data_file = DataFile::new(temp_file.path());

    let sent = record("MSG1", "+27838884567", "Hello there", "MS:1:HELLOTHERE", MessageStatus::Sent);
    data_file.write([&sent], []).expect("Failed to write");

    let data = std::fs::read_to_string(temp_file.path()).expect("Failed to read");
    assert!(data.starts_with("{\n    \"sentMessages\": [\n        {\n            \"id\": \"MSG1\""));
    assert!(data.contains("\"messageText\": \"Hello there\""));
    assert!(data.contains("\"hash\": \"MS:1:HELLOTHERE\""));
    assert!(data.contains("\"status\": \"SENT\""));
    assert!(data.contains("\"storedMessages\": []"));
}

#[test]
fn test_write_replaces_previous_contents() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let data_file = DataFile::new(temp_file.path());

    let first = record("MSG1", "+27838884567", "First", "T1", MessageStatus::Sent);
    let second = record("MSG2", "+27838884567", "Second", "T2", MessageStatus::Pending);
    data_file.write([&first], []).expect("Failed to write");
    data_file.write([], [&second]).expect("Failed to write");

    let snapshot = data_file.read().expect("Failed to read").expect("Expected a snapshot");
    assert!(snapshot.sent.is_empty());
    assert_eq!(snapshot.stored, vec![second]);

    // No temporary file is left behind
    assert!(!temp_file.path().with_extension("json.tmp").exists());
}

#[test]
fn test_write_creates_parent_directory() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("quickChatData.json");
    let data_file = DataFile::new(&path);

    data_file.write([], []).expect("Failed to write");
    assert!(path.exists());
}

#[test]
fn test_read_missing_and_empty() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("quickChatData.json");
    let data_file = DataFile::new(&path);

    assert!(data_file.read().expect("Failed to read").is_none());

    std::fs::write(&path, "  \n").expect("Failed to write");
    assert!(data_file.read().expect("Failed to read").is_none());
}

#[test]
fn test_read_skips_malformed_elements() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(
        temp_file.path(),
        r#"{
            "sentMessages": [
                {"id": "MSG1", "sender": "Dev", "recipient": "+27838884567", "messageText": "Hi", "hash": "T1", "status": "SENT"},
                {"id": "MSG2", "recipient": "+27838884567"},
                42
            ],
            "storedMessages": [
                {"id": "MSG3", "sender": "Dev", "recipient": "+27838884567", "messageText": "Later", "hash": "T3", "status": "PENDING"}
            ]
        }"#,
    )
    .expect("Failed to write");

    let snapshot = DataFile::new(temp_file.path())
        .read()
        .expect("Failed to read")
        .expect("Expected a snapshot");

    assert_eq!(snapshot.sent.len(), 1);
    assert_eq!(snapshot.sent[0].id, "MSG1");
    assert_eq!(snapshot.stored.len(), 1);
    assert_eq!(snapshot.stored[0].id, "MSG3");
    assert_eq!(snapshot.skipped, 2);
}

#[test]
fn test_read_array_decides_status() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(
        temp_file.path(),
        r#"{"storedMessages": [
            {"id": "MSG1", "sender": "Dev", "recipient": "+27838884567", "messageText": "Hi", "hash": "T1", "status": "SENT"}
        ]}"#,
    )
    .expect("Failed to write");

    let snapshot = DataFile::new(temp_file.path())
        .read()
        .expect("Failed to read")
        .expect("Expected a snapshot");

    // Missing sentMessages is an empty array
    assert!(snapshot.sent.is_empty());
    assert_eq!(snapshot.stored[0].status, MessageStatus::Pending);
}

#[test]
fn test_read_rejects_non_object_root() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    // Newline-delimited records from the old per-class format
    std::fs::write(
        temp_file.path(),
        "{\"id\": \"MSG1\"}\n{\"id\": \"MSG2\"}\n",
    )
    .expect("Failed to write");
    assert!(matches!(
        DataFile::new(temp_file.path()).read(),
        Err(Error::JsonSerialization(_))
    ));

    std::fs::write(temp_file.path(), "[1, 2, 3]").expect("Failed to write");
    assert!(matches!(DataFile::new(temp_file.path()).read(), Err(Error::Storage(_))));
}

#[test]
fn test_read_rejects_non_array_class() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(temp_file.path(), r#"{"sentMessages": "oops"}"#).expect("Failed to write");

    assert!(matches!(DataFile::new(temp_file.path()).read(), Err(Error::Storage(_))));
}

#[test]
fn test_read_accepts_any_status_string() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(
        temp_file.path(),
        r#"{
            "sentMessages": [
                {"id": "MSG1", "sender": "Dev", "recipient": "+27838884567", "messageText": "Hi", "hash": "T1", "status": "sent"}
            ],
            "storedMessages": [
                {"id": "MSG2", "sender": "Dev", "recipient": "+27838884567", "messageText": "Later", "hash": "T2", "status": ""}
            ]
        }"#,
    )
    .expect("Failed to write");

    let snapshot = DataFile::new(temp_file.path())
        .read()
        .expect("Failed to read")
        .expect("Expected a snapshot");

    assert_eq!(snapshot.skipped, 0);
    assert_eq!(snapshot.sent.len(), 1);
    assert_eq!(snapshot.sent[0].status, MessageStatus::Sent);
    assert_eq!(snapshot.stored.len(), 1);
    assert_eq!(snapshot.stored[0].status, MessageStatus::Pending);
    assert_eq!(snapshot.stored[0].text, "Later");
}

#[test]
fn test_read_still_requires_status_key() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(
        temp_file.path(),
        r#"{"sentMessages": [
            {"id": "MSG1", "sender": "Dev", "recipient": "+27838884567", "messageText": "Hi", "hash": "T1"}
        ]}"#,
    )
    .expect("Failed to write");

    let snapshot = DataFile::new(temp_file.path())
        .read()
        .expect("Failed to read")
        .expect("Expected a snapshot");

    assert!(snapshot.sent.is_empty());
    assert_eq!(snapshot.skipped, 1);
}

#[test]
fn test_failed_rename_removes_temp_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    // A non-empty directory in place of the data file makes the rename fail
    let path = dir.path().join("quickChatData.json");
    std::fs::create_dir(&path).expect("Failed to create dir");
    std::fs::write(path.join("occupied"), "x").expect("Failed to write");

    let data_file = DataFile::new(&path);
    let result = data_file.write([], []);

    assert!(matches!(result, Err(Error::Storage(_))));
    assert!(!path.with_extension("json.tmp").exists());
}
