// Validation Tests - Testing recipient/id/text checks and token derivation

use crate::storage::{
    derive_token, valid_id_length, valid_message_text, valid_recipient, valid_sender,
    INVALID_TOKEN, MAX_MESSAGE_LENGTH,
};

#[test]
fn test_derive_token_valid() {
    let token = derive_token(Some("MS98765432"), 2, "Hello again everyone");
    assert_eq!(token, "MS:2:HELLOEVERYONE");
}

#[test]
fn test_derive_token_single_word_repeats() {
    let token = derive_token(Some("MSG123456701"), 1, "Hi");
    assert_eq!(token, "MS:1:HIHI");
}

#[test]
fn test_derive_token_collapses_whitespace() {
    let token = derive_token(Some("ab12345678"), 7, "  Did   you get\tthe cake?  ");
    assert_eq!(token, "AB:7:DIDCAKE?");
}

#[test]
fn test_derive_token_invalid_inputs() {
    assert_eq!(derive_token(None, 1, "x"), INVALID_TOKEN);
    assert_eq!(derive_token(Some("A"), 1, "x"), INVALID_TOKEN);
    assert_eq!(derive_token(Some(""), 1, "x"), INVALID_TOKEN);
    assert_eq!(derive_token(Some("MS12345678"), 1, "   "), INVALID_TOKEN);
    assert_eq!(derive_token(Some("MS12345678"), 1, ""), INVALID_TOKEN);
    assert_eq!(INVALID_TOKEN, "INVALID_HASH");
}

#[test]
fn test_derive_token_two_character_id() {
    assert_eq!(derive_token(Some("ms"), 3, "ok then"), "MS:3:OKTHEN");
}

#[test]
fn test_derive_token_is_deterministic() {
    let first = derive_token(Some("MSG123456701"), 4, "It is dinner time!");
    let second = derive_token(Some("MSG123456701"), 4, "It is dinner time!");
    assert_eq!(first, second);
    assert_eq!(first, "MS:4:ITTIME!");
}

#[test]
fn test_valid_recipient_boundaries() {
    // '+' followed by 9 digits
    assert!(!valid_recipient(Some("+278388845")));
    // 10 digits
    assert!(valid_recipient(Some("+2783888456")));
    // 11 digits
    assert!(valid_recipient(Some("+27838884567")));
    // 15 digits
    assert!(valid_recipient(Some("+278388845671234")));
    // 16 digits
    assert!(!valid_recipient(Some("+2783888456712345")));
}

#[test]
fn test_valid_recipient_rejects_malformed() {
    assert!(!valid_recipient(None));
    assert!(!valid_recipient(Some("")));
    assert!(!valid_recipient(Some("0838884567")));
    assert!(!valid_recipient(Some("+27 838884567")));
    assert!(!valid_recipient(Some("+2783888456a")));
    assert!(!valid_recipient(Some("++27838884567")));
}

#[test]
fn test_valid_id_length() {
    assert!(valid_id_length(Some("MSG1234567")));
    assert!(!valid_id_length(Some("MSG123")));
    assert!(!valid_id_length(Some("MSG123456701")));
    assert!(!valid_id_length(None));
}

#[test]
fn test_valid_message_text_length_boundary() {
    let at_limit = "a".repeat(MAX_MESSAGE_LENGTH);
    let over_limit = "a".repeat(MAX_MESSAGE_LENGTH + 1);

    assert_eq!(MAX_MESSAGE_LENGTH, 250);
    assert!(valid_message_text(&at_limit));
    assert!(!valid_message_text(&over_limit));
}

#[test]
fn test_valid_message_text_rejects_blank() {
    assert!(!valid_message_text(""));
    assert!(!valid_message_text("   \t "));
    assert!(valid_message_text("Hello"));
}

#[test]
fn test_valid_sender() {
    assert!(valid_sender("Dev"));
    assert!(!valid_sender(""));
    assert!(!valid_sender("   "));
}
