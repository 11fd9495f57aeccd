//! Message validation and token derivation
//!
//! Pure functions with no side effects. The store never calls these itself;
//! the composer runs them before a record reaches the store.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum message body length in characters
pub const MAX_MESSAGE_LENGTH: usize = 250;

/// Token returned when the inputs to [`derive_token`] are unusable
pub const INVALID_TOKEN: &str = "INVALID_HASH";

/// Legacy message id length accepted by [`valid_id_length`]
const LEGACY_ID_LENGTH: usize = 10;

static RECIPIENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\d{10,15}$").expect("recipient pattern is valid"));

/// Check that a recipient is an international number: `+` and 10 to 15 digits
pub fn valid_recipient(recipient: Option<&str>) -> bool {
    recipient.is_some_and(|r| RECIPIENT_RE.is_match(r))
}

/// Check that a message id has the legacy length of exactly 10 characters
pub fn valid_id_length(id: Option<&str>) -> bool {
    id.is_some_and(|id| id.chars().count() == LEGACY_ID_LENGTH)
}

/// Check that a message body is non-blank and at most [`MAX_MESSAGE_LENGTH`] characters
pub fn valid_message_text(text: &str) -> bool {
    !text.trim().is_empty() && text.chars().count() <= MAX_MESSAGE_LENGTH
}

/// Check that a sender name is non-blank
pub fn valid_sender(sender: &str) -> bool {
    !sender.trim().is_empty()
}

/// Derive the deletion token for a message
///
/// The token is `PREFIX:SEQ:FIRSTLAST` in upper case, where `PREFIX` is the
/// first two characters of the id and `FIRST`/`LAST` are the first and last
/// whitespace-separated words of the text. A single-word text uses that word
/// twice.
///
/// Returns [`INVALID_TOKEN`] when the id is missing or shorter than two
/// characters, or when the text is blank.
///
/// # Example
/// ```rust
/// use quickchat::storage::derive_token;
///
/// let token = derive_token(Some("MS98765432"), 2, "Hello again everyone");
/// assert_eq!(token, "MS:2:HELLOEVERYONE");
/// ```
pub fn derive_token(id: Option<&str>, seq: u32, text: &str) -> String {
    let id = match id {
        Some(id) if id.chars().count() >= 2 => id,
        _ => return INVALID_TOKEN.to_string(),
    };

    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return INVALID_TOKEN.to_string();
    };
    let last = words.last().unwrap_or(first);
    let prefix: String = id.chars().take(2).collect();

    format!("{}:{}:{}{}", prefix, seq, first, last).to_uppercase()
}
