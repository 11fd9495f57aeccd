//! Registration and login gate
//!
//! A single in-memory credential pair guards the messaging menu. There is no
//! password hashing and nothing here is persisted.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum username length
const MAX_USERNAME_LENGTH: usize = 5;

/// Minimum password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// Special characters accepted by the password complexity check
const PASSWORD_SPECIALS: &str = "!@#$%^&*()";

static CELL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+27|0)\d{9}$").expect("cell number pattern is valid"));

/// Registered user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Username (must contain `_`, at most 5 characters)
    pub username: String,
    /// Password (kept in memory as entered)
    pub password: String,
    /// South African cell number
    pub cell_number: String,
}

impl Account {
    /// Create a new account
    pub fn new(
        first_name: String,
        last_name: String,
        username: String,
        password: String,
        cell_number: String,
    ) -> Self {
        Self {
            first_name,
            last_name,
            username,
            password,
            cell_number,
        }
    }

    /// Username contains an underscore and is no more than 5 characters
    pub fn check_username(&self) -> bool {
        self.username.contains('_') && self.username.chars().count() <= MAX_USERNAME_LENGTH
    }

    /// Password has at least 8 characters with upper case, lower case, a digit and a special character
    pub fn check_password_complexity(&self) -> bool {
        let password = &self.password;
        password.chars().count() >= MIN_PASSWORD_LENGTH
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
    }

    /// Cell number is `+27` or `0` followed by 9 digits
    pub fn check_cell_number(&self) -> bool {
        CELL_NUMBER_RE.is_match(&self.cell_number)
    }

    /// Run the registration checks in order
    ///
    /// # Errors
    /// Returns `Error::Validation` with the reason for the first failing check
    pub fn register(&self) -> Result<()> {
        if !self.check_username() {
            return Err(Error::Validation(
                "Invalid username. Must contain an underscore(_) and be no more than 5 characters."
                    .to_string(),
            ));
        }
        if !self.check_password_complexity() {
            return Err(Error::Validation(
                "Weak password. Must be at least 8 characters long and include uppercase, lowercase, number, and a special character."
                    .to_string(),
            ));
        }
        if !self.check_cell_number() {
            return Err(Error::Validation(
                "Invalid South African cell number. Must be in format +27XXXXXXXXX or 0XXXXXXXXX."
                    .to_string(),
            ));
        }

        tracing::info!(username = %self.username, "Registered account");
        Ok(())
    }

    /// Compare login credentials with the registered ones
    pub fn login(&self, username: &str, password: &str) -> bool {
        let success = username == self.username && password == self.password;
        if !success {
            tracing::warn!(username, "Login rejected");
        }
        success
    }

    /// User-facing message for a login attempt
    pub fn login_status(&self, success: bool) -> String {
        if success {
            format!("Login successful. Welcome, {} {}!", self.first_name, self.last_name)
        } else {
            "Login failed. Please check your username and password.".to_string()
        }
    }
}
