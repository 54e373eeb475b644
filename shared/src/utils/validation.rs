//! Input normalization and password rules shared by request validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length (bcrypt ignores bytes past 72)
pub const MAX_PASSWORD_LENGTH: usize = 72;

static HAS_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").unwrap());
static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,18}[0-9]$").unwrap());

/// Canonical form of an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Password must be 8-72 bytes and contain at least one letter and one digit
pub fn is_strong_password(password: &str) -> bool {
    (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password.len())
        && HAS_LETTER.is_match(password)
        && HAS_DIGIT.is_match(password)
}

/// Loose phone number shape check (digits, spaces, dashes, optional leading +)
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone.trim())
}
