//! Character name rules.

use duskhaven_core::error::DomainError;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 20;

/// Names nobody may play under, compared case-insensitively.
pub const RESERVED_NAMES: [&str; 10] = [
    "admin",
    "administrator",
    "god",
    "guest",
    "moderator",
    "new",
    "quit",
    "root",
    "sysop",
    "system",
];

/// Checks a submitted name and returns it trimmed. Names stay case-sensitive.
///
/// # Errors
///
/// Returns `DomainError::Validation` with the reason the name was refused.
pub fn validate_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(DomainError::Validation(format!(
            "Names must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters long."
        )));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(DomainError::Validation(
            "Names must start with a letter.".to_owned(),
        ));
    }
    let allowed = name
        .bytes()
        .all(|b| matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-'));
    if !allowed {
        return Err(DomainError::Validation(
            "Names may only contain letters, digits, '_' and '-'.".to_owned(),
        ));
    }
    let lowered = name.to_ascii_lowercase();
    if RESERVED_NAMES.contains(&lowered.as_str()) {
        return Err(DomainError::Validation(
            "That name is reserved. Please choose another.".to_owned(),
        ));
    }
    Ok(name.to_owned())
}
