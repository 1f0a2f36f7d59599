use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating submitter identifiers
    /// Must start with an ASCII letter or digit, then letters, digits, `_`, `.`, `@` or `-`
    /// - Valid: "u1", "citizen_42", "jane.doe@example.org", "A-17"
    /// - Invalid: "", "_u1", "-u1", "user name", "user/1"
    pub static ref SUBMITTER_ID_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.@-]*$").unwrap();
}

/// Rejects text containing NUL characters.
///
/// Postgres TEXT columns and process arguments cannot carry `\0`.
pub fn validate_no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new("nul_character")
            .with_message(Cow::Borrowed("Must not contain NUL characters")));
    }
    Ok(())
}
