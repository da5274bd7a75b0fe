//! Postal code (CEP) sanitizing and validation

use std::fmt;

use super::error::{LookupError, LookupResult};

/// Number of digits in a CEP
pub const POSTAL_CODE_LEN: usize = 8;

/// Reserved code that is never valid
pub const RESERVED_POSTAL_CODE: &str = "00000000";

/// A sanitized, validated 8-digit postal code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Sanitize raw input and validate the result
    ///
    /// Every non-digit character is dropped first, so `"01001-000"` parses to
    /// `01001000`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidPostalCode` when the sanitized value is
    /// not exactly 8 digits or equals `"00000000"`.
    pub fn parse(raw: &str) -> LookupResult<Self> {
        let sanitized = sanitize(raw);
        if !is_valid(&sanitized) {
            return Err(LookupError::InvalidPostalCode {
                input: raw.to_string(),
            });
        }
        Ok(Self(sanitized))
    }

    /// The 8 digits as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Keep only ASCII digits, in their original order
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether an already sanitized string is an acceptable postal code
pub fn is_valid(sanitized: &str) -> bool {
    sanitized.len() == POSTAL_CODE_LEN
        && sanitized.bytes().all(|b| b.is_ascii_digit())
        && sanitized != RESERVED_POSTAL_CODE
}
