//! The character a request searches for.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when validating a lookup character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The lookup string was empty.
    #[error("lookup character must not be empty")]
    Empty,

    /// The lookup string held more than one character.
    #[error("lookup character must be a single character, got {value:?}")]
    MultipleCharacters {
        /// The rejected value.
        value: String,
    },
}

/// A single Unicode character, matched against file content as UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupCharacter(char);

impl LookupCharacter {
    /// Wraps a character.
    #[must_use]
    pub fn new(c: char) -> Self {
        Self(c)
    }

    /// Validates a request-supplied lookup string.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] unless `value` is exactly one character.
    pub fn parse(value: &str) -> Result<Self, LookupError> {
        let mut chars = value.chars();
        let Some(c) = chars.next() else {
            return Err(LookupError::Empty);
        };
        if chars.next().is_some() {
            return Err(LookupError::MultipleCharacters {
                value: value.to_string(),
            });
        }
        Ok(Self(c))
    }

    /// The wrapped character.
    #[must_use]
    pub fn as_char(self) -> char {
        self.0
    }

    /// UTF-8 encoding of the character, the byte pattern searched for.
    #[must_use]
    pub fn to_bytes(self) -> Vec<u8> {
        let mut buf = [0u8; 4];
        self.0.encode_utf8(&mut buf).as_bytes().to_vec()
    }
}

impl FromStr for LookupCharacter {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LookupCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
