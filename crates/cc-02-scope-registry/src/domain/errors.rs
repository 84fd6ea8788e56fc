//! # Domain Errors
//!
//! Error types for the scope registry.

use std::fmt;
use thiserror::Error;

/// Where in a scope name an offending character sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharPosition {
    /// Leading character.
    First,
    /// Trailing character.
    Last,
    /// Zero-based index of an interior character.
    Index(usize),
}

impl fmt::Display for CharPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharPosition::First => f.write_str("first position"),
            CharPosition::Last => f.write_str("last position"),
            CharPosition::Index(i) => write!(f, "position {i}"),
        }
    }
}

/// Scope name validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// The name was empty or blank.
    #[error("Scope name is empty")]
    Empty,

    /// A character is not allowed where it appears.
    #[error("Invalid character '{ch}' at {position} in scope name '{name}'")]
    InvalidCharacter {
        /// The rejected name (trimmed)
        name: String,
        /// The offending character
        ch: char,
        /// Where it appears
        position: CharPosition,
    },
}
