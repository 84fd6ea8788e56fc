//! # Error Types
//!
//! Defines error types shared across the core-cache crates.

use thiserror::Error;

/// Errors raised while parsing or building named-value sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamedValueError {
    /// A property name was empty or contained reserved characters.
    #[error("Invalid property name: '{0}'")]
    InvalidName(String),

    /// A serialised entry was not in `name/type=value` form.
    #[error("Malformed named value: '{0}'")]
    Malformed(String),

    /// The type tag of a serialised entry is unknown.
    #[error("Unknown value type '{type_name}' for '{name}'")]
    UnknownType { name: String, type_name: String },

    /// The value text could not be parsed as the declared type.
    #[error("Cannot parse '{text}' as {type_name} for '{name}'")]
    BadValue {
        name: String,
        type_name: String,
        text: String,
    },

    /// An escape sequence was truncated or not hexadecimal.
    #[error("Bad escape sequence in '{0}'")]
    BadEscape(String),
}

/// An environment name could not be recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown environment name: '{input}'")]
pub struct EnvParseError {
    /// The rejected input.
    pub input: String,
}
