//! # Scope Name Validation
//!
//! Every registry entry point funnels names through `validate_scope_name`.
//!
//! ## Rules
//!
//! - only ASCII letters, digits, `_` and `.`
//! - must not start with a digit or `.`
//! - must not end with `.`
//! - canonical form is trimmed and upper-cased

use super::errors::{CharPosition, ScopeError};

fn is_scope_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

/// Validate a scope name and return its canonical form.
pub fn validate_scope_name(name: &str) -> Result<String, ScopeError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ScopeError::Empty);
    }
    let invalid = |ch: char, position: CharPosition| ScopeError::InvalidCharacter {
        name: trimmed.to_string(),
        ch,
        position,
    };
    let last = trimmed.chars().count() - 1;
    for (i, ch) in trimmed.chars().enumerate() {
        let position = if i == 0 {
            CharPosition::First
        } else if i == last {
            CharPosition::Last
        } else {
            CharPosition::Index(i)
        };
        if !is_scope_char(ch) {
            return Err(invalid(ch, position));
        }
        if i == 0 && (ch == '.' || ch.is_ascii_digit()) {
            return Err(invalid(ch, CharPosition::First));
        }
        if i == last && ch == '.' {
            return Err(invalid(ch, CharPosition::Last));
        }
    }
    Ok(trimmed.to_ascii_uppercase())
}
