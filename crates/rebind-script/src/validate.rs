//! Replacement-name validation.
//!
//! The rename engine itself applies whatever name it is given; hosting
//! tools should validate candidate names first so a rename cannot
//! introduce a token that fails to re-parse.

use thiserror::Error;

use crate::token::keyword;

/// A replacement name that is not a legal identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid identifier '{name}': {reason}")]
pub struct InvalidIdentifier {
    pub name: String,
    pub reason: String,
}

impl InvalidIdentifier {
    fn new(name: &str, reason: impl Into<String>) -> Self {
        InvalidIdentifier {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Check that `name` is a legal identifier and not a reserved word.
pub fn validate_identifier(name: &str) -> Result<(), InvalidIdentifier> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(InvalidIdentifier::new(name, "must not be empty"));
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return Err(InvalidIdentifier::new(
            name,
            "must start with a letter, '_', or '$'",
        ));
    }
    for ch in chars {
        if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '$') {
            return Err(InvalidIdentifier::new(
                name,
                format!("contains invalid character '{ch}'"),
            ));
        }
    }
    if keyword(name).is_some() {
        return Err(InvalidIdentifier::new(name, "is a reserved word"));
    }
    Ok(())
}
