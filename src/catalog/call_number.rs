//! Call number format checks.
//!
//! A call number is a variant letter (`B` for books, `P` for periodicals)
//! followed by three hyphen-separated groups of three digits.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

static CALL_NUMBER: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    CALL_NUMBER.get_or_init(|| {
        Regex::new(r"^[BP]-[0-9]{3}-[0-9]{3}-[0-9]{3}$").unwrap_or_else(|e| {
            unreachable!("call number pattern is a literal: {e}")
        })
    })
}

/// Rejected call number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Call number: {value}. Must be B|P-ddd-ddd-ddd")]
pub struct InvalidCallNumber {
    pub value: String,
}

/// Validate a call number
pub fn check(value: &str) -> Result<(), InvalidCallNumber> {
    if is_valid(value) {
        Ok(())
    } else {
        Err(InvalidCallNumber {
            value: value.to_string(),
        })
    }
}

pub fn is_valid(value: &str) -> bool {
    pattern().is_match(value)
}
