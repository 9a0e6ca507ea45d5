//! Validation error types

use std::fmt;

/// Validation error for user input
///
/// Display output is the exact message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `name` or `email` missing or empty
    MissingFields,

    /// `email` doesn't look like `local@domain.tld`
    InvalidEmail,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Name and email are required"),
            Self::InvalidEmail => write!(f, "Invalid email format"),
        }
    }
}

impl std::error::Error for ValidationError {}
