//! Error codes for the bingo backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in problem-details responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Command or path segment failed validation
    ValidationError,

    // Resource Not Found
    /// No active session with the given id
    SessionNotFound,
    /// Static page missing from the html directory
    PageNotFound,
    /// Generic not found
    NotFound,

    // System Errors
    /// The random pool stopped answering
    RandomPoolUnavailable,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::PageNotFound => "PAGE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::RandomPoolUnavailable => "RANDOM_POOL_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
