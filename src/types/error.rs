//! Data model error types
//!
//! Errors raised while turning wire records into typed values.

use thiserror::Error;

/// Errors that can occur parsing an identifier from its wire form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    /// Nothing left after stripping the `0x` prefix
    #[error("Empty id")]
    Empty,

    /// Contains characters outside `[0-9a-fA-F]`
    #[error("Invalid hex id: {0}")]
    InvalidHex(String),

    /// Does not fit in 64 bits
    #[error("Id out of range: {0}")]
    Overflow(String),
}

/// Errors that can occur converting an activity record into a typed event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivityError {
    /// Event tag not in the known set
    #[error("Unknown activity event: {0}")]
    UnknownEvent(String),

    /// The event kind requires a field the record does not carry
    #[error("Activity event {event} is missing {field}")]
    MissingField {
        event: &'static str,
        field: &'static str,
    },

    /// A present id field failed to parse
    #[error("Invalid {field}: {source}")]
    InvalidId {
        field: &'static str,
        #[source]
        source: IdParseError,
    },
}
