//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for application-level operations (config, CLI).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when an index key does not follow the key layout.
///
/// Every variant carries the byte offset at which decoding gave up. A decode
/// failure means the index was written by an incompatible codec or is damaged;
/// it is never recoverable per key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A field separator was expected but the key ended first.
    #[error("missing separator after {field} field (searched from offset {offset})")]
    MissingSeparator { field: &'static str, offset: usize },
    /// Fewer than two modifier bytes remain in the key.
    #[error("truncated modifiers at offset {offset}: expected 2 bytes, found {found}")]
    TruncatedModifiers { offset: usize, found: usize },
    /// The primary/secondary marker is absent or not one of `P` / `S`.
    #[error("invalid primary/secondary marker {found:?} at offset {offset}")]
    InvalidPrimaryMarker { offset: usize, found: Option<char> },
    /// A name field is not valid UTF-8.
    #[error("{field} field at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str, offset: usize },
    /// Bytes follow the primary/secondary marker.
    #[error("unexpected trailing data at offset {offset}")]
    TrailingData { offset: usize },
}

/// Error returned when a query pattern cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The match-rule bits describe a combination no matcher supports.
    #[error("invalid match rule 0x{bits:x}: {reason}")]
    InvalidMatchRule { bits: u32, reason: &'static str },
    /// A type suffix code is not one of the known suffix characters.
    #[error("unknown type suffix {0:?}")]
    UnknownTypeSuffix(char),
}

/// Error returned by the search engine.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A stored key failed to decode. One bad key makes the whole index suspect.
    #[error("index is corrupt or out of date (key #{index}), rebuild required: {source}")]
    CorruptIndex {
        index: usize,
        #[source]
        source: DecodeError,
    },
}
