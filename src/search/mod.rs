//! Type declaration index core.
//!
//! This module provides the index key codec for type declarations and the
//! query-side matching that search engines run against decoded keys.

// Module declarations
pub(crate) mod codec;
pub(crate) mod engine;
pub(crate) mod intern;
pub(crate) mod matcher;
pub(crate) mod modifiers;
pub(crate) mod pattern;
pub(crate) mod qualification;
pub(crate) mod suffix;

// Public re-exports (used via lib.rs)
pub use codec::{
    ANONYMOUS_MARKER, DecodedTypeRecord, ENCLOSING_SEPARATOR, KeyDecoder, SEPARATOR,
    TypeDeclaration, ZERO_CHAR, anonymous_marker, decode_index_key, encode_index_key,
    is_anonymous_marker,
};
pub use engine::{NameSuggestion, SearchEngine};
pub use intern::PackageInterner;
pub use matcher::{MatchMode, MatchRule};
pub use modifiers::Modifiers;
pub use pattern::{PatternBuilder, QualifiedTypeDeclarationPattern};
pub use qualification::QualificationPattern;
pub use suffix::TypeSuffix;
