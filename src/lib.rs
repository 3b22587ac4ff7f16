pub mod cli;
pub mod config;
pub mod error;
pub mod search;
pub mod tracing;

pub use config::SearchConfig;
pub use error::{DecodeError, PatternError, SearchError};
pub use search::{
    DecodedTypeRecord, KeyDecoder, MatchMode, MatchRule, Modifiers, PackageInterner,
    QualificationPattern, QualifiedTypeDeclarationPattern, SearchEngine, TypeDeclaration,
    TypeSuffix, decode_index_key, encode_index_key,
};
