//! Index key codec for type declarations.
//!
//! One key per declared type:
//!
//! ```text
//! simpleName / package / Outer.Inner / m0 m1 / module / P|S
//! ```
//!
//! `/` separates fields and never occurs inside one. The enclosing chain is
//! joined with `.`; an anonymous or local enclosing context is the single
//! marker byte `0`. The modifier field is exactly two raw bytes read at a fixed
//! width (see [`Modifiers::to_key_bytes`]), so it may hold any byte value,
//! including `/`.

use super::intern::PackageInterner;
use super::modifiers::Modifiers;
use super::suffix::TypeSuffix;
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Field separator.
pub const SEPARATOR: u8 = b'/';
/// Separator between enclosing type names.
pub const ENCLOSING_SEPARATOR: u8 = b'.';
/// Marker byte for an anonymous or local enclosing context.
pub const ZERO_CHAR: u8 = b'0';
/// The enclosing-type sequence standing for an anonymous enclosing context.
pub const ANONYMOUS_MARKER: &str = "0";

const PRIMARY: u8 = b'P';
const SECONDARY: u8 = b'S';

/// Identity of a declared type, as handed to the encoder by an indexer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub simple_name: String,
    /// Dotted package name; empty for the default package.
    #[serde(default)]
    pub package_name: String,
    /// Outermost first. Empty for a top-level type.
    #[serde(default)]
    pub enclosing_type_names: Vec<String>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub module_name: String,
    #[serde(default)]
    pub secondary: bool,
}

impl TypeDeclaration {
    pub fn new(package_name: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    pub fn nested_in<I, S>(mut self, enclosing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enclosing_type_names = enclosing.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the type as declared inside an anonymous or local context.
    pub fn in_anonymous_context(mut self) -> Self {
        self.enclosing_type_names = anonymous_marker();
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the kind bits for `kind`, keeping the other modifier bits.
    pub fn with_kind(mut self, kind: TypeSuffix) -> Self {
        self.modifiers |= Modifiers::for_kind(kind);
        self
    }

    pub fn in_module(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    pub fn secondary(mut self, secondary: bool) -> Self {
        self.secondary = secondary;
        self
    }
}

/// A stored key parsed back into its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedTypeRecord {
    pub simple_name: String,
    /// `package[.Enclosing]*`; empty for a top-level type in the default package.
    pub qualification: String,
    pub package_name: Arc<str>,
    pub enclosing_type_names: Vec<String>,
    pub modifiers: Modifiers,
    pub module_name: String,
    pub secondary: bool,
    pub type_suffix: TypeSuffix,
}

impl DecodedTypeRecord {
    pub fn is_in_anonymous_context(&self) -> bool {
        is_anonymous_marker(&self.enclosing_type_names)
    }

    /// `qualification.simpleName`, or just the simple name in the default package.
    pub fn fully_qualified_name(&self) -> String {
        if self.qualification.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.qualification, self.simple_name)
        }
    }
}

/// The one-element enclosing sequence for anonymous contexts.
pub fn anonymous_marker() -> Vec<String> {
    vec![ANONYMOUS_MARKER.to_string()]
}

pub fn is_anonymous_marker(enclosing: &[String]) -> bool {
    matches!(enclosing, [only] if only == ANONYMOUS_MARKER)
}

/// Encodes `decl` into its index key.
///
/// Modifier bits 8-15 are not representable and are dropped.
pub fn encode_index_key(decl: &TypeDeclaration) -> Vec<u8> {
    debug_assert!(
        !contains_separator(decl),
        "type declaration fields must not contain the key separator"
    );

    let enclosing_len: usize = decl
        .enclosing_type_names
        .iter()
        .map(|n| n.len() + 1)
        .sum();
    let mut key = Vec::with_capacity(
        decl.simple_name.len()
            + decl.package_name.len()
            + enclosing_len
            + decl.module_name.len()
            + 8,
    );

    key.extend_from_slice(decl.simple_name.as_bytes());
    key.push(SEPARATOR);
    key.extend_from_slice(decl.package_name.as_bytes());
    key.push(SEPARATOR);
    if is_anonymous_marker(&decl.enclosing_type_names) {
        key.push(ZERO_CHAR);
    } else {
        for (i, name) in decl.enclosing_type_names.iter().enumerate() {
            if i > 0 {
                key.push(ENCLOSING_SEPARATOR);
            }
            key.extend_from_slice(name.as_bytes());
        }
    }
    key.push(SEPARATOR);
    key.extend_from_slice(&decl.modifiers.to_key_bytes());
    key.push(SEPARATOR);
    key.extend_from_slice(decl.module_name.as_bytes());
    key.push(SEPARATOR);
    key.push(if decl.secondary { SECONDARY } else { PRIMARY });
    key
}

fn contains_separator(decl: &TypeDeclaration) -> bool {
    let sep = char::from(SEPARATOR);
    decl.simple_name.contains(sep)
        || decl.package_name.contains(sep)
        || decl.module_name.contains(sep)
        || decl.enclosing_type_names.iter().any(|n| n.contains(sep))
}

/// Decodes a key with a throwaway decoder and interner.
///
/// Engines decoding many keys should hold a [`KeyDecoder`] per worker instead.
pub fn decode_index_key(key: &[u8]) -> Result<DecodedTypeRecord, DecodeError> {
    KeyDecoder::new(Arc::new(PackageInterner::new())).decode(key)
}

/// Reusable key decoder.
///
/// Holds a scratch buffer for building qualifications, so one decoder must not
/// be shared between concurrent decodes; give each worker its own. The package
/// interner behind it may be shared freely.
#[derive(Debug)]
pub struct KeyDecoder {
    interner: Arc<PackageInterner>,
    qualification: String,
}

impl KeyDecoder {
    pub fn new(interner: Arc<PackageInterner>) -> Self {
        Self {
            interner,
            qualification: String::new(),
        }
    }

    /// Parses `key` into a fresh record. Any deviation from the layout is an error.
    pub fn decode(&mut self, key: &[u8]) -> Result<DecodedTypeRecord, DecodeError> {
        // simple name
        let slash = find_separator(key, 0, "simple name")?;
        let simple_name = utf8(key, 0, slash, "simple name")?.to_owned();

        // package
        let start = slash + 1;
        let slash = if key.get(start) == Some(&SEPARATOR) {
            start
        } else {
            find_separator(key, start, "package")?
        };
        let package_name = self.interner.intern(utf8(key, start, slash, "package")?);

        self.qualification.clear();
        self.qualification.push_str(&package_name);

        // enclosing types
        let start = slash + 1;
        let slash = find_separator(key, start, "enclosing types")?;
        let enclosing_type_names = match &key[start..slash] {
            [] => Vec::new(),
            [ZERO_CHAR] => {
                self.qualification.push(char::from(ENCLOSING_SEPARATOR));
                self.qualification.push(char::from(ZERO_CHAR));
                anonymous_marker()
            }
            _ => {
                let chain = utf8(key, start, slash, "enclosing types")?;
                self.qualification.push(char::from(ENCLOSING_SEPARATOR));
                self.qualification.push_str(chain);
                chain
                    .split(char::from(ENCLOSING_SEPARATOR))
                    .map(str::to_owned)
                    .collect()
            }
        };

        // modifiers: fixed width, not separator-delimited
        let start = slash + 1;
        let bytes = match key.get(start..start + 2) {
            Some(&[low, high]) => [low, high],
            _ => {
                return Err(DecodeError::TruncatedModifiers {
                    offset: start,
                    found: key.len().saturating_sub(start),
                });
            }
        };
        let modifiers = Modifiers::from_key_bytes(bytes);
        let slash = start + 2;
        if key.get(slash) != Some(&SEPARATOR) {
            return Err(DecodeError::MissingSeparator {
                field: "modifiers",
                offset: slash,
            });
        }

        // module name
        let start = slash + 1;
        let slash = find_separator(key, start, "module")?;
        let module_name = if start == slash {
            String::new()
        } else {
            utf8(key, start, slash, "module")?.to_owned()
        };

        // primary or secondary
        let start = slash + 1;
        let secondary = match key.get(start) {
            Some(&SECONDARY) => true,
            Some(&PRIMARY) => false,
            other => {
                return Err(DecodeError::InvalidPrimaryMarker {
                    offset: start,
                    found: other.map(|&b| char::from(b)),
                });
            }
        };
        if key.len() > start + 1 {
            return Err(DecodeError::TrailingData { offset: start + 1 });
        }

        Ok(DecodedTypeRecord {
            simple_name,
            qualification: self.qualification.clone(),
            package_name,
            enclosing_type_names,
            modifiers,
            module_name,
            secondary,
            type_suffix: modifiers.type_suffix(),
        })
    }
}

fn find_separator(key: &[u8], from: usize, field: &'static str) -> Result<usize, DecodeError> {
    key.get(from..)
        .and_then(|rest| rest.iter().position(|&b| b == SEPARATOR))
        .map(|pos| from + pos)
        .ok_or(DecodeError::MissingSeparator {
            field,
            offset: from,
        })
}

fn utf8<'k>(
    key: &'k [u8],
    start: usize,
    end: usize,
    field: &'static str,
) -> Result<&'k str, DecodeError> {
    std::str::from_utf8(&key[start..end]).map_err(|_| DecodeError::InvalidUtf8 {
        field,
        offset: start,
    })
}
