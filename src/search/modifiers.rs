//! Modifier flag word stored in index keys.
//!
//! The key stores two raw bytes: bits 0-7 and bits 16-23 of the word. Bits
//! 8-15 never survive a round trip, so every flag the index needs lives in the
//! two preserved bytes.

use super::suffix::TypeSuffix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Self = Self(0);

    // Low byte: visibility and member flags.
    pub const PUBLIC: Self = Self(0x0001);
    pub const PRIVATE: Self = Self(0x0002);
    pub const PROTECTED: Self = Self(0x0004);
    pub const STATIC: Self = Self(0x0008);
    pub const FINAL: Self = Self(0x0010);
    pub const SEALED: Self = Self(0x0020);
    pub const NON_SEALED: Self = Self(0x0040);
    pub const STRICTFP: Self = Self(0x0080);

    // High byte: declaration kind and type-level flags.
    pub const INTERFACE: Self = Self(0x01_0000);
    pub const ENUM: Self = Self(0x02_0000);
    pub const ANNOTATION: Self = Self(0x04_0000);
    pub const ABSTRACT: Self = Self(0x08_0000);
    pub const DEPRECATED: Self = Self(0x10_0000);

    /// Bits that the two-byte key encoding preserves.
    pub const PRESERVED_MASK: u32 = 0x00FF_00FF;

    const KIND_MASK: u32 = Self::INTERFACE.0 | Self::ENUM.0 | Self::ANNOTATION.0;

    pub const fn from_bits_retain(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The word as it reads back from a key.
    pub const fn preserved(self) -> Self {
        Self(self.0 & Self::PRESERVED_MASK)
    }

    /// Kind bits for a concrete declaration kind.
    ///
    /// OR-suffixes and the `Type` wildcard are query-only and map to no bits,
    /// which decodes back as a class.
    pub const fn for_kind(suffix: TypeSuffix) -> Self {
        match suffix {
            TypeSuffix::Interface => Self::INTERFACE,
            TypeSuffix::Enum => Self::ENUM,
            TypeSuffix::AnnotationType => Self(Self::ANNOTATION.0 | Self::INTERFACE.0),
            TypeSuffix::Class
            | TypeSuffix::ClassAndInterface
            | TypeSuffix::ClassAndEnum
            | TypeSuffix::InterfaceAndAnnotation
            | TypeSuffix::Type => Self::NONE,
        }
    }

    /// Declaration kind encoded in the kind bits.
    pub const fn type_suffix(self) -> TypeSuffix {
        let kind = self.0 & Self::KIND_MASK;
        if kind & Self::ANNOTATION.0 != 0 {
            TypeSuffix::AnnotationType
        } else if kind == Self::ENUM.0 {
            TypeSuffix::Enum
        } else if kind == Self::INTERFACE.0 {
            TypeSuffix::Interface
        } else {
            TypeSuffix::Class
        }
    }

    /// Two key bytes: bits 0-7, then bits 16-23.
    pub const fn to_key_bytes(self) -> [u8; 2] {
        [(self.0 & 0xFF) as u8, ((self.0 >> 16) & 0xFF) as u8]
    }

    pub const fn from_key_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes[0] as u32 + ((bytes[1] as u32) << 16))
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:06x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_bits_round_trip() {
        for suffix in [
            TypeSuffix::Class,
            TypeSuffix::Interface,
            TypeSuffix::Enum,
            TypeSuffix::AnnotationType,
        ] {
            let modifiers = Modifiers::PUBLIC | Modifiers::for_kind(suffix);
            let decoded = Modifiers::from_key_bytes(modifiers.to_key_bytes());
            assert_eq!(decoded.type_suffix(), suffix);
        }
    }

    #[test]
    fn test_key_bytes_layout() {
        let modifiers = Modifiers::from_bits_retain(0x12_3456);
        assert_eq!(modifiers.to_key_bytes(), [0x56, 0x12]);
        assert_eq!(
            Modifiers::from_key_bytes([0x56, 0x12]),
            Modifiers::from_bits_retain(0x12_0056)
        );
    }
}
