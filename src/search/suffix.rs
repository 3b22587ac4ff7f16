//! Declaration-kind filters and their compatibility relation.

use crate::error::PatternError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration kind of a type, or an OR-combination of kinds used by queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSuffix {
    Class,
    Interface,
    Enum,
    AnnotationType,
    ClassAndInterface,
    ClassAndEnum,
    InterfaceAndAnnotation,
    /// Any kind. Only meaningful in queries.
    #[default]
    Type,
}

impl TypeSuffix {
    pub const ALL: [Self; 8] = [
        Self::Class,
        Self::Interface,
        Self::Enum,
        Self::AnnotationType,
        Self::ClassAndInterface,
        Self::ClassAndEnum,
        Self::InterfaceAndAnnotation,
        Self::Type,
    ];

    /// One-character code used by query front-ends.
    pub const fn code(self) -> char {
        match self {
            Self::Class => 'C',
            Self::Interface => 'I',
            Self::Enum => 'E',
            Self::AnnotationType => 'A',
            Self::ClassAndInterface => 'U',
            Self::ClassAndEnum => 'D',
            Self::InterfaceAndAnnotation => 'V',
            Self::Type => '\0',
        }
    }

    pub const fn from_code(code: char) -> Result<Self, PatternError> {
        Ok(match code {
            'C' => Self::Class,
            'I' => Self::Interface,
            'E' => Self::Enum,
            'A' => Self::AnnotationType,
            'U' => Self::ClassAndInterface,
            'D' => Self::ClassAndEnum,
            'V' => Self::InterfaceAndAnnotation,
            '\0' => Self::Type,
            other => return Err(PatternError::UnknownTypeSuffix(other)),
        })
    }

    /// Whether a query asking for `self` accepts a candidate of kind `candidate`.
    pub const fn is_compatible_with(self, candidate: Self) -> bool {
        use TypeSuffix::{
            AnnotationType, Class, ClassAndEnum, ClassAndInterface, Enum, Interface,
            InterfaceAndAnnotation, Type,
        };

        match (self, candidate) {
            (Type, _) => true,

            (Class, Class)
            | (Interface, Interface)
            | (Enum, Enum)
            | (AnnotationType, AnnotationType)
            | (ClassAndInterface, ClassAndInterface)
            | (ClassAndEnum, ClassAndEnum)
            | (InterfaceAndAnnotation, InterfaceAndAnnotation) => true,

            (ClassAndInterface, Class | Interface) => true,
            (ClassAndEnum, Class | Enum) => true,
            (InterfaceAndAnnotation, Interface | AnnotationType) => true,

            (
                Class | Interface | Enum | AnnotationType | ClassAndInterface | ClassAndEnum
                | InterfaceAndAnnotation,
                _,
            ) => false,
        }
    }

    /// Label used when rendering a pattern of this kind.
    pub const fn pattern_label(self) -> &'static str {
        match self {
            Self::Class => "ClassDeclarationPattern",
            Self::ClassAndInterface => "ClassAndInterfaceDeclarationPattern",
            Self::ClassAndEnum => "ClassAndEnumDeclarationPattern",
            Self::Interface => "InterfaceDeclarationPattern",
            Self::InterfaceAndAnnotation => "InterfaceAndAnnotationDeclarationPattern",
            Self::Enum => "EnumDeclarationPattern",
            Self::AnnotationType => "AnnotationTypeDeclarationPattern",
            Self::Type => "TypeDeclarationPattern",
        }
    }
}

impl fmt::Display for TypeSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::AnnotationType => "@interface",
            Self::ClassAndInterface => "class|interface",
            Self::ClassAndEnum => "class|enum",
            Self::InterfaceAndAnnotation => "interface|@interface",
            Self::Type => "type",
        };
        f.write_str(name)
    }
}
