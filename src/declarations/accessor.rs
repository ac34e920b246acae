//! Accessors and modifiers of rendered declarations.
//!
//! [`Accessor`] is the visibility ordinal every member and type is mapped onto. Its order is
//! `none < internal < private < protected < public`; the visibility threshold of
//! [`crate::TraversalConfig`] and the property/event accessor aggregation both compare on it.
//!
//! [`Modifiers`] collects the structural qualifiers of a declaration and renders them in source
//! order.

use bitflags::bitflags;
use strum::{Display, EnumIter, EnumString};

use crate::metadata::flags::{FieldAttributes, TypeAttributes};

/// Declared visibility of a member or type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Accessor {
    /// Compiler-controlled; never referenceable
    #[default]
    #[strum(to_string = "", serialize = "none")]
    None,
    /// `internal`, including `private protected`
    Internal,
    /// `private`
    Private,
    /// `protected`, including `protected internal`
    Protected,
    /// `public`
    Public,
}

impl Accessor {
    /// Map a field or method access code (the low 3 flag bits) onto the ordinal
    ///
    /// Fields and methods share the same encoding (ECMA-335 §II.23.1.5 and §II.23.1.10).
    ///
    /// ## Arguments
    /// * 'code' - The masked access bits
    #[must_use]
    pub fn from_member_access(code: u32) -> Accessor {
        match code & FieldAttributes::FIELD_ACCESS_MASK {
            FieldAttributes::PRIVATE => Accessor::Private,
            FieldAttributes::FAM_AND_ASSEM | FieldAttributes::ASSEMBLY => Accessor::Internal,
            FieldAttributes::FAMILY | FieldAttributes::FAM_OR_ASSEM => Accessor::Protected,
            FieldAttributes::PUBLIC => Accessor::Public,
            _ => Accessor::None,
        }
    }

    /// Map type visibility flags onto the ordinal
    ///
    /// ## Arguments
    /// * 'flags' - The `TypeAttributes` word
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Accessor {
        match flags & TypeAttributes::VISIBILITY_MASK {
            TypeAttributes::PUBLIC | TypeAttributes::NESTED_PUBLIC => Accessor::Public,
            TypeAttributes::NESTED_PRIVATE => Accessor::Private,
            TypeAttributes::NESTED_FAMILY | TypeAttributes::NESTED_FAM_OR_ASSEM => {
                Accessor::Protected
            }
            _ => Accessor::Internal,
        }
    }

    /// The keyword as it appears in a declaration (empty for `none`)
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Accessor::None => "",
            Accessor::Internal => "internal",
            Accessor::Private => "private",
            Accessor::Protected => "protected",
            Accessor::Public => "public",
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Structural qualifiers of a declaration
    pub struct Modifiers: u16 {
        /// `const`
        const CONST = 0x0001;
        /// `static`
        const STATIC = 0x0002;
        /// `abstract`
        const ABSTRACT = 0x0004;
        /// `sealed`
        const SEALED = 0x0008;
        /// `override`
        const OVERRIDE = 0x0010;
        /// `virtual`
        const VIRTUAL = 0x0020;
        /// `readonly`
        const READONLY = 0x0040;
        /// `implicit` (conversion operators)
        const IMPLICIT = 0x0080;
        /// `explicit` (conversion operators)
        const EXPLICIT = 0x0100;
        /// `operator`
        const OPERATOR = 0x0200;
    }
}

impl Modifiers {
    const KEYWORDS: [(Modifiers, &'static str); 10] = [
        (Modifiers::CONST, "const"),
        (Modifiers::STATIC, "static"),
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::SEALED, "sealed"),
        (Modifiers::OVERRIDE, "override"),
        (Modifiers::VIRTUAL, "virtual"),
        (Modifiers::READONLY, "readonly"),
        (Modifiers::IMPLICIT, "implicit"),
        (Modifiers::EXPLICIT, "explicit"),
        (Modifiers::OPERATOR, "operator"),
    ];

    /// Render the set in source order (`static readonly`, `sealed override`, ...)
    #[must_use]
    pub fn render(&self) -> String {
        Self::KEYWORDS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, keyword)| *keyword)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Join declaration parts, skipping empty ones
pub(crate) fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
