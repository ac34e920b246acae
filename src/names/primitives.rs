//! Built-in type keywords.
//!
//! Maps the boxed runtime types (`System.Int32`, `System.String`, ...) to the language
//! keywords used in declarations (`int`, `string`, ...). Only exact full names are aliased.

use strum::{EnumIter, IntoEnumIterator};

/// Runtime types that have a language keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PrimitiveKind {
    /// System.Void
    Void,
    /// System.Boolean
    Boolean,
    /// System.Char
    Char,
    /// System.SByte
    I1,
    /// System.Byte
    U1,
    /// System.Int16
    I2,
    /// System.UInt16
    U2,
    /// System.Int32
    I4,
    /// System.UInt32
    U4,
    /// System.Int64
    I8,
    /// System.UInt64
    U8,
    /// System.Single
    R4,
    /// System.Double
    R8,
    /// System.Decimal
    Decimal,
    /// System.Object
    Object,
    /// System.String
    String,
}

impl PrimitiveKind {
    /// Get the CLR full name for this primitive
    #[must_use]
    pub fn clr_full_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Void => "System.Void",
            PrimitiveKind::Boolean => "System.Boolean",
            PrimitiveKind::Char => "System.Char",
            PrimitiveKind::I1 => "System.SByte",
            PrimitiveKind::U1 => "System.Byte",
            PrimitiveKind::I2 => "System.Int16",
            PrimitiveKind::U2 => "System.UInt16",
            PrimitiveKind::I4 => "System.Int32",
            PrimitiveKind::U4 => "System.UInt32",
            PrimitiveKind::I8 => "System.Int64",
            PrimitiveKind::U8 => "System.UInt64",
            PrimitiveKind::R4 => "System.Single",
            PrimitiveKind::R8 => "System.Double",
            PrimitiveKind::Decimal => "System.Decimal",
            PrimitiveKind::Object => "System.Object",
            PrimitiveKind::String => "System.String",
        }
    }

    /// Get the language keyword for this primitive
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Boolean => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::I1 => "sbyte",
            PrimitiveKind::U1 => "byte",
            PrimitiveKind::I2 => "short",
            PrimitiveKind::U2 => "ushort",
            PrimitiveKind::I4 => "int",
            PrimitiveKind::U4 => "uint",
            PrimitiveKind::I8 => "long",
            PrimitiveKind::U8 => "ulong",
            PrimitiveKind::R4 => "float",
            PrimitiveKind::R8 => "double",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Object => "object",
            PrimitiveKind::String => "string",
        }
    }

    /// Find the primitive with the given CLR full name
    ///
    /// ## Arguments
    /// * 'full_name' - e.g. `System.Int32`
    pub fn from_full_name(full_name: &str) -> Option<PrimitiveKind> {
        PrimitiveKind::iter().find(|kind| kind.clr_full_name() == full_name)
    }
}

/// Returns the keyword for a boxed primitive full name, if there is one
///
/// ## Arguments
/// * 'full_name' - The exact runtime full name
pub fn keyword_for(full_name: &str) -> Option<&'static str> {
    PrimitiveKind::from_full_name(full_name).map(|kind| kind.keyword())
}
