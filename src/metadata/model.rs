//! Raw metadata entities as handed out by a [`crate::metadata::MetadataProvider`].
//!
//! These structures mirror the rows of the ECMA-335 tables the declaration engine reads
//! (`TypeDef`, `Field`, `MethodDef`, `Param`, `Property`, `Event`, `GenericParam` and
//! `CustomAttribute`), with the cross-table references already resolved into owned lists and
//! every type reference expressed as a [`TypeSig`]. Entities are shared through [`Arc`]
//! aliases so a provider can hand out the same definition to many concurrent queries.

use std::{fmt, sync::Arc};

use crate::metadata::{
    flags::{
        FieldAttributes, GenericParamAttributes, MethodAccessFlags, MethodModifiers,
        MethodVtableFlags, ParamAttributes, TypeAttributes, METHOD_ACCESS_MASK,
    },
    signature::{GenericOwner, TypeName, TypeSig},
    token::Token,
};

/// A reference-counted pointer to a `TypeDef`
pub type TypeDefRc = Arc<TypeDef>;
/// A reference-counted pointer to a `FieldDef`
pub type FieldRc = Arc<FieldDef>;
/// A reference-counted pointer to a `MethodDef`
pub type MethodDefRc = Arc<MethodDef>;
/// A reference-counted pointer to a `ParamDef`
pub type ParamRc = Arc<ParamDef>;
/// A reference-counted pointer to a `PropertyDef`
pub type PropertyRc = Arc<PropertyDef>;
/// A reference-counted pointer to an `EventDef`
pub type EventRc = Arc<EventDef>;
/// A reference-counted pointer to a `GenericParamDef`
pub type GenericParamRc = Arc<GenericParamDef>;
/// A reference-counted pointer to a `CustomAttribute`
pub type CustomAttributeRc = Arc<CustomAttribute>;

/// A compile-time constant, as stored in the `Constant` table or a custom attribute blob
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    /// A null reference
    Null,
    /// `bool`
    Boolean(bool),
    /// `char`
    Char(char),
    /// `sbyte`
    I1(i8),
    /// `byte`
    U1(u8),
    /// `short`
    I2(i16),
    /// `ushort`
    U2(u16),
    /// `int`
    I4(i32),
    /// `uint`
    U4(u32),
    /// `long`
    I8(i64),
    /// `ulong`
    U8(u64),
    /// `float`
    R4(f32),
    /// `double`
    R8(f64),
    /// `string`
    String(String),
}

impl ConstantValue {
    /// Returns the runtime type of the constant (`System.Object` for null)
    #[must_use]
    pub fn type_sig(&self) -> TypeSig {
        let name = match self {
            ConstantValue::Null => "Object",
            ConstantValue::Boolean(_) => "Boolean",
            ConstantValue::Char(_) => "Char",
            ConstantValue::I1(_) => "SByte",
            ConstantValue::U1(_) => "Byte",
            ConstantValue::I2(_) => "Int16",
            ConstantValue::U2(_) => "UInt16",
            ConstantValue::I4(_) => "Int32",
            ConstantValue::U4(_) => "UInt32",
            ConstantValue::I8(_) => "Int64",
            ConstantValue::U8(_) => "UInt64",
            ConstantValue::R4(_) => "Single",
            ConstantValue::R8(_) => "Double",
            ConstantValue::String(_) => "String",
        };
        TypeSig::system(name)
    }

    /// Returns the value as it would appear in source
    ///
    /// Strings are double-quoted and chars single-quoted, with quotes and backslashes escaped;
    /// a null reference is the bare `null` keyword whatever the declared type.
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            ConstantValue::String(value) => format!("\"{}\"", escape(value, '"')),
            ConstantValue::Char(value) => format!("'{}'", escape(&value.to_string(), '\'')),
            other => other.to_string(),
        }
    }
}

/// Escape backslashes and the enclosing quote character
fn escape(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == quote {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => write!(f, "null"),
            ConstantValue::Boolean(value) => write!(f, "{}", value),
            ConstantValue::Char(value) => write!(f, "{}", value),
            ConstantValue::I1(value) => write!(f, "{}", value),
            ConstantValue::U1(value) => write!(f, "{}", value),
            ConstantValue::I2(value) => write!(f, "{}", value),
            ConstantValue::U2(value) => write!(f, "{}", value),
            ConstantValue::I4(value) => write!(f, "{}", value),
            ConstantValue::U4(value) => write!(f, "{}", value),
            ConstantValue::I8(value) => write!(f, "{}", value),
            ConstantValue::U8(value) => write!(f, "{}", value),
            ConstantValue::R4(value) => write!(f, "{}", value),
            ConstantValue::R8(value) => write!(f, "{}", value),
            ConstantValue::String(value) => write!(f, "{}", value),
        }
    }
}

/// The value of a custom attribute argument
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A primitive or string constant
    Constant(ConstantValue),
    /// A `System.Type` argument (`typeof(...)`)
    Type(TypeSig),
    /// An enum value, stored as its underlying constant
    Enum {
        /// The enum type
        enum_type: TypeSig,
        /// The underlying value
        value: ConstantValue,
    },
    /// A single-dimensional array of values
    Array(Vec<AttributeValue>),
}

/// One fixed (constructor) or named argument of a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArgument {
    /// The declared type of the argument
    pub arg_type: TypeSig,
    /// The argument value
    pub value: AttributeValue,
}

/// A named argument: a field or property assignment inside the attribute usage
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    /// True for a field assignment, false for a property assignment
    pub is_field: bool,
    /// The field or property name
    pub name: String,
    /// The assigned value
    pub argument: AttributeArgument,
}

/// A custom attribute applied to a metadata entity
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttribute {
    /// `Token`
    pub token: Token,
    /// The attribute class
    pub attribute_type: TypeSig,
    /// Names of the attribute constructor's parameters, positionally matching `fixed_args`
    pub constructor_params: Vec<String>,
    /// Positional constructor arguments
    pub fixed_args: Vec<AttributeArgument>,
    /// Field and property assignments
    pub named_args: Vec<NamedArgument>,
}

/// A generic parameter declared by a type or a method
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParamDef {
    /// `Token`
    pub token: Token,
    /// Position in the owner's generic parameter list
    pub number: u32,
    /// `GenericParamAttributes`
    pub flags: u32,
    /// The declared name (`T`, `TKey`)
    pub name: String,
    /// Whether a type or a method declares this parameter
    pub owner: GenericOwner,
    /// Type constraints (`where T : IMember`)
    pub constraints: Vec<TypeSig>,
    /// Custom attributes applied to the parameter
    pub custom_attributes: Vec<CustomAttributeRc>,
}

impl GenericParamDef {
    /// Returns true for the `class` constraint
    #[must_use]
    pub fn has_reference_type_constraint(&self) -> bool {
        self.flags & GenericParamAttributes::REFERENCE_TYPE_CONSTRAINT != 0
    }

    /// Returns true for the `struct` constraint
    #[must_use]
    pub fn has_value_type_constraint(&self) -> bool {
        self.flags & GenericParamAttributes::NOT_NULLABLE_VALUE_TYPE_CONSTRAINT != 0
    }

    /// Returns true for the `new()` constraint
    #[must_use]
    pub fn has_default_constructor_constraint(&self) -> bool {
        self.flags & GenericParamAttributes::DEFAULT_CONSTRUCTOR_CONSTRAINT != 0
    }

    /// Returns true for a covariant (`out T`) parameter
    #[must_use]
    pub fn is_covariant(&self) -> bool {
        self.flags & GenericParamAttributes::VARIANCE_MASK == GenericParamAttributes::COVARIANT
    }

    /// Returns true for a contravariant (`in T`) parameter
    #[must_use]
    pub fn is_contravariant(&self) -> bool {
        self.flags & GenericParamAttributes::VARIANCE_MASK
            == GenericParamAttributes::CONTRAVARIANT
    }

    /// Returns a reference to this parameter as a type expression
    #[must_use]
    pub fn sig(&self) -> TypeSig {
        TypeSig::GenericParam {
            name: self.name.clone(),
            index: self.number,
            owner: self.owner,
        }
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    /// `Token`
    pub token: Token,
    /// 1-based position in the parameter list
    pub sequence: u32,
    /// The parameter name
    pub name: String,
    /// `ParamAttributes`
    pub flags: u32,
    /// The parameter type; `ByRef` for `ref`, `out` and `in` parameters
    pub param_type: TypeSig,
    /// The default value of an optional parameter
    pub default: Option<ConstantValue>,
    /// Custom attributes applied to the parameter
    pub custom_attributes: Vec<CustomAttributeRc>,
}

impl ParamDef {
    /// Returns true if the parameter carries the `[In]` flag
    #[must_use]
    pub fn is_in(&self) -> bool {
        self.flags & ParamAttributes::IN != 0
    }

    /// Returns true if the parameter carries the `[Out]` flag
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.flags & ParamAttributes::OUT != 0
    }

    /// Returns true if the parameter is optional or has a default value
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.flags & (ParamAttributes::OPTIONAL | ParamAttributes::HAS_DEFAULT) != 0
    }
}

/// A method definition
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    /// `Token`
    pub token: Token,
    /// The method name (`.ctor` for constructors, `op_Addition` for operators)
    pub name: String,
    /// `MethodAttributes`
    pub flags: u32,
    /// `MethodSemanticsAttributes` if this method is a property or event accessor, else 0
    pub semantics: u32,
    /// The return type
    pub return_type: TypeSig,
    /// Parameters, ordered by sequence
    pub params: Vec<ParamRc>,
    /// Generic parameters declared by the method itself
    pub generic_params: Vec<GenericParamRc>,
    /// Custom attributes applied to the method
    pub custom_attributes: Vec<CustomAttributeRc>,
}

impl MethodDef {
    /// Returns the access bits of the method
    #[must_use]
    pub fn access(&self) -> MethodAccessFlags {
        MethodAccessFlags::from_method_flags(self.flags)
    }

    /// Returns the raw 3-bit access code
    #[must_use]
    pub fn access_code(&self) -> u32 {
        self.flags & METHOD_ACCESS_MASK
    }

    /// Returns the modifier bits of the method
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// Returns the vtable layout bits of the method
    #[must_use]
    pub fn vtable(&self) -> MethodVtableFlags {
        MethodVtableFlags::from_method_flags(self.flags)
    }

    /// Returns true for instance constructors
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == ".ctor"
    }

    /// Returns true for the static type initializer
    #[must_use]
    pub fn is_type_initializer(&self) -> bool {
        self.name == ".cctor"
    }

    /// Returns true for static methods
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// Returns true if this method implements a property or event
    #[must_use]
    pub fn is_accessor(&self) -> bool {
        self.semantics != 0
    }
}

/// A field definition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// `Token`
    pub token: Token,
    /// The field name
    pub name: String,
    /// `FieldAttributes`
    pub flags: u32,
    /// The field type
    pub field_type: TypeSig,
    /// The literal value of a `const` field
    pub constant: Option<ConstantValue>,
    /// Custom attributes applied to the field
    pub custom_attributes: Vec<CustomAttributeRc>,
}

impl FieldDef {
    /// Returns the raw 3-bit access code
    #[must_use]
    pub fn access_code(&self) -> u32 {
        self.flags & FieldAttributes::FIELD_ACCESS_MASK
    }

    /// Returns true for static fields, including `const` fields
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags & FieldAttributes::STATIC != 0
    }

    /// Returns true for `const` fields
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.flags & FieldAttributes::LITERAL != 0
    }

    /// Returns true for `readonly` fields
    #[must_use]
    pub fn is_init_only(&self) -> bool {
        self.flags & FieldAttributes::INIT_ONLY != 0
    }
}

/// A property definition
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    /// `Token`
    pub token: Token,
    /// The property name (`Item` for indexers)
    pub name: String,
    /// `PropertyAttributes`
    pub flags: u32,
    /// The property type
    pub property_type: TypeSig,
    /// Index parameters; non-empty for indexers
    pub params: Vec<ParamRc>,
    /// The get accessor
    pub getter: Option<MethodDefRc>,
    /// The set accessor
    pub setter: Option<MethodDefRc>,
    /// Custom attributes applied to the property
    pub custom_attributes: Vec<CustomAttributeRc>,
}

/// An event definition
#[derive(Debug, Clone, PartialEq)]
pub struct EventDef {
    /// `Token`
    pub token: Token,
    /// The event name
    pub name: String,
    /// `EventAttributes`
    pub flags: u32,
    /// The delegate type of the event
    pub event_type: TypeSig,
    /// The add accessor
    pub adder: Option<MethodDefRc>,
    /// The remove accessor
    pub remover: Option<MethodDefRc>,
    /// Custom attributes applied to the event
    pub custom_attributes: Vec<CustomAttributeRc>,
}

/// A type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// `Token`
    pub token: Token,
    /// The name of the assembly defining this type
    pub assembly: String,
    /// Namespace of the outermost enclosing type
    pub namespace: String,
    /// Enclosing type names, outermost first
    pub enclosing: Vec<String>,
    /// The metadata name, including its arity marker
    pub name: String,
    /// `TypeAttributes`
    pub flags: u32,
    /// The base type; `None` for interfaces and `System.Object`
    pub base: Option<TypeSig>,
    /// Directly implemented interfaces
    pub interfaces: Vec<TypeSig>,
    /// Generic parameters, including those redeclared from enclosing types
    pub generic_params: Vec<GenericParamRc>,
    /// Fields
    pub fields: Vec<FieldRc>,
    /// Methods, including constructors and property/event accessors
    pub methods: Vec<MethodDefRc>,
    /// Properties
    pub properties: Vec<PropertyRc>,
    /// Events
    pub events: Vec<EventRc>,
    /// Custom attributes applied to the type
    pub custom_attributes: Vec<CustomAttributeRc>,
}

impl TypeDef {
    /// Returns the structured name of this definition
    #[must_use]
    pub fn type_name(&self) -> TypeName {
        TypeName {
            namespace: self.namespace.clone(),
            enclosing: self.enclosing.clone(),
            name: self.name.clone(),
        }
    }

    /// Returns the full metadata name (``Namespace.Outer/Inner`1``)
    #[must_use]
    pub fn full_name(&self) -> String {
        self.type_name().full_name()
    }

    /// Returns the type expression denoting this definition. Generic definitions are
    /// instantiated over their own formal parameters.
    #[must_use]
    pub fn sig(&self) -> TypeSig {
        if self.generic_params.is_empty() {
            TypeSig::Named(self.type_name())
        } else {
            TypeSig::GenericInst {
                base: self.type_name(),
                args: self.generic_params.iter().map(|param| param.sig()).collect(),
            }
        }
    }

    /// Returns the visibility bits
    #[must_use]
    pub fn visibility(&self) -> u32 {
        self.flags & TypeAttributes::VISIBILITY_MASK
    }

    /// Returns true if the type itself is declared public (or nested public)
    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(
            self.visibility(),
            TypeAttributes::PUBLIC | TypeAttributes::NESTED_PUBLIC
        )
    }

    /// Returns true for interfaces
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags & TypeAttributes::INTERFACE != 0
    }

    /// Returns true for abstract types
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags & TypeAttributes::ABSTRACT != 0
    }

    /// Returns true for sealed types
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.flags & TypeAttributes::SEALED != 0
    }

    /// Returns true if this type is declared inside another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.enclosing.is_empty()
    }

    /// Returns the full metadata name of the enclosing type, if nested
    #[must_use]
    pub fn declaring_type_name(&self) -> Option<String> {
        let (name, outer) = self.enclosing.split_last()?;
        Some(
            TypeName {
                namespace: self.namespace.clone(),
                enclosing: outer.to_vec(),
                name: name.clone(),
            }
            .full_name(),
        )
    }

    /// Returns true if the base type is `System.<name>`
    #[must_use]
    pub fn extends_system(&self, name: &str) -> bool {
        self.base.as_ref().is_some_and(|base| base.is_system(name))
    }
}
