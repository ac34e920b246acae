//! Fluent construction of raw metadata.
//!
//! The builders in this module assemble the raw entities of [`crate::metadata::model`] the way a
//! compiler would emit them: properties and events get their accessor methods (`get_X`,
//! `add_X`, ...) with the matching `MethodSemantics`, enums get their `value__` backing field,
//! generic parameters are numbered by position and tokens are allocated per table.
//!
//! # Example
//!
//! ```rust
//! use declscope::metadata::{
//!     AssemblyBuilder, MethodAccessFlags, MethodDefBuilder, PropertyDefBuilder, TypeDefBuilder,
//!     TypeSig,
//! };
//!
//! let assembly = AssemblyBuilder::new("SchoolSys")
//!     .add_type(
//!         TypeDefBuilder::class("SchoolSys", "BaseMember")
//!             .public()
//!             .abstract_()
//!             .property(
//!                 PropertyDefBuilder::new("Id", TypeSig::string())
//!                     .getter(MethodAccessFlags::PUBLIC)
//!                     .setter(MethodAccessFlags::FAMILY),
//!             )
//!             .method(
//!                 MethodDefBuilder::new("SignIn")
//!                     .public()
//!                     .virtual_()
//!                     .returns(TypeSig::boolean()),
//!             ),
//!     )
//!     .build();
//!
//! let base_member = assembly.get("SchoolSys.BaseMember").unwrap();
//! assert_eq!(base_member.methods.len(), 3);
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crate::metadata::{
    flags::{
        FieldAttributes, GenericParamAttributes, MethodAccessFlags, MethodModifiers,
        MethodSemanticsAttributes, MethodVtableFlags, ParamAttributes, TypeAttributes,
        METHOD_ACCESS_MASK,
    },
    model::{
        AttributeArgument, AttributeValue, ConstantValue, CustomAttribute, CustomAttributeRc,
        EventDef, EventRc, FieldDef, FieldRc, GenericParamDef, GenericParamRc, MethodDef,
        MethodDefRc, NamedArgument, ParamDef, ParamRc, PropertyDef, PropertyRc, TypeDef,
        TypeDefRc,
    },
    signature::{GenericOwner, TypeSig},
    store::{Assembly, AssemblyRc},
    token::{Token, TokenTable},
};

/// Full name of the attribute marking a `params` array parameter
pub const PARAM_ARRAY_ATTRIBUTE: &str = "System.ParamArrayAttribute";
/// Full name of the attribute marking an extension method
pub const EXTENSION_ATTRIBUTE: &str = "System.Runtime.CompilerServices.ExtensionAttribute";

static NEXT_ROW: AtomicU32 = AtomicU32::new(1);

fn next_token(table: u8) -> Token {
    Token::from_parts(table, NEXT_ROW.fetch_add(1, Ordering::Relaxed))
}

fn build_attributes(attributes: Vec<CustomAttributeBuilder>) -> Vec<CustomAttributeRc> {
    attributes
        .into_iter()
        .map(CustomAttributeBuilder::build)
        .collect()
}

/// Builds a [`CustomAttribute`]
pub struct CustomAttributeBuilder {
    attribute_type: TypeSig,
    constructor_params: Vec<String>,
    fixed_args: Vec<AttributeArgument>,
    named_args: Vec<NamedArgument>,
}

impl CustomAttributeBuilder {
    /// Start an attribute usage
    ///
    /// ## Arguments
    /// * 'path' - Full metadata name of the attribute class (``System.ObsoleteAttribute``)
    pub fn new(path: &str) -> Self {
        CustomAttributeBuilder {
            attribute_type: TypeSig::path(path),
            constructor_params: Vec::new(),
            fixed_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    /// Add a positional constructor argument holding a constant
    ///
    /// ## Arguments
    /// * 'param' - Name of the matching constructor parameter
    /// * 'value' - The argument value; its runtime type becomes the argument type
    #[must_use]
    pub fn arg(self, param: &str, value: ConstantValue) -> Self {
        let arg_type = value.type_sig();
        self.arg_with(param, arg_type, AttributeValue::Constant(value))
    }

    /// Add a positional constructor argument with an explicit type
    #[must_use]
    pub fn arg_with(mut self, param: &str, arg_type: TypeSig, value: AttributeValue) -> Self {
        self.constructor_params.push(param.to_string());
        self.fixed_args.push(AttributeArgument { arg_type, value });
        self
    }

    /// Add a named field assignment
    #[must_use]
    pub fn field(mut self, name: &str, value: ConstantValue) -> Self {
        self.named_args.push(NamedArgument {
            is_field: true,
            name: name.to_string(),
            argument: AttributeArgument {
                arg_type: value.type_sig(),
                value: AttributeValue::Constant(value),
            },
        });
        self
    }

    /// Add a named property assignment
    #[must_use]
    pub fn property(mut self, name: &str, value: ConstantValue) -> Self {
        self.named_args.push(NamedArgument {
            is_field: false,
            name: name.to_string(),
            argument: AttributeArgument {
                arg_type: value.type_sig(),
                value: AttributeValue::Constant(value),
            },
        });
        self
    }

    /// Finish the attribute
    pub fn build(self) -> CustomAttributeRc {
        Arc::new(CustomAttribute {
            token: next_token(TokenTable::CUSTOM_ATTRIBUTE),
            attribute_type: self.attribute_type,
            constructor_params: self.constructor_params,
            fixed_args: self.fixed_args,
            named_args: self.named_args,
        })
    }
}

/// Builds a [`GenericParamDef`]; the owner numbers it on build
pub struct GenericParamDefBuilder {
    name: String,
    flags: u32,
    constraints: Vec<TypeSig>,
    attributes: Vec<CustomAttributeBuilder>,
}

impl GenericParamDefBuilder {
    /// Start a generic parameter
    pub fn new(name: &str) -> Self {
        GenericParamDefBuilder {
            name: name.to_string(),
            flags: 0,
            constraints: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Add a type constraint
    #[must_use]
    pub fn constraint(mut self, constraint: TypeSig) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// `where T : class`
    #[must_use]
    pub fn class_constraint(mut self) -> Self {
        self.flags |= GenericParamAttributes::REFERENCE_TYPE_CONSTRAINT;
        self
    }

    /// `where T : struct`; also records the implicit `System.ValueType` constraint
    #[must_use]
    pub fn struct_constraint(mut self) -> Self {
        self.flags |= GenericParamAttributes::NOT_NULLABLE_VALUE_TYPE_CONSTRAINT
            | GenericParamAttributes::DEFAULT_CONSTRUCTOR_CONSTRAINT;
        self.constraints.push(TypeSig::system("ValueType"));
        self
    }

    /// `where T : new()`
    #[must_use]
    pub fn new_constraint(mut self) -> Self {
        self.flags |= GenericParamAttributes::DEFAULT_CONSTRUCTOR_CONSTRAINT;
        self
    }

    /// `out T`
    #[must_use]
    pub fn covariant(mut self) -> Self {
        self.flags |= GenericParamAttributes::COVARIANT;
        self
    }

    /// `in T`
    #[must_use]
    pub fn contravariant(mut self) -> Self {
        self.flags |= GenericParamAttributes::CONTRAVARIANT;
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn build(self, number: u32, owner: GenericOwner) -> GenericParamRc {
        Arc::new(GenericParamDef {
            token: next_token(TokenTable::GENERIC_PARAM),
            number,
            flags: self.flags,
            name: self.name,
            owner,
            constraints: self.constraints,
            custom_attributes: build_attributes(self.attributes),
        })
    }
}

fn build_generic_params(
    params: Vec<GenericParamDefBuilder>,
    owner: GenericOwner,
) -> Vec<GenericParamRc> {
    params
        .into_iter()
        .zip(0u32..)
        .map(|(param, number)| param.build(number, owner))
        .collect()
}

/// Builds a [`ParamDef`]; the owning method assigns the sequence
pub struct ParamDefBuilder {
    name: String,
    flags: u32,
    param_type: TypeSig,
    default: Option<ConstantValue>,
    attributes: Vec<CustomAttributeBuilder>,
}

impl ParamDefBuilder {
    /// Start a parameter
    ///
    /// ## Arguments
    /// * 'name'       - The parameter name
    /// * 'param_type' - The parameter type
    pub fn new(name: &str, param_type: TypeSig) -> Self {
        ParamDefBuilder {
            name: name.to_string(),
            flags: 0,
            param_type,
            default: None,
            attributes: Vec::new(),
        }
    }

    /// `ref T name`; a type already passed by reference is left as is
    #[must_use]
    pub fn by_ref(mut self) -> Self {
        if !self.param_type.is_by_ref() {
            self.param_type = TypeSig::by_ref(self.param_type);
        }
        self
    }

    /// `out T name`
    #[must_use]
    pub fn out(mut self) -> Self {
        self.flags |= ParamAttributes::OUT;
        self.by_ref()
    }

    /// `in T name`
    #[must_use]
    pub fn in_(mut self) -> Self {
        self.flags |= ParamAttributes::IN;
        self.by_ref()
    }

    /// `params T[] name`
    #[must_use]
    pub fn params(self) -> Self {
        self.attribute(CustomAttributeBuilder::new(PARAM_ARRAY_ATTRIBUTE))
    }

    /// `T name = value`
    #[must_use]
    pub fn optional(mut self, value: ConstantValue) -> Self {
        self.flags |= ParamAttributes::OPTIONAL | ParamAttributes::HAS_DEFAULT;
        self.default = Some(value);
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn build(self, sequence: u32) -> ParamRc {
        Arc::new(ParamDef {
            token: next_token(TokenTable::PARAM),
            sequence,
            name: self.name,
            flags: self.flags,
            param_type: self.param_type,
            default: self.default,
            custom_attributes: build_attributes(self.attributes),
        })
    }
}

fn build_params(params: Vec<ParamDefBuilder>) -> Vec<ParamRc> {
    params
        .into_iter()
        .zip(1u32..)
        .map(|(param, sequence)| param.build(sequence))
        .collect()
}

/// Builds a [`MethodDef`]
pub struct MethodDefBuilder {
    name: String,
    flags: u32,
    return_type: TypeSig,
    params: Vec<ParamDefBuilder>,
    generic_params: Vec<GenericParamDefBuilder>,
    attributes: Vec<CustomAttributeBuilder>,
}

impl MethodDefBuilder {
    /// Start a private, non-virtual `void` method
    pub fn new(name: &str) -> Self {
        MethodDefBuilder {
            name: name.to_string(),
            flags: MethodAccessFlags::PRIVATE.bits() | MethodModifiers::HIDE_BY_SIG.bits(),
            return_type: TypeSig::void(),
            params: Vec::new(),
            generic_params: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Start a private instance constructor
    #[must_use]
    pub fn constructor() -> Self {
        let mut builder = Self::new(".ctor");
        builder.flags |= MethodModifiers::SPECIAL_NAME.bits() | MethodModifiers::RTSPECIAL_NAME.bits();
        builder
    }

    /// Start the static type initializer
    #[must_use]
    pub fn type_initializer() -> Self {
        Self::constructor().static_().renamed(".cctor")
    }

    /// Start a public static operator method (`op_Addition`, `op_Implicit`, ...)
    pub fn operator(name: &str) -> Self {
        let mut builder = Self::new(name).public().static_();
        builder.flags |= MethodModifiers::SPECIAL_NAME.bits();
        builder
    }

    fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the raw access bits
    #[must_use]
    pub fn access(mut self, access: MethodAccessFlags) -> Self {
        self.flags = (self.flags & !METHOD_ACCESS_MASK) | access.bits();
        self
    }

    /// `public`
    #[must_use]
    pub fn public(self) -> Self {
        self.access(MethodAccessFlags::PUBLIC)
    }

    /// `private`
    #[must_use]
    pub fn private(self) -> Self {
        self.access(MethodAccessFlags::PRIVATE)
    }

    /// `protected`
    #[must_use]
    pub fn protected(self) -> Self {
        self.access(MethodAccessFlags::FAMILY)
    }

    /// `internal`
    #[must_use]
    pub fn internal(self) -> Self {
        self.access(MethodAccessFlags::ASSEM)
    }

    /// `static`
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= MethodModifiers::STATIC.bits();
        self
    }

    /// `virtual`: a virtual method in a new vtable slot
    #[must_use]
    pub fn virtual_(mut self) -> Self {
        self.flags |= MethodModifiers::VIRTUAL.bits() | MethodVtableFlags::NEW_SLOT.bits();
        self
    }

    /// `abstract`
    #[must_use]
    pub fn abstract_(self) -> Self {
        let mut builder = self.virtual_();
        builder.flags |= MethodModifiers::ABSTRACT.bits();
        builder
    }

    /// `override`: a virtual method reusing the base slot
    #[must_use]
    pub fn override_(mut self) -> Self {
        self.flags |= MethodModifiers::VIRTUAL.bits();
        self.flags &= !MethodVtableFlags::NEW_SLOT.bits();
        self
    }

    /// `sealed`
    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.flags |= MethodModifiers::FINAL.bits();
        self
    }

    /// Mark as an extension method (static, `[Extension]`)
    #[must_use]
    pub fn extension(self) -> Self {
        self.static_()
            .attribute(CustomAttributeBuilder::new(EXTENSION_ATTRIBUTE))
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, return_type: TypeSig) -> Self {
        self.return_type = return_type;
        self
    }

    /// Append a plain parameter
    #[must_use]
    pub fn param(self, name: &str, param_type: TypeSig) -> Self {
        self.param_with(ParamDefBuilder::new(name, param_type))
    }

    /// Append a configured parameter
    #[must_use]
    pub fn param_with(mut self, param: ParamDefBuilder) -> Self {
        self.params.push(param);
        self
    }

    /// Declare a method-level generic parameter
    #[must_use]
    pub fn generic_param(mut self, param: GenericParamDefBuilder) -> Self {
        self.generic_params.push(param);
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Finish the method
    pub fn build(self) -> MethodDefRc {
        self.build_with_semantics(0)
    }

    fn build_with_semantics(self, semantics: u32) -> MethodDefRc {
        Arc::new(MethodDef {
            token: next_token(TokenTable::METHOD_DEF),
            name: self.name,
            flags: self.flags,
            semantics,
            return_type: self.return_type,
            params: build_params(self.params),
            generic_params: build_generic_params(self.generic_params, GenericOwner::Method),
            custom_attributes: build_attributes(self.attributes),
        })
    }
}

/// Builds a [`FieldDef`]
pub struct FieldDefBuilder {
    name: String,
    flags: u32,
    field_type: TypeSig,
    constant: Option<ConstantValue>,
    attributes: Vec<CustomAttributeBuilder>,
}

impl FieldDefBuilder {
    /// Start a private instance field
    pub fn new(name: &str, field_type: TypeSig) -> Self {
        FieldDefBuilder {
            name: name.to_string(),
            flags: FieldAttributes::PRIVATE,
            field_type,
            constant: None,
            attributes: Vec::new(),
        }
    }

    fn access(mut self, access: u32) -> Self {
        self.flags = (self.flags & !FieldAttributes::FIELD_ACCESS_MASK) | access;
        self
    }

    /// `public`
    #[must_use]
    pub fn public(self) -> Self {
        self.access(FieldAttributes::PUBLIC)
    }

    /// `private`
    #[must_use]
    pub fn private(self) -> Self {
        self.access(FieldAttributes::PRIVATE)
    }

    /// `protected`
    #[must_use]
    pub fn protected(self) -> Self {
        self.access(FieldAttributes::FAMILY)
    }

    /// `internal`
    #[must_use]
    pub fn internal(self) -> Self {
        self.access(FieldAttributes::ASSEMBLY)
    }

    /// `static`
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= FieldAttributes::STATIC;
        self
    }

    /// `readonly`
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.flags |= FieldAttributes::INIT_ONLY;
        self
    }

    /// `const` with the given value
    #[must_use]
    pub fn constant(mut self, value: ConstantValue) -> Self {
        self.flags |= FieldAttributes::STATIC | FieldAttributes::LITERAL | FieldAttributes::HAS_DEFAULT;
        self.constant = Some(value);
        self
    }

    /// Mark the field as runtime-special (`value__`, ...)
    #[must_use]
    pub fn runtime_special(mut self) -> Self {
        self.flags |= FieldAttributes::SPECIAL_NAME | FieldAttributes::RTSPECIAL_NAME;
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Finish the field
    pub fn build(self) -> FieldRc {
        Arc::new(FieldDef {
            token: next_token(TokenTable::FIELD),
            name: self.name,
            flags: self.flags,
            field_type: self.field_type,
            constant: self.constant,
            custom_attributes: build_attributes(self.attributes),
        })
    }
}

/// Builds a [`PropertyDef`] together with its accessor methods
pub struct PropertyDefBuilder {
    name: String,
    property_type: TypeSig,
    index: Vec<(String, TypeSig)>,
    getter: Option<MethodAccessFlags>,
    setter: Option<MethodAccessFlags>,
    accessor_flags: u32,
    attributes: Vec<CustomAttributeBuilder>,
}

impl PropertyDefBuilder {
    /// Start a property without accessors
    pub fn new(name: &str, property_type: TypeSig) -> Self {
        PropertyDefBuilder {
            name: name.to_string(),
            property_type,
            index: Vec::new(),
            getter: None,
            setter: None,
            accessor_flags: 0,
            attributes: Vec::new(),
        }
    }

    /// Start an indexer (`this[...]`)
    pub fn indexer(property_type: TypeSig) -> Self {
        Self::new("Item", property_type)
    }

    /// Add a `get` accessor with the given access
    #[must_use]
    pub fn getter(mut self, access: MethodAccessFlags) -> Self {
        self.getter = Some(access);
        self
    }

    /// Add a `set` accessor with the given access
    #[must_use]
    pub fn setter(mut self, access: MethodAccessFlags) -> Self {
        self.setter = Some(access);
        self
    }

    /// Append an index parameter
    #[must_use]
    pub fn index(mut self, name: &str, param_type: TypeSig) -> Self {
        self.index.push((name.to_string(), param_type));
        self
    }

    /// `static` accessors
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.accessor_flags |= MethodModifiers::STATIC.bits();
        self
    }

    /// `virtual` accessors
    #[must_use]
    pub fn virtual_(mut self) -> Self {
        self.accessor_flags |= MethodModifiers::VIRTUAL.bits() | MethodVtableFlags::NEW_SLOT.bits();
        self
    }

    /// `abstract` accessors
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.accessor_flags |= MethodModifiers::ABSTRACT.bits()
            | MethodModifiers::VIRTUAL.bits()
            | MethodVtableFlags::NEW_SLOT.bits();
        self
    }

    /// `override` accessors
    #[must_use]
    pub fn override_(mut self) -> Self {
        self.accessor_flags |= MethodModifiers::VIRTUAL.bits();
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn accessor(&self, prefix: &str, access: MethodAccessFlags) -> MethodDefBuilder {
        let mut method = MethodDefBuilder::new(&format!("{}_{}", prefix, self.name)).access(access);
        method.flags |= MethodModifiers::SPECIAL_NAME.bits() | self.accessor_flags;
        self.index.iter().fold(method, |method, (name, param_type)| {
            method.param(name, param_type.clone())
        })
    }

    /// Finish the property; returns it together with its accessor methods
    pub fn build(self) -> (PropertyRc, Vec<MethodDefRc>) {
        let getter = self.getter.map(|access| {
            self.accessor("get", access)
                .returns(self.property_type.clone())
                .build_with_semantics(MethodSemanticsAttributes::GETTER)
        });
        let setter = self.setter.map(|access| {
            self.accessor("set", access)
                .param("value", self.property_type.clone())
                .build_with_semantics(MethodSemanticsAttributes::SETTER)
        });

        let params = build_params(
            self.index
                .into_iter()
                .map(|(name, param_type)| ParamDefBuilder::new(&name, param_type))
                .collect(),
        );
        let accessors = getter.iter().chain(setter.iter()).cloned().collect();

        let property = Arc::new(PropertyDef {
            token: next_token(TokenTable::PROPERTY),
            name: self.name,
            flags: 0,
            property_type: self.property_type,
            params,
            getter,
            setter,
            custom_attributes: build_attributes(self.attributes),
        });

        (property, accessors)
    }
}

/// Builds an [`EventDef`] together with its add/remove methods
pub struct EventDefBuilder {
    name: String,
    event_type: TypeSig,
    access: MethodAccessFlags,
    accessor_flags: u32,
    with_accessors: bool,
    attributes: Vec<CustomAttributeBuilder>,
}

impl EventDefBuilder {
    /// Start a private event
    pub fn new(name: &str, event_type: TypeSig) -> Self {
        EventDefBuilder {
            name: name.to_string(),
            event_type,
            access: MethodAccessFlags::PRIVATE,
            accessor_flags: 0,
            with_accessors: true,
            attributes: Vec::new(),
        }
    }

    /// Set the access of both accessors
    #[must_use]
    pub fn access(mut self, access: MethodAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// `public`
    #[must_use]
    pub fn public(self) -> Self {
        self.access(MethodAccessFlags::PUBLIC)
    }

    /// `protected`
    #[must_use]
    pub fn protected(self) -> Self {
        self.access(MethodAccessFlags::FAMILY)
    }

    /// `static`
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.accessor_flags |= MethodModifiers::STATIC.bits();
        self
    }

    /// `virtual`
    #[must_use]
    pub fn virtual_(mut self) -> Self {
        self.accessor_flags |= MethodModifiers::VIRTUAL.bits() | MethodVtableFlags::NEW_SLOT.bits();
        self
    }

    /// `abstract`
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.accessor_flags |= MethodModifiers::ABSTRACT.bits()
            | MethodModifiers::VIRTUAL.bits()
            | MethodVtableFlags::NEW_SLOT.bits();
        self
    }

    /// Emit the event without add/remove methods
    #[must_use]
    pub fn without_accessors(mut self) -> Self {
        self.with_accessors = false;
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn accessor(&self, prefix: &str, semantics: u32) -> MethodDefRc {
        let mut method = MethodDefBuilder::new(&format!("{}_{}", prefix, self.name))
            .access(self.access)
            .param("value", self.event_type.clone());
        method.flags |= MethodModifiers::SPECIAL_NAME.bits() | self.accessor_flags;
        method.build_with_semantics(semantics)
    }

    /// Finish the event; returns it together with its accessor methods
    pub fn build(self) -> (EventRc, Vec<MethodDefRc>) {
        let (adder, remover) = if self.with_accessors {
            (
                Some(self.accessor("add", MethodSemanticsAttributes::ADD_ON)),
                Some(self.accessor("remove", MethodSemanticsAttributes::REMOVE_ON)),
            )
        } else {
            (None, None)
        };
        let accessors = adder.iter().chain(remover.iter()).cloned().collect();

        let event = Arc::new(EventDef {
            token: next_token(TokenTable::EVENT),
            name: self.name,
            flags: 0,
            event_type: self.event_type,
            adder,
            remover,
            custom_attributes: build_attributes(self.attributes),
        });

        (event, accessors)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Visibility {
    Default,
    Public,
    Internal,
    Protected,
    Private,
}

/// Builds a [`TypeDef`]
pub struct TypeDefBuilder {
    namespace: String,
    name: String,
    enclosing: Vec<String>,
    visibility: Visibility,
    flags: u32,
    base: Option<TypeSig>,
    interfaces: Vec<TypeSig>,
    generic_params: Vec<GenericParamDefBuilder>,
    fields: Vec<FieldDefBuilder>,
    methods: Vec<MethodDefBuilder>,
    properties: Vec<PropertyDefBuilder>,
    events: Vec<EventDefBuilder>,
    attributes: Vec<CustomAttributeBuilder>,
}

impl TypeDefBuilder {
    fn new(namespace: &str, name: &str, flags: u32, base: Option<TypeSig>) -> Self {
        TypeDefBuilder {
            namespace: namespace.to_string(),
            name: name.to_string(),
            enclosing: Vec::new(),
            visibility: Visibility::Default,
            flags,
            base,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Start a class deriving from `System.Object`
    pub fn class(namespace: &str, name: &str) -> Self {
        Self::new(namespace, name, 0, Some(TypeSig::object()))
    }

    /// Start an interface
    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT,
            None,
        )
    }

    /// Start a struct
    pub fn value_type(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeAttributes::SEALED,
            Some(TypeSig::system("ValueType")),
        )
    }

    /// Start an enum with the given underlying type
    pub fn enumeration(namespace: &str, name: &str, underlying: TypeSig) -> Self {
        Self::new(
            namespace,
            name,
            TypeAttributes::SEALED,
            Some(TypeSig::system("Enum")),
        )
        .field(
            FieldDefBuilder::new("value__", underlying)
                .public()
                .runtime_special(),
        )
    }

    /// Start a delegate type; add an `Invoke` method for its signature
    pub fn delegate(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeAttributes::SEALED,
            Some(TypeSig::system("MulticastDelegate")),
        )
    }

    /// Nest this type inside the given enclosing types (outermost first)
    #[must_use]
    pub fn nested_in(mut self, enclosing: &[&str]) -> Self {
        self.enclosing = enclosing.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// `public`
    #[must_use]
    pub fn public(mut self) -> Self {
        self.visibility = Visibility::Public;
        self
    }

    /// `internal`
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.visibility = Visibility::Internal;
        self
    }

    /// `protected` (nested types only)
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.visibility = Visibility::Protected;
        self
    }

    /// `private` (nested types only)
    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// `abstract`
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.flags |= TypeAttributes::ABSTRACT;
        self
    }

    /// `sealed`
    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// `static` (abstract and sealed)
    #[must_use]
    pub fn static_(self) -> Self {
        self.abstract_().sealed()
    }

    /// Replace the base type
    #[must_use]
    pub fn extends(mut self, base: TypeSig) -> Self {
        self.base = Some(base);
        self
    }

    /// Add an implemented interface
    #[must_use]
    pub fn implements(mut self, interface: TypeSig) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Declare a generic parameter
    #[must_use]
    pub fn generic_param(mut self, param: GenericParamDefBuilder) -> Self {
        self.generic_params.push(param);
        self
    }

    /// Add a field
    #[must_use]
    pub fn field(mut self, field: FieldDefBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Add an enum member (a public literal field of the enum's own type)
    #[must_use]
    pub fn enum_value(self, name: &str, value: ConstantValue) -> Self {
        let own_type = TypeSig::path(&self.full_name());
        self.field(FieldDefBuilder::new(name, own_type).public().constant(value))
    }

    /// Add a method
    #[must_use]
    pub fn method(mut self, method: MethodDefBuilder) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a property and its accessors
    #[must_use]
    pub fn property(mut self, property: PropertyDefBuilder) -> Self {
        self.properties.push(property);
        self
    }

    /// Add an event and its accessors
    #[must_use]
    pub fn event(mut self, event: EventDefBuilder) -> Self {
        self.events.push(event);
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn full_name(&self) -> String {
        let mut full = String::new();
        if !self.namespace.is_empty() {
            full.push_str(&self.namespace);
            full.push('.');
        }
        for outer in &self.enclosing {
            full.push_str(outer);
            full.push('/');
        }
        full.push_str(&self.name);
        full
    }

    fn visibility_flags(&self) -> u32 {
        let nested = !self.enclosing.is_empty();
        match (self.visibility, nested) {
            (Visibility::Public, false) => TypeAttributes::PUBLIC,
            (Visibility::Public, true) => TypeAttributes::NESTED_PUBLIC,
            (Visibility::Default | Visibility::Internal, false) => TypeAttributes::NOT_PUBLIC,
            (Visibility::Internal, true) => TypeAttributes::NESTED_ASSEMBLY,
            (Visibility::Protected, _) => TypeAttributes::NESTED_FAMILY,
            (Visibility::Private | Visibility::Default, true) => TypeAttributes::NESTED_PRIVATE,
            (Visibility::Private, false) => TypeAttributes::NOT_PUBLIC,
        }
    }

    /// Finish the type as part of the named assembly
    ///
    /// ## Arguments
    /// * 'assembly' - The name of the defining assembly
    pub fn build(self, assembly: &str) -> TypeDefRc {
        let flags = (self.flags & !TypeAttributes::VISIBILITY_MASK) | self.visibility_flags();

        let mut methods: Vec<MethodDefRc> =
            self.methods.into_iter().map(MethodDefBuilder::build).collect();

        let mut properties = Vec::with_capacity(self.properties.len());
        for property in self.properties {
            let (property, accessors) = property.build();
            properties.push(property);
            methods.extend(accessors);
        }

        let mut events = Vec::with_capacity(self.events.len());
        for event in self.events {
            let (event, accessors) = event.build();
            events.push(event);
            methods.extend(accessors);
        }

        Arc::new(TypeDef {
            token: next_token(TokenTable::TYPE_DEF),
            assembly: assembly.to_string(),
            namespace: self.namespace,
            enclosing: self.enclosing,
            name: self.name,
            flags,
            base: self.base,
            interfaces: self.interfaces,
            generic_params: build_generic_params(self.generic_params, GenericOwner::Type),
            fields: self.fields.into_iter().map(FieldDefBuilder::build).collect(),
            methods,
            properties,
            events,
            custom_attributes: build_attributes(self.attributes),
        })
    }
}

/// Builds an [`Assembly`]
pub struct AssemblyBuilder {
    name: String,
    types: Vec<TypeDefBuilder>,
}

impl AssemblyBuilder {
    /// Start an empty assembly
    pub fn new(name: &str) -> Self {
        AssemblyBuilder {
            name: name.to_string(),
            types: Vec::new(),
        }
    }

    /// Add a type definition
    #[must_use]
    pub fn add_type(mut self, ty: TypeDefBuilder) -> Self {
        self.types.push(ty);
        self
    }

    /// Finish the assembly
    pub fn build(self) -> AssemblyRc {
        let assembly = Assembly::new(&self.name);
        for ty in self.types {
            assembly.insert(ty.build(&self.name));
        }
        Arc::new(assembly)
    }
}
