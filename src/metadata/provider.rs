//! The metadata provider seam.
//!
//! The declaration engine never reads binaries itself. Everything it knows about a type comes
//! through the [`MetadataProvider`] trait: lookup by path, reference resolution, member lists,
//! inheritance edges and custom attributes. [`crate::metadata::MetadataStore`] is the in-memory
//! implementation; any loader that can produce the raw entities of
//! [`crate::metadata::model`] can implement the trait.
//!
//! Only [`MetadataProvider::find_type`], [`MetadataProvider::resolve`],
//! [`MetadataProvider::assemblies`] and [`MetadataProvider::types_in`] are required. The
//! remaining operations default to reading the lists carried by the raw entities.

use strum::{Display, EnumIter};

use crate::metadata::{
    model::{
        CustomAttributeRc, EventDef, EventRc, FieldDef, FieldRc, GenericParamDef,
        GenericParamRc, MethodDef, MethodDefRc, ParamDef, PropertyDef, PropertyRc, TypeDef,
        TypeDefRc,
    },
    signature::TypeSig,
};

/// The member categories a provider can enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum MemberKind {
    /// Fields
    Field,
    /// Properties
    Property,
    /// Events
    Event,
    /// Methods other than instance constructors (includes operators and the type initializer)
    Method,
    /// Instance constructors
    Constructor,
}

/// A raw member handed out by [`MetadataProvider::members`]
#[derive(Debug, Clone)]
pub enum RawMember {
    /// A field
    Field(FieldRc),
    /// A property
    Property(PropertyRc),
    /// An event
    Event(EventRc),
    /// A method or constructor
    Method(MethodDefRc),
}

impl RawMember {
    /// Returns the metadata name of the member
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            RawMember::Field(field) => &field.name,
            RawMember::Property(property) => &property.name,
            RawMember::Event(event) => &event.name,
            RawMember::Method(method) => &method.name,
        }
    }
}

/// An entity custom attributes can be attached to
#[derive(Debug, Clone, Copy)]
pub enum AttributeTarget<'a> {
    /// A type definition
    Type(&'a TypeDef),
    /// A field
    Field(&'a FieldDef),
    /// A method
    Method(&'a MethodDef),
    /// A method parameter
    Param(&'a ParamDef),
    /// A property
    Property(&'a PropertyDef),
    /// An event
    Event(&'a EventDef),
    /// A generic parameter
    GenericParam(&'a GenericParamDef),
}

/// Source of raw metadata for the declaration engine
pub trait MetadataProvider {
    /// Look up a type definition by its fully qualified path
    ///
    /// Nested types are separated by `/`. Implementations should also accept `-` in place of
    /// the arity marker (``GuestMember-1`` for ``GuestMember`1``), which is easier to type on a
    /// command line.
    ///
    /// ## Arguments
    /// * 'path' - The fully qualified type path
    fn find_type(&self, path: &str) -> Option<TypeDefRc>;

    /// Resolve a type reference to its definition
    ///
    /// Returns `None` for generic parameters, arrays and references, and for types defined
    /// outside the assemblies this provider knows about.
    ///
    /// ## Arguments
    /// * 'sig' - The type expression to resolve
    fn resolve(&self, sig: &TypeSig) -> Option<TypeDefRc>;

    /// Names of all assemblies known to this provider
    fn assemblies(&self) -> Vec<String>;

    /// All type definitions of an assembly, nested types included
    ///
    /// ## Arguments
    /// * 'assembly' - The assembly name
    fn types_in(&self, assembly: &str) -> Vec<TypeDefRc>;

    /// Members of one category declared directly on `ty`
    ///
    /// ## Arguments
    /// * 'ty'   - The declaring type
    /// * 'kind' - The member category
    fn members(&self, ty: &TypeDef, kind: MemberKind) -> Vec<RawMember> {
        match kind {
            MemberKind::Field => ty.fields.iter().cloned().map(RawMember::Field).collect(),
            MemberKind::Property => ty
                .properties
                .iter()
                .cloned()
                .map(RawMember::Property)
                .collect(),
            MemberKind::Event => ty.events.iter().cloned().map(RawMember::Event).collect(),
            MemberKind::Method => ty
                .methods
                .iter()
                .filter(|method| !method.is_constructor())
                .cloned()
                .map(RawMember::Method)
                .collect(),
            MemberKind::Constructor => ty
                .methods
                .iter()
                .filter(|method| method.is_constructor())
                .cloned()
                .map(RawMember::Method)
                .collect(),
        }
    }

    /// The base type reference of `ty`
    fn base_type(&self, ty: &TypeDef) -> Option<TypeSig> {
        ty.base.clone()
    }

    /// The directly implemented interfaces of `ty`
    fn interfaces(&self, ty: &TypeDef) -> Vec<TypeSig> {
        ty.interfaces.clone()
    }

    /// The generic parameters declared by `ty`
    fn generic_parameters(&self, ty: &TypeDef) -> Vec<GenericParamRc> {
        ty.generic_params.clone()
    }

    /// Custom attributes applied to an entity
    fn custom_attributes(&self, target: AttributeTarget<'_>) -> Vec<CustomAttributeRc> {
        match target {
            AttributeTarget::Type(ty) => ty.custom_attributes.clone(),
            AttributeTarget::Field(field) => field.custom_attributes.clone(),
            AttributeTarget::Method(method) => method.custom_attributes.clone(),
            AttributeTarget::Param(param) => param.custom_attributes.clone(),
            AttributeTarget::Property(property) => property.custom_attributes.clone(),
            AttributeTarget::Event(event) => event.custom_attributes.clone(),
            AttributeTarget::GenericParam(param) => param.custom_attributes.clone(),
        }
    }

    /// The enclosing type of a nested type
    fn declaring_type(&self, ty: &TypeDef) -> Option<TypeDefRc> {
        ty.declaring_type_name()
            .and_then(|outer| self.find_type(&outer))
    }

    /// Returns true if the referenced type is visible outside its assembly
    ///
    /// A nested type is public only if every enclosing type is public as well. References this
    /// provider cannot resolve (framework types) count as public.
    fn is_public(&self, sig: &TypeSig) -> bool {
        let Some(mut current) = self.resolve(sig) else {
            return true;
        };

        loop {
            if !current.is_public() {
                return false;
            }
            match self.declaring_type(&current) {
                Some(outer) => current = outer,
                None => return true,
            }
        }
    }
}
