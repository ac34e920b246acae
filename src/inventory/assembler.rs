//! Type inventory assembly.
//!
//! [`build_inventory`] is the top-level query of the engine: it looks a type up, renders its own
//! descriptor, attributes, base type and interfaces, collects every member partition through
//! [`collect_members`], sorts each partition by name and composes the type's declaration.
//!
//! # Declarations
//!
//! | Kind | `declaration` | `full_declaration` |
//! |------|---------------|--------------------|
//! | class | `public sealed class GuestMember<T>` | `... : IMember where T : IMember` |
//! | struct, enum, interface | `public struct Point` | `... : IEquatable<Point>` |
//! | delegate | `public delegate DataTree<T> GatherHash<T>` | `...(T original, T control) where T : struct` |
//!
//! The universal base types (`System.Object`, `System.ValueType`, `System.Enum`) are reported
//! as an empty base descriptor and never appear in the base list.

use strum::{Display, EnumString};

use crate::{
    config::TraversalConfig,
    declarations::{
        accessor::join_parts, parameter_list, render_attributes, where_clauses, Accessor,
        AttributeDescriptor, EventDescriptor, FieldDescriptor, MemberDescriptor,
        MethodDescriptor, PropertyDescriptor, RenderContext, TypeDescriptor,
    },
    inventory::members::{collect_members, MemberQuery},
    metadata::{AttributeTarget, MemberKind, MetadataProvider, RawMember, TypeDef, TypeDefRc},
    Error, Result,
};

/// Name of the method carrying a delegate's signature
const DELEGATE_INVOKE: &str = "Invoke";

/// The category of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ObjectKind {
    /// `class`
    Class,
    /// `struct`
    Struct,
    /// `enum`
    Enum,
    /// `interface`
    Interface,
    /// `delegate`
    Delegate,
}

impl ObjectKind {
    /// Classify a type definition by its flags and base type
    ///
    /// ## Arguments
    /// * 'def' - The type definition
    #[must_use]
    pub fn of(def: &TypeDef) -> ObjectKind {
        if def.is_interface() {
            ObjectKind::Interface
        } else if def.extends_system("Enum") {
            ObjectKind::Enum
        } else if def.extends_system("ValueType") {
            ObjectKind::Struct
        } else if def.extends_system("MulticastDelegate") {
            ObjectKind::Delegate
        } else {
            ObjectKind::Class
        }
    }
}

/// The visible surface of one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInventory {
    /// The type itself
    pub type_descriptor: TypeDescriptor,
    /// Name of the defining assembly
    pub assembly_name: String,
    /// The type's visibility
    pub accessor: Accessor,
    /// `static`, `sealed`, `abstract` or empty
    pub modifier: String,
    /// The declaration category
    pub object_kind: ObjectKind,
    /// Attributes applied to the type
    pub attributes: Vec<AttributeDescriptor>,
    /// The base type; empty for the universal base types
    pub base_type: TypeDescriptor,
    /// The directly implemented interfaces
    pub interfaces: Vec<TypeDescriptor>,
    /// Instance constructors
    pub constructors: Vec<MethodDescriptor>,
    /// Instance fields
    pub fields: Vec<FieldDescriptor>,
    /// Static fields, constants included
    pub static_fields: Vec<FieldDescriptor>,
    /// Instance properties
    pub properties: Vec<PropertyDescriptor>,
    /// Static properties
    pub static_properties: Vec<PropertyDescriptor>,
    /// Instance events
    pub events: Vec<EventDescriptor>,
    /// Static events
    pub static_events: Vec<EventDescriptor>,
    /// Instance methods
    pub methods: Vec<MethodDescriptor>,
    /// Static methods, operators excluded
    pub static_methods: Vec<MethodDescriptor>,
    /// Operators and conversions
    pub operators: Vec<MethodDescriptor>,
    /// `accessor modifier kind name`
    pub declaration: String,
    /// The declaration with base list and constraints (or the delegate signature)
    pub full_declaration: String,
}

impl TypeInventory {
    /// Total number of members across all partitions
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.constructors.len()
            + self.fields.len()
            + self.static_fields.len()
            + self.properties.len()
            + self.static_properties.len()
            + self.events.len()
            + self.static_events.len()
            + self.methods.len()
            + self.static_methods.len()
            + self.operators.len()
    }
}

/// Build the inventory of the type at `type_path`
///
/// ## Arguments
/// * 'provider'  - The metadata provider searched for the type
/// * 'type_path' - The fully qualified type path (``SchoolSys.Guests.GuestMember`1``)
/// * 'config'    - The traversal configuration
///
/// # Errors
/// Returns [`Error::NotFound`] if no assembly of the provider defines the type.
pub fn build_inventory(
    provider: &dyn MetadataProvider,
    type_path: &str,
    config: &TraversalConfig,
) -> Result<TypeInventory> {
    let def = provider
        .find_type(type_path)
        .ok_or_else(|| Error::NotFound(type_path.to_string()))?;
    Ok(assemble(provider, &def, *config))
}

/// Build the inventory of a type definition
///
/// ## Arguments
/// * 'provider' - The metadata provider
/// * 'def'      - The type definition
/// * 'config'   - The traversal configuration
pub fn assemble(
    provider: &dyn MetadataProvider,
    def: &TypeDefRc,
    config: TraversalConfig,
) -> TypeInventory {
    let type_descriptor = TypeDescriptor::from_def(def, provider);
    let object_kind = ObjectKind::of(def);

    let partition = |query: MemberQuery| {
        let mut members = collect_members(provider, def, query, config);
        members.sort_by(|a, b| a.name().cmp(b.name()));
        members
    };
    let fields = |is_static| {
        partition(MemberQuery::ordinary(MemberKind::Field, is_static))
            .into_iter()
            .filter_map(MemberDescriptor::into_field)
            .collect::<Vec<_>>()
    };
    let properties = |is_static| {
        partition(MemberQuery::ordinary(MemberKind::Property, is_static))
            .into_iter()
            .filter_map(MemberDescriptor::into_property)
            .collect::<Vec<_>>()
    };
    let events = |is_static| {
        partition(MemberQuery::ordinary(MemberKind::Event, is_static))
            .into_iter()
            .filter_map(MemberDescriptor::into_event)
            .collect::<Vec<_>>()
    };
    let methods = |query| {
        partition(query)
            .into_iter()
            .filter_map(MemberDescriptor::into_method)
            .collect::<Vec<_>>()
    };

    let mut inventory = TypeInventory {
        assembly_name: def.assembly.clone(),
        accessor: Accessor::from_type_flags(def.flags),
        modifier: type_modifier(def, object_kind).to_string(),
        object_kind,
        attributes: render_attributes(&provider.custom_attributes(AttributeTarget::Type(def))),
        base_type: base_type(provider, def),
        interfaces: interfaces(provider, def, config),
        constructors: methods(MemberQuery::constructors()),
        fields: fields(false),
        static_fields: fields(true),
        properties: properties(false),
        static_properties: properties(true),
        events: events(false),
        static_events: events(true),
        methods: methods(MemberQuery::ordinary(MemberKind::Method, false)),
        static_methods: methods(MemberQuery::ordinary(MemberKind::Method, true)),
        operators: methods(MemberQuery::operators()),
        declaration: String::new(),
        full_declaration: String::new(),
        type_descriptor,
    };

    if object_kind == ObjectKind::Delegate {
        compose_delegate(provider, def, config, &mut inventory);
    } else {
        compose(&mut inventory);
    }
    inventory
}

/// `static` for static classes, `sealed`/`abstract` for other classes, nothing otherwise
fn type_modifier(def: &TypeDef, object_kind: ObjectKind) -> &'static str {
    if object_kind != ObjectKind::Class {
        return "";
    }
    match (def.is_abstract(), def.is_sealed()) {
        (true, true) => "static",
        (false, true) => "sealed",
        (true, false) => "abstract",
        (false, false) => "",
    }
}

/// The reported base type; empty for the universal bases
fn base_type(provider: &dyn MetadataProvider, def: &TypeDef) -> TypeDescriptor {
    match provider.base_type(def) {
        Some(base)
            if !(base.is_system("Object") || base.is_system("ValueType") || base.is_system("Enum")) =>
        {
            TypeDescriptor::from_sig(&base)
        }
        _ => TypeDescriptor::empty(),
    }
}

/// The implemented interfaces, without non-public ones when non-public types are hidden
fn interfaces(
    provider: &dyn MetadataProvider,
    def: &TypeDef,
    config: TraversalConfig,
) -> Vec<TypeDescriptor> {
    provider
        .interfaces(def)
        .iter()
        .filter(|interface| !config.hides_non_public_types() || provider.is_public(interface))
        .map(TypeDescriptor::from_sig)
        .collect()
}

/// Compose the declarations of a class, struct, enum or interface
fn compose(inventory: &mut TypeInventory) {
    let kind = inventory.object_kind.to_string();
    let name = inventory.type_descriptor.declared_name();
    inventory.declaration = join_parts(&[
        inventory.accessor.keyword(),
        inventory.modifier.as_str(),
        kind.as_str(),
        name.as_str(),
    ]);

    let inherited: Vec<&str> = std::iter::once(&inventory.base_type)
        .filter(|base| !base.is_empty())
        .chain(inventory.interfaces.iter())
        .map(|descriptor| descriptor.display_name.as_str())
        .collect();

    let mut full = inventory.declaration.clone();
    if !inherited.is_empty() {
        full.push_str(" : ");
        full.push_str(&inherited.join(", "));
    }
    full.push_str(&where_clauses(&inventory.type_descriptor.generic_parameters));
    inventory.full_declaration = full;
}

/// Compose the declarations of a delegate from its `Invoke` method
fn compose_delegate(
    provider: &dyn MetadataProvider,
    def: &TypeDef,
    config: TraversalConfig,
    inventory: &mut TypeInventory,
) {
    let ctx = RenderContext::new(provider, config, &inventory.type_descriptor);
    let invoke = provider
        .members(def, MemberKind::Method)
        .into_iter()
        .find_map(|raw| match raw {
            RawMember::Method(method) if method.name == DELEGATE_INVOKE => Some(method),
            _ => None,
        })
        .and_then(|method| match MethodDescriptor::render(&method, &ctx, false) {
            Ok(invoke) => Some(invoke),
            Err(error) => {
                log::warn!("delegate {} has an unreadable Invoke: {}", def.full_name(), error);
                None
            }
        });

    let (return_type, params) = match &invoke {
        Some(invoke) => (
            invoke.return_type.display_name.clone(),
            parameter_list(&invoke.parameters, false),
        ),
        None => {
            log::debug!("delegate {} declares no Invoke method", def.full_name());
            ("void".to_string(), String::new())
        }
    };

    let kind = inventory.object_kind.to_string();
    let name = inventory.type_descriptor.declared_name();
    inventory.declaration = join_parts(&[
        inventory.accessor.keyword(),
        kind.as_str(),
        return_type.as_str(),
        name.as_str(),
    ]);
    inventory.full_declaration = format!(
        "{}({}){}",
        inventory.declaration,
        params,
        where_clauses(&inventory.type_descriptor.generic_parameters)
    );
}
