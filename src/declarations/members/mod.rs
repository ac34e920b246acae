//! Member renderers.
//!
//! Each raw member handed out by the [`MetadataProvider`] is rendered into one variant of
//! [`MemberDescriptor`]. Rendering computes, in order:
//!
//! 1. the accessor, mapped from the declared visibility flags onto [`Accessor`]
//! 2. the modifier set (`static`, `abstract`, `override`, `virtual`, first match wins; `const`
//!    and `readonly` for fields)
//! 3. the kind-specific name, signature key and declaration
//!
//! A member that must not be reported (compiler-generated backing members, type initializers,
//! accessor methods listed on their own, anything below the visibility threshold) comes back
//! with [`MemberInfo::excluded`] set and with rendering cut short. The inventory builder drops
//! such descriptors before they reach any collection.
//!
//! # Examples
//!
//! ```rust
//! use declscope::declarations::{render_member, RenderContext, TypeDescriptor};
//! use declscope::metadata::{MetadataStore, MethodDefBuilder, RawMember, TypeSig};
//! use declscope::TraversalConfig;
//!
//! let store = MetadataStore::new();
//! let owner = TypeDescriptor::from_sig(&TypeSig::path("SchoolSys.StudentMember"));
//! let ctx = RenderContext::new(&store, TraversalConfig::default(), &owner);
//!
//! let method = MethodDefBuilder::new("GetName").public().returns(TypeSig::string()).build();
//! let descriptor = render_member(&RawMember::Method(method), &ctx)?;
//! assert_eq!(descriptor.declaration(), "public string GetName()");
//! # Ok::<(), declscope::Error>(())
//! ```

mod event;
mod field;
mod method;
pub mod operators;
mod property;

pub use event::EventDescriptor;
pub use field::FieldDescriptor;
pub use method::MethodDescriptor;
pub use property::PropertyDescriptor;

use crate::{
    config::TraversalConfig,
    declarations::{
        accessor::{join_parts, Accessor, Modifiers},
        attribute::AttributeDescriptor,
        typeinfo::TypeDescriptor,
    },
    metadata::{MetadataProvider, RawMember},
    Result,
};

/// Everything a member renderer needs besides the member itself
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Source of attributes and type information
    pub provider: &'a dyn MetadataProvider,
    /// Visibility threshold
    pub config: TraversalConfig,
    /// The type the rendered members are reported on (substituted for generic base levels)
    pub declaring_type: &'a TypeDescriptor,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context
    ///
    /// ## Arguments
    /// * 'provider'       - The metadata provider
    /// * 'config'         - The traversal configuration
    /// * 'declaring_type' - The type that declares the rendered members
    pub fn new(
        provider: &'a dyn MetadataProvider,
        config: TraversalConfig,
        declaring_type: &'a TypeDescriptor,
    ) -> Self {
        RenderContext {
            provider,
            config,
            declaring_type,
        }
    }
}

/// Data shared by every member descriptor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberInfo {
    /// The member name as reported (operators and constructors are renamed)
    pub name: String,
    /// The member's visibility
    pub accessor: Accessor,
    /// The structural qualifiers
    pub modifiers: Modifiers,
    /// The qualifiers as text (`static readonly`)
    pub modifier: String,
    /// True for static members
    pub is_static: bool,
    /// The type declaring the member
    pub declaring_type: TypeDescriptor,
    /// Attributes applied to the member
    pub attributes: Vec<AttributeDescriptor>,
    /// Marks the descriptor for removal; never set on a reported member
    pub excluded: bool,
}

impl MemberInfo {
    fn new(name: &str, accessor: Accessor, ctx: &RenderContext<'_>) -> Self {
        MemberInfo {
            name: name.to_string(),
            accessor,
            declaring_type: ctx.declaring_type.clone(),
            ..MemberInfo::default()
        }
    }

    fn exclude(mut self) -> Self {
        self.excluded = true;
        self
    }

    fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
        self.modifier = modifiers.render();
    }

    /// The `accessor modifier` prefix of a declaration
    fn prefix(&self) -> String {
        join_parts(&[self.accessor.keyword(), self.modifier.as_str()])
    }
}

/// A rendered member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDescriptor {
    /// A field
    Field(FieldDescriptor),
    /// A property or indexer
    Property(PropertyDescriptor),
    /// An event
    Event(EventDescriptor),
    /// A method, constructor or operator
    Method(MethodDescriptor),
}

impl MemberDescriptor {
    /// The shared member data
    #[must_use]
    pub fn info(&self) -> &MemberInfo {
        match self {
            MemberDescriptor::Field(field) => &field.info,
            MemberDescriptor::Property(property) => &property.info,
            MemberDescriptor::Event(event) => &event.info,
            MemberDescriptor::Method(method) => &method.info,
        }
    }

    /// The member name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// The member's visibility
    #[must_use]
    pub fn accessor(&self) -> Accessor {
        self.info().accessor
    }

    /// True for static members
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.info().is_static
    }

    /// True if the descriptor must be dropped
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.info().excluded
    }

    /// The identity used to detect a member redeclared further down the hierarchy
    #[must_use]
    pub fn signature_key(&self) -> &str {
        match self {
            MemberDescriptor::Field(field) => &field.info.name,
            MemberDescriptor::Property(property) => &property.signature_key,
            MemberDescriptor::Event(event) => &event.info.name,
            MemberDescriptor::Method(method) => &method.signature_key,
        }
    }

    /// The one-line declaration
    #[must_use]
    pub fn declaration(&self) -> &str {
        match self {
            MemberDescriptor::Field(field) => &field.declaration,
            MemberDescriptor::Property(property) => &property.declaration,
            MemberDescriptor::Event(event) => &event.declaration,
            MemberDescriptor::Method(method) => &method.declaration,
        }
    }

    /// Returns the method descriptor, if this is a method
    #[must_use]
    pub fn as_method(&self) -> Option<&MethodDescriptor> {
        match self {
            MemberDescriptor::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Unwraps a field descriptor
    #[must_use]
    pub fn into_field(self) -> Option<FieldDescriptor> {
        match self {
            MemberDescriptor::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Unwraps a property descriptor
    #[must_use]
    pub fn into_property(self) -> Option<PropertyDescriptor> {
        match self {
            MemberDescriptor::Property(property) => Some(property),
            _ => None,
        }
    }

    /// Unwraps an event descriptor
    #[must_use]
    pub fn into_event(self) -> Option<EventDescriptor> {
        match self {
            MemberDescriptor::Event(event) => Some(event),
            _ => None,
        }
    }

    /// Unwraps a method descriptor
    #[must_use]
    pub fn into_method(self) -> Option<MethodDescriptor> {
        match self {
            MemberDescriptor::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Recompute every derived text field
    pub fn finish(&mut self) {
        match self {
            MemberDescriptor::Field(field) => field.finish(),
            MemberDescriptor::Property(property) => property.finish(),
            MemberDescriptor::Event(event) => event.finish(),
            MemberDescriptor::Method(method) => method.finish(),
        }
    }
}

/// Render one raw member
///
/// Accessor methods of properties and events are excluded here; they are reported through
/// their property or event.
///
/// ## Arguments
/// * 'raw' - The raw member
/// * 'ctx' - The render context of the declaring level
///
/// # Errors
/// Returns [`crate::Error::MalformedMember`] for a member that cannot be classified.
pub fn render_member(raw: &RawMember, ctx: &RenderContext<'_>) -> Result<MemberDescriptor> {
    match raw {
        RawMember::Field(field) => Ok(MemberDescriptor::Field(FieldDescriptor::render(field, ctx))),
        RawMember::Property(property) => {
            PropertyDescriptor::render(property, ctx).map(MemberDescriptor::Property)
        }
        RawMember::Event(event) => EventDescriptor::render(event, ctx).map(MemberDescriptor::Event),
        RawMember::Method(method) => {
            MethodDescriptor::render(method, ctx, true).map(MemberDescriptor::Method)
        }
    }
}

/// The accessor that dominates a pair of accessor methods: the higher one, the first on a tie
fn dominant<'m>(
    first: Option<&'m MethodDescriptor>,
    second: Option<&'m MethodDescriptor>,
) -> Option<&'m MethodDescriptor> {
    match (first, second) {
        (Some(first), Some(second)) if second.info.accessor > first.info.accessor => Some(second),
        (Some(first), _) => Some(first),
        (None, second) => second,
    }
}
