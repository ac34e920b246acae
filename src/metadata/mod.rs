//! Raw .NET metadata model and the provider seam.
//!
//! This module holds everything the declaration engine reads: the structured type expressions
//! ([`TypeSig`]), the raw entities of the ECMA-335 tables ([`model`]), the [`MetadataProvider`]
//! trait through which they are queried, and an in-memory implementation ([`MetadataStore`])
//! with fluent builders to populate it.
//!
//! # Key Components
//!
//! - [`token`] - Metadata table row references
//! - [`flags`] - Attribute flag words of types, fields, methods, parameters and generic parameters
//! - [`signature`] - Structured type expressions
//! - [`model`] - Raw type, field, method, property, event and attribute definitions
//! - [`provider`] - The [`MetadataProvider`] trait
//! - [`store`] - The in-memory [`MetadataStore`]
//! - [`builder`] - Fluent builders for raw metadata
//!
//! # Examples
//!
//! ```rust
//! use declscope::metadata::{AssemblyBuilder, MetadataProvider, MetadataStore, TypeDefBuilder, TypeSig};
//!
//! let store = MetadataStore::new().with_assembly(
//!     AssemblyBuilder::new("SchoolSys")
//!         .add_type(
//!             TypeDefBuilder::class("SchoolSys", "StaffMember")
//!                 .public()
//!                 .extends(TypeSig::path("SchoolSys.BaseMember")),
//!         )
//!         .build(),
//! );
//!
//! let staff = store.find_type("SchoolSys.StaffMember").unwrap();
//! assert_eq!(store.base_type(&staff).unwrap().full_name(), "SchoolSys.BaseMember");
//! ```

/// Fluent builders for raw metadata
pub mod builder;
/// ECMA-335 attribute flag words
pub mod flags;
/// Raw metadata entities
pub mod model;
/// The metadata provider trait
pub mod provider;
/// Structured type expressions
pub mod signature;
/// In-memory metadata provider
pub mod store;
/// Commonly used metadata token type
pub mod token;

pub use builder::{
    AssemblyBuilder, CustomAttributeBuilder, EventDefBuilder, FieldDefBuilder,
    GenericParamDefBuilder, MethodDefBuilder, ParamDefBuilder, PropertyDefBuilder,
    TypeDefBuilder,
};
pub use flags::{MethodAccessFlags, MethodModifiers, MethodVtableFlags};
pub use model::{
    AttributeArgument, AttributeValue, ConstantValue, CustomAttribute, CustomAttributeRc,
    EventDef, EventRc, FieldDef, FieldRc, GenericParamDef, GenericParamRc, MethodDef,
    MethodDefRc, NamedArgument, ParamDef, ParamRc, PropertyDef, PropertyRc, TypeDef, TypeDefRc,
};
pub use provider::{AttributeTarget, MemberKind, MetadataProvider, RawMember};
pub use signature::{GenericOwner, TypeName, TypeSig};
pub use store::{Assembly, AssemblyRc, MetadataStore};
pub use token::Token;
