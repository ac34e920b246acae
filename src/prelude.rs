//! # declscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits of
//! declscope. Import it to get quick access to the queries, their results and the builders
//! needed to populate an in-memory metadata store.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all declscope operations
pub use crate::Error;

/// The result type used throughout declscope
pub use crate::Result;

/// Configuration of inventory queries
pub use crate::TraversalConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Inventory of one type and the listing of all types
pub use crate::inventory::{build_inventory, list_types, ObjectKind, TypeInventory, TypeList};

// ================================================================================================
// Declarations
// ================================================================================================

/// Rendered members and their shared parts
pub use crate::declarations::{
    Accessor, AttributeDescriptor, EventDescriptor, FieldDescriptor, GenericParamDescriptor,
    MemberDescriptor, MethodDescriptor, ParameterDescriptor, ParameterModifier,
    PropertyDescriptor, TypeDescriptor, Variance,
};

/// Generic substitution
pub use crate::generics::Substitution;

// ================================================================================================
// Metadata
// ================================================================================================

/// The provider seam and the in-memory store
pub use crate::metadata::{MemberKind, MetadataProvider, MetadataStore};

/// Type expressions and tokens
pub use crate::metadata::{TypeName, TypeSig, Token};

/// Builders for raw metadata
pub use crate::metadata::{
    AssemblyBuilder, ConstantValue, CustomAttributeBuilder, EventDefBuilder, FieldDefBuilder,
    GenericParamDefBuilder, MethodAccessFlags, MethodDefBuilder, ParamDefBuilder,
    PropertyDefBuilder, TypeDefBuilder,
};
