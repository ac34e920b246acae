//! Declaration rendering.
//!
//! Every entity the engine reports is turned into a descriptor: a structured record of its
//! names, types, accessor and modifiers, plus a canonical one-line declaration that reads like
//! source code.
//!
//! # Key Components
//!
//! | Module | Renders |
//! |--------|---------|
//! | [`typeinfo`] | type references and generic parameters |
//! | [`attribute`] | custom attribute usages (`[Obsolete("x")]`) |
//! | [`parameter`] | method and indexer parameters (`out int result`) |
//! | [`members`] | fields, properties, events, methods, constructors and operators |
//! | [`accessor`] | the visibility ordinal and modifier set shared by all of them |
//!
//! Descriptors are built fresh for every query and are only mutated through their own
//! `finish`/`retype` methods, which keep the declaration text consistent with the fields.

pub mod accessor;
pub mod attribute;
pub mod members;
pub mod parameter;
pub mod typeinfo;

pub use accessor::{Accessor, Modifiers};
pub use attribute::{
    render_attribute, render_attributes, AttributeArgumentDescriptor, AttributeDescriptor,
};
pub use members::{
    render_member, EventDescriptor, FieldDescriptor, MemberDescriptor, MemberInfo,
    MethodDescriptor, PropertyDescriptor, RenderContext,
};
pub use parameter::{parameter_list, ParameterDescriptor, ParameterModifier};
pub use typeinfo::{
    generic_list, where_clauses, GenericParamDescriptor, TypeDescriptor, Variance,
};
