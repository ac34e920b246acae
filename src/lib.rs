// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # declscope
//!
//! Source-level declarations synthesized from .NET metadata.
//!
//! Given the raw metadata of a set of assemblies, `declscope` answers one question: what does a
//! type look like to someone reading it as C#? For a requested type it walks the inheritance
//! chain, substitutes generic arguments into inherited members, drops what a derived type cannot
//! see or has overridden, and renders every remaining field, property, event, method,
//! constructor and operator as a declaration string.
//!
//! ## Features
//!
//! - **Name resolution** - arity markers, nested types and fully qualified generic arguments
//!   become `Dictionary<string, T>`, with keyword aliases for the built-in types
//! - **Member rendering** - fields, properties, indexers, events, methods, constructors,
//!   operators and conversions, with modifiers, attributes, parameter modifiers and defaults
//! - **Generic substitution** - inherited members of `Base<T>` are shown as members of
//!   `Base<int>` when seen from a `Derived : Base<int>`
//! - **Visibility thresholds** - [`TraversalConfig`] selects the surface to report, from
//!   everything down to `public` only
//! - **Pluggable metadata** - the engine reads through the [`metadata::MetadataProvider`]
//!   trait; [`metadata::MetadataStore`] is an in-memory implementation with fluent builders
//!
//! ## Quick Start
//!
//! ```rust
//! use declscope::prelude::*;
//!
//! let store = MetadataStore::new().with_assembly(
//!     AssemblyBuilder::new("SchoolSys")
//!         .add_type(
//!             TypeDefBuilder::class("SchoolSys", "BaseMember")
//!                 .public()
//!                 .abstract_()
//!                 .method(
//!                     MethodDefBuilder::new("Talk")
//!                         .public()
//!                         .param("message", TypeSig::string()),
//!                 ),
//!         )
//!         .add_type(
//!             TypeDefBuilder::class("SchoolSys", "StudentMember")
//!                 .public()
//!                 .sealed()
//!                 .extends(TypeSig::path("SchoolSys.BaseMember")),
//!         )
//!         .build(),
//! );
//!
//! let inventory = build_inventory(&store, "SchoolSys.StudentMember", &TraversalConfig::default())?;
//! assert_eq!(inventory.full_declaration, "public sealed class StudentMember : BaseMember");
//! assert_eq!(inventory.methods[0].declaration, "public void Talk(string message)");
//! assert_eq!(inventory.methods[0].info.declaring_type.display_name, "BaseMember");
//! # Ok::<(), declscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`names`] - Raw metadata names to display names
//! - [`declarations`] - Type descriptors, attributes, parameters and the member renderers
//! - [`generics`] - Rewriting inherited members with the arguments of a derived type
//! - [`inventory`] - The inheritance walk, member collection and the type inventory
//! - [`metadata`] - The raw metadata model and the provider seam
//! - [`config`] - Traversal configuration
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Only a missing type fails an inventory query;
//! members with an unexpected shape are logged through the `log` facade and skipped.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use declscope::prelude::*;
///
/// let store = MetadataStore::new();
/// let list = list_types(&store, &TraversalConfig::public_only());
/// assert!(list.is_empty());
/// ```
pub mod prelude;

/// Traversal configuration.
///
/// [`TraversalConfig`] carries the minimum accessor a member must have to be reported and the
/// limit on the inheritance depth.
pub mod config;

/// Declaration rendering: type descriptors, attributes, parameters and members.
pub mod declarations;

/// Generic argument substitution for inherited members.
pub mod generics;

/// Type inventories and type listings.
pub mod inventory;

/// Raw .NET metadata and the provider seam.
pub mod metadata;

/// Name resolution.
pub mod names;

/// `declscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use declscope::{metadata::MetadataStore, Result, TraversalConfig, TypeInventory};
///
/// fn inventory_of(store: &MetadataStore, path: &str) -> Result<TypeInventory> {
///     declscope::build_inventory(store, path, &TraversalConfig::default())
/// }
///
/// assert!(inventory_of(&MetadataStore::new(), "Dummy.Dummy4").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `declscope` Error type
///
/// The error type for all operations in this crate.
pub use error::Error;

/// Configuration of an inventory query
pub use config::TraversalConfig;

/// The top-level queries and their results.
///
/// # Example
///
/// ```rust
/// use declscope::{build_inventory, metadata::MetadataStore, TraversalConfig};
///
/// let store = MetadataStore::new();
/// assert!(build_inventory(&store, "SchoolSys.IMember", &TraversalConfig::default()).is_err());
/// ```
pub use inventory::{build_inventory, list_types, TypeInventory, TypeList};
