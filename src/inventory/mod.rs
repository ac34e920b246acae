//! Type inventories.
//!
//! An inventory is the visible surface of one type: its own declaration plus every member it
//! declares or inherits, split into partitions (instance and static fields, properties, events
//! and methods, constructors, operators) and sorted by name.
//!
//! # Key Components
//!
//! - [`walker`] - the base-type chain as a state machine of [`walker::Level`]s
//! - [`members`] - per-partition member collection with visibility filtering and de-duplication
//! - [`assembler`] - [`build_inventory`] and the type declaration
//! - [`listing`] - [`list_types`], the types of every assembly
//!
//! # Examples
//!
//! ```rust
//! use declscope::inventory::build_inventory;
//! use declscope::metadata::{AssemblyBuilder, MetadataStore, MethodDefBuilder, TypeDefBuilder};
//! use declscope::TraversalConfig;
//!
//! let store = MetadataStore::new().with_assembly(
//!     AssemblyBuilder::new("Demo")
//!         .add_type(
//!             TypeDefBuilder::class("Demo", "Greeter")
//!                 .public()
//!                 .method(MethodDefBuilder::new("Greet").public()),
//!         )
//!         .build(),
//! );
//!
//! let inventory = build_inventory(&store, "Demo.Greeter", &TraversalConfig::public_only())?;
//! assert_eq!(inventory.declaration, "public class Greeter");
//! assert_eq!(inventory.methods[0].declaration, "public void Greet()");
//! # Ok::<(), declscope::Error>(())
//! ```

pub mod assembler;
pub mod listing;
pub mod members;
pub mod walker;

pub use assembler::{assemble, build_inventory, ObjectKind, TypeInventory};
pub use listing::{list_types, TypeList};
pub use members::{collect_members, MemberQuery, MemberRole};
pub use walker::{InheritanceWalk, Level, WalkState};
