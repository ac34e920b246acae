//! In-memory metadata provider.
//!
//! [`MetadataStore`] keeps a set of [`Assembly`] instances, each holding its type definitions in
//! a lock-free `SkipMap` keyed by full metadata name. Lookups walk the assemblies in name order,
//! so a type defined in several assemblies resolves deterministically to the first one.
//!
//! # Examples
//!
//! ```rust
//! use declscope::metadata::{AssemblyBuilder, MetadataProvider, MetadataStore, TypeDefBuilder};
//!
//! let store = MetadataStore::new();
//! store.add(
//!     AssemblyBuilder::new("SchoolSys")
//!         .add_type(TypeDefBuilder::interface("SchoolSys", "IMember").public())
//!         .build(),
//! );
//!
//! assert!(store.find_type("SchoolSys.IMember").is_some());
//! assert_eq!(store.assemblies(), vec!["SchoolSys".to_string()]);
//! ```

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;

use crate::metadata::{
    model::TypeDefRc,
    provider::MetadataProvider,
    signature::TypeSig,
};

/// A reference-counted pointer to an `Assembly`
pub type AssemblyRc = Arc<Assembly>;

/// A named collection of type definitions
pub struct Assembly {
    /// The assembly name
    pub name: String,
    types: SkipMap<String, TypeDefRc>,
}

impl Assembly {
    /// Create an empty assembly
    ///
    /// ## Arguments
    /// * 'name' - The assembly name
    pub fn new(name: &str) -> Self {
        Assembly {
            name: name.to_string(),
            types: SkipMap::new(),
        }
    }

    /// Add a type definition, replacing any previous definition with the same full name
    ///
    /// ## Arguments
    /// * 'ty' - The type to add
    pub fn insert(&self, ty: TypeDefRc) {
        self.types.insert(ty.full_name(), ty);
    }

    /// Look up a type by its full metadata name
    ///
    /// ## Arguments
    /// * 'full_name' - e.g. ``SchoolSys.GuestMember`1``
    pub fn get(&self, full_name: &str) -> Option<TypeDefRc> {
        self.types.get(full_name).map(|entry| entry.value().clone())
    }

    /// Returns all types, ordered by full name
    #[must_use]
    pub fn types(&self) -> Vec<TypeDefRc> {
        self.types.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Returns the number of types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the assembly holds no types
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// In-memory [`MetadataProvider`] over a set of assemblies
pub struct MetadataStore {
    assemblies: SkipMap<String, AssemblyRc>,
}

impl MetadataStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        MetadataStore {
            assemblies: SkipMap::new(),
        }
    }

    /// Register an assembly, replacing any previous assembly with the same name
    ///
    /// ## Arguments
    /// * 'assembly' - The assembly to register
    pub fn add(&self, assembly: AssemblyRc) {
        self.assemblies.insert(assembly.name.clone(), assembly);
    }

    /// Builder-style variant of [`MetadataStore::add`]
    #[must_use]
    pub fn with_assembly(self, assembly: AssemblyRc) -> Self {
        self.add(assembly);
        self
    }

    /// Look up an assembly by name
    ///
    /// ## Arguments
    /// * 'name' - The assembly name
    pub fn assembly(&self, name: &str) -> Option<AssemblyRc> {
        self.assemblies.get(name).map(|entry| entry.value().clone())
    }

    fn lookup(&self, full_name: &str) -> Option<TypeDefRc> {
        self.assemblies
            .iter()
            .find_map(|entry| entry.value().get(full_name))
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProvider for MetadataStore {
    fn find_type(&self, path: &str) -> Option<TypeDefRc> {
        if let Some(found) = self.lookup(path) {
            return Some(found);
        }

        if path.contains('-') {
            let normalized = path.replace('-', "`");
            log::debug!("Retrying lookup of '{}' as '{}'", path, normalized);
            return self.lookup(&normalized);
        }

        None
    }

    fn resolve(&self, sig: &TypeSig) -> Option<TypeDefRc> {
        let name = sig.type_name()?;
        self.lookup(&name.full_name())
    }

    fn assemblies(&self) -> Vec<String> {
        self.assemblies
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    fn types_in(&self, assembly: &str) -> Vec<TypeDefRc> {
        self.assembly(assembly)
            .map(|assembly| assembly.types())
            .unwrap_or_default()
    }
}
