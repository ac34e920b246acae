//! Type listing.
//!
//! [`list_types`] enumerates the types of every assembly a provider knows about, for callers
//! that need to discover what can be passed to [`crate::build_inventory`].

use std::collections::BTreeMap;

use crate::{config::TraversalConfig, metadata::MetadataProvider};

/// Types per assembly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeList {
    /// Assembly name to sorted full type names
    pub types: BTreeMap<String, Vec<String>>,
}

impl TypeList {
    /// The listed types of one assembly
    ///
    /// ## Arguments
    /// * 'assembly' - The assembly name
    #[must_use]
    pub fn types_of(&self, assembly: &str) -> &[String] {
        self.types.get(assembly).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of listed types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.values().map(Vec::len).sum()
    }

    /// Returns true if no type is listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List the types of every assembly
///
/// Compiler-generated types (full names containing both `<` and `>`) are skipped, which
/// includes every type nested inside a compiler-generated one. When the
/// configuration hides non-public types, so are non-public types and types nested inside a
/// non-public type.
///
/// ## Arguments
/// * 'provider' - The metadata provider
/// * 'config'   - The traversal configuration
pub fn list_types(provider: &dyn MetadataProvider, config: &TraversalConfig) -> TypeList {
    let mut list = TypeList::default();

    for assembly in provider.assemblies() {
        let mut names: Vec<String> = provider
            .types_in(&assembly)
            .iter()
            .filter(|ty| !config.hides_non_public_types() || provider.is_public(&ty.sig()))
            .map(|ty| ty.full_name())
            .filter(|name| !(name.contains('<') && name.contains('>')))
            .collect();
        names.sort();

        log::debug!("listed {} types of {}", names.len(), assembly);
        list.types.insert(assembly, names);
    }

    list
}
