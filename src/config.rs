//! Traversal configuration for inventory building
//!
//! The only knob that changes what an inventory contains is the minimum visible accessor. It is
//! passed by value into every call that filters members, so concurrent inventory builds with
//! different thresholds never interfere.

use crate::declarations::Accessor;

/// Default limit on the number of base types walked above the requested type
pub const MAX_INHERITANCE_DEPTH: usize = 64;

/// Configuration for inventory building and type listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Members whose accessor ordinal is below this value are excluded
    pub min_accessor: Accessor,

    /// Maximum number of base-type levels visited above the requested type (default: 64)
    pub max_inheritance_depth: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self::include_all()
    }
}

impl TraversalConfig {
    /// Include every member regardless of visibility
    #[must_use]
    pub fn include_all() -> Self {
        Self {
            min_accessor: Accessor::None,
            max_inheritance_depth: MAX_INHERITANCE_DEPTH,
        }
    }

    /// Include public members only
    #[must_use]
    pub fn public_only() -> Self {
        Self::include_all().with_min_accessor(Accessor::Public)
    }

    /// Include protected and public members, the surface visible to a derived type elsewhere
    #[must_use]
    pub fn protected_and_public() -> Self {
        Self::include_all().with_min_accessor(Accessor::Protected)
    }

    /// Replace the minimum accessor
    ///
    /// ## Arguments
    /// * 'min_accessor' - The new threshold
    #[must_use]
    pub fn with_min_accessor(mut self, min_accessor: Accessor) -> Self {
        self.min_accessor = min_accessor;
        self
    }

    /// Replace the inheritance depth limit
    ///
    /// ## Arguments
    /// * 'depth' - Maximum number of base levels to visit
    #[must_use]
    pub fn with_max_inheritance_depth(mut self, depth: usize) -> Self {
        self.max_inheritance_depth = depth;
        self
    }

    /// Returns true if a member with `accessor` passes the threshold
    ///
    /// ## Arguments
    /// * 'accessor' - The member's accessor
    #[must_use]
    pub fn admits(&self, accessor: Accessor) -> bool {
        accessor >= self.min_accessor
    }

    /// Returns true if non-public types (and interfaces) are hidden from the output
    #[must_use]
    pub fn hides_non_public_types(&self) -> bool {
        self.min_accessor > Accessor::Private
    }
}
