//! The inheritance walk.
//!
//! [`InheritanceWalk`] yields one [`Level`] per type in a base-type chain, starting at the
//! requested type. It is a small state machine:
//!
//! ```text
//! AtDerivedLevel --(base exists)--> AtBaseLevel --(base exists)--> AtBaseLevel ...
//!        |                               |
//!        +----------(no base)------------+--------> Done
//! ```
//!
//! Each level carries the [`Substitution`] that maps its formal generic parameters to the
//! arguments supplied by the levels below it, and the descriptor of the type as referenced from
//! below (`BaseMember<int>` rather than `BaseMember<T>`).
//!
//! The walk stops at the first base type the provider cannot resolve (usually a framework type
//! such as `System.Object`), at a type already visited, and at the configured depth limit.

use std::collections::HashSet;

use crate::{
    config::TraversalConfig,
    declarations::TypeDescriptor,
    generics::Substitution,
    metadata::{MetadataProvider, Token, TypeDefRc},
    Error,
};

/// Position of the walk in the base-type chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum WalkState {
    /// The requested type has not been visited yet
    AtDerivedLevel,
    /// At least one level has been yielded and a base remains
    AtBaseLevel,
    /// The chain is exhausted
    Done,
}

/// One type of the base-type chain
#[derive(Debug, Clone)]
pub struct Level {
    /// The type definition
    pub def: TypeDefRc,
    /// The type as referenced from the level below, with arguments substituted
    pub descriptor: TypeDescriptor,
    /// Formal-to-argument map of this level
    pub substitution: Substitution,
    /// 0 for the requested type, 1 for its base, ...
    pub depth: usize,
}

impl Level {
    /// Returns true for the requested (most-derived) type
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.depth == 0
    }
}

/// Iterator over the levels of a base-type chain
pub struct InheritanceWalk<'a> {
    provider: &'a dyn MetadataProvider,
    config: TraversalConfig,
    state: WalkState,
    pending: Option<Level>,
    visited: HashSet<Token>,
}

impl<'a> InheritanceWalk<'a> {
    /// Start a walk at `start`
    ///
    /// ## Arguments
    /// * 'provider' - The metadata provider
    /// * 'start'    - The requested type
    /// * 'config'   - The traversal configuration (for the depth limit)
    pub fn new(
        provider: &'a dyn MetadataProvider,
        start: TypeDefRc,
        config: TraversalConfig,
    ) -> Self {
        let descriptor = TypeDescriptor::from_def(&start, provider);
        InheritanceWalk {
            provider,
            config,
            state: WalkState::AtDerivedLevel,
            pending: Some(Level {
                def: start,
                descriptor,
                substitution: Substitution::identity(),
                depth: 0,
            }),
            visited: HashSet::new(),
        }
    }

    /// The current state
    #[must_use]
    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Compute the level above `level`, if any
    fn base_of(&mut self, level: &Level) -> Option<Level> {
        let reference = self.provider.base_type(&level.def)?;

        let depth = level.depth + 1;
        if depth > self.config.max_inheritance_depth {
            log::warn!(
                "{} while walking the bases of {}",
                Error::RecursionLimit(self.config.max_inheritance_depth),
                level.descriptor.full_display_name
            );
            return None;
        }

        let Some(def) = self.provider.resolve(&reference) else {
            log::debug!(
                "base {} of {} is not resolvable, stopping",
                reference,
                level.descriptor.full_display_name
            );
            return None;
        };

        if !self.visited.insert(def.token) {
            log::warn!("inheritance cycle through {}, stopping", def.full_name());
            return None;
        }

        let formal = self.provider.generic_parameters(&def);
        let substitution = level.substitution.advance(&formal, &reference);
        let seen_as = level
            .substitution
            .apply(&reference)
            .unwrap_or(reference);

        log::debug!(
            "walking from {} to {}",
            level.descriptor.full_display_name,
            seen_as
        );

        Some(Level {
            def,
            descriptor: TypeDescriptor::from_sig(&seen_as),
            substitution,
            depth,
        })
    }
}

impl Iterator for InheritanceWalk<'_> {
    type Item = Level;

    fn next(&mut self) -> Option<Level> {
        if self.state == WalkState::Done {
            return None;
        }

        let level = self.pending.take()?;
        if level.is_derived() {
            self.visited.insert(level.def.token);
        }

        self.pending = self.base_of(&level);
        self.state = if self.pending.is_some() {
            WalkState::AtBaseLevel
        } else {
            WalkState::Done
        };
        Some(level)
    }
}
