//! Shared fixtures for unit tests.
//!
//! The [`factories`] build small in-memory assemblies modelled on a school management system
//! and a generic data structure library. Integration tests build the same shapes through the
//! public builders in `tests/common`.

pub mod factories;
