//! Metadata store factories.

mod datastructures;
mod schoolsys;

pub use datastructures::data_store;
pub use schoolsys::school_store;
