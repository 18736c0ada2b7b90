//! Determinant spaces
//!
//! Per (particle type, spin channel) sets of unique determinants, the excitation generator
//! that fills them from a reference, and the composite indexer that enumerates their
//! Cartesian product.

mod indexer;
mod space;

pub use indexer::{CompositeIndexer, Radix};
pub use space::{generate_excitations, DeterminantSpace, DeterminantSpaceBuilder};
