//! Determinant configuration interaction over precomputed integrals.
//!
//! Determinants are bit strings per (particle type, spin channel). The CI space is the
//! Cartesian product of per-channel determinant sets, addressed by a mixed-radix composite
//! index. Hamiltonian elements follow the Slater-Condon rules, and the Hamiltonian is exposed
//! as a matrix-free linear operator for iterative eigensolvers.

pub mod app;
pub mod config;
pub mod det_impl;
pub mod hamiltonian_impl;
pub mod io;
pub mod space_impl;

pub use det_impl::{phase, BitDeterminant};
pub use hamiltonian_impl::{HamiltonianOperator, LinearOperator, SlaterCondon};
pub use space_impl::{generate_excitations, CompositeIndexer, DeterminantSpace, DeterminantSpaceBuilder};
