//! One- and two-body integrals in an orthonormal orbital basis, grouped by
//! (particle type, spin channel).

pub mod file;
pub mod index;
pub mod provider;
mod tests;

pub use file::{load, IntegralFile};
pub use provider::{Channel, IntegralProvider, MoIntegrals};
