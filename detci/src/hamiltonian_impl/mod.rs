//! Hamiltonian matrix elements and the matrix-free operator
//!
//! [`SlaterCondon`] evaluates single elements `H_ij` between composite determinants from
//! precomputed integrals. [`HamiltonianOperator`] wraps it as a [`LinearOperator`] computing
//! `y = H x` on demand, so an external iterative eigensolver never needs the full matrix.
//!
//! # Usage
//!
//! ```rust,ignore
//! let evaluator = SlaterCondon::new(&space, &integrals)?;
//! let hamiltonian = HamiltonianOperator::new(evaluator);
//! let y = hamiltonian.apply(&x);
//! ```

mod operator;
mod slater_condon;

pub use operator::{HamiltonianOperator, LinearOperator};
pub use slater_condon::SlaterCondon;
