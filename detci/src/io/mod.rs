//! Input/Output operations for CI calculations
//!
//! This module handles logging setup, integral loading, and the determinant dump.

mod dump;
mod integral_loader;
mod output;
mod tests;

pub use dump::write_determinant_dump;
pub use integral_loader::load_integrals;
pub use output::setup_output;
