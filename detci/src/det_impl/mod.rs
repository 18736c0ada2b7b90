//! Bit-string determinants
//!
//! A determinant of one (particle type, spin channel) is a pattern of occupied orbitals packed
//! into 64-bit blocks. This module provides the set algebra the Slater-Condon rules need:
//! excitation degree, hole and particle extraction, and the fermionic phase of an excitation.

mod bitdet;
mod phase;

pub use bitdet::{blocks_for, BitDeterminant, BLOCK_BITS};
pub use phase::{count_between, crossing_correction, phase};
