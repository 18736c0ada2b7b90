//! Packed indices for symmetric two-body integral storage.
//!
//! A real two-electron integral in chemists' notation `(ij|kl)` is invariant under
//!
//! (ij|kl) = (ji|kl) = (ij|lk) = (ji|lk) = (kl|ij) = (lk|ij) = (kl|ji) = (lk|ji)
//!
//! when all four orbitals come from the same orbital set. Between two different orbital
//! sets only the in-pair swaps survive, so those blocks use a 4-fold key instead.

/// Triangular index of the unordered pair `{i, j}`.
#[inline(always)]
pub const fn idx2(i: usize, j: usize) -> usize {
    let (low, high) = if i < j { (i, j) } else { (j, i) };
    high * (high + 1) / 2 + low
}

/// Number of unordered pairs over `n` orbitals.
#[inline(always)]
pub const fn pair_count(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Key collapsing the full 8-fold permutational symmetry of `(ij|kl)`.
#[inline(always)]
pub const fn idx8(i: usize, j: usize, k: usize, l: usize) -> usize {
    idx2(idx2(i, j), idx2(k, l))
}

/// Key collapsing only the in-pair symmetries of `(ij|kl)`, where `k, l` range over an
/// orbital set with `n_pairs_b` unordered pairs.
#[inline(always)]
pub const fn idx4(i: usize, j: usize, k: usize, l: usize, n_pairs_b: usize) -> usize {
    idx2(i, j) * n_pairs_b + idx2(k, l)
}

/// Number of distinct `idx8` keys over `n` orbitals.
pub const fn idx8_len(n: usize) -> usize {
    pair_count(pair_count(n))
}
