//! Fermionic sign of an excitation.

use super::bitdet::{BitDeterminant, BLOCK_BITS};

#[inline(always)]
fn low_mask(bits: usize) -> u64 {
    if bits >= BLOCK_BITS {
        !0
    } else {
        (1 << bits) - 1
    }
}

/// Occupied orbitals of `det` strictly between `a` and `b`.
pub fn count_between(det: &BitDeterminant, a: usize, b: usize) -> u32 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    if hi - lo < 2 {
        return 0;
    }
    let (first, last) = ((lo + 1) / BLOCK_BITS, (hi - 1) / BLOCK_BITS);
    (first..=last)
        .map(|block| {
            let base = block * BLOCK_BITS;
            let mask = low_mask(hi - base) & !low_mask((lo + 1).saturating_sub(base));
            (det.blocks()[block] & mask).count_ones()
        })
        .sum()
}

#[inline(always)]
fn strictly_inside(x: usize, a: usize, b: usize) -> bool {
    a.min(b) < x && x < a.max(b)
}

/// Extra transpositions from applying the pairs one after another: once pair `a` has been
/// applied, `h_a` is vacant and `p_a` is occupied while pair `b > a` is moved.
pub fn crossing_correction(holes: &[usize], particles: &[usize]) -> u32 {
    let mut count = 0;
    for b in 1..holes.len() {
        let (h, p) = (holes[b], particles[b]);
        for a in 0..b {
            count += strictly_inside(holes[a], h, p) as u32;
            count += strictly_inside(particles[a], h, p) as u32;
        }
    }
    count
}

/// Sign of the permutation taking the occupied orbitals of `det` onto those of the
/// determinant reached by moving `holes[k]` to `particles[k]` for every `k`.
///
/// Both lists are expected in ascending order, as produced by
/// [`BitDeterminant::holes`] and [`BitDeterminant::particles`].
pub fn phase(det: &BitDeterminant, holes: &[usize], particles: &[usize]) -> f64 {
    assert_eq!(
        holes.len(),
        particles.len(),
        "excitation with {} holes and {} particles",
        holes.len(),
        particles.len()
    );

    let between: u32 = holes
        .iter()
        .zip(particles)
        .map(|(&h, &p)| count_between(det, h, p))
        .sum();

    if (between + crossing_correction(holes, particles)) % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}
