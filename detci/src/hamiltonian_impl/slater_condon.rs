//! Hamiltonian matrix elements between composite determinants
//!
//! For one particle type with spin channels `s, t`, occupied sets `occ_s` of `D_i`, one-body
//! integrals `h` and two-body integrals `(pq|rs)_st` in chemists' notation:
//!
//! ```text
//! degree 0:  sum_s sum_{i in occ_s} h_ii
//!            + 1/2 sum_s sum_{i,j in occ_s} [(ii|jj)_ss - (ij|ji)_ss]
//!            + sum_{s<t} sum_{i in occ_s, j in occ_t} (ii|jj)_st
//! degree 1:  phase * [h_ph + sum_{k in occ_s} ((ph|kk)_ss - (pk|kh)_ss)
//!                          + sum_{t != s} sum_{k in occ_t} (ph|kk)_st]
//! degree 2:  same channel      phase * [(p0h0|p1h1)_ss - (p0h1|p1h0)_ss]
//!            channels s != t   phase_s * phase_t * (p_s h_s|p_t h_t)_st
//! degree 3+: 0
//! ```
//!
//! Different particle types only couple through their diagonal: a particle type contributes
//! to `H_ij` only when every other particle type has identical local indices in `i` and `j`.
//! Genuine inter-particle two-body terms are not evaluated.

use color_eyre::eyre::{ensure, eyre, Result};
use integrals::{Channel, IntegralProvider};

use crate::det_impl::{phase, BitDeterminant};
use crate::space_impl::DeterminantSpace;

/// Evaluates `H_ij` for composite determinant indices of one space.
pub struct SlaterCondon<'a, I: IntegralProvider> {
    space: &'a DeterminantSpace,
    integrals: &'a I,
}

impl<'a, I: IntegralProvider> SlaterCondon<'a, I> {
    /// Checks that `integrals` describe every channel of `space` with matching orbital counts.
    pub fn new(space: &'a DeterminantSpace, integrals: &'a I) -> Result<Self> {
        for particle in 0..space.n_particles() {
            for spin in 0..space.n_spins(particle) {
                let channel = Channel::new(particle, spin);
                let n_orbitals = integrals
                    .n_orbitals(channel)
                    .ok_or_else(|| eyre!("no integrals for channel {}", channel))?;
                ensure!(
                    n_orbitals == space.n_orbitals(particle),
                    "integrals for channel {} cover {} orbitals, determinants use {}",
                    channel,
                    n_orbitals,
                    space.n_orbitals(particle)
                );
            }
        }
        Ok(Self { space, integrals })
    }

    pub fn space(&self) -> &'a DeterminantSpace {
        self.space
    }

    /// `H_ij` for flat determinant indices.
    pub fn element(&self, i: usize, j: usize) -> f64 {
        let indexer = self.space.indexer();
        let mut digits_i = vec![0; indexer.n_channels()];
        let mut digits_j = vec![0; indexer.n_channels()];
        indexer.unfold_flat(i, &mut digits_i);
        indexer.unfold_flat(j, &mut digits_j);
        self.element_unfolded(&digits_i, &digits_j)
    }

    /// `H_ij` for determinants already unfolded into per-channel local indices.
    pub fn element_unfolded(&self, digits_i: &[usize], digits_j: &[usize]) -> f64 {
        let indexer = self.space.indexer();
        let mut total = 0.0;
        for particle in 0..self.space.n_particles() {
            let range = indexer.channels_of(particle);
            let spectators_equal = digits_i[..range.start] == digits_j[..range.start]
                && digits_i[range.end..] == digits_j[range.end..];
            if spectators_equal {
                total += self.particle_element(particle, &digits_i[range.clone()], &digits_j[range]);
            }
        }
        total
    }

    fn particle_element(&self, particle: usize, locals_i: &[usize], locals_j: &[usize]) -> f64 {
        let det_i = |spin: usize| self.space.get(particle, spin, locals_i[spin]);
        let det_j = |spin: usize| self.space.get(particle, spin, locals_j[spin]);

        let n_spins = locals_i.len();
        let mut degree = 0;
        let mut excited = [usize::MAX; 2];
        for spin in 0..n_spins {
            let d = det_i(spin).excitation_degree(det_j(spin));
            if d > 0 {
                if degree < 2 {
                    excited[degree] = spin;
                }
                degree += d;
                if degree > 2 {
                    return 0.0;
                }
            }
        }

        match degree {
            0 => self.diagonal(particle, &det_i),
            1 => {
                let s = excited[0];
                self.single(particle, s, det_i(s), det_j(s), &det_i)
            }
            2 if excited[1] == usize::MAX => {
                let s = excited[0];
                self.same_spin_double(Channel::new(particle, s), det_i(s), det_j(s))
            }
            2 => {
                let (s, t) = (excited[0], excited[1]);
                self.opposite_spin_double(
                    (Channel::new(particle, s), det_i(s), det_j(s)),
                    (Channel::new(particle, t), det_i(t), det_j(t)),
                )
            }
            _ => 0.0,
        }
    }

    fn diagonal<'d>(&self, particle: usize, det: &impl Fn(usize) -> &'d BitDeterminant) -> f64 {
        let ints = self.integrals;
        let n_spins = self.space.n_spins(particle);
        let mut energy = 0.0;

        for s in 0..n_spins {
            let cs = Channel::new(particle, s);
            let occ_s = det(s).occupied();
            for i in occ_s.clone() {
                energy += ints.one_body(cs, i, i);
                for j in occ_s.clone() {
                    energy +=
                        0.5 * (ints.eri(cs, cs, (i, i, j, j)) - ints.eri(cs, cs, (i, j, j, i)));
                }
            }

            for t in s + 1..n_spins {
                let ct = Channel::new(particle, t);
                for i in occ_s.clone() {
                    for j in det(t).occupied() {
                        energy += ints.eri(cs, ct, (i, i, j, j));
                    }
                }
            }
        }
        energy
    }

    fn single<'d>(
        &self,
        particle: usize,
        s: usize,
        det_i: &BitDeterminant,
        det_j: &BitDeterminant,
        spectators: &impl Fn(usize) -> &'d BitDeterminant,
    ) -> f64 {
        let ints = self.integrals;
        let cs = Channel::new(particle, s);
        let ([h], [p]) = excitation::<1>(det_i, det_j);

        let mut element = ints.one_body(cs, p, h);
        for k in det_i.occupied() {
            element += ints.eri(cs, cs, (p, h, k, k)) - ints.eri(cs, cs, (p, k, k, h));
        }
        for t in (0..self.space.n_spins(particle)).filter(|&t| t != s) {
            let ct = Channel::new(particle, t);
            for k in spectators(t).occupied() {
                element += ints.eri(cs, ct, (p, h, k, k));
            }
        }

        phase(det_i, &[h], &[p]) * element
    }

    fn same_spin_double(&self, cs: Channel, det_i: &BitDeterminant, det_j: &BitDeterminant) -> f64 {
        let ints = self.integrals;
        let (holes, particles) = excitation::<2>(det_i, det_j);
        let ([h0, h1], [p0, p1]) = (holes, particles);

        let element = ints.eri(cs, cs, (p0, h0, p1, h1)) - ints.eri(cs, cs, (p0, h1, p1, h0));
        phase(det_i, &holes, &particles) * element
    }

    fn opposite_spin_double(
        &self,
        (cs, det_is, det_js): (Channel, &BitDeterminant, &BitDeterminant),
        (ct, det_it, det_jt): (Channel, &BitDeterminant, &BitDeterminant),
    ) -> f64 {
        let ([hs], [ps]) = excitation::<1>(det_is, det_js);
        let ([ht], [pt]) = excitation::<1>(det_it, det_jt);

        let sign = phase(det_is, &[hs], &[ps]) * phase(det_it, &[ht], &[pt]);
        sign * self.integrals.eri(cs, ct, (ps, hs, pt, ht))
    }
}

/// Holes and particles of an excitation whose degree is already known to be `N`.
fn excitation<const N: usize>(
    det_i: &BitDeterminant,
    det_j: &BitDeterminant,
) -> ([usize; N], [usize; N]) {
    let mut holes = det_i.holes(det_j);
    let mut particles = det_i.particles(det_j);
    let mut pairs = ([0; N], [0; N]);
    for k in 0..N {
        match (holes.next(), particles.next()) {
            (Some(h), Some(p)) => {
                pairs.0[k] = h;
                pairs.1[k] = p;
            }
            _ => panic!(
                "expected {} holes and particles between {} and {}",
                N, det_i, det_j
            ),
        }
    }
    pairs
}
