//! Mixed-radix addressing of the Cartesian product of channel sets.

use color_eyre::eyre::{ensure, eyre, Result};

/// One digit of the composite index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Radix {
    pub particle: usize,
    pub spin: usize,
    pub size: usize,
    pub stride: usize,
}

/// Bijection between a flat determinant index in `0..n_dets` and the local index of every
/// (particle type, spin channel) set.
///
/// Digits are ordered particle-major, spin-minor. The first particle's first channel is the
/// most significant digit and the last particle's last channel has stride 1, so
///
/// ```text
/// index = sum over (p, s) of local[p][s] * stride[p][s]
/// stride[p][s] = product of the sizes of every channel after (p, s)
/// ```
///
/// [`CompositeIndexer::fold`] and [`CompositeIndexer::unfold`] read the same table.
#[derive(Debug, Clone)]
pub struct CompositeIndexer {
    radices: Vec<Radix>,
    offsets: Vec<usize>,
    n_dets: usize,
}

impl CompositeIndexer {
    /// `sizes[p][s]` is the number of determinants of particle `p`, spin channel `s`.
    pub fn new(sizes: &[Vec<usize>]) -> Result<Self> {
        ensure!(!sizes.is_empty(), "no particle types in the determinant space");

        let mut radices = Vec::new();
        let mut offsets = vec![0];
        for (particle, spins) in sizes.iter().enumerate() {
            ensure!(!spins.is_empty(), "particle type {} has no spin channels", particle);
            for (spin, &size) in spins.iter().enumerate() {
                ensure!(
                    size > 0,
                    "particle type {} spin {} has no determinants",
                    particle,
                    spin
                );
                radices.push(Radix {
                    particle,
                    spin,
                    size,
                    stride: 0,
                });
            }
            offsets.push(radices.len());
        }

        let mut stride = 1usize;
        for radix in radices.iter_mut().rev() {
            radix.stride = stride;
            stride = stride
                .checked_mul(radix.size)
                .ok_or_else(|| eyre!("number of determinants overflows the index type"))?;
        }

        Ok(Self {
            radices,
            offsets,
            n_dets: stride,
        })
    }

    pub fn n_dets(&self) -> usize {
        self.n_dets
    }

    pub fn radices(&self) -> &[Radix] {
        &self.radices
    }

    /// Total number of (particle, spin) channels.
    pub fn n_channels(&self) -> usize {
        self.radices.len()
    }

    /// Positions of particle `p`'s channels within a flat digit list.
    #[inline]
    pub fn channels_of(&self, particle: usize) -> std::ops::Range<usize> {
        self.offsets[particle]..self.offsets[particle + 1]
    }

    /// Local indices of all channels in digit order, least significant last.
    pub fn unfold_flat(&self, index: usize, digits: &mut [usize]) {
        assert!(
            index < self.n_dets,
            "determinant index {} out of range 0..{}",
            index,
            self.n_dets
        );
        assert_eq!(digits.len(), self.radices.len());

        let mut rest = index;
        for (digit, radix) in digits.iter_mut().zip(&self.radices).rev() {
            *digit = rest % radix.size;
            rest /= radix.size;
        }
        debug_assert_eq!(rest, 0);
    }

    pub fn fold_flat(&self, digits: &[usize]) -> usize {
        assert_eq!(digits.len(), self.radices.len());
        digits
            .iter()
            .zip(&self.radices)
            .map(|(&digit, radix)| {
                assert!(
                    digit < radix.size,
                    "local index {} out of range for particle {} spin {} of size {}",
                    digit,
                    radix.particle,
                    radix.spin,
                    radix.size
                );
                digit * radix.stride
            })
            .sum()
    }

    /// `unfold(index)[p][s]` is the local index of particle `p`, spin `s`.
    pub fn unfold(&self, index: usize) -> Vec<Vec<usize>> {
        let mut digits = vec![0; self.radices.len()];
        self.unfold_flat(index, &mut digits);
        (0..self.offsets.len() - 1)
            .map(|particle| digits[self.channels_of(particle)].to_vec())
            .collect()
    }

    pub fn fold(&self, unfolded: &[Vec<usize>]) -> usize {
        assert_eq!(
            unfolded.len(),
            self.offsets.len() - 1,
            "unfolded index has the wrong number of particle types"
        );
        let digits: Vec<usize> = unfolded
            .iter()
            .enumerate()
            .flat_map(|(particle, spins)| {
                assert_eq!(
                    spins.len(),
                    self.channels_of(particle).len(),
                    "wrong number of spin channels for particle type {}",
                    particle
                );
                spins.iter().copied()
            })
            .collect();
        self.fold_flat(&digits)
    }
}
