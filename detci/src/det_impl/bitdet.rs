//! Occupation bit patterns for one (particle type, spin channel).

use std::fmt;
use std::iter::FusedIterator;

use color_eyre::eyre::{bail, ensure, Result};

/// Width of one storage block in bits.
pub const BLOCK_BITS: usize = u64::BITS as usize;

/// Number of blocks needed to hold `n_orbitals` bits.
pub const fn blocks_for(n_orbitals: usize) -> usize {
    n_orbitals.div_ceil(BLOCK_BITS)
}

/// A determinant of one channel: bit `k` of the pattern is set iff orbital `k` is occupied.
///
/// Orbital `k` lives in block `k / 64`, bit `k % 64`. Two determinants are only comparable
/// when they have the same number of blocks, which holds for everything built over the same
/// orbital count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitDeterminant {
    blocks: Vec<u64>,
}

impl BitDeterminant {
    /// All orbitals vacant.
    pub fn empty(n_orbitals: usize) -> Self {
        Self {
            blocks: vec![0; blocks_for(n_orbitals)],
        }
    }

    pub fn from_occupations(occupied: &[usize], n_orbitals: usize) -> Result<Self> {
        let mut det = Self::empty(n_orbitals);
        for &orbital in occupied {
            ensure!(
                orbital < n_orbitals,
                "occupied orbital {} is out of range for {} orbitals",
                orbital,
                n_orbitals
            );
            if det.is_occupied(orbital) {
                bail!("orbital {} is listed as occupied more than once", orbital);
            }
            det.set(orbital);
        }
        Ok(det)
    }

    pub fn blocks(&self) -> &[u64] {
        &self.blocks
    }

    #[inline]
    pub fn is_occupied(&self, orbital: usize) -> bool {
        (self.blocks[orbital / BLOCK_BITS] >> (orbital % BLOCK_BITS)) & 1 == 1
    }

    /// Number of occupied orbitals.
    pub fn count(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn set(&mut self, orbital: usize) {
        self.blocks[orbital / BLOCK_BITS] |= 1 << (orbital % BLOCK_BITS);
    }

    fn clear(&mut self, orbital: usize) {
        self.blocks[orbital / BLOCK_BITS] &= !(1 << (orbital % BLOCK_BITS));
    }

    /// Half the number of orbitals whose occupation differs.
    #[inline]
    pub fn excitation_degree(&self, other: &Self) -> usize {
        assert_eq!(
            self.blocks.len(),
            other.blocks.len(),
            "determinants over different orbital counts"
        );
        let differing: u32 = self
            .blocks
            .iter()
            .zip(&other.blocks)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        differing as usize / 2
    }

    /// Occupied orbitals, ascending.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + Clone + '_ {
        set_bits(self.blocks.iter().copied())
    }

    /// Occupied and virtual orbitals below `n_orbitals`, both ascending.
    pub fn occupied_and_virtual(&self, n_orbitals: usize) -> (Vec<usize>, Vec<usize>) {
        (0..n_orbitals).partition(|&orbital| self.is_occupied(orbital))
    }

    /// Orbitals occupied in `self` but not in `other`, ascending.
    pub fn holes<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = usize> + Clone + 'a {
        set_bits(self.blocks.iter().zip(&other.blocks).map(|(a, b)| (a ^ b) & a))
    }

    /// Orbitals occupied in `other` but not in `self`, ascending.
    pub fn particles<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = usize> + Clone + 'a {
        set_bits(self.blocks.iter().zip(&other.blocks).map(|(a, b)| (a ^ b) & b))
    }

    /// Moves the occupations at `holes` onto `particles`.
    pub fn excite(&self, holes: &[usize], particles: &[usize]) -> Self {
        assert_eq!(holes.len(), particles.len());
        let mut det = self.clone();
        for &h in holes {
            assert!(det.is_occupied(h), "hole {h} is not occupied");
            det.clear(h);
        }
        for &p in particles {
            assert!(!det.is_occupied(p), "particle {p} is already occupied");
            det.set(p);
        }
        det
    }

    /// One 64-character string per block, highest orbital first.
    pub fn to_bit_string(&self) -> String {
        self.blocks
            .iter()
            .map(|b| format!("{b:064b}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for BitDeterminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Yields the set bits of one block as orbital indices.
#[derive(Debug, Clone)]
struct SetBits {
    word: u64,
    base: usize,
}

impl Iterator for SetBits {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let bit = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(self.base + bit)
    }
}

impl FusedIterator for SetBits {}

fn set_bits<I>(words: I) -> impl Iterator<Item = usize> + Clone
where
    I: Iterator<Item = u64> + Clone,
{
    words.enumerate().flat_map(|(block, word)| SetBits {
        word,
        base: block * BLOCK_BITS,
    })
}
