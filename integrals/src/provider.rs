use std::collections::BTreeMap;
use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::index::{idx4, idx8, idx8_len, pair_count};

/// A (particle type, spin channel) pair. Orbital indices are always local to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Channel {
    pub particle: usize,
    pub spin: usize,
}

impl Channel {
    pub const fn new(particle: usize, spin: usize) -> Self {
        Self { particle, spin }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(particle {}, spin {})", self.particle, self.spin)
    }
}

/// Source of precomputed one- and two-body integrals in an orthonormal orbital basis.
///
/// Two-body integrals are addressed in two steps: [`IntegralProvider::packed_index`] maps
/// `(ij|kl)` onto the key under which the provider stored it, and
/// [`IntegralProvider::two_body`] reads that key. Consumers must not compute keys themselves.
pub trait IntegralProvider: Send + Sync {
    /// Number of orbitals of `channel`, or `None` if the provider knows nothing about it.
    fn n_orbitals(&self, channel: Channel) -> Option<usize>;

    /// One-body integral `h_ij` of `channel`.
    fn one_body(&self, channel: Channel, i: usize, j: usize) -> f64;

    /// Packed key of `(ij|kl)` with `i, j` in channel `a` and `k, l` in channel `b`.
    fn packed_index(&self, a: Channel, b: Channel, index: (usize, usize, usize, usize)) -> usize;

    /// Two-body integral stored under `key` in block `(a, b)`.
    fn two_body(&self, a: Channel, b: Channel, key: usize) -> f64;

    /// `(ij|kl)` in block `(a, b)`.
    #[inline]
    fn eri(&self, a: Channel, b: Channel, index: (usize, usize, usize, usize)) -> f64 {
        self.two_body(a, b, self.packed_index(a, b, index))
    }
}

/// Integrals held in memory. Two-body blocks are stored once per unordered channel pair;
/// same-channel blocks are keyed with [`idx8`], mixed blocks with [`idx4`].
#[derive(Debug, Clone, Default)]
pub struct MoIntegrals {
    n_orbitals: BTreeMap<Channel, usize>,
    one_body: BTreeMap<Channel, DMatrix<f64>>,
    two_body: BTreeMap<(Channel, Channel), Vec<f64>>,
    nuclear_repulsion: f64,
}

impl MoIntegrals {
    /// Creates an empty store for the given channels. All integrals start at zero.
    pub fn new(channels: impl IntoIterator<Item = (Channel, usize)>) -> Self {
        let n_orbitals: BTreeMap<Channel, usize> = channels.into_iter().collect();
        let one_body = n_orbitals
            .iter()
            .map(|(&channel, &n)| (channel, DMatrix::zeros(n, n)))
            .collect();

        Self {
            n_orbitals,
            one_body,
            two_body: BTreeMap::new(),
            nuclear_repulsion: 0.0,
        }
    }

    pub fn with_nuclear_repulsion(mut self, nuclear_repulsion: f64) -> Self {
        self.nuclear_repulsion = nuclear_repulsion;
        self
    }

    /// Constant energy shift that is not part of the Hamiltonian matrix.
    pub fn nuclear_repulsion(&self) -> f64 {
        self.nuclear_repulsion
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.n_orbitals.keys().copied()
    }

    /// Sets `h_ij = h_ji = value`.
    pub fn set_one_body(&mut self, channel: Channel, i: usize, j: usize, value: f64) {
        let matrix = self
            .one_body
            .get_mut(&channel)
            .unwrap_or_else(|| panic!("no orbitals declared for channel {channel}"));
        matrix[(i, j)] = value;
        matrix[(j, i)] = value;
    }

    pub fn one_body_matrix(&self, channel: Channel) -> Option<&DMatrix<f64>> {
        self.one_body.get(&channel)
    }

    /// Sets `(ij|kl)` in block `(a, b)`, and with it every permutation sharing its key.
    pub fn set_two_body(
        &mut self,
        a: Channel,
        b: Channel,
        index: (usize, usize, usize, usize),
        value: f64,
    ) {
        let key = self.packed_index(a, b, index);
        let block = Self::block(a, b);
        let len = self.block_len(block);
        let data = self
            .two_body
            .entry(block)
            .or_insert_with(|| vec![0.0; len]);
        data[key] = value;
    }

    fn block(a: Channel, b: Channel) -> (Channel, Channel) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn block_len(&self, (a, b): (Channel, Channel)) -> usize {
        if a == b {
            idx8_len(self.orbitals_of(a))
        } else {
            pair_count(self.orbitals_of(a)) * pair_count(self.orbitals_of(b))
        }
    }

    fn orbitals_of(&self, channel: Channel) -> usize {
        self.n_orbitals
            .get(&channel)
            .copied()
            .unwrap_or_else(|| panic!("no orbitals declared for channel {channel}"))
    }
}

impl IntegralProvider for MoIntegrals {
    fn n_orbitals(&self, channel: Channel) -> Option<usize> {
        self.n_orbitals.get(&channel).copied()
    }

    fn one_body(&self, channel: Channel, i: usize, j: usize) -> f64 {
        self.one_body
            .get(&channel)
            .map_or(0.0, |matrix| matrix[(i, j)])
    }

    fn packed_index(
        &self,
        a: Channel,
        b: Channel,
        (i, j, k, l): (usize, usize, usize, usize),
    ) -> usize {
        if a == b {
            idx8(i, j, k, l)
        } else if a < b {
            idx4(i, j, k, l, pair_count(self.orbitals_of(b)))
        } else {
            // stored as (kl|ij) in block (b, a)
            idx4(k, l, i, j, pair_count(self.orbitals_of(a)))
        }
    }

    fn two_body(&self, a: Channel, b: Channel, key: usize) -> f64 {
        self.two_body
            .get(&Self::block(a, b))
            .map_or(0.0, |data| data[key])
    }
}
