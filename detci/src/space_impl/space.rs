use color_eyre::eyre::{ensure, Result};
use indexmap::IndexSet;
use itertools::{iproduct, Itertools};
use tracing::{debug, info};

use super::indexer::CompositeIndexer;
use crate::det_impl::BitDeterminant;

/// Every determinant reachable from `reference` by moving `order` occupied orbitals into
/// `order` virtual orbitals below `n_orbitals`.
pub fn generate_excitations(
    reference: &BitDeterminant,
    n_orbitals: usize,
    order: usize,
) -> Result<Vec<BitDeterminant>> {
    let (occupied, virtuals) = reference.occupied_and_virtual(n_orbitals);
    ensure!(
        order <= virtuals.len(),
        "excitation level {} exceeds available virtuals ({} of {} orbitals are virtual)",
        order,
        virtuals.len(),
        n_orbitals
    );

    let excitations = iproduct!(
        occupied.iter().copied().combinations(order),
        virtuals.iter().copied().combinations(order)
    )
    .map(|(holes, particles)| reference.excite(&holes, &particles))
    .collect();

    Ok(excitations)
}

/// Collects the determinants of every (particle type, spin channel) before the space is
/// frozen. Each channel set keeps insertion order and the first determinant inserted into it
/// is that channel's reference.
#[derive(Debug, Clone)]
pub struct DeterminantSpaceBuilder {
    n_orbitals: Vec<usize>,
    sets: Vec<Vec<IndexSet<BitDeterminant>>>,
}

impl DeterminantSpaceBuilder {
    /// `n_orbitals[p]` is the orbital count shared by all spin channels of particle type `p`.
    pub fn new(n_orbitals: Vec<usize>) -> Self {
        let sets = vec![Vec::new(); n_orbitals.len()];
        Self { n_orbitals, sets }
    }

    /// Seeds one determinant per channel from `occupations[p][s]`, the occupied orbitals of
    /// particle type `p` in spin channel `s`.
    pub fn build_from_occupations(&mut self, occupations: &[Vec<Vec<usize>>]) -> Result<()> {
        ensure!(
            occupations.len() == self.n_orbitals.len(),
            "occupations given for {} particle types, expected {}",
            occupations.len(),
            self.n_orbitals.len()
        );

        for (particle, spins) in occupations.iter().enumerate() {
            ensure!(
                !spins.is_empty(),
                "particle type {} has no spin channels",
                particle
            );
            let seeded = self.sets[particle].len();
            ensure!(
                seeded == 0 || seeded == spins.len(),
                "particle type {} was seeded with {} spin channels, now given {}",
                particle,
                seeded,
                spins.len()
            );
            if seeded == 0 {
                self.sets[particle] = vec![IndexSet::new(); spins.len()];
            }

            for (spin, occupied) in spins.iter().enumerate() {
                let det = BitDeterminant::from_occupations(occupied, self.n_orbitals[particle])?;
                if let Some(reference) = self.sets[particle][spin].first() {
                    ensure!(
                        reference.count() == det.count(),
                        "particle type {} spin {}: {} occupied orbitals, reference has {}",
                        particle,
                        spin,
                        det.count(),
                        reference.count()
                    );
                }
                self.insert(particle, spin, det);
            }
        }
        Ok(())
    }

    /// Adds every excitation of order `1..=max_level` of each channel reference of `particle`.
    /// Channels are truncated independently; the composite space is their product.
    pub fn add_excitations(&mut self, particle: usize, max_level: usize) -> Result<()> {
        ensure!(
            particle < self.sets.len(),
            "particle type {} does not exist",
            particle
        );
        let n_orbitals = self.n_orbitals[particle];

        for spin in 0..self.sets[particle].len() {
            let Some(reference) = self.sets[particle][spin].first().cloned() else {
                continue;
            };
            for order in 1..=max_level {
                for det in generate_excitations(&reference, n_orbitals, order)? {
                    self.insert(particle, spin, det);
                }
            }
            debug!(
                "Particle {} spin {}: {} determinants up to excitation level {}",
                particle,
                spin,
                self.sets[particle][spin].len(),
                max_level
            );
        }
        Ok(())
    }

    /// Returns `false` if the determinant was already present.
    pub fn insert(&mut self, particle: usize, spin: usize, det: BitDeterminant) -> bool {
        let set = &mut self.sets[particle][spin];
        let (index, inserted) = set.insert_full(det);
        if inserted {
            debug!("Created determinant p{} s{}: {}", particle, spin, set[index]);
        }
        inserted
    }

    /// Freezes the sets and computes the composite index table.
    pub fn build(self) -> Result<DeterminantSpace> {
        for (particle, spins) in self.sets.iter().enumerate() {
            ensure!(
                !spins.is_empty(),
                "particle type {} was never given occupations",
                particle
            );
        }

        let sizes: Vec<Vec<usize>> = self
            .sets
            .iter()
            .map(|spins| spins.iter().map(IndexSet::len).collect())
            .collect();
        let indexer = CompositeIndexer::new(&sizes)?;

        info!("Determinant space:");
        for (particle, spins) in sizes.iter().enumerate() {
            for (spin, size) in spins.iter().enumerate() {
                info!(
                    "  Particle {} spin {}: {} determinants over {} orbitals",
                    particle, spin, size, self.n_orbitals[particle]
                );
            }
        }
        info!("  Total determinants: {}", indexer.n_dets());

        Ok(DeterminantSpace {
            n_orbitals: self.n_orbitals,
            sets: self.sets,
            indexer,
        })
    }
}

/// Frozen per-channel determinant sets together with their composite indexer.
#[derive(Debug, Clone)]
pub struct DeterminantSpace {
    n_orbitals: Vec<usize>,
    sets: Vec<Vec<IndexSet<BitDeterminant>>>,
    indexer: CompositeIndexer,
}

impl DeterminantSpace {
    pub fn n_particles(&self) -> usize {
        self.sets.len()
    }

    pub fn n_spins(&self, particle: usize) -> usize {
        self.sets[particle].len()
    }

    pub fn n_orbitals(&self, particle: usize) -> usize {
        self.n_orbitals[particle]
    }

    pub fn channel_size(&self, particle: usize, spin: usize) -> usize {
        self.sets[particle][spin].len()
    }

    pub fn channel(&self, particle: usize, spin: usize) -> &IndexSet<BitDeterminant> {
        &self.sets[particle][spin]
    }

    /// Determinant at position `local` of channel `(particle, spin)`.
    #[inline]
    pub fn get(&self, particle: usize, spin: usize, local: usize) -> &BitDeterminant {
        &self.sets[particle][spin][local]
    }

    /// Position of `det` in channel `(particle, spin)`, if present.
    pub fn position(&self, particle: usize, spin: usize, det: &BitDeterminant) -> Option<usize> {
        self.sets[particle][spin].get_index_of(det)
    }

    pub fn n_dets(&self) -> usize {
        self.indexer.n_dets()
    }

    pub fn indexer(&self) -> &CompositeIndexer {
        &self.indexer
    }
}
