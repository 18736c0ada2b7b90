use crate::config::Config;
use crate::hamiltonian_impl::{HamiltonianOperator, LinearOperator, SlaterCondon};
use crate::space_impl::{DeterminantSpace, DeterminantSpaceBuilder};
use color_eyre::eyre::{ensure, eyre, Result, WrapErr};
use integrals::{Channel, IntegralProvider, MoIntegrals};
use tracing::info;

/// Lowest roots of a dense CI diagonalization
#[derive(Debug, Clone)]
pub struct CiSummary {
    pub n_dets: usize,
    /// `H_00`, the energy of the reference determinant
    pub reference_energy: f64,
    /// Electronic energies, ascending
    pub energies: Vec<f64>,
    pub nuclear_repulsion: f64,
}

impl CiSummary {
    pub fn total_energy(&self, root: usize) -> f64 {
        self.energies[root] + self.nuclear_repulsion
    }

    pub fn correlation_energy(&self) -> f64 {
        self.energies[0] - self.reference_energy
    }
}

/// Seeds the references from the configuration and adds each particle type's excitations
pub fn build_space(config: &Config, integrals: &MoIntegrals) -> Result<DeterminantSpace> {
    ensure!(
        !config.particles.is_empty(),
        "configuration lists no particle types"
    );

    let n_orbitals = (0..config.particles.len())
        .map(|particle| {
            let channel = Channel::new(particle, 0);
            integrals.n_orbitals(channel).ok_or_else(|| {
                eyre!(
                    "no integrals for {} (channel {})",
                    config.particles[particle].label(particle),
                    channel
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut builder = DeterminantSpaceBuilder::new(n_orbitals);
    builder
        .build_from_occupations(&config.occupations())
        .wrap_err("Invalid reference occupations")?;

    for (particle, particle_config) in config.particles.iter().enumerate() {
        let level = particle_config.excitation_level.unwrap_or(2);
        info!(
            "Adding excitations up to level {} for {}",
            level,
            particle_config.label(particle)
        );
        builder.add_excitations(particle, level).wrap_err_with(|| {
            format!(
                "Unable to generate excitations for {}",
                particle_config.label(particle)
            )
        })?;
    }

    builder.build()
}

/// Diagonalizes the Hamiltonian of `space` densely and keeps the lowest roots
pub fn run_ci(space: &DeterminantSpace, integrals: &MoIntegrals, config: &Config) -> Result<CiSummary> {
    let hamiltonian = HamiltonianOperator::new(SlaterCondon::new(space, integrals)?);
    let n_dets = hamiltonian.dimension();
    let dense_limit = config.dense_limit();
    ensure!(
        n_dets <= dense_limit,
        "{} determinants exceed the dense diagonalization limit of {}; \
         drive the matrix-free operator with an iterative eigensolver instead",
        n_dets,
        dense_limit
    );

    info!("");
    info!("===========================================");
    info!("        Dense CI Diagonalization");
    info!("===========================================");
    info!("CI matrix size: {} x {}", n_dets, n_dets);

    let reference_energy = hamiltonian.element(0, 0);
    info!("Reference energy: {:.10} Eh", reference_energy);

    info!("Building CI Hamiltonian matrix...");
    let h_ci = hamiltonian.to_dense();

    info!("Diagonalizing CI Hamiltonian...");
    let eigen = h_ci.symmetric_eigen();
    let mut energies: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    energies.sort_by(|a, b| a.total_cmp(b));
    energies.truncate(config.n_roots().min(n_dets));

    Ok(CiSummary {
        n_dets,
        reference_energy,
        energies,
        nuclear_repulsion: integrals.nuclear_repulsion(),
    })
}
