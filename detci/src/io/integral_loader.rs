use color_eyre::eyre::{Result, WrapErr};
use integrals::{IntegralProvider, MoIntegrals};
use std::path::Path;
use tracing::info;

/// Read and validate an integral file
pub fn load_integrals(path: &Path) -> Result<MoIntegrals> {
    info!("Reading integrals from: {}", path.display());
    let integrals = integrals::load(path)
        .wrap_err_with(|| format!("Unable to load integrals from {}", path.display()))?;

    for channel in integrals.channels() {
        info!(
            "  Channel {}: {} orbitals",
            channel,
            integrals.n_orbitals(channel).unwrap_or(0)
        );
    }
    info!("  Nuclear repulsion: {:.10} Eh", integrals.nuclear_repulsion());
    Ok(integrals)
}
