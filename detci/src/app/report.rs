use super::runner::CiSummary;
use tracing::info;

pub fn report_summary(summary: &CiSummary) {
    info!("");
    info!("===========================================");
    info!("       CI Results Summary");
    info!("===========================================");
    info!("Number of determinants:   {}", summary.n_dets);
    info!("Nuclear repulsion:        {:.10} Eh", summary.nuclear_repulsion);
    info!("Reference energy:         {:.10} Eh", summary.reference_energy);
    info!(
        "Reference total energy:   {:.10} Eh",
        summary.reference_energy + summary.nuclear_repulsion
    );
    if !summary.energies.is_empty() {
        info!("Correlation energy:       {:.10} Eh", summary.correlation_energy());
    }
    info!("");
    info!("States:");
    for (root, &energy) in summary.energies.iter().enumerate() {
        info!(
            "  Root {}: Electronic = {:.10} Eh, Total = {:.10} Eh",
            root,
            energy,
            summary.total_energy(root)
        );
    }
    info!("===========================================");
}
