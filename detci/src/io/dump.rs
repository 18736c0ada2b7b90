use crate::space_impl::DeterminantSpace;
use color_eyre::eyre::Result;
use std::io::Write;

/// Human-readable listing of every channel determinant and of the composite index table.
///
/// `labels[p]` names particle type `p`.
pub fn write_determinant_dump<W: Write>(
    writer: &mut W,
    space: &DeterminantSpace,
    labels: &[String],
) -> Result<()> {
    writeln!(writer, "Determinants:")?;
    for particle in 0..space.n_particles() {
        let label = labels.get(particle).map(String::as_str).unwrap_or("?");
        for spin in 0..space.n_spins(particle) {
            writeln!(
                writer,
                "  Particle {} ({}) spin {}: {} determinants",
                particle,
                label,
                spin,
                space.channel_size(particle, spin)
            )?;
            for (local, det) in space.channel(particle, spin).iter().enumerate() {
                writeln!(writer, "    {:>6}  {}", local, det)?;
            }
        }
    }

    writeln!(writer, "Index table:")?;
    let indexer = space.indexer();
    for index in 0..space.n_dets() {
        writeln!(writer, "  Det {:>8}: {:?}", index, indexer.unfold(index))?;
    }
    Ok(())
}
