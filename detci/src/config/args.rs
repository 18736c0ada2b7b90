//! Command-line argument parsing for CI calculations

use clap::Parser;

/// Determinant CI over precomputed integrals with YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the excitation level of every particle type
    #[arg(long)]
    pub excitation_level: Option<usize>,

    /// Override the number of reported roots
    #[arg(long)]
    pub n_roots: Option<usize>,

    /// Override the largest space diagonalized densely
    #[arg(long)]
    pub dense_limit: Option<usize>,

    /// Write every determinant and the index table to the log
    #[arg(long)]
    pub dump: bool,
}
