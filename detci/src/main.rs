//! CI Calculation Command-Line Interface
//!
//! This is the main entry point for running CI calculations with YAML configuration.

use color_eyre::eyre::Result;
use detci::app::CiApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    CiApplication::from_cli()?.run()
}
