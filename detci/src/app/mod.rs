mod report;
mod runner;

pub use report::report_summary;
pub use runner::{build_space, run_ci, CiSummary};

use crate::config::{Args, Config};
use crate::io::{load_integrals, setup_output, write_determinant_dump};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;
use tracing::info;

pub struct CiApplication {
    args: Args,
    config: Config,
}

impl CiApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn new(args: Args, config: Config) -> Self {
        Self { args, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_deref())?;
        info!("Configuration loaded from: {}", self.args.config_file);
        info!("{:?}", self.config);

        let summary = self.execute()?;
        report_summary(&summary);
        Ok(())
    }

    /// Everything `run` does except installing the log subscriber
    pub fn execute(&self) -> Result<CiSummary> {
        let integrals = load_integrals(Path::new(&self.config.integrals))?;
        let space = build_space(&self.config, &integrals)?;

        if self.config.dump_determinants() {
            let labels: Vec<String> = self
                .config
                .particles
                .iter()
                .enumerate()
                .map(|(index, particle)| particle.label(index))
                .collect();
            let mut buffer = Vec::new();
            write_determinant_dump(&mut buffer, &space, &labels)?;
            for line in String::from_utf8_lossy(&buffer).lines() {
                info!("{}", line);
            }
        }

        run_ci(&space, &integrals, &self.config)
    }
}

/// Reads the YAML file, applies defaults and command-line overrides, and resolves the
/// integral path against the configuration file's directory
pub fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let mut config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();
    config.apply_overrides(args);

    let integrals = Path::new(&config.integrals);
    if integrals.is_relative() {
        if let Some(dir) = Path::new(&args.config_file).parent() {
            config.integrals = dir.join(integrals).to_string_lossy().into_owned();
        }
    }

    Ok(config)
}
