//! Configuration management for CI calculations
//!
//! This module handles the YAML configuration structures, their defaults, and the
//! command-line overrides.

mod args;
mod tests;

pub use args::Args;

use serde::{Deserialize, Serialize};

/// Main configuration structure for CI calculations
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Integral file, relative to the directory of the configuration file
    pub integrals: String,
    pub particles: Vec<ParticleConfig>,
    #[serde(default)]
    pub ci_params: CiParams,
}

/// Reference occupations and truncation of one particle type
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ParticleConfig {
    pub name: Option<String>,
    /// Occupied orbitals, one list per spin channel
    pub occupations: Vec<Vec<usize>>,
    pub excitation_level: Option<usize>,
}

impl ParticleConfig {
    pub fn with_defaults(mut self) -> Self {
        if self.excitation_level.is_none() {
            self.excitation_level = Some(2);
        }
        self
    }

    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("particle {}", index))
    }
}

/// CI-specific parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CiParams {
    pub n_roots: Option<usize>,
    pub dense_limit: Option<usize>,
    pub dump_determinants: Option<bool>,
}

impl Default for CiParams {
    fn default() -> Self {
        CiParams {
            n_roots: Some(1),
            dense_limit: Some(2000),
            dump_determinants: Some(false),
        }
    }
}

impl CiParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.n_roots.is_none() {
            self.n_roots = defaults.n_roots;
        }
        if self.dense_limit.is_none() {
            self.dense_limit = defaults.dense_limit;
        }
        if self.dump_determinants.is_none() {
            self.dump_determinants = defaults.dump_determinants;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.ci_params = self.ci_params.with_defaults();
        self.particles = self
            .particles
            .into_iter()
            .map(ParticleConfig::with_defaults)
            .collect();
        self
    }

    /// Command-line values take precedence over the file
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(level) = args.excitation_level {
            for particle in &mut self.particles {
                particle.excitation_level = Some(level);
            }
        }
        if let Some(n_roots) = args.n_roots {
            self.ci_params.n_roots = Some(n_roots);
        }
        if let Some(dense_limit) = args.dense_limit {
            self.ci_params.dense_limit = Some(dense_limit);
        }
        if args.dump {
            self.ci_params.dump_determinants = Some(true);
        }
    }

    pub fn n_roots(&self) -> usize {
        self.ci_params.n_roots.unwrap_or(1)
    }

    pub fn dense_limit(&self) -> usize {
        self.ci_params.dense_limit.unwrap_or(2000)
    }

    pub fn dump_determinants(&self) -> bool {
        self.ci_params.dump_determinants.unwrap_or(false)
    }

    /// Reference occupations indexed `[particle][spin]`
    pub fn occupations(&self) -> Vec<Vec<Vec<usize>>> {
        self.particles
            .iter()
            .map(|p| p.occupations.clone())
            .collect()
    }
}
