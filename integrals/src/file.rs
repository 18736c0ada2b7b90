//! JSON integral files.
//!
//! ```json
//! {
//!   "nuclear_repulsion": 0.7143,
//!   "channels": [{ "particle": 0, "spin": 0, "n_orbitals": 2 }],
//!   "one_body": [{ "channel": { "particle": 0, "spin": 0 }, "matrix": [[-1.25, 0.0], [0.0, -0.47]] }],
//!   "two_body": [{ "a": { "particle": 0, "spin": 0 }, "b": { "particle": 0, "spin": 0 },
//!                  "elements": [[0, 0, 0, 0, 0.67]] }]
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::provider::{Channel, MoIntegrals};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub particle: usize,
    pub spin: usize,
    pub n_orbitals: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneBodyBlock {
    pub channel: Channel,
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoBodyBlock {
    pub a: Channel,
    pub b: Channel,
    /// Sparse `[i, j, k, l, value]` entries of `(ij|kl)`.
    pub elements: Vec<(usize, usize, usize, usize, f64)>,
}

/// On-disk form of [`MoIntegrals`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegralFile {
    #[serde(default)]
    pub nuclear_repulsion: f64,
    pub channels: Vec<ChannelEntry>,
    pub one_body: Vec<OneBodyBlock>,
    #[serde(default)]
    pub two_body: Vec<TwoBodyBlock>,
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

impl IntegralFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|e| invalid(e.to_string()))
    }

    pub fn from_json(content: &str) -> io::Result<Self> {
        serde_json::from_str(content).map_err(|e| invalid(e.to_string()))
    }

    pub fn to_json(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| invalid(e.to_string()))
    }
}

impl TryFrom<IntegralFile> for MoIntegrals {
    type Error = io::Error;

    fn try_from(file: IntegralFile) -> io::Result<Self> {
        let mut sizes = BTreeMap::new();
        for entry in &file.channels {
            let channel = Channel::new(entry.particle, entry.spin);
            if sizes.insert(channel, entry.n_orbitals).is_some() {
                return Err(invalid(format!("channel {channel} declared twice")));
            }
        }
        let size_of = |channel: Channel| {
            sizes
                .get(&channel)
                .copied()
                .ok_or_else(|| invalid(format!("integrals reference undeclared channel {channel}")))
        };

        let mut integrals =
            MoIntegrals::new(sizes.clone()).with_nuclear_repulsion(file.nuclear_repulsion);

        let mut seen = BTreeSet::new();
        for block in &file.one_body {
            let n = size_of(block.channel)?;
            if !seen.insert(block.channel) {
                return Err(invalid(format!(
                    "one-body matrix for channel {} given twice",
                    block.channel
                )));
            }
            if block.matrix.len() != n || block.matrix.iter().any(|row| row.len() != n) {
                return Err(invalid(format!(
                    "one-body matrix for channel {} is not {n}x{n}",
                    block.channel
                )));
            }
            for (i, j) in iproduct!(0..n, 0..n) {
                if (block.matrix[i][j] - block.matrix[j][i]).abs() > 1e-8 {
                    return Err(invalid(format!(
                        "one-body matrix for channel {} is not symmetric at ({i}, {j})",
                        block.channel
                    )));
                }
            }
            for (i, j) in iproduct!(0..n, 0..n).filter(|(i, j)| i <= j) {
                integrals.set_one_body(block.channel, i, j, block.matrix[i][j]);
            }
        }
        if let Some(missing) = sizes.keys().find(|channel| !seen.contains(*channel)) {
            return Err(invalid(format!("no one-body matrix for channel {missing}")));
        }

        for block in &file.two_body {
            let (n_a, n_b) = (size_of(block.a)?, size_of(block.b)?);
            for &(i, j, k, l, value) in &block.elements {
                if i >= n_a || j >= n_a || k >= n_b || l >= n_b {
                    return Err(invalid(format!(
                        "two-body element ({i}{j}|{k}{l}) out of range for block {} {}",
                        block.a, block.b
                    )));
                }
                integrals.set_two_body(block.a, block.b, (i, j, k, l), value);
            }
        }

        Ok(integrals)
    }
}

/// Reads and validates an integral file.
pub fn load<P: AsRef<Path>>(path: P) -> io::Result<MoIntegrals> {
    MoIntegrals::try_from(IntegralFile::load_from_file(path)?)
}
