use crate::taxi::TaxiEnvError;
use serde::{Deserialize, Serialize};

/// The extended 16x16 taxi map. 512 states in total (16 x 16 x 2).
pub const EXTENDED_MAP: [&str; 18] = [
    "+-------------------------------+",
    "| : | : : : : : : : : : : : : : |",
    "| : : : : : : : : : : : : : : : |",
    "| : : : : : : : : : : : : : : : |",
    "| | : | : : : : : | : : : : : : |",
    "| | : | : : : : : | : : : : : : |",
    "| : : | : : : : : | : : : : : : |",
    "| : : : : : : : : | : : : : : : |",
    "| : : : : : : : : | : : : : : : |",
    "| : : | : : : : : | : : : : : : |",
    "| : : | : : : : : | : : : : : : |",
    "| : : | : : : : : : : : : : : : |",
    "| : : : : : : : : : : : : : : : |",
    "| : | : : : : : : : : : : : : : |",
    "| : | : : : : : : : : : : : : : |",
    "| : : : : : : : : : : : : : : : |",
    "| : : : : : : : : : : : : : : : |",
    "+-------------------------------+",
];

/// Explicit environment configuration passed by the caller. Replaces the
/// name-based registry lookup of the original gym environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxiConfig {
    /// ASCII art map, see [`crate::map::TaxiMap::parse`] for the format.
    pub map: Vec<String>,
    /// Ordered passenger pickup cells as (row, col).
    pub locs: Vec<(usize, usize)>,
    /// Ordered destination cells as (row, col).
    pub destinations: Vec<(usize, usize)>,
    /// Which pickup location the passenger waits at.
    pub pass_idx: usize,
    /// Which destination the passenger must be dropped at.
    pub dest_idx: usize,
}

impl Default for TaxiConfig {
    fn default() -> Self {
        Self {
            map: EXTENDED_MAP.iter().map(|l| l.to_string()).collect(),
            locs: vec![(4, 3), (0, 4), (4, 0), (0, 0)],
            destinations: vec![(15, 15), (15, 0), (0, 15), (8, 8)],
            pass_idx: 0,
            dest_idx: 0,
        }
    }
}

impl TaxiConfig {
    pub fn from_json(json: &str) -> Result<Self, TaxiEnvError> {
        Ok(serde_json::from_str(json)?)
    }
}
