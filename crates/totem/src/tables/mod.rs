//! Static scoring configuration: affinity, weight and multiplier tables.

pub mod affinity;
pub mod weights;

pub use affinity::{AffinityRow, AffinityTable, MAX_SCORE};
pub use weights::{MultiplierTable, WeightTable};

use crate::chart::ChartPositions;
use crate::error::ConfigurationError;
use crate::fixed::Fixed;
use crate::json::{self, Node};
use crate::zodiac::{Planet, PLANET_COUNT};
use std::fs;
use std::path::Path;

/// The three static tables one analysis needs. Loaded once and shared
/// read-only between analyses.
#[derive(Debug, Clone)]
pub struct ScoringTables {
    pub affinity: AffinityTable,
    pub weights: WeightTable,
    pub multipliers: MultiplierTable,
}

impl ScoringTables {
    pub fn new(affinity: AffinityTable, weights: WeightTable, multipliers: Option<MultiplierTable>) -> Self {
        Self {
            affinity,
            weights,
            multipliers: multipliers.unwrap_or_default(),
        }
    }

    pub fn from_paths(
        affinity: &Path,
        weights: &Path,
        multipliers: Option<&Path>,
    ) -> Result<Self, ConfigurationError> {
        let affinity = AffinityTable::from_path(affinity)?;
        let weights = WeightTable::from_path(weights)?;
        let multipliers = multipliers.map(MultiplierTable::from_path).transpose()?;
        log::info!(
            "Scoring tables loaded: {} animals, multipliers {}",
            affinity.len(),
            if multipliers.is_some() { "enabled" } else { "disabled" }
        );
        Ok(Self::new(affinity, weights, multipliers))
    }

    /// Base weight × sign multiplier for every planet of a chart
    pub fn effective_weights(&self, chart: &ChartPositions) -> [Fixed; PLANET_COUNT] {
        Planet::ALL.map(|planet| {
            let sign = chart.sign(planet);
            self.weights
                .weight(planet)
                .mul_exact(self.multipliers.multiplier(sign, planet))
        })
    }
}

pub(crate) fn read_table(path: &Path) -> Result<String, ConfigurationError> {
    fs::read_to_string(path).map_err(|e| ConfigurationError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn parse_json(text: &str, table: &'static str) -> Result<Node, ConfigurationError> {
    json::parse(text).map_err(|e| ConfigurationError::InvalidJson {
        table,
        message: e.to_string(),
    })
}
