//! The scoring pipeline: matrix construction, totals and ranking, and the
//! two derived views of the top-ranked animals.
//!
//! Strength normalizes *across* animals (one planet column over the whole
//! roster); salience ranks *within* one animal's row. They live in
//! separate modules and never share a code path.

pub mod matrix;
pub mod salience;
pub mod strength;
pub mod totals;

pub use matrix::{apply_weights, build_raw_matrix, ScoreMatrices, ScoreMatrix, ScoreMatrixBuilder};
pub use salience::{classify, classify_row, salient_planets, SalienceRow, SALIENT_COUNT};
pub use strength::{column_maxima, percentage, strength_cells, StrengthRow, StrengthTable};
pub use totals::{rank, top_n, RankedAnimal, TOP_N};

use crate::zodiac::{Planet, PLANET_COUNT};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Serializes a 13-cell row as `{ "Sun": .., "Ascendant": .., ... }`.
pub(crate) struct PlanetMap<'a, T>(pub &'a [T; PLANET_COUNT]);

impl<T: Serialize> Serialize for PlanetMap<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PLANET_COUNT))?;
        for planet in Planet::ALL {
            map.serialize_entry(planet.name(), &self.0[planet.index()])?;
        }
        map.end()
    }
}
