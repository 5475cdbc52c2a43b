//! Per-animal salience: which planets carry the most weight in one
//! animal's own row.

use crate::fixed::Fixed;
use crate::scoring::{PlanetMap, RankedAnimal, ScoreMatrix};
use crate::zodiac::{Planet, PLANET_COUNT};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Planets flagged per animal. The remaining 7 are not salient.
pub const SALIENT_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalienceRow {
    pub animal: String,
    pub roster_index: usize,
    /// Canonical planet order
    pub flags: [bool; PLANET_COUNT],
}

impl SalienceRow {
    pub fn is_salient(&self, planet: Planet) -> bool {
        self.flags[planet.index()]
    }

    /// Salient planets in canonical order
    pub fn salient(&self) -> impl Iterator<Item = Planet> + '_ {
        Planet::ALL.into_iter().filter(move |p| self.is_salient(*p))
    }
}

/// The six highest-scoring planets of a row, highest first. Equal scores
/// go to the planet earlier in canonical order.
pub fn salient_planets(row: &[Fixed; PLANET_COUNT]) -> [Planet; SALIENT_COUNT] {
    let mut order = Planet::ALL;
    // stable: canonical order survives among equal scores
    order.sort_by(|a, b| row[b.index()].cmp(&row[a.index()]));
    let mut top = [Planet::Sun; SALIENT_COUNT];
    top.copy_from_slice(&order[..SALIENT_COUNT]);
    top
}

pub fn classify_row(row: &[Fixed; PLANET_COUNT]) -> [bool; PLANET_COUNT] {
    let mut flags = [false; PLANET_COUNT];
    for planet in salient_planets(row) {
        flags[planet.index()] = true;
    }
    flags
}

/// Salience rows for the finalists. Each row looks only at that animal's
/// own weighted scores.
pub fn classify(weighted: &ScoreMatrix<Fixed>, top: &[RankedAnimal]) -> Vec<SalienceRow> {
    top.iter()
        .map(|ranked| SalienceRow {
            animal: ranked.animal.clone(),
            roster_index: ranked.roster_index,
            flags: classify_row(weighted.row(ranked.roster_index)),
        })
        .collect()
}

/// Serializes rows as `{ animal: { planet: bool } }` in ranking order.
pub(crate) struct SalienceTable<'a>(pub &'a [SalienceRow]);

impl Serialize for SalienceTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for row in self.0 {
            map.serialize_entry(&row.animal, &PlanetMap(&row.flags))?;
        }
        map.end()
    }
}
