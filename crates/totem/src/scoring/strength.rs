//! Per-planet strength of the finalists, relative to the best animal in
//! the whole roster for that planet.

use crate::fixed::Fixed;
use crate::scoring::{RankedAnimal, ScoreMatrix};
use crate::zodiac::{Planet, PLANET_COUNT};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Lift applied to the overall strength by finishing position (1st, 2nd, 3rd).
const RANK_LIFT: [f64; 3] = [0.4, 0.15, 0.0];

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthRow {
    pub animal: String,
    pub roster_index: usize,
    /// Percentage of the column maximum, canonical planet order
    pub cells: [f64; PLANET_COUNT],
    /// Average of `cells` weighted by the effective planet weights
    pub overall: f64,
    /// `overall` lifted toward 100 by finishing position, one decimal
    pub overall_adjusted: f64,
}

impl StrengthRow {
    pub fn cell(&self, planet: Planet) -> f64 {
        self.cells[planet.index()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthTable {
    pub rows: Vec<StrengthRow>,
    /// Planets whose maximum weighted score over the roster is zero; their
    /// cells are reported as 0 by convention.
    pub zero_max_planets: Vec<Planet>,
}

/// Maximum weighted score of every planet column over the full roster
pub fn column_maxima(weighted: &ScoreMatrix<Fixed>) -> [Fixed; PLANET_COUNT] {
    Planet::ALL.map(|planet| weighted.column(planet).max().unwrap_or(Fixed::ZERO))
}

/// `value / max × 100`, or 0 when `max` is 0.
pub fn percentage(value: Fixed, max: Fixed) -> f64 {
    if max.is_zero() {
        return 0.0;
    }
    let pct = value.micros() as f64 * 100.0 / max.micros() as f64;
    debug_assert!(pct <= 100.0, "strength above 100: {} / {}", value, max);
    pct.clamp(0.0, 100.0)
}

/// Strength cells of one weighted row against precomputed column maxima
pub fn strength_cells(row: &[Fixed; PLANET_COUNT], maxima: &[Fixed; PLANET_COUNT]) -> [f64; PLANET_COUNT] {
    Planet::ALL.map(|planet| percentage(row[planet.index()], maxima[planet.index()]))
}

fn weighted_average(cells: &[f64; PLANET_COUNT], weights: &[Fixed; PLANET_COUNT]) -> f64 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for planet in Planet::ALL {
        let weight = weights[planet.index()].to_f64();
        numerator += cells[planet.index()] * weight;
        denominator += weight;
    }
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn adjust_for_rank(overall: f64, position: usize) -> f64 {
    let lift = RANK_LIFT.get(position).copied().unwrap_or(0.0);
    let adjusted = overall + (100.0 - overall) * lift;
    (adjusted * 10.0).round() / 10.0
}

/// Strength table for the finalists. Maxima come from the whole weighted
/// matrix, not just from `top`.
pub fn compute(
    weighted: &ScoreMatrix<Fixed>,
    top: &[RankedAnimal],
    effective_weights: &[Fixed; PLANET_COUNT],
) -> StrengthTable {
    let maxima = column_maxima(weighted);
    let zero_max_planets: Vec<Planet> = Planet::ALL
        .into_iter()
        .filter(|planet| maxima[planet.index()].is_zero())
        .collect();
    for planet in &zero_max_planets {
        log::warn!(
            "No animal scores above zero for {}; reporting its strength as 0",
            planet
        );
    }

    let rows = top
        .iter()
        .enumerate()
        .map(|(position, ranked)| {
            let cells = strength_cells(weighted.row(ranked.roster_index), &maxima);
            let overall = weighted_average(&cells, effective_weights);
            StrengthRow {
                animal: ranked.animal.clone(),
                roster_index: ranked.roster_index,
                cells,
                overall,
                overall_adjusted: adjust_for_rank(overall, position),
            }
        })
        .collect();

    StrengthTable {
        rows,
        zero_max_planets,
    }
}

impl Serialize for StrengthTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.animal, &StrengthRowMap(row))?;
        }
        map.end()
    }
}

struct StrengthRowMap<'a>(&'a StrengthRow);

impl Serialize for StrengthRowMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PLANET_COUNT + 2))?;
        for planet in Planet::ALL {
            map.serialize_entry(planet.name(), &self.0.cell(planet))?;
        }
        map.serialize_entry("OVERALL_STRENGTH", &self.0.overall)?;
        map.serialize_entry("OVERALL_STRENGTH_ADJUST", &self.0.overall_adjusted)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_zero_max() {
        assert_eq!(percentage(Fixed::ZERO, Fixed::ZERO), 0.0);
    }

    #[test]
    fn test_percentage_of_max() {
        assert_eq!(percentage(Fixed::from_int(50), Fixed::from_int(200)), 25.0);
        assert_eq!(percentage(Fixed::from_int(200), Fixed::from_int(200)), 100.0);
    }

    #[test]
    fn test_adjust_for_rank() {
        assert_eq!(adjust_for_rank(50.0, 0), 70.0);
        assert_eq!(adjust_for_rank(50.0, 1), 57.5);
        assert_eq!(adjust_for_rank(50.0, 2), 50.0);
        assert_eq!(adjust_for_rank(66.66, 2), 66.7);
    }

    #[test]
    fn test_weighted_average_uses_weights() {
        let mut cells = [0.0; PLANET_COUNT];
        cells[Planet::Sun.index()] = 100.0;
        let mut weights = [Fixed::ZERO; PLANET_COUNT];
        weights[Planet::Sun.index()] = Fixed::from_int(3);
        weights[Planet::Moon.index()] = Fixed::from_int(1);
        assert_eq!(weighted_average(&cells, &weights), 75.0);
    }
}
