use crate::chart::ChartPositions;
use crate::fixed::Fixed;
use crate::scoring::PlanetMap;
use crate::tables::{AffinityTable, ScoringTables};
use crate::zodiac::{Planet, PLANET_COUNT};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Animal × planet matrix. Rows follow roster order, columns follow the
/// canonical planet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix<T> {
    animals: Vec<String>,
    rows: Vec<[T; PLANET_COUNT]>,
}

impl<T: Copy> ScoreMatrix<T> {
    pub fn animals(&self) -> &[String] {
        &self.animals
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row of the animal at a roster position.
    ///
    /// Panics if `index` is out of bounds, like slice indexing.
    pub fn row(&self, index: usize) -> &[T; PLANET_COUNT] {
        &self.rows[index]
    }

    pub fn row_by_name(&self, animal: &str) -> Option<&[T; PLANET_COUNT]> {
        self.animals
            .iter()
            .position(|name| name == animal)
            .map(|index| &self.rows[index])
    }

    pub fn get(&self, index: usize, planet: Planet) -> T {
        self.rows[index][planet.index()]
    }

    /// One planet's values over the whole roster
    pub fn column(&self, planet: Planet) -> impl Iterator<Item = T> + '_ {
        self.rows.iter().map(move |row| row[planet.index()])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T; PLANET_COUNT])> {
        self.animals.iter().map(String::as_str).zip(self.rows.iter())
    }
}

impl<T: Serialize> Serialize for ScoreMatrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (animal, row) in self.animals.iter().zip(self.rows.iter()) {
            map.serialize_entry(animal, &PlanetMap(row))?;
        }
        map.end()
    }
}

/// RawScore(animal, planet) = affinity[animal][chart[planet]]
pub fn build_raw_matrix(affinity: &AffinityTable, chart: &ChartPositions) -> ScoreMatrix<u8> {
    let rows = affinity
        .rows()
        .iter()
        .map(|row| Planet::ALL.map(|planet| row.score(chart.sign(planet))))
        .collect();
    ScoreMatrix {
        animals: affinity.animals().map(str::to_string).collect(),
        rows,
    }
}

/// WeightedScore(animal, planet) = RawScore × effective weight(planet)
pub fn apply_weights(raw: &ScoreMatrix<u8>, weights: &[Fixed; PLANET_COUNT]) -> ScoreMatrix<Fixed> {
    let rows = raw
        .rows
        .iter()
        .map(|row| Planet::ALL.map(|planet| weights[planet.index()].times(row[planet.index()])))
        .collect();
    ScoreMatrix {
        animals: raw.animals.clone(),
        rows,
    }
}

/// Everything derived from one chart before ranking.
#[derive(Debug, Clone)]
pub struct ScoreMatrices {
    pub effective_weights: [Fixed; PLANET_COUNT],
    pub raw: ScoreMatrix<u8>,
    pub weighted: ScoreMatrix<Fixed>,
}

/// Joins a chart with the static tables.
///
/// Completeness of the inputs is guaranteed by construction: an
/// [`AffinityTable`] row always has all 12 signs, a weight table always has
/// all 13 planets and a [`ChartPositions`] always places every planet, so
/// every cell of the result is defined.
pub struct ScoreMatrixBuilder<'a> {
    tables: &'a ScoringTables,
}

impl<'a> ScoreMatrixBuilder<'a> {
    pub fn new(tables: &'a ScoringTables) -> Self {
        Self { tables }
    }

    pub fn build(&self, chart: &ChartPositions) -> ScoreMatrices {
        let effective_weights = self.tables.effective_weights(chart);
        for (planet, sign) in chart.iter() {
            log::debug!(
                "{} in {}: weight {} (base {})",
                planet,
                sign,
                effective_weights[planet.index()],
                self.tables.weights.weight(planet)
            );
        }
        let raw = build_raw_matrix(&self.tables.affinity, chart);
        let weighted = apply_weights(&raw, &effective_weights);
        ScoreMatrices {
            effective_weights,
            raw,
            weighted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::AffinityRow;
    use crate::zodiac::Sign;

    #[test]
    fn test_raw_matrix_looks_up_chart_sign() {
        let mut scores = [0u8; 12];
        scores[Sign::Aries.index()] = 80;
        scores[Sign::Leo.index()] = 20;
        let affinity = AffinityTable::new(vec![AffinityRow::new("Wolf", scores)]).unwrap();

        let mut signs = [Sign::Cancer; PLANET_COUNT];
        signs[Planet::Sun.index()] = Sign::Aries;
        signs[Planet::Moon.index()] = Sign::Leo;
        let raw = build_raw_matrix(&affinity, &ChartPositions::new(signs));

        assert_eq!(raw.get(0, Planet::Sun), 80);
        assert_eq!(raw.get(0, Planet::Moon), 20);
        assert_eq!(raw.get(0, Planet::Mars), 0);
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn test_apply_weights_multiplies_each_column() {
        let affinity = AffinityTable::new(vec![AffinityRow::uniform("Wolf", 10)]).unwrap();
        let raw = build_raw_matrix(&affinity, &ChartPositions::uniform(Sign::Leo));
        let weights = Planet::ALL.map(|p| Fixed::from_int(p.index() as u64 + 1));
        let weighted = apply_weights(&raw, &weights);
        for planet in Planet::ALL {
            assert_eq!(
                weighted.get(0, planet),
                Fixed::from_int(10 * (planet.index() as u64 + 1))
            );
        }
    }
}
