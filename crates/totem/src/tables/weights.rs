//! Per-planet weights and per-sign weight multipliers.

use crate::error::ConfigurationError;
use crate::fixed::Fixed;
use crate::json::Node;
use crate::tables::{parse_json, read_table};
use crate::zodiac::{Planet, Sign, PLANET_COUNT, SIGN_COUNT};
use std::path::Path;

const WEIGHT_TABLE: &str = "weight table";
const MULTIPLIER_TABLE: &str = "multiplier table";

/// Largest accepted base weight.
pub const MAX_WEIGHT: f64 = 100_000.0;
/// Largest accepted sign multiplier. With [`MAX_WEIGHT`] a score of 100 on
/// all 13 planets stays far below `u64::MAX` micro units.
pub const MAX_MULTIPLIER: f64 = 10_000.0;

/// Immutable planet → weight mapping covering all 13 planets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: [Fixed; PLANET_COUNT],
}

impl WeightTable {
    /// Build from `(planet name, weight)` pairs. Every planet must appear
    /// exactly once with a positive weight of at most three decimals.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let weights = collect_planet_values(entries, WEIGHT_TABLE, MAX_WEIGHT)?;
        Ok(Self { weights })
    }

    /// Load from `{ "Sun": 23, "Ascendant": 18, ... }`.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let parsed = parse_json(json, WEIGHT_TABLE)?;
        let entries = number_entries(&parsed, WEIGHT_TABLE)?;
        let table = Self::from_entries(entries.iter().map(|(k, v)| (k.as_str(), *v)))?;
        log::debug!("Loaded weight table: {:?}", table.weights.map(Fixed::to_f64));
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        Self::from_json(&read_table(path)?)
    }

    pub fn weight(&self, planet: Planet) -> Fixed {
        self.weights[planet.index()]
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        let weights = Planet::ALL.map(|planet| {
            Fixed::from_decimal(planet.default_weight()).unwrap_or(Fixed::ONE)
        });
        Self { weights }
    }
}

/// Sign-dependent multiplier applied to a planet's base weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplierTable {
    values: [[Fixed; PLANET_COUNT]; SIGN_COUNT],
}

impl MultiplierTable {
    /// Every multiplier equal to 1
    pub fn identity() -> Self {
        Self {
            values: [[Fixed::ONE; PLANET_COUNT]; SIGN_COUNT],
        }
    }

    /// Load from `{ "ARIES": { "Sun": 1.2, ... }, ... }`. All 12 signs and
    /// 13 planets must be present.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let parsed = parse_json(json, MULTIPLIER_TABLE)?;
        let obj = parsed.as_object().ok_or_else(|| ConfigurationError::InvalidJson {
            table: MULTIPLIER_TABLE,
            message: "multiplier table must be an object keyed by sign".to_string(),
        })?;

        let mut values: [Option<[Fixed; PLANET_COUNT]>; SIGN_COUNT] = [None; SIGN_COUNT];
        for (key, row) in obj {
            let sign: Sign = key.parse().map_err(|_| ConfigurationError::UnknownSign {
                table: MULTIPLIER_TABLE,
                name: key.clone(),
            })?;
            if values[sign.index()].is_some() {
                return Err(ConfigurationError::DuplicateKey {
                    table: MULTIPLIER_TABLE,
                    key: key.clone(),
                });
            }
            let entries = number_entries(row, MULTIPLIER_TABLE)?;
            let row = collect_planet_values(
                entries.iter().map(|(k, v)| (k.as_str(), *v)),
                MULTIPLIER_TABLE,
                MAX_MULTIPLIER,
            )
            .map_err(|err| match err {
                ConfigurationError::MissingWeight { planet } => {
                    ConfigurationError::MissingMultiplier { planet, sign }
                }
                other => other,
            })?;
            values[sign.index()] = Some(row);
        }

        let mut table = Self::identity();
        for sign in Sign::ALL {
            table.values[sign.index()] =
                values[sign.index()].ok_or_else(|| ConfigurationError::MissingField {
                    table: MULTIPLIER_TABLE,
                    field: sign.name().to_string(),
                })?;
        }
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        Self::from_json(&read_table(path)?)
    }

    pub fn multiplier(&self, sign: Sign, planet: Planet) -> Fixed {
        self.values[sign.index()][planet.index()]
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self::identity()
    }
}

fn number_entries(
    value: &Node,
    table: &'static str,
) -> Result<Vec<(String, f64)>, ConfigurationError> {
    let obj = value.as_object().ok_or_else(|| ConfigurationError::InvalidJson {
        table,
        message: "expected an object of planet → number".to_string(),
    })?;
    obj.iter()
        .map(|(key, value)| {
            value
                .as_f64()
                .map(|n| (key.clone(), n))
                .ok_or_else(|| ConfigurationError::InvalidJson {
                    table,
                    message: format!("value for {} must be a number, got {}", key, value),
                })
        })
        .collect()
}

fn collect_planet_values<'a, I>(
    entries: I,
    table: &'static str,
    max: f64,
) -> Result<[Fixed; PLANET_COUNT], ConfigurationError>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut values: [Option<Fixed>; PLANET_COUNT] = [None; PLANET_COUNT];
    for (name, value) in entries {
        let planet: Planet = name.parse().map_err(|_| ConfigurationError::UnknownPlanet {
            table,
            name: name.to_string(),
        })?;
        if values[planet.index()].is_some() {
            return Err(ConfigurationError::DuplicatePlanet { table, planet });
        }
        let fixed = Fixed::from_decimal(value)
            .filter(|f| !f.is_zero())
            .ok_or_else(|| ConfigurationError::InvalidWeight {
                table,
                planet,
                value: value.to_string(),
                message: "Expected a positive number with at most 3 decimal places".to_string(),
            })?;
        if value > max {
            return Err(ConfigurationError::InvalidWeight {
                table,
                planet,
                value: value.to_string(),
                message: format!("Expected at most {}", max),
            });
        }
        values[planet.index()] = Some(fixed);
    }

    let mut out = [Fixed::ZERO; PLANET_COUNT];
    for planet in Planet::ALL {
        out[planet.index()] = values[planet.index()]
            .ok_or(ConfigurationError::MissingWeight { planet })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHTS_JSON: &str = r#"{
        "Sun": 23, "Ascendant": 18, "Moon": 15, "Mercury": 7, "Venus": 6,
        "Mars": 6, "Jupiter": 5, "Saturn": 5, "Uranus": 3, "Neptune": 3,
        "Pluto": 2, "North Node": 2, "MC": 5
    }"#;

    #[test]
    fn test_weights_from_json_match_defaults() {
        let table = WeightTable::from_json(WEIGHTS_JSON).unwrap();
        assert_eq!(table, WeightTable::default());
        assert_eq!(table.weight(Planet::Sun), Fixed::from_int(23));
    }

    #[test]
    fn test_unknown_planet_is_error() {
        let json = WEIGHTS_JSON.replace("\"MC\": 5", "\"MC\": 5, \"Chiron\": 1");
        let err = WeightTable::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownPlanet { name, .. } if name == "Chiron"));
    }

    #[test]
    fn test_missing_planet_is_error() {
        let json = WEIGHTS_JSON.replace(", \"MC\": 5", "");
        let err = WeightTable::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingWeight { planet: Planet::Midheaven }
        ));
    }

    #[test]
    fn test_non_positive_weight_is_error() {
        let json = WEIGHTS_JSON.replace("\"Pluto\": 2", "\"Pluto\": 0");
        assert!(matches!(
            WeightTable::from_json(&json).unwrap_err(),
            ConfigurationError::InvalidWeight { planet: Planet::Pluto, .. }
        ));
    }

    #[test]
    fn test_alias_duplicate_is_error() {
        let json = WEIGHTS_JSON.replace("\"MC\": 5", "\"MC\": 5, \"midheaven\": 5");
        assert!(matches!(
            WeightTable::from_json(&json).unwrap_err(),
            ConfigurationError::DuplicatePlanet { planet: Planet::Midheaven, .. }
        ));
    }

    #[test]
    fn test_multiplier_table_requires_every_sign() {
        let row = WEIGHTS_JSON.replace(|c: char| c.is_ascii_digit(), "1");
        let json = format!("{{\"ARIES\": {}}}", row);
        let err = MultiplierTable::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingField { field, .. } if field == "TAURUS"));
    }

    fn multiplier_json(row: &str) -> String {
        let body = Sign::ALL
            .iter()
            .map(|sign| format!("\"{}\": {}", sign.name(), row))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", body)
    }

    #[test]
    fn test_repeated_planet_key_is_error() {
        let json = WEIGHTS_JSON.replace("\"Sun\": 23", "\"Sun\": 23, \"Sun\": 40");
        assert!(matches!(
            WeightTable::from_json(&json).unwrap_err(),
            ConfigurationError::DuplicatePlanet { planet: Planet::Sun, .. }
        ));
    }

    #[test]
    fn test_repeated_sign_key_in_multipliers_is_error() {
        let row = WEIGHTS_JSON.replace(|c: char| c.is_ascii_digit(), "1");
        let json = multiplier_json(&row).replacen('{', &format!("{{\"ARIES\": {}, ", row), 1);
        assert!(matches!(
            MultiplierTable::from_json(&json).unwrap_err(),
            ConfigurationError::DuplicateKey { key, .. } if key == "ARIES"
        ));
    }

    #[test]
    fn test_oversized_weight_is_error() {
        let json = WEIGHTS_JSON.replace("\"Sun\": 23", "\"Sun\": 1000000000");
        assert!(matches!(
            WeightTable::from_json(&json).unwrap_err(),
            ConfigurationError::InvalidWeight { planet: Planet::Sun, .. }
        ));

        let json = WEIGHTS_JSON.replace("\"Sun\": 23", "\"Sun\": 100001");
        assert!(matches!(
            WeightTable::from_json(&json).unwrap_err(),
            ConfigurationError::InvalidWeight { planet: Planet::Sun, .. }
        ));
    }

    #[test]
    fn test_oversized_multiplier_is_error() {
        let row = WEIGHTS_JSON
            .replace(|c: char| c.is_ascii_digit(), "1")
            .replace("\"Sun\": 11", "\"Sun\": 20000");
        assert!(matches!(
            MultiplierTable::from_json(&multiplier_json(&row)).unwrap_err(),
            ConfigurationError::InvalidWeight { planet: Planet::Sun, .. }
        ));
    }

    #[test]
    fn test_largest_accepted_values_stay_exact() {
        let weights = WeightTable::from_entries(Planet::ALL.iter().map(|p| (p.name(), MAX_WEIGHT))).unwrap();
        let row = format!(
            "{{{}}}",
            Planet::ALL
                .iter()
                .map(|p| format!("\"{}\": {}", p.name(), MAX_MULTIPLIER))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let multipliers = MultiplierTable::from_json(&multiplier_json(&row)).unwrap();

        let row_total: Fixed = Planet::ALL
            .iter()
            .map(|&p| {
                weights
                    .weight(p)
                    .mul_exact(multipliers.multiplier(Sign::Leo, p))
                    .times(100)
            })
            .sum();
        // 1e5 × 1e4 × 100 × 13 units, in micro units
        assert_eq!(row_total.micros(), 1_300_000_000_000_000_000);
        assert!(row_total.micros() < u64::MAX);
    }
}
