//! Animal × sign affinity table.

use crate::error::ConfigurationError;
use crate::json::Node;
use crate::tables::{parse_json, read_table};
use crate::zodiac::{Sign, SIGN_COUNT};
use std::collections::HashSet;
use std::path::Path;

const TABLE: &str = "affinity table";
const ANIMALS_KEY: &str = "animals";
const ANIMAL_KEY: &str = "ANIMAL";
pub const MAX_SCORE: u8 = 100;

/// One animal's score for every sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinityRow {
    name: String,
    scores: [u8; SIGN_COUNT],
}

impl AffinityRow {
    pub fn new(name: impl Into<String>, scores: [u8; SIGN_COUNT]) -> Self {
        Self {
            name: name.into(),
            scores,
        }
    }

    /// Row with the same score for every sign
    pub fn uniform(name: impl Into<String>, score: u8) -> Self {
        Self::new(name, [score; SIGN_COUNT])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self, sign: Sign) -> u8 {
        self.scores[sign.index()]
    }

    pub fn scores(&self) -> &[u8; SIGN_COUNT] {
        &self.scores
    }
}

/// Immutable roster of animals in configuration-file order.
#[derive(Debug, Clone)]
pub struct AffinityTable {
    rows: Vec<AffinityRow>,
}

impl AffinityTable {
    /// Build a table, rejecting empty or duplicate names and scores above 100.
    pub fn new(rows: Vec<AffinityRow>) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for row in &rows {
            if row.name.trim().is_empty() {
                return Err(ConfigurationError::MissingField {
                    table: TABLE,
                    field: ANIMAL_KEY.to_string(),
                });
            }
            if !seen.insert(row.name.as_str()) {
                return Err(ConfigurationError::DuplicateAnimal {
                    name: row.name.clone(),
                });
            }
            for sign in Sign::ALL {
                let score = row.score(sign);
                if score > MAX_SCORE {
                    return Err(ConfigurationError::ScoreOutOfRange {
                        animal: row.name.clone(),
                        sign,
                        value: score.to_string(),
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Load from `{ "animals": [ { "ANIMAL": name, "ARIES": n, ... } ] }`.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let parsed = parse_json(json, TABLE)?;
        let mut found = parsed.get_all(ANIMALS_KEY);
        let animals = found.next().ok_or_else(|| ConfigurationError::MissingField {
            table: TABLE,
            field: ANIMALS_KEY.to_string(),
        })?;
        if found.next().is_some() {
            return Err(ConfigurationError::DuplicateKey {
                table: TABLE,
                key: ANIMALS_KEY.to_string(),
            });
        }
        let animals = animals
            .as_array()
            .ok_or_else(|| ConfigurationError::InvalidJson {
                table: TABLE,
                message: "animals must be an array".to_string(),
            })?;

        let rows = animals
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_row(entry, index))
            .collect::<Result<Vec<_>, _>>()?;

        let table = Self::new(rows)?;
        log::debug!("Loaded affinity table with {} animals", table.len());
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        Self::from_json(&read_table(path)?)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[AffinityRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&AffinityRow> {
        self.rows.get(index)
    }

    pub fn animals(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.name.as_str())
    }

    /// Roster position of an animal
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.name == name)
    }
}

fn parse_row(entry: &Node, index: usize) -> Result<AffinityRow, ConfigurationError> {
    let obj = entry.as_object().ok_or_else(|| ConfigurationError::InvalidJson {
        table: TABLE,
        message: format!("animal at index {} must be an object", index),
    })?;

    let mut names = entry.get_all(ANIMAL_KEY);
    let name = names
        .next()
        .and_then(Node::as_str)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ConfigurationError::MissingField {
            table: TABLE,
            field: format!("{} (animal at index {})", ANIMAL_KEY, index),
        })?
        .to_string();
    if names.next().is_some() {
        return Err(ConfigurationError::DuplicateKey {
            table: TABLE,
            key: format!("{} (animal {})", ANIMAL_KEY, name),
        });
    }

    let mut scores: [Option<u8>; SIGN_COUNT] = [None; SIGN_COUNT];
    for (key, value) in obj {
        if key == ANIMAL_KEY {
            continue;
        }
        let sign: Sign = key.parse().map_err(|_| ConfigurationError::UnknownField {
            animal: name.clone(),
            field: key.clone(),
        })?;
        if scores[sign.index()].is_some() {
            return Err(ConfigurationError::DuplicateKey {
                table: TABLE,
                key: format!("{} (animal {})", key, name),
            });
        }
        scores[sign.index()] = Some(parse_score(&name, sign, value)?);
    }

    let mut row = [0u8; SIGN_COUNT];
    for sign in Sign::ALL {
        row[sign.index()] = scores[sign.index()].ok_or_else(|| {
            ConfigurationError::MissingSignScore {
                animal: name.clone(),
                sign,
            }
        })?;
    }
    Ok(AffinityRow::new(name, row))
}

fn parse_score(animal: &str, sign: Sign, value: &Node) -> Result<u8, ConfigurationError> {
    let out_of_range = || ConfigurationError::ScoreOutOfRange {
        animal: animal.to_string(),
        sign,
        value: value.to_string(),
    };
    let score = value.as_f64().ok_or_else(out_of_range)?;
    if score.fract() != 0.0 || !(0.0..=MAX_SCORE as f64).contains(&score) {
        return Err(out_of_range());
    }
    Ok(score as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal_json(name: &str, score: u32) -> String {
        let signs = Sign::ALL
            .iter()
            .map(|s| format!("\"{}\": {}", s.name(), score))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{\"ANIMAL\": \"{}\", {}}}", name, signs)
    }

    #[test]
    fn test_from_json_keeps_file_order() {
        let json = format!(
            "{{\"animals\": [{}, {}]}}",
            animal_json("Wolf", 40),
            animal_json("Bear", 60)
        );
        let table = AffinityTable::from_json(&json).unwrap();
        assert_eq!(table.animals().collect::<Vec<_>>(), vec!["Wolf", "Bear"]);
        assert_eq!(table.rows()[1].score(Sign::Leo), 60);
        assert_eq!(table.position("Bear"), Some(1));
    }

    #[test]
    fn test_duplicate_animal_rejected() {
        let json = format!(
            "{{\"animals\": [{}, {}]}}",
            animal_json("Wolf", 40),
            animal_json("Wolf", 60)
        );
        let err = AffinityTable::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateAnimal { name } if name == "Wolf"));
    }

    #[test]
    fn test_missing_sign_rejected() {
        let json = r#"{"animals": [{"ANIMAL": "Wolf", "ARIES": 10}]}"#;
        let err = AffinityTable::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingSignScore { sign: Sign::Taurus, .. }
        ));
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let json = format!("{{\"animals\": [{}]}}", animal_json("Wolf", 101));
        let err = AffinityTable::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigurationError::ScoreOutOfRange { .. }));

        let json = format!("{{\"animals\": [{}]}}", animal_json("Wolf", 50).replace("50", "50.5"));
        assert!(AffinityTable::from_json(&json).is_err());
    }

    #[test]
    fn test_missing_animals_key() {
        let err = AffinityTable::from_json(r#"{"roster": []}"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingField { .. }));
    }

    #[test]
    fn test_repeated_sign_key_rejected() {
        let json = format!(
            "{{\"animals\": [{}]}}",
            animal_json("Wolf", 40).replacen("\"ARIES\": 40", "\"ARIES\": 40, \"ARIES\": 90", 1)
        );
        let err = AffinityTable::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateKey { key, .. } if key.starts_with("ARIES")));
    }

    #[test]
    fn test_repeated_name_key_rejected() {
        let json = format!(
            "{{\"animals\": [{}]}}",
            animal_json("Wolf", 40).replacen("\"ANIMAL\": \"Wolf\"", "\"ANIMAL\": \"Wolf\", \"ANIMAL\": \"Bear\"", 1)
        );
        let err = AffinityTable::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateKey { key, .. } if key.starts_with("ANIMAL")));
    }

    #[test]
    fn test_repeated_roster_key_rejected() {
        let json = format!(
            "{{\"animals\": [{}], \"animals\": [{}]}}",
            animal_json("Wolf", 40),
            animal_json("Bear", 60)
        );
        let err = AffinityTable::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateKey { key, .. } if key == "animals"));
    }
}
