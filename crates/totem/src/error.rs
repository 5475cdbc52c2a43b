//! Error taxonomy for table loading and scoring.

use crate::zodiac::{Planet, Sign};
use thiserror::Error;

/// Malformed or inconsistent static configuration (affinity, weight or
/// multiplier tables). Fatal to every analysis that uses the tables.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Invalid JSON in {table}: {message}")]
    InvalidJson { table: &'static str, message: String },
    #[error("Missing required field in {table}: {field}")]
    MissingField { table: &'static str, field: String },
    #[error("Duplicate animal in affinity table: {name}")]
    DuplicateAnimal { name: String },
    #[error("Animal {animal} is missing a score for {sign}")]
    MissingSignScore { animal: String, sign: Sign },
    #[error("Unexpected field {field} for animal {animal}")]
    UnknownField { animal: String, field: String },
    #[error("Invalid score for {animal} - {sign}: {value} (expected an integer in [0, 100])")]
    ScoreOutOfRange {
        animal: String,
        sign: Sign,
        value: String,
    },
    #[error("Unknown planet in {table}: {name}")]
    UnknownPlanet { table: &'static str, name: String },
    #[error("Unknown sign in {table}: {name}")]
    UnknownSign { table: &'static str, name: String },
    #[error("Planet {planet} defined more than once in {table}")]
    DuplicatePlanet { table: &'static str, planet: Planet },
    #[error("Key {key} appears more than once in {table}")]
    DuplicateKey { table: &'static str, key: String },
    #[error("No weight configured for {planet}")]
    MissingWeight { planet: Planet },
    #[error("No multiplier configured for {planet} in {sign}")]
    MissingMultiplier { planet: Planet, sign: Sign },
    #[error("Invalid {table} value for {planet}: {value}. {message}")]
    InvalidWeight {
        table: &'static str,
        planet: Planet,
        value: String,
        message: String,
    },
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Problems with the per-analysis chart positions. Fatal to that analysis
/// only.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Chart positions are missing required planet {planet}")]
    MissingPlanet { planet: Planet },
    #[error("Unknown planet in chart positions: {name}")]
    UnknownPlanet { name: String },
    #[error("Planet {planet} appears more than once in chart positions")]
    DuplicatePlanet { planet: Planet },
    #[error("Unrecognized sign for {planet}: {sign}")]
    UnknownSign { planet: Planet, sign: String },
    #[error("Invalid longitude for {planet}: {value}")]
    InvalidLongitude { planet: Planet, value: f64 },
    #[error("Invalid chart positions JSON: {0}")]
    InvalidJson(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Input,
    InsufficientRoster,
}

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("Cannot select top {required}: roster has only {found} animals")]
    InsufficientRoster { required: usize, found: usize },
}

impl ScoringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoringError::Configuration(_) => ErrorKind::Configuration,
            ScoringError::Input(_) => ErrorKind::Input,
            ScoringError::InsufficientRoster { .. } => ErrorKind::InsufficientRoster,
        }
    }
}
