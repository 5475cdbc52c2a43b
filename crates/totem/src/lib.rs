//! Animal totem scoring.
//!
//! A fixed animal × sign affinity table is joined with the sign of each of
//! 13 chart positions, weighted per planet, summed and ranked. The three
//! best animals get two derived views: per-planet strength relative to the
//! best animal of the roster, and the six most salient planets of their
//! own row.

pub mod analysis;
pub mod chart;
pub mod error;
pub mod fixed;
mod json;
pub mod scoring;
pub mod tables;
pub mod zodiac;

pub use analysis::{AnalysisReport, Analyzer, InterpretationContext, SalientPlacement};
pub use chart::{ChartPositions, RawPosition};
pub use error::{ConfigurationError, ErrorKind, InputError, ScoringError};
pub use fixed::Fixed;
pub use tables::{AffinityRow, AffinityTable, MultiplierTable, ScoringTables, WeightTable};
pub use zodiac::{Planet, Sign, PLANET_COUNT, SIGN_COUNT};
