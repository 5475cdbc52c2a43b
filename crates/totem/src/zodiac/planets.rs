//! Canonical chart positions.
//!
//! Ten classical bodies plus Ascendant, Midheaven and the lunar North Node.
//! The order of [`Planet::ALL`] is the canonical order used for iteration
//! and for every tie-break in the scoring pipeline.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const PLANET_COUNT: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Planet {
    Sun,
    Ascendant,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    Midheaven,
}

impl Planet {
    pub const ALL: [Planet; PLANET_COUNT] = [
        Planet::Sun,
        Planet::Ascendant,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
        Planet::NorthNode,
        Planet::Midheaven,
    ];

    /// Position in the canonical order (0-12)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name as it appears in weight files and reports
    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Ascendant => "Ascendant",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
            Planet::NorthNode => "North Node",
            Planet::Midheaven => "MC",
        }
    }

    /// Default personality weight of each position
    pub fn default_weight(self) -> f64 {
        match self {
            Planet::Sun => 23.0,
            Planet::Ascendant => 18.0,
            Planet::Moon => 15.0,
            Planet::Mercury => 7.0,
            Planet::Venus => 6.0,
            Planet::Mars => 6.0,
            Planet::Jupiter => 5.0,
            Planet::Saturn => 5.0,
            Planet::Uranus => 3.0,
            Planet::Neptune => 3.0,
            Planet::Pluto => 2.0,
            Planet::NorthNode => 2.0,
            Planet::Midheaven => 5.0,
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name does not denote one of the 13 positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlanet(pub String);

impl fmt::Display for UnknownPlanet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown planet: {}", self.0)
    }
}

impl std::error::Error for UnknownPlanet {}

impl FromStr for Planet {
    type Err = UnknownPlanet;

    /// Accepts display names, ephemeris ids (`north_node`, `asc`, `mc`)
    /// and `Midheaven`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', '-'], " ");
        let planet = match key.as_str() {
            "sun" => Planet::Sun,
            "ascendant" | "asc" => Planet::Ascendant,
            "moon" => Planet::Moon,
            "mercury" => Planet::Mercury,
            "venus" => Planet::Venus,
            "mars" => Planet::Mars,
            "jupiter" => Planet::Jupiter,
            "saturn" => Planet::Saturn,
            "uranus" => Planet::Uranus,
            "neptune" => Planet::Neptune,
            "pluto" => Planet::Pluto,
            "north node" | "northnode" => Planet::NorthNode,
            "mc" | "midheaven" => Planet::Midheaven,
            _ => return Err(UnknownPlanet(s.to_string())),
        };
        Ok(planet)
    }
}

impl Serialize for Planet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Planet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
