//! Planet → sign positions of one birth chart.
//!
//! Produced by an external ephemeris; the scoring engine only needs the
//! sign each of the 13 positions falls in.

use crate::error::InputError;
use crate::json::{self, Node};
use crate::zodiac::{Planet, Sign, PLANET_COUNT};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A chart position as delivered by a collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPosition {
    /// Sign name, e.g. `"LEO"`
    Sign(String),
    /// Ecliptic longitude in degrees
    Longitude(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartPositions {
    signs: [Sign; PLANET_COUNT],
}

impl ChartPositions {
    /// Positions indexed by canonical planet order
    pub fn new(signs: [Sign; PLANET_COUNT]) -> Self {
        Self { signs }
    }

    /// Every planet in the same sign
    pub fn uniform(sign: Sign) -> Self {
        Self::new([sign; PLANET_COUNT])
    }

    /// Build from named entries. Every one of the 13 planets must be
    /// present exactly once; nothing is defaulted.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (K, RawPosition)>,
        K: AsRef<str>,
    {
        let mut signs: [Option<Sign>; PLANET_COUNT] = [None; PLANET_COUNT];
        for (name, position) in entries {
            let name = name.as_ref();
            let planet: Planet = name.parse().map_err(|_| InputError::UnknownPlanet {
                name: name.to_string(),
            })?;
            if signs[planet.index()].is_some() {
                return Err(InputError::DuplicatePlanet { planet });
            }
            let sign = match position {
                RawPosition::Sign(sign) => {
                    sign.parse::<Sign>()
                        .map_err(|_| InputError::UnknownSign { planet, sign })?
                }
                RawPosition::Longitude(value) => Sign::from_longitude(value)
                    .ok_or(InputError::InvalidLongitude { planet, value })?,
            };
            signs[planet.index()] = Some(sign);
        }

        let mut out = [Sign::Aries; PLANET_COUNT];
        for planet in Planet::ALL {
            out[planet.index()] = signs[planet.index()].ok_or(InputError::MissingPlanet { planet })?;
        }
        Ok(Self::new(out))
    }

    /// Build from planet name → sign name pairs
    pub fn from_signs<I, K, V>(entries: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::from_entries(
            entries
                .into_iter()
                .map(|(k, v)| (k, RawPosition::Sign(v.into()))),
        )
    }

    /// Parse `{ "Sun": "ARIES", "Moon": 95.2, ... }`; numbers are longitudes.
    /// Every key is seen as written, so a repeated planet is rejected.
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        let parsed = json::parse(text).map_err(|e| InputError::InvalidJson(e.to_string()))?;
        let obj = parsed
            .as_object()
            .ok_or_else(|| InputError::InvalidJson("chart positions must be an object".to_string()))?;

        let mut entries = Vec::with_capacity(obj.len());
        for (key, value) in obj {
            let position = match value {
                Node::String(s) => RawPosition::Sign(s.clone()),
                Node::Number(lon) => RawPosition::Longitude(*lon),
                other => {
                    return Err(InputError::InvalidJson(format!(
                        "position for {} must be a sign name or longitude, got {}",
                        key, other
                    )))
                }
            };
            entries.push((key.as_str(), position));
        }
        Self::from_entries(entries)
    }

    pub fn sign(&self, planet: Planet) -> Sign {
        self.signs[planet.index()]
    }

    /// `(planet, sign)` pairs in canonical planet order
    pub fn iter(&self) -> impl Iterator<Item = (Planet, Sign)> + '_ {
        Planet::ALL.iter().map(move |&planet| (planet, self.sign(planet)))
    }
}

impl Serialize for ChartPositions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PLANET_COUNT))?;
        for (planet, sign) in self.iter() {
            map.serialize_entry(planet.name(), sign.name())?;
        }
        map.end()
    }
}
