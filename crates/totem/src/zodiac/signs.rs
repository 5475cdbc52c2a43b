//! The twelve tropical signs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const SIGN_COUNT: usize = 12;

const SIGN_NAMES: [&str; SIGN_COUNT] = [
    "ARIES", "TAURUS", "GEMINI", "CANCER",
    "LEO", "VIRGO", "LIBRA", "SCORPIO",
    "SAGITTARIUS", "CAPRICORN", "AQUARIUS", "PISCES",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; SIGN_COUNT] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-case name used as the column key in affinity files
    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index()]
    }

    /// Sign containing an ecliptic longitude in degrees.
    ///
    /// Longitudes outside [0, 360) are wrapped. Returns `None` for NaN or
    /// infinite input.
    pub fn from_longitude(longitude: f64) -> Option<Sign> {
        if !longitude.is_finite() {
            return None;
        }
        let normalized = longitude.rem_euclid(360.0);
        let index = ((normalized / 30.0).floor() as usize).min(SIGN_COUNT - 1);
        Some(Sign::ALL[index])
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSign(pub String);

impl fmt::Display for UnknownSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sign: {}", self.0)
    }
}

impl std::error::Error for UnknownSign {}

impl FromStr for Sign {
    type Err = UnknownSign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        SIGN_NAMES
            .iter()
            .position(|name| *name == upper)
            .map(|i| Sign::ALL[i])
            .ok_or_else(|| UnknownSign(s.to_string()))
    }
}

impl Serialize for Sign {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Sign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
