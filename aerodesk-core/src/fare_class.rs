use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Fare classes a flight can be sold in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AirlineClass {
    Economy,
    PremiumEconomy,
    Business,
    FirstClass,
}

/// Display metadata for a fare class.
///
/// The multiplier is informational only. Stored base prices are never
/// scaled by it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FareClassInfo {
    pub code: AirlineClass,
    pub label: &'static str,
    pub multiplier: f64,
}

static FARE_CLASSES: [FareClassInfo; 4] = [
    FareClassInfo { code: AirlineClass::Economy, label: "Economy", multiplier: 1.0 },
    FareClassInfo { code: AirlineClass::PremiumEconomy, label: "Premium Economy", multiplier: 1.5 },
    FareClassInfo { code: AirlineClass::Business, label: "Business", multiplier: 2.0 },
    FareClassInfo { code: AirlineClass::FirstClass, label: "First Class", multiplier: 4.0 },
];

impl AirlineClass {
    /// Every fare class in table order.
    pub fn table() -> &'static [FareClassInfo] {
        &FARE_CLASSES
    }

    pub fn info(self) -> &'static FareClassInfo {
        // The table holds exactly one row per variant, in declaration order.
        &FARE_CLASSES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn multiplier(self) -> f64 {
        self.info().multiplier
    }

    /// Stable name used in storage and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            AirlineClass::Economy => "ECONOMY",
            AirlineClass::PremiumEconomy => "PREMIUM_ECONOMY",
            AirlineClass::Business => "BUSINESS",
            AirlineClass::FirstClass => "FIRST_CLASS",
        }
    }

    /// Parses an optional filter value. Absent or empty input means
    /// "no filter" and is never parsed.
    pub fn parse_filter(value: Option<&str>) -> Result<Option<Self>, CoreError> {
        match value {
            None | Some("") => Ok(None),
            Some(name) => name.parse().map(Some),
        }
    }
}

impl FromStr for AirlineClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FARE_CLASSES
            .iter()
            .map(|row| row.code)
            .find(|code| code.as_str() == s)
            .ok_or_else(|| CoreError::InvalidArgument(format!("Unknown fare class: {s}")))
    }
}

impl fmt::Display for AirlineClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
