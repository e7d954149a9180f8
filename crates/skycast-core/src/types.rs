//! Shared domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Measurement system for temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Degree label used when rendering temperatures.
    pub fn degree_label(self) -> char {
        match self {
            Self::Metric => 'C',
            Self::Imperial => 'F',
        }
    }

    /// Canonical lowercase name, as sent to the weather upstream.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized units string.
#[derive(Debug, thiserror::Error)]
#[error("unknown units '{0}', expected 'metric' or 'imperial'")]
pub struct InvalidUnits(String);

impl FromStr for Units {
    type Err = InvalidUnits;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(InvalidUnits(other.to_string())),
        }
    }
}

/// Current conditions for a single city.
///
/// Produced fresh per fetch and never cached directly; only the derived
/// answer text is cached. Both fields must be present in the upstream
/// payload or the fetch fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature: f64,
    pub description: String,
}
