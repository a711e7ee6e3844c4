//! Impact levels reported by axe and their scoring weights

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Severity bucket of a finding
///
/// Ordered by ascending weight, so `Impact::Critical > Impact::Minor`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    #[default]
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    /// All impact levels, in ascending weight
    pub const ALL: [Impact; 4] = [
        Impact::Minor,
        Impact::Moderate,
        Impact::Serious,
        Impact::Critical,
    ];

    /// Penalty weight of a single occurrence
    pub fn weight(&self) -> u32 {
        match self {
            Self::Minor => 1,
            Self::Moderate => 2,
            Self::Serious => 4,
            Self::Critical => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Serious => "serious",
            Self::Critical => "critical",
        }
    }

    /// Normalizes a raw impact value
    ///
    /// Matching is case-insensitive; missing or unrecognized values are minor.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("critical") => Self::Critical,
            Some("serious") => Self::Serious,
            Some("moderate") => Self::Moderate,
            _ => Self::Minor,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Impact {
    /// Accepts any JSON value: strings are normalized, everything else
    /// (`null`, numbers, objects) becomes minor
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::normalize(raw.as_str()))
    }
}
