use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Qualitative severity tier of a risk.
///
/// Variants are declared in ascending order so `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    Low,
    Moderate,
    High,
    Critical,
}

impl Band {
    /// All bands, lowest first
    pub const ALL: [Band; 4] = [Band::Low, Band::Moderate, Band::High, Band::Critical];

    /// Severity interval covered by this band within the reachable range 1..=25.
    pub fn severity_range(&self) -> RangeInclusive<u16> {
        match self {
            Band::Low => 1..=4,
            Band::Moderate => 5..=9,
            Band::High => 10..=16,
            Band::Critical => 17..=25,
        }
    }

    /// Label in the register's display language (Spanish)
    pub fn display_label(&self) -> &'static str {
        match self {
            Band::Low => "Bajo",
            Band::Moderate => "Moderado",
            Band::High => "Alto",
            Band::Critical => "Crítico",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Low => "Low",
            Band::Moderate => "Moderate",
            Band::High => "High",
            Band::Critical => "Critical",
        }
    }
}

impl std::str::FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Band::Low),
            "Moderate" => Ok(Band::Moderate),
            "High" => Ok(Band::High),
            "Critical" => Ok(Band::Critical),
            _ => Err(format!(
                "Invalid band: {}. Expected one of Low, Moderate, High, Critical",
                s
            )),
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
