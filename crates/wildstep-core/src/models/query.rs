use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::trail::{LoopType, Trail};
use crate::error::WildstepError;

/// Difficulty bucket derived from a trail's distance and elevation gain.
///
/// Computed per catalog entry on demand, never stored. See
/// [`classify_difficulty`](crate::recommend::classify_difficulty) for the
/// band table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl FromStr for Difficulty {
    type Err = WildstepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "very_hard" | "very hard" => Ok(Difficulty::VeryHard),
            other => Err(WildstepError::InvalidQuery {
                reason: format!(
                    "Unknown difficulty: {}. Use easy, medium, hard, or very_hard",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very_hard",
        };
        f.write_str(s)
    }
}

/// A recommendation request. Ephemeral, constructed per interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailQuery {
    /// Species the user wants to encounter, in priority order. May be empty.
    pub selected_species: Vec<String>,

    /// Desired difficulty bucket
    pub difficulty: Difficulty,

    /// Longest acceptable walk, in hours
    pub max_duration_hours: f64,

    /// Furthest acceptable travel from the reference city, in kilometers
    pub max_distance_from_city_km: f64,
}

impl TrailQuery {
    /// Build a query, normalizing species names the same way the catalog
    /// does (trim + lowercase) while preserving the user's priority order.
    pub fn new(
        selected_species: impl IntoIterator<Item = impl AsRef<str>>,
        difficulty: Difficulty,
        max_duration_hours: f64,
        max_distance_from_city_km: f64,
    ) -> Self {
        let selected_species = selected_species
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            selected_species,
            difficulty,
            max_duration_hours,
            max_distance_from_city_km,
        }
    }
}

/// Upper-bound predicates for the catalog filter. All bounds are inclusive;
/// loop type is an exact match (no "either" wildcard in this mode).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeFilter {
    pub max_distance_km: f64,
    pub max_elevation_gain_m: f64,
    pub max_duration_hours: f64,
    pub loop_type: LoopType,
}

/// Result of a recommendation: the matched trails plus whether any
/// constraint had to be relaxed to produce them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub trails: Vec<Trail>,
    pub relaxed: bool,
}
