use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::WildstepError;

/// Route shape of a trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopType {
    ClosedLoop,
    OneWay,
}

impl FromStr for LoopType {
    type Err = WildstepError;

    /// Accepts the raw catalog spellings ("closed loop", "one way") as well
    /// as the snake_case forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "closed loop" | "closed_loop" => Ok(LoopType::ClosedLoop),
            "one way" | "one_way" => Ok(LoopType::OneWay),
            other => Err(WildstepError::InvalidQuery {
                reason: format!("Unknown loop type: {}. Use closed_loop or one_way", other),
            }),
        }
    }
}

/// One trail catalog entry. Loaded once at process start and read-only
/// thereafter; joined one-to-one with a [`Track`](super::Track) by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    /// Unique trail name, also the track id
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Walking duration in hours
    pub duration_hours: f64,

    /// Trail length in kilometers
    pub distance_km: f64,

    /// Total elevation gain in meters
    pub elevation_gain_m: f64,

    /// Route shape
    pub loop_type: LoopType,

    /// Travel distance from the reference city in kilometers
    pub distance_from_city_km: f64,

    /// Drive time from the reference city in hours
    pub drive_time_from_city_hours: f64,

    /// Species associated with the trail; trimmed, lowercased, non-empty
    pub species: BTreeSet<String>,
}

/// Normalize a raw comma-separated species string into a set of trimmed,
/// lowercased names. Empty fragments are dropped.
///
/// Catalog sources store species as e.g. `"Koala, Echidna, Lyrebird"`.
pub fn parse_species(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
