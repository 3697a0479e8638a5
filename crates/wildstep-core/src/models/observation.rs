use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an uploaded observation.
///
/// Strictly increasing; assigned by the observation store at append time,
/// never by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObservationId(pub u64);

/// An uploaded wildlife sighting. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Store-assigned identifier
    pub id: ObservationId,

    /// Where the sighting was reported
    pub latitude: f64,
    pub longitude: f64,

    /// When the upload happened
    pub timestamp: DateTime<Utc>,

    /// Resolved species label
    pub species_label: String,

    /// Opaque image bytes; not interpreted by the engine
    #[serde(skip)]
    pub image: Vec<u8>,
}

/// An observation prior to id assignment.
#[derive(Debug, Clone)]
pub struct NewObservation {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub species_label: String,
    pub image: Vec<u8>,
}

impl NewObservation {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: ObservationId) -> Observation {
        Observation {
            id,
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: self.timestamp,
            species_label: self.species_label,
            image: self.image,
        }
    }
}
