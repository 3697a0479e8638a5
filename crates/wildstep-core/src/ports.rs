//! Ports consumed by the engine. Implementations live in adapter crates
//! (see `wildstep-store`); the core only depends on these traits.

use crate::error::Result;
use crate::models::{NewObservation, Observation, Track, Trail};

/// Port for raw track geometry sources (per-trail GPX files or similar).
pub trait TrackSource {
    /// Load and validate the track for a trail id.
    ///
    /// A missing track is `TrackNotFound`; a present-but-unusable one
    /// (unparseable, fewer than two points, out-of-range coordinates) is
    /// `MalformedTrack`. The two are distinct so callers can tell "no such
    /// trail" from "trail unavailable".
    fn load_track(&self, id: &str) -> Result<Track>;

    /// All track ids the source knows about.
    fn track_ids(&self) -> Result<Vec<String>>;
}

/// Port for the trail catalog store. The catalog is loaded once and treated
/// as an immutable snapshot for the life of the process.
pub trait CatalogStore {
    fn load_catalog(&self) -> Result<Vec<Trail>>;
}

/// Port for the observation (upload) store.
pub trait ObservationStore {
    /// Append an observation, assigning the next id atomically. Two
    /// concurrent appends must never produce the same id or lose a row.
    fn append(&self, observation: NewObservation) -> Result<Observation>;

    /// A point-in-time snapshot of all observations. May be slightly stale;
    /// staleness of a few seconds is acceptable for map overlays.
    fn snapshot(&self) -> Result<Vec<Observation>>;
}

/// Port for the external image species classifier.
///
/// Failable by design: implementations wrap a remote call and must surface
/// errors rather than block indefinitely; the upload path maps any failure
/// to `UploadFailed`.
pub trait SpeciesClassifier {
    /// Ranked label guesses for an image, best first.
    fn classify(&self, image: &[u8]) -> Result<Vec<String>>;
}
