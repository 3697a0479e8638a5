//! Domain models for the Wildstep engine

pub mod observation;
pub mod query;
pub mod track;
pub mod trail;

pub use observation::{NewObservation, Observation, ObservationId};
pub use query::{Difficulty, RangeFilter, Recommendation, TrailQuery};
pub use track::Track;
pub use trail::{parse_species, LoopType, Trail};
