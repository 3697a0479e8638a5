//! Storage adapters for the Wildstep engine: a filesystem GPX track source
//! and in-memory catalog/observation stores implementing the ports defined
//! in `wildstep-core`.

pub mod gpx_source;
pub mod memory;

pub use gpx_source::GpxTrackSource;
pub use memory::{MemoryCatalogStore, MemoryObservationStore};
