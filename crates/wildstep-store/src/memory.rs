//! In-memory catalog and observation stores.

use std::sync::{Arc, RwLock};

use wildstep_core::error::Result;
use wildstep_core::models::{NewObservation, Observation, ObservationId, Trail};
use wildstep_core::ports::{CatalogStore, ObservationStore};

/// Immutable catalog snapshot. Cheap to clone and share across threads.
#[derive(Clone)]
pub struct MemoryCatalogStore {
    trails: Arc<Vec<Trail>>,
}

impl MemoryCatalogStore {
    pub fn new(trails: Vec<Trail>) -> Self {
        Self { trails: Arc::new(trails) }
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn load_catalog(&self) -> Result<Vec<Trail>> {
        Ok(self.trails.as_ref().clone())
    }
}

struct ObservationLog {
    observations: Vec<Observation>,
    next_id: u64,
}

/// Append-only observation store.
///
/// Id assignment and insertion happen under a single write lock, so two
/// concurrent appends can never read the same id or drop a row.
#[derive(Clone)]
pub struct MemoryObservationStore {
    log: Arc<RwLock<ObservationLog>>,
}

impl MemoryObservationStore {
    pub fn new() -> Self {
        Self {
            log: Arc::new(RwLock::new(ObservationLog { observations: Vec::new(), next_id: 1 })),
        }
    }
}

impl Default for MemoryObservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationStore for MemoryObservationStore {
    fn append(&self, observation: NewObservation) -> Result<Observation> {
        let mut log = self.log.write().unwrap();
        let id = ObservationId(log.next_id);
        log.next_id += 1;

        let stored = observation.with_id(id);
        log.observations.push(stored.clone());
        tracing::debug!(id = id.0, species = %stored.species_label, "appended observation");
        Ok(stored)
    }

    fn snapshot(&self) -> Result<Vec<Observation>> {
        Ok(self.log.read().unwrap().observations.clone())
    }
}
