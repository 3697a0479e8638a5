//! Observation ingest: geofence an upload to the active track's corridor,
//! classify the image, and append the sighting.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::Utc;

use crate::config::EngineConfig;
use crate::corridor;
use crate::error::{Result, WildstepError};
use crate::models::{NewObservation, Observation, Track};
use crate::ports::{ObservationStore, SpeciesClassifier};

/// Delay between append retries.
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// An upload request as it arrives from the presentation layer.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub image: Vec<u8>,
}

/// Outcome of an upload attempt. Being outside the corridor is an expected
/// rejection, not an error.
#[derive(Debug)]
pub enum UploadOutcome {
    Accepted(Observation),
    OutsideCorridor,
}

/// Coordinates corridor checking, classification and storage for uploads
/// against one active track.
pub struct UploadService<'a, C: SpeciesClassifier, S: ObservationStore> {
    classifier: &'a C,
    store: &'a S,
    /// Known-species vocabulary of the catalog, trimmed and lowercased.
    vocabulary: BTreeSet<String>,
    corridor_radius_m: f64,
    retries: u32,
}

impl<'a, C: SpeciesClassifier, S: ObservationStore> UploadService<'a, C, S> {
    pub fn new(
        classifier: &'a C,
        store: &'a S,
        vocabulary: BTreeSet<String>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            classifier,
            store,
            vocabulary,
            corridor_radius_m: config.corridor_radius_m.value,
            retries: config.upload_retries.value,
        }
    }

    /// Handle one upload against the active track.
    ///
    /// Rejects positions outside the corridor. Classifier failures and
    /// exhausted store retries surface as `UploadFailed`, safe for the user
    /// to retry wholesale.
    pub fn handle(&self, track: &Track, request: UploadRequest) -> Result<UploadOutcome> {
        let position = corridor::validate_point(request.latitude, request.longitude)?;

        if !corridor::is_within_corridor(position, track, self.corridor_radius_m) {
            tracing::debug!(track = track.id(), "upload rejected: outside corridor");
            return Ok(UploadOutcome::OutsideCorridor);
        }

        let labels = self.classifier.classify(&request.image).map_err(|e| {
            WildstepError::UploadFailed { reason: format!("classification failed: {}", e) }
        })?;
        let species_label = self.resolve_label(&labels)?;

        let observation = NewObservation {
            latitude: request.latitude,
            longitude: request.longitude,
            timestamp: Utc::now(),
            species_label,
            image: request.image,
        };

        let stored = self.append_with_retry(observation)?;
        tracing::debug!(track = track.id(), id = stored.id.0, "observation stored");
        Ok(UploadOutcome::Accepted(stored))
    }

    /// Pick the stored label: the first (best-ranked) label that appears in
    /// the catalog's species vocabulary, else the top-ranked label as-is.
    fn resolve_label(&self, labels: &[String]) -> Result<String> {
        let normalized: Vec<String> =
            labels.iter().map(|l| l.trim().to_lowercase()).filter(|l| !l.is_empty()).collect();

        normalized
            .iter()
            .find(|l| self.vocabulary.contains(l.as_str()))
            .or_else(|| normalized.first())
            .cloned()
            .ok_or_else(|| WildstepError::UploadFailed {
                reason: "classifier returned no labels".to_string(),
            })
    }

    /// Bounded retry around the store append to absorb transient contention.
    fn append_with_retry(&self, observation: NewObservation) -> Result<Observation> {
        let attempts = self.retries.max(1);
        let mut last_reason = String::new();

        for attempt in 1..=attempts {
            match self.store.append(observation.clone()) {
                Ok(stored) => return Ok(stored),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "observation append failed");
                    last_reason = e.to_string();
                    if attempt < attempts {
                        std::thread::sleep(RETRY_BACKOFF);
                    }
                }
            }
        }

        Err(WildstepError::UploadFailed {
            reason: format!("store append exhausted {} attempts: {}", attempts, last_reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ObservationId;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::RwLock;

    struct FixedClassifier(Vec<String>);

    impl SpeciesClassifier for FixedClassifier {
        fn classify(&self, _image: &[u8]) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingClassifier;

    impl SpeciesClassifier for FailingClassifier {
        fn classify(&self, _image: &[u8]) -> Result<Vec<String>> {
            Err(WildstepError::UploadFailed { reason: "vision API timeout".to_string() })
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        observations: RwLock<Vec<Observation>>,
        next_id: AtomicU64,
        /// Number of leading append calls to fail.
        fail_first: AtomicU64,
    }

    impl ObservationStore for RecordingStore {
        fn append(&self, observation: NewObservation) -> Result<Observation> {
            if self.fail_first.load(Ordering::SeqCst) > 0 {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
                return Err(WildstepError::UploadFailed {
                    reason: "transient conflict".to_string(),
                });
            }
            let id = ObservationId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let stored = observation.with_id(id);
            self.observations.write().unwrap().push(stored.clone());
            Ok(stored)
        }

        fn snapshot(&self) -> Result<Vec<Observation>> {
            Ok(self.observations.read().unwrap().clone())
        }
    }

    fn track() -> Track {
        Track::from_waypoints("t", &[(-37.80, 144.96), (-37.81, 144.97)]).unwrap()
    }

    fn service<'a, C: SpeciesClassifier>(
        classifier: &'a C,
        store: &'a RecordingStore,
    ) -> UploadService<'a, C, RecordingStore> {
        let vocabulary: BTreeSet<String> =
            ["koala".to_string(), "echidna".to_string()].into_iter().collect();
        UploadService::new(classifier, store, vocabulary, &EngineConfig::with_defaults())
    }

    fn on_trail_request() -> UploadRequest {
        UploadRequest { latitude: -37.805, longitude: 144.965, image: vec![1, 2, 3] }
    }

    #[test]
    fn test_upload_on_trail_is_accepted() {
        let classifier = FixedClassifier(vec!["Koala".to_string()]);
        let store = RecordingStore::default();
        let svc = service(&classifier, &store);

        let outcome = svc.handle(&track(), on_trail_request()).unwrap();
        match outcome {
            UploadOutcome::Accepted(obs) => {
                assert_eq!(obs.species_label, "koala");
                assert_eq!(obs.id, ObservationId(1));
            }
            UploadOutcome::OutsideCorridor => panic!("expected acceptance"),
        }
        assert_eq!(store.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn test_upload_far_away_is_rejected_without_storing() {
        let classifier = FixedClassifier(vec!["Koala".to_string()]);
        let store = RecordingStore::default();
        let svc = service(&classifier, &store);

        let request =
            UploadRequest { latitude: -37.805, longitude: 145.30, image: vec![1] };
        let outcome = svc.handle(&track(), request).unwrap();
        assert!(matches!(outcome, UploadOutcome::OutsideCorridor));
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_position_is_an_error() {
        let classifier = FixedClassifier(vec!["Koala".to_string()]);
        let store = RecordingStore::default();
        let svc = service(&classifier, &store);

        let request = UploadRequest { latitude: 95.0, longitude: 144.96, image: vec![1] };
        let err = svc.handle(&track(), request).unwrap_err();
        assert!(matches!(err, WildstepError::InvalidPoint { .. }));
    }

    #[test]
    fn test_classifier_failure_maps_to_upload_failed() {
        let store = RecordingStore::default();
        let svc = service(&FailingClassifier, &store);

        let err = svc.handle(&track(), on_trail_request()).unwrap_err();
        assert!(matches!(err, WildstepError::UploadFailed { .. }));
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_label_outside_vocabulary_falls_back_to_top_label() {
        let classifier =
            FixedClassifier(vec!["Marsupial".to_string(), "Mammal".to_string()]);
        let store = RecordingStore::default();
        let svc = service(&classifier, &store);

        match svc.handle(&track(), on_trail_request()).unwrap() {
            UploadOutcome::Accepted(obs) => assert_eq!(obs.species_label, "marsupial"),
            UploadOutcome::OutsideCorridor => panic!("expected acceptance"),
        }
    }

    #[test]
    fn test_vocabulary_label_preferred_over_rank() {
        let classifier = FixedClassifier(vec![
            "Mammal".to_string(),
            "Echidna".to_string(),
            "Koala".to_string(),
        ]);
        let store = RecordingStore::default();
        let svc = service(&classifier, &store);

        match svc.handle(&track(), on_trail_request()).unwrap() {
            UploadOutcome::Accepted(obs) => assert_eq!(obs.species_label, "echidna"),
            UploadOutcome::OutsideCorridor => panic!("expected acceptance"),
        }
    }

    #[test]
    fn test_transient_store_failure_is_retried() {
        let classifier = FixedClassifier(vec!["Koala".to_string()]);
        let store = RecordingStore::default();
        store.fail_first.store(2, Ordering::SeqCst);
        let svc = service(&classifier, &store);

        let outcome = svc.handle(&track(), on_trail_request()).unwrap();
        assert!(matches!(outcome, UploadOutcome::Accepted(_)));
    }

    #[test]
    fn test_exhausted_retries_surface_upload_failed() {
        let classifier = FixedClassifier(vec!["Koala".to_string()]);
        let store = RecordingStore::default();
        store.fail_first.store(10, Ordering::SeqCst);
        let svc = service(&classifier, &store);

        let err = svc.handle(&track(), on_trail_request()).unwrap_err();
        assert!(matches!(err, WildstepError::UploadFailed { .. }));
    }
}
