//! Trail recommendation: difficulty classification plus multi-attribute
//! matching with staged constraint relaxation.
//!
//! A recommendation should never come back empty while a looser match
//! exists, so constraints are dropped in stages. Species sighting is the
//! user's primary motivating constraint and is relaxed last: difficulty,
//! duration and travel distance all go first.

use crate::models::{Difficulty, Recommendation, Trail, TrailQuery};

/// Classify a trail into a difficulty bucket from its distance and
/// elevation gain.
///
/// Bands are evaluated in order; the first match wins:
///
/// | Bucket    | Condition                                    |
/// |-----------|----------------------------------------------|
/// | easy      | distance <= 5 AND gain <= 500                |
/// | medium    | distance in [5, 10] AND gain in [500, 1000]  |
/// | hard      | distance in [10, 15] AND gain in [1000, 1500]|
/// | very_hard | distance > 15 OR gain > 1500                 |
/// | (default) | easy                                         |
///
/// The OR in the very_hard band is checked after the three AND bands, so a
/// short, brutally steep trail (3 km, 1600 m) classifies as very_hard while
/// e.g. (7 km, 300 m) falls through every band to the easy default. Total
/// over the whole (distance, gain) plane.
pub fn classify_difficulty(distance_km: f64, elevation_gain_m: f64) -> Difficulty {
    if distance_km <= 5.0 && elevation_gain_m <= 500.0 {
        Difficulty::Easy
    } else if (5.0..=10.0).contains(&distance_km) && (500.0..=1000.0).contains(&elevation_gain_m) {
        Difficulty::Medium
    } else if (10.0..=15.0).contains(&distance_km) && (1000.0..=1500.0).contains(&elevation_gain_m)
    {
        Difficulty::Hard
    } else if distance_km > 15.0 || elevation_gain_m > 1500.0 {
        Difficulty::VeryHard
    } else {
        Difficulty::Easy
    }
}

/// Recommend trails for a query, relaxing constraints stage by stage until
/// something matches. Returns the matched trails in catalog order and
/// whether relaxation was needed. Never fails for a structurally valid
/// query; an empty catalog yields `([], relaxed = true)`.
pub fn recommend(catalog: &[Trail], query: &TrailQuery) -> Recommendation {
    let strict = strict_matches(catalog, query);
    if !strict.is_empty() {
        tracing::debug!(results = strict.len(), "strict stage satisfied");
        return Recommendation { trails: strict, relaxed: false };
    }

    let species_only = species_matches(catalog, query);
    if !species_only.is_empty() {
        tracing::debug!(results = species_only.len(), "relaxed to species-only stage");
        return Recommendation { trails: species_only, relaxed: true };
    }

    // Partial fallback: first selected species with any (substring,
    // case-insensitive) presence in the catalog wins.
    for species in &query.selected_species {
        let partial: Vec<Trail> = catalog
            .iter()
            .filter(|t| t.species.iter().any(|s| s.contains(species.as_str())))
            .cloned()
            .collect();
        if !partial.is_empty() {
            tracing::debug!(
                species = species.as_str(),
                results = partial.len(),
                "relaxed to any-one-species stage"
            );
            return Recommendation { trails: partial, relaxed: true };
        }
    }

    tracing::debug!("no stage produced results");
    Recommendation { trails: Vec::new(), relaxed: true }
}

/// Stage 1: species superset containment AND exact difficulty AND both
/// numeric ceilings.
fn strict_matches(catalog: &[Trail], query: &TrailQuery) -> Vec<Trail> {
    catalog
        .iter()
        .filter(|t| {
            contains_all_species(t, query)
                && classify_difficulty(t.distance_km, t.elevation_gain_m) == query.difficulty
                && t.duration_hours <= query.max_duration_hours
                && t.distance_from_city_km <= query.max_distance_from_city_km
        })
        .cloned()
        .collect()
}

/// Stage 2: species superset containment only.
fn species_matches(catalog: &[Trail], query: &TrailQuery) -> Vec<Trail> {
    catalog.iter().filter(|t| contains_all_species(t, query)).cloned().collect()
}

/// Trail species superset-contains every selected species. Vacuously true
/// for an empty selection.
fn contains_all_species(trail: &Trail, query: &TrailQuery) -> bool {
    query.selected_species.iter().all(|s| trail.species.contains(s.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_species, LoopType};

    fn trail(
        name: &str,
        species: &str,
        distance: f64,
        gain: f64,
        duration: f64,
        dist_city: f64,
    ) -> Trail {
        Trail {
            name: name.to_string(),
            description: String::new(),
            duration_hours: duration,
            distance_km: distance,
            elevation_gain_m: gain,
            loop_type: LoopType::ClosedLoop,
            distance_from_city_km: dist_city,
            drive_time_from_city_hours: dist_city / 60.0,
            species: parse_species(species),
        }
    }

    #[test]
    fn test_difficulty_bands() {
        assert_eq!(classify_difficulty(3.0, 200.0), Difficulty::Easy);
        assert_eq!(classify_difficulty(5.0, 500.0), Difficulty::Easy);
        assert_eq!(classify_difficulty(7.0, 800.0), Difficulty::Medium);
        assert_eq!(classify_difficulty(12.0, 1200.0), Difficulty::Hard);
        assert_eq!(classify_difficulty(20.0, 100.0), Difficulty::VeryHard);
        assert_eq!(classify_difficulty(1.0, 2000.0), Difficulty::VeryHard);
    }

    #[test]
    fn test_difficulty_asymmetric_edge() {
        // Short but brutally steep: lands in very_hard via the OR band.
        assert_eq!(classify_difficulty(3.0, 1600.0), Difficulty::VeryHard);
    }

    #[test]
    fn test_difficulty_band_gaps_default_to_easy() {
        // Matches no numeric band: 7km is past easy, 300m is below medium.
        assert_eq!(classify_difficulty(7.0, 300.0), Difficulty::Easy);
        assert_eq!(classify_difficulty(12.0, 600.0), Difficulty::Easy);
    }

    #[test]
    fn test_strict_match() {
        let catalog = vec![trail("Koala Walk", "Koala, Echidna", 4.0, 200.0, 2.0, 40.0)];
        let query = TrailQuery::new(["koala"], Difficulty::Easy, 3.0, 50.0);

        let rec = recommend(&catalog, &query);
        assert!(!rec.relaxed);
        assert_eq!(rec.trails.len(), 1);
        assert_eq!(rec.trails[0].name, "Koala Walk");
    }

    #[test]
    fn test_difficulty_mismatch_relaxes_to_species_only() {
        let catalog = vec![trail("Koala Walk", "Koala, Echidna", 4.0, 200.0, 2.0, 40.0)];
        let query = TrailQuery::new(["koala"], Difficulty::Hard, 3.0, 50.0);

        let rec = recommend(&catalog, &query);
        assert!(rec.relaxed);
        assert_eq!(rec.trails.len(), 1);
    }

    #[test]
    fn test_numeric_ceiling_mismatch_relaxes() {
        let catalog = vec![trail("Koala Walk", "Koala", 4.0, 200.0, 2.0, 40.0)];
        // Trail is 40km out, ceiling is 10km
        let query = TrailQuery::new(["koala"], Difficulty::Easy, 3.0, 10.0);

        let rec = recommend(&catalog, &query);
        assert!(rec.relaxed);
        assert_eq!(rec.trails.len(), 1);
    }

    #[test]
    fn test_any_one_species_stage_respects_selection_order() {
        let catalog = vec![
            trail("Emu Flats", "Emu", 4.0, 200.0, 2.0, 40.0),
            trail("Wombat Bend", "Common Wombat", 6.0, 700.0, 3.0, 60.0),
        ];
        // No trail has both; "wombat" is first in priority order and matches
        // "common wombat" by substring.
        let query = TrailQuery::new(["wombat", "emu"], Difficulty::Easy, 3.0, 50.0);

        let rec = recommend(&catalog, &query);
        assert!(rec.relaxed);
        assert_eq!(rec.trails.len(), 1);
        assert_eq!(rec.trails[0].name, "Wombat Bend");
    }

    #[test]
    fn test_empty_species_selection_is_numeric_only() {
        let catalog = vec![
            trail("Koala Walk", "Koala", 4.0, 200.0, 2.0, 40.0),
            trail("Big Climb", "Koala", 20.0, 1800.0, 9.0, 40.0),
        ];
        let query = TrailQuery::new(Vec::<String>::new(), Difficulty::Easy, 3.0, 50.0);

        let rec = recommend(&catalog, &query);
        assert!(!rec.relaxed);
        assert_eq!(rec.trails.len(), 1);
        assert_eq!(rec.trails[0].name, "Koala Walk");
    }

    #[test]
    fn test_empty_catalog_returns_empty_relaxed() {
        let query = TrailQuery::new(["koala"], Difficulty::Easy, 3.0, 50.0);
        let rec = recommend(&[], &query);
        assert!(rec.trails.is_empty());
        assert!(rec.relaxed);
    }

    #[test]
    fn test_unknown_species_returns_empty_relaxed() {
        let catalog = vec![trail("Koala Walk", "Koala", 4.0, 200.0, 2.0, 40.0)];
        let query = TrailQuery::new(["yeti"], Difficulty::Easy, 3.0, 50.0);
        let rec = recommend(&catalog, &query);
        assert!(rec.trails.is_empty());
        assert!(rec.relaxed);
    }

    #[test]
    fn test_results_preserve_catalog_order() {
        let catalog = vec![
            trail("B Trail", "Koala", 4.0, 200.0, 2.0, 40.0),
            trail("A Trail", "Koala", 4.5, 250.0, 2.5, 45.0),
        ];
        let query = TrailQuery::new(["koala"], Difficulty::Easy, 3.0, 50.0);
        let rec = recommend(&catalog, &query);
        let names: Vec<&str> = rec.trails.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B Trail", "A Trail"]);
    }
}
