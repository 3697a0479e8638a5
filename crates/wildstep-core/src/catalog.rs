//! Range/equality filtering and lookups over the trail catalog.
//!
//! The catalog is an immutable snapshot loaded once at process start; every
//! function here is a pure view over it and preserves catalog order.

use std::collections::BTreeSet;

use crate::models::{RangeFilter, Trail};

/// Keep entries satisfying every bound of the filter. Empty output is a
/// valid result; "no filter applied" is expressed by the caller not calling
/// this at all.
pub fn filter_by_range(trails: &[Trail], filter: &RangeFilter) -> Vec<Trail> {
    trails
        .iter()
        .filter(|t| {
            t.distance_km <= filter.max_distance_km
                && t.elevation_gain_m <= filter.max_elevation_gain_m
                && t.duration_hours <= filter.max_duration_hours
                && t.loop_type == filter.loop_type
        })
        .cloned()
        .collect()
}

/// Case-insensitive prefix search on trail names, for typeahead. A blank
/// term returns the whole catalog.
pub fn search_by_name_prefix(trails: &[Trail], term: &str) -> Vec<Trail> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return trails.to_vec();
    }
    trails
        .iter()
        .filter(|t| t.name.to_lowercase().starts_with(&term))
        .cloned()
        .collect()
}

/// Union of every trail's species set: the catalog's known-species
/// vocabulary. Entries are already trimmed and lowercased.
pub fn species_vocabulary(trails: &[Trail]) -> BTreeSet<String> {
    trails.iter().flat_map(|t| t.species.iter().cloned()).collect()
}
