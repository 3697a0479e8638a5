//! Proximity testing between observed points and a track corridor.
//!
//! The corridor is the zone within `max_distance_m` of the track polyline.
//! Distance is measured to the nearest point on each segment (great-circle,
//! via a local equirectangular projection to find the closest point). This is
//! an upgrade over the nearest-waypoint-only test, which under-detects
//! proximity between sparse waypoints on long segments.

use geo::{Distance, Haversine, Point};

use crate::error::{Result, WildstepError};
use crate::models::track::coordinates_in_range;
use crate::models::{Observation, Track};

/// Default corridor radius in meters.
pub const DEFAULT_CORRIDOR_RADIUS_M: f64 = 500.0;

/// Validate a query point and convert it to a `geo` point (x = lon, y = lat).
pub fn validate_point(latitude: f64, longitude: f64) -> Result<Point<f64>> {
    if !coordinates_in_range(latitude, longitude) {
        return Err(WildstepError::InvalidPoint { latitude, longitude });
    }
    Ok(Point::new(longitude, latitude))
}

/// True iff `point` lies within `max_distance_m` of the track polyline.
///
/// O(n) over the track's segments, short-circuiting on the first hit.
/// Monotonic in the radius: a hit at distance `d` is a hit at any `d' > d`.
pub fn is_within_corridor(point: Point<f64>, track: &Track, max_distance_m: f64) -> bool {
    track
        .points()
        .windows(2)
        .any(|seg| point_to_segment_m(point, seg[0], seg[1]) <= max_distance_m)
}

/// Great-circle distance in meters from `point` to the closest point on the
/// segment `a`-`b`.
///
/// The closest point is found in a local equirectangular projection around
/// the segment, then measured with Haversine. Accurate to well under a meter
/// at trail scale; exact geodesic cross-track math is not warranted here.
fn point_to_segment_m(point: Point<f64>, a: Point<f64>, b: Point<f64>) -> f64 {
    // Longitude degrees shrink with latitude; scale by the segment's mean.
    let k = ((a.y() + b.y()) / 2.0).to_radians().cos();

    // Longitude deltas taken the short way around, so segments crossing the
    // antimeridian do not produce a ~360 degree span.
    let a_rel = lon_delta(point.x(), a.x());
    let b_rel = lon_delta(point.x(), b.x());

    let ax = a_rel * k;
    let ay = a.y() - point.y();
    let bx = b_rel * k;
    let by = b.y() - point.y();

    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((-ax) * dx + (-ay) * dy) / len_sq
    }
    .clamp(0.0, 1.0);

    let closest = Point::new(
        point.x() + a_rel + t * (b_rel - a_rel),
        a.y() + t * (b.y() - a.y()),
    );
    Haversine.distance(point, closest)
}

/// Signed longitude difference `to - from`, normalized to (-180, 180].
fn lon_delta(from: f64, to: f64) -> f64 {
    let d = to - from;
    if d > 180.0 {
        d - 360.0
    } else if d <= -180.0 {
        d + 360.0
    } else {
        d
    }
}

/// Filter an observation snapshot down to the sightings inside the track
/// corridor, preserving snapshot order.
pub fn observations_in_corridor(
    observations: &[Observation],
    track: &Track,
    max_distance_m: f64,
) -> Vec<Observation> {
    observations
        .iter()
        .filter(|obs| {
            coordinates_in_range(obs.latitude, obs.longitude)
                && is_within_corridor(
                    Point::new(obs.longitude, obs.latitude),
                    track,
                    max_distance_m,
                )
        })
        .cloned()
        .collect()
}
