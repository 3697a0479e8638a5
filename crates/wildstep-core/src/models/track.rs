use geo::{coord, Point, Rect};

use crate::error::{Result, WildstepError};

/// Valid latitude range in decimal degrees
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Valid longitude range in decimal degrees
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// The geometric path of a trail: an ordered waypoint sequence.
///
/// Points are stored in traversal order, `x` = longitude, `y` = latitude
/// (WGS84 decimal degrees). A track with fewer than two points is rejected
/// at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    id: String,
    points: Vec<Point<f64>>,
}

impl Track {
    /// Create a track from pre-built points, validating length and ranges.
    pub fn new(id: impl Into<String>, points: Vec<Point<f64>>) -> Result<Self> {
        let id = id.into();

        if points.len() < 2 {
            return Err(WildstepError::MalformedTrack {
                id,
                reason: format!("expected at least 2 waypoints, found {}", points.len()),
            });
        }

        for (idx, point) in points.iter().enumerate() {
            if !coordinates_in_range(point.y(), point.x()) {
                return Err(WildstepError::MalformedTrack {
                    id,
                    reason: format!(
                        "waypoint {} out of range: latitude {}, longitude {}",
                        idx,
                        point.y(),
                        point.x()
                    ),
                });
            }
        }

        Ok(Self { id, points })
    }

    /// Create a track from `(latitude, longitude)` waypoint records, the
    /// shape raw trail sources use.
    pub fn from_waypoints(id: impl Into<String>, waypoints: &[(f64, f64)]) -> Result<Self> {
        let points = waypoints.iter().map(|&(lat, lon)| Point::new(lon, lat)).collect();
        Self::new(id, points)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Waypoints in traversal order. Never empty.
    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    /// Unweighted arithmetic mean of the raw waypoint coordinates.
    ///
    /// This is an approximation, not a true polyline centroid: waypoint
    /// density weights the result. Adequate for map-centering, which is its
    /// only consumer; kept as-is because viewport estimation is calibrated
    /// against it.
    pub fn centroid(&self) -> Point<f64> {
        let n = self.points.len() as f64;
        let (sum_x, sum_y) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x(), sy + p.y()));
        Point::new(sum_x / n, sum_y / n)
    }

    /// Componentwise min/max bounding box over all waypoints.
    pub fn bounding_box(&self) -> Rect<f64> {
        let first = self.points[0];
        let (min_x, min_y, max_x, max_y) = self.points.iter().fold(
            (first.x(), first.y(), first.x(), first.y()),
            |(min_x, min_y, max_x, max_y), p| {
                (
                    min_x.min(p.x()),
                    min_y.min(p.y()),
                    max_x.max(p.x()),
                    max_y.max(p.y()),
                )
            },
        );
        Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y })
    }
}

/// Check that a coordinate pair lies in the valid WGS84 ranges.
pub fn coordinates_in_range(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude)
        && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude)
}
