//! Map viewport estimation: a center and zoom framing a set of tracks.

use geo::Point;

use crate::models::Track;

/// Fallback center when no tracks are selected: Melbourne CBD, matching the
/// map's initial framing.
pub const DEFAULT_CENTER_LAT: f64 = -37.8136;
pub const DEFAULT_CENTER_LON: f64 = 144.9631;

/// Zoom level the reference span is calibrated against.
pub const CALIBRATION_ZOOM: f64 = 12.0;

/// Coordinate span (degrees) that fills the viewport at the calibration
/// zoom: roughly two 256px web-mercator tiles at zoom 12.
pub const REFERENCE_SPAN_DEG: f64 = 0.176;

/// Practical tile-rendering bounds.
pub const MIN_ZOOM: f64 = 5.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Degenerate spans (single point, zero-area box) are floored here to keep
/// the logarithm finite.
const MIN_SPAN_DEG: f64 = 1e-4;

/// Map center and zoom level for a rendering layer to frame a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Point<f64>,
    pub zoom: f64,
}

/// Estimate the viewport framing the given tracks, falling back to the
/// built-in default center.
pub fn estimate_viewport(tracks: &[Track]) -> Viewport {
    estimate_viewport_with_default(tracks, Point::new(DEFAULT_CENTER_LON, DEFAULT_CENTER_LAT))
}

/// Estimate the viewport framing the given tracks.
///
/// Center is the mean of the per-track centroids. Zoom follows the combined
/// bounding-box span logarithmically: halving the span raises zoom by one
/// level, clamped to `[MIN_ZOOM, MAX_ZOOM]`. Empty input yields
/// `default_center` at the calibration zoom; pass
/// [`EngineConfig::default_center`](crate::config::EngineConfig::default_center)
/// to honor a configured fallback.
pub fn estimate_viewport_with_default(tracks: &[Track], default_center: Point<f64>) -> Viewport {
    if tracks.is_empty() {
        return Viewport { center: default_center, zoom: CALIBRATION_ZOOM };
    }

    let n = tracks.len() as f64;
    let (sum_x, sum_y) = tracks.iter().map(Track::centroid).fold((0.0, 0.0), |(sx, sy), c| {
        (sx + c.x(), sy + c.y())
    });
    let center = Point::new(sum_x / n, sum_y / n);

    let zoom = (CALIBRATION_ZOOM + (REFERENCE_SPAN_DEG / combined_span(tracks)).log2())
        .clamp(MIN_ZOOM, MAX_ZOOM);

    Viewport { center, zoom }
}

/// Largest coordinate span of the union bounding box across all tracks,
/// floored to avoid a log singularity on degenerate geometry.
fn combined_span(tracks: &[Track]) -> f64 {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);

    for track in tracks {
        let bbox = track.bounding_box();
        min_x = min_x.min(bbox.min().x);
        min_y = min_y.min(bbox.min().y);
        max_x = max_x.max(bbox.max().x);
        max_y = max_y.max(bbox.max().y);
    }

    ((max_x - min_x).max(max_y - min_y)).max(MIN_SPAN_DEG)
}
