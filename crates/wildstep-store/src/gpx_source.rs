//! Filesystem-backed track source reading one GPX file per trail.

use gpx::read;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::RwLock;

use wildstep_core::error::{Result, WildstepError};
use wildstep_core::models::Track;
use wildstep_core::ports::TrackSource;

/// Loads tracks from `<dir>/<id>.gpx`, flattening track segments in file
/// order. Parsed tracks are cached by id: source files are static, so no
/// invalidation is needed.
pub struct GpxTrackSource {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Track>>,
}

impl GpxTrackSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), cache: RwLock::new(HashMap::new()) }
    }

    fn parse(&self, id: &str) -> Result<Track> {
        let path = self.dir.join(format!("{}.gpx", id));

        if !path.exists() {
            return Err(WildstepError::TrackNotFound { id: id.to_string() });
        }

        let file = File::open(&path).map_err(|e| WildstepError::MalformedTrack {
            id: id.to_string(),
            reason: format!("failed to open GPX file: {}", e),
        })?;

        let gpx = read(BufReader::new(file)).map_err(|e| WildstepError::MalformedTrack {
            id: id.to_string(),
            reason: format!("failed to parse GPX: {}", e),
        })?;

        // Track points in document order, across all tracks and segments.
        let points: Vec<geo::Point<f64>> = gpx
            .tracks
            .iter()
            .flat_map(|t| t.segments.iter())
            .flat_map(|s| s.points.iter())
            .map(|wp| wp.point())
            .collect();

        Track::new(id, points)
    }
}

impl TrackSource for GpxTrackSource {
    fn load_track(&self, id: &str) -> Result<Track> {
        if let Some(track) = self.cache.read().unwrap().get(id) {
            return Ok(track.clone());
        }

        let track = self.parse(id)?;
        tracing::debug!(id, points = track.points().len(), "parsed track file");
        self.cache.write().unwrap().insert(id.to_string(), track.clone());
        Ok(track)
    }

    fn track_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("gpx") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
