//! Error types for the Wildstep engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WildstepError {
    // Track errors
    #[error("Malformed track '{id}': {reason}")]
    MalformedTrack { id: String, reason: String },

    #[error("Track not found: {id}")]
    TrackNotFound { id: String },

    // Query errors
    #[error("Invalid point: latitude {latitude}, longitude {longitude}")]
    InvalidPoint { latitude: f64, longitude: f64 },

    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    // Upload errors
    #[error("Upload failed: {reason}. Safe to retry the whole operation")]
    UploadFailed { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WildstepError>;
