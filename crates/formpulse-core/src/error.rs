//! Error types for the Formpulse motion-analysis engine.
//!
//! Routine missing-data conditions (occluded joints, low-confidence
//! detections) are not errors; they are expressed as `Option` at the call
//! site. This enum covers contract violations only.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid rep configuration: {0}")]
    InvalidRepConfig(String),

    #[error("angle ranges overlap: bottom {bottom:?} must lie below top {top:?}")]
    OverlappingRanges { bottom: (f64, f64), top: (f64, f64) },

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
