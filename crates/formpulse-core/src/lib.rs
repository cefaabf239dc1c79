//! # Formpulse-Core
//!
//! Core types and utilities for the Formpulse motion-analysis engine:
//! body-joint keypoints, per-frame pose snapshots, and the 2D geometry
//! used for joint-angle computation.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
