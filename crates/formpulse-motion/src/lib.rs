//! # Formpulse-Motion
//!
//! Repetition counting and form-correctness analysis over a stream of
//! body-joint keypoints.
//!
//! ## Pipeline
//!
//! Per rendered video frame, the upstream pose model hands the engine one
//! [`formpulse_core::KeypointFrame`]. Two independent consumers share it:
//!
//! 1. **Rep counting** — the configured joint triple is reduced to an
//!    interior angle, smoothed over a short rolling window, and fed to a
//!    finite phase machine (idle → descending → bottom → ascending → top)
//!    with hysteresis margins and a minimum inter-rep interval.
//! 2. **Form rules** — exercise-specific stateless predicates over the raw
//!    keypoints, each optionally producing a severity-tagged feedback item.
//!
//! The two never update each other's state; a frame with occluded or
//! low-confidence joints simply produces no signal on the affected path.
//!
//! ## Movement conventions
//!
//! Down-up exercises (squat, deadlift, push-up) descend from an extended
//! start and count on reaching the top again. Up-down exercises (curl,
//! row, overhead press) contract first and count on returning to the
//! contracted bottom, so the two directions count at opposite ends of the
//! cycle.

pub mod analyzer;
pub mod config;
pub mod exercise;
pub mod rep_counter;
pub mod rules;
pub mod smoother;

pub use analyzer::*;
pub use config::*;
pub use exercise::*;
pub use rep_counter::*;
pub use rules::*;
pub use smoother::*;
