//! Geometric utilities for joint-angle computation.
//!
//! All computations are in 2D image-plane coordinates. The pose model's
//! y axis grows downward, which these helpers do not need to care about:
//! the interior angle at a joint is invariant under that flip.

use nalgebra::Vector2;

use crate::types::{KeypointDetection, Position2D};

/// Interior angle at the vertex `p2`, in degrees within `[0, 180]`.
///
/// Computed from the atan2 difference of the vectors `p2 -> p1` and
/// `p2 -> p3`; raw differences above 180° are reflected. Callers must
/// confidence-gate the three points first (`KeypointFrame::confident`) —
/// this function never fails, it only answers the question for the
/// coordinates it is given.
pub fn joint_angle(p1: &Position2D, p2: &Position2D, p3: &Position2D) -> f64 {
    let rad = (p3.y - p2.y).atan2(p3.x - p2.x) - (p1.y - p2.y).atan2(p1.x - p2.x);
    let mut deg = rad.to_degrees().abs();
    if deg > 180.0 {
        deg = 360.0 - deg;
    }
    deg
}

/// Interior angle at the vertex detection of a joint triple
pub fn detection_angle(
    p1: &KeypointDetection,
    vertex: &KeypointDetection,
    p3: &KeypointDetection,
) -> f64 {
    joint_angle(&p1.position, &vertex.position, &p3.position)
}

/// Unsigned angle between two vectors, in radians
pub fn angle_between(v1: &Vector2<f64>, v2: &Vector2<f64>) -> f64 {
    let dot = v1.dot(v2);
    let norms = v1.norm() * v2.norm();
    if norms < 1e-10 {
        0.0
    } else {
        (dot / norms).clamp(-1.0, 1.0).acos()
    }
}

/// Signed horizontal offset `a.x - b.x` in pixels
pub fn horizontal_offset(a: &Position2D, b: &Position2D) -> f64 {
    a.x - b.x
}

/// Signed vertical offset `a.y - b.y` in pixels (positive = `a` lower on screen)
pub fn vertical_offset(a: &Position2D, b: &Position2D) -> f64 {
    a.y - b.y
}
