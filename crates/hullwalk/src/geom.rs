//! 2D primitives shared by the sampler and the walker.
//!
//! - `EQ_EPS`: default tolerance for vertex identity.
//! - `points_eq`: explicit epsilon equality (no `PartialEq` on points).
//! - `oriented_angle_deg`: the angular score used to rank candidates.
//!
//! Vector arithmetic (add, sub, scale, norm) is nalgebra's `Vector2<f64>`.

use nalgebra::Vector2;

/// Default identity tolerance: two points are the same vertex when both
/// coordinate differences are strictly below this.
pub const EQ_EPS: f64 = 1e-9;

/// Epsilon equality on both coordinates.
#[inline]
pub fn points_eq(a: Vector2<f64>, b: Vector2<f64>, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

/// z-component of `a × b`. Positive for a→b counterclockwise.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Angle from `v1` to `v2` in degrees, as used for candidate ranking.
///
/// Counterclockwise turns map to `[0, 180]`. Clockwise turns are NOT
/// normalised by `+360`: a raw result `a < 0` becomes `180 - a`, so the
/// clockwise half lands in `(180, 360]` in reverse order (raw −170° → 350°,
/// raw −10° → 190°). Candidate ordering depends on this exact mapping.
#[inline]
pub fn oriented_angle_deg(v1: Vector2<f64>, v2: Vector2<f64>) -> f64 {
    let dot = v1.dot(&v2);
    let det = cross(v1, v2);
    let ang = det.atan2(dot).to_degrees();
    if ang < 0.0 {
        180.0 - ang
    } else {
        ang
    }
}

/// Arithmetic mean of `points`; `None` for an empty slice.
pub fn mean(points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p);
    Some(sum / points.len() as f64)
}
