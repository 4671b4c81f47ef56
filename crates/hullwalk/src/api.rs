//! Curated surface for the driver binary and experiments.
//!
//! Everything here is a re-export; the owning modules stay the source of
//! truth. Breaking changes are allowed.

// Primitives
pub use crate::geom::{cross, mean, oriented_angle_deg, points_eq, EQ_EPS};
// Point sets
pub use crate::sample::{PointSet, SampleCfg, SampleError, SeedSource};
// Walker
pub use crate::walk::{
    first_revisit, select_next, walk_with_defaults, Candidate, HullWalker, StepKind, StepOutcome,
    StepReport, WalkCfg, WalkError, CORRECTION_ANGLE_DEG, MIN_CALL_BUDGET,
};

use nalgebra::Vector2;

/// Closed-polygon perimeter of `chain` (last vertex back to the first).
/// Used by the driver's run summary.
pub fn closed_length(chain: &[Vector2<f64>]) -> f64 {
    if chain.len() < 2 {
        return 0.0;
    }
    let open: f64 = chain.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
    let (first, last) = (chain[0], chain[chain.len() - 1]);
    open + (first - last).norm()
}
