//! Candidate ranking and revisit detection (pure helpers for the walker).

use nalgebra::Vector2;

use crate::geom::{oriented_angle_deg, points_eq};

/// Winning candidate of one selection round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Index into the point set.
    pub index: usize,
    pub point: Vector2<f64>,
    pub angle_deg: f64,
}

/// Pick the point with the smallest `oriented_angle_deg(tip - centroid, p - tip)`.
///
/// Points equal to `tip` are skipped. Ties keep the earliest index.
/// Returns `None` when every point coincides with `tip`.
pub fn select_next(
    points: &[Vector2<f64>],
    centroid: Vector2<f64>,
    tip: Vector2<f64>,
    eps: f64,
) -> Option<Candidate> {
    let v1 = tip - centroid;
    let mut best: Option<Candidate> = None;
    for (index, &p) in points.iter().enumerate() {
        if points_eq(p, tip, eps) {
            continue;
        }
        let angle_deg = oriented_angle_deg(v1, p - tip);
        if best.map_or(true, |b| angle_deg < b.angle_deg) {
            best = Some(Candidate {
                index,
                point: p,
                angle_deg,
            });
        }
    }
    best
}

/// Index of the first vertex before the tip that equals the tip.
///
/// `Some(0)` means the chain is closed; `Some(i)` with `i > 0` marks a loop
/// whose prefix `0..=i` must be dropped.
pub fn first_revisit(chain: &[Vector2<f64>], eps: f64) -> Option<usize> {
    let (tip, body) = chain.split_last()?;
    body.iter().position(|p| points_eq(*p, *tip, eps))
}
