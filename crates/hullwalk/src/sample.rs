//! Point sets: uniform samples in a square plus their centroid.
//!
//! Model
//! - `count` points, each axis drawn independently and uniformly from
//!   `[-half_extent, half_extent)`.
//! - The centroid is the arithmetic mean, computed once in the constructor and
//!   never updated; `PointSet` has no mutators.
//! - Determinism: every sample is drawn from a `StdRng` keyed by a `u64` seed.
//!   `SeedSource::Entropy` draws that seed from the OS and records it, so any
//!   run can be replayed with `SeedSource::Fixed`.

use nalgebra::Vector2;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;

use crate::geom::mean;

/// Sampling configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    pub count: usize,
    /// Each axis is sampled from `[-half_extent, half_extent)`.
    pub half_extent: f64,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            count: 20,
            half_extent: 0.9,
        }
    }
}

impl SampleCfg {
    fn validate(&self) -> Result<(), SampleError> {
        if self.count == 0 {
            return Err(SampleError::invalid("count must be >= 1"));
        }
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(SampleError::invalid("half_extent must be finite and > 0"));
        }
        if !(2.0 * self.half_extent).is_finite() {
            return Err(SampleError::invalid("half_extent is too large to sample"));
        }
        Ok(())
    }
}

/// Where the sampler's seed comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedSource {
    Fixed(u64),
    Entropy,
}

impl SeedSource {
    /// Concrete seed for this draw.
    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Entropy => StdRng::from_entropy().next_u64(),
        }
    }
}

#[derive(Debug)]
pub enum SampleError {
    InvalidParams { reason: String },
}

impl SampleError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid point set: {reason}"),
        }
    }
}

impl std::error::Error for SampleError {}

/// Immutable point sample with its centroid.
#[derive(Clone, Debug)]
pub struct PointSet {
    points: Vec<Vector2<f64>>,
    centroid: Vector2<f64>,
    seed: Option<u64>,
}

impl PointSet {
    /// Draw `cfg.count` uniform points. The resolved seed is kept for replay.
    pub fn generate(cfg: SampleCfg, source: SeedSource) -> Result<Self, SampleError> {
        cfg.validate()?;
        let seed = source.resolve();
        let mut rng = StdRng::seed_from_u64(seed);
        let axis = Uniform::new(-cfg.half_extent, cfg.half_extent);
        let points: Vec<Vector2<f64>> = (0..cfg.count)
            .map(|_| {
                let x = axis.sample(&mut rng);
                let y = axis.sample(&mut rng);
                Vector2::new(x, y)
            })
            .collect();
        let mut set = Self::from_points(points)?;
        set.seed = Some(seed);
        Ok(set)
    }

    /// Wrap explicit points (e.g. loaded from disk). Rejects empty input and
    /// non-finite coordinates.
    pub fn from_points(points: Vec<Vector2<f64>>) -> Result<Self, SampleError> {
        if let Some(i) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(SampleError::invalid(format!(
                "point {i} has a non-finite coordinate"
            )));
        }
        let centroid = mean(&points).ok_or_else(|| SampleError::invalid("no points"))?;
        Ok(Self {
            points,
            centroid,
            seed: None,
        })
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    #[inline]
    pub fn centroid(&self) -> Vector2<f64> {
        self.centroid
    }

    /// Seed used by `generate`; `None` for explicit point lists.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
