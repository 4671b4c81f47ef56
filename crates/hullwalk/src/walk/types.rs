//! Data types for the walker: configuration, step results, and errors.

use nalgebra::Vector2;
use std::fmt;

use crate::geom::EQ_EPS;

/// Walker configuration.
#[derive(Clone, Copy, Debug)]
pub struct WalkCfg {
    /// Vertex identity tolerance (see `geom::points_eq`).
    pub eps: f64,
    /// Call budget is `call_budget_factor * N²`, floored at `MIN_CALL_BUDGET`.
    pub call_budget_factor: u64,
}

impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            eps: EQ_EPS,
            call_budget_factor: 4,
        }
    }
}

/// Floor for the call budget so tiny inputs still get room to close.
pub const MIN_CALL_BUDGET: u64 = 16;

impl WalkCfg {
    /// Maximum number of non-terminal `step()` calls for `n` points.
    pub fn call_limit(&self, n: usize) -> u64 {
        let n = n as u64;
        self.call_budget_factor
            .saturating_mul(n.saturating_mul(n))
            .max(MIN_CALL_BUDGET)
    }
}

/// How a productive step changed the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// Empty chain received the first point of the set.
    Seeded,
    /// Single-vertex chain had its start replaced by the winner.
    Corrected,
    /// Winner appended at the tip.
    Appended,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Seeded => "seeded",
            StepKind::Corrected => "corrected",
            StepKind::Appended => "appended",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one productive step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Productive-step counter after this step (1-based).
    pub step: u64,
    pub kind: StepKind,
    /// Vertices dropped from the front by loop pruning in this call.
    pub pruned: usize,
    /// Vertex that was seeded, substituted, or appended.
    pub vertex: Vector2<f64>,
    /// Winning score; `None` for `Seeded`.
    pub angle_deg: Option<f64>,
    pub chain_len: usize,
}

/// Result of a `step()` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    Progressed(StepReport),
    /// Chain returned to its start; further calls are no-ops.
    Done,
}

impl StepOutcome {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, StepOutcome::Done)
    }

    #[inline]
    pub fn report(&self) -> Option<&StepReport> {
        match self {
            StepOutcome::Progressed(r) => Some(r),
            StepOutcome::Done => None,
        }
    }
}

/// Fatal walker conditions. None of them is retried internally.
#[derive(Clone, Debug, PartialEq)]
pub enum WalkError {
    /// No point distinct from the tip (or the set is empty when seeding).
    NoCandidate { tip: Option<Vector2<f64>> },
    /// More than `limit` calls without closure.
    IterationLimitExceeded { limit: u64 },
    /// A resumed chain holds a vertex that is not in the point set.
    ForeignVertex { index: usize },
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidate { tip: Some(t) } => {
                write!(f, "no candidate distinct from tip ({}, {})", t.x, t.y)
            }
            Self::NoCandidate { tip: None } => write!(f, "no candidate: point set is empty"),
            Self::IterationLimitExceeded { limit } => {
                write!(f, "chain did not close within {limit} steps")
            }
            Self::ForeignVertex { index } => {
                write!(f, "chain vertex {index} is not a member of the point set")
            }
        }
    }
}

impl std::error::Error for WalkError {}
