//! The stateful walker: owns the chain and advances it one `step()` at a time.

use nalgebra::Vector2;
use std::sync::Arc;

use crate::geom::points_eq;
use crate::sample::PointSet;

use super::select::{first_revisit, select_next};
use super::types::{StepKind, StepOutcome, StepReport, WalkCfg, WalkError};

/// Score below which a second-vertex decision replaces the seed instead of
/// extending the chain.
pub const CORRECTION_ANGLE_DEG: f64 = 90.0;

/// Incremental, centroid-referenced hull walk over a fixed point set.
///
/// The point set is shared read-only; the chain is owned here and only
/// changes inside `step()`.
#[derive(Clone, Debug)]
pub struct HullWalker {
    points: Arc<PointSet>,
    cfg: WalkCfg,
    chain: Vec<Vector2<f64>>,
    productive: u64,
    calls: u64,
    limit: u64,
}

impl HullWalker {
    pub fn new(points: Arc<PointSet>, cfg: WalkCfg) -> Self {
        let limit = cfg.call_limit(points.len());
        let chain = Vec::with_capacity(points.len() + 1);
        Self {
            points,
            cfg,
            chain,
            productive: 0,
            calls: 0,
            limit,
        }
    }

    /// Resume from a recorded chain. Every vertex must belong to the set.
    pub fn from_chain(
        points: Arc<PointSet>,
        cfg: WalkCfg,
        chain: Vec<Vector2<f64>>,
    ) -> Result<Self, WalkError> {
        if let Some(index) = chain.iter().position(|v| {
            !points
                .points()
                .iter()
                .any(|p| points_eq(*p, *v, cfg.eps))
        }) {
            return Err(WalkError::ForeignVertex { index });
        }
        let mut walker = Self::new(points, cfg);
        walker.chain = chain;
        Ok(walker)
    }

    /// Advance the chain by one decision.
    ///
    /// Order inside one call: closure check, loop pruning, then seeding or
    /// selection. A closed chain yields `Done` forever without touching state
    /// or the call budget.
    pub fn step(&mut self) -> Result<StepOutcome, WalkError> {
        let revisit = if self.chain.len() >= 2 {
            first_revisit(&self.chain, self.cfg.eps)
        } else {
            None
        };
        if revisit == Some(0) {
            return Ok(StepOutcome::Done);
        }
        if self.calls >= self.limit {
            return Err(WalkError::IterationLimitExceeded { limit: self.limit });
        }
        self.calls += 1;

        let pruned = match revisit {
            Some(idx) => {
                self.chain.drain(..=idx);
                idx + 1
            }
            None => 0,
        };

        let Some(&tip) = self.chain.last() else {
            let seed = *self
                .points
                .points()
                .first()
                .ok_or(WalkError::NoCandidate { tip: None })?;
            self.chain.push(seed);
            return Ok(self.progressed(StepKind::Seeded, pruned, seed, None));
        };

        let winner = select_next(
            self.points.points(),
            self.points.centroid(),
            tip,
            self.cfg.eps,
        )
        .ok_or(WalkError::NoCandidate { tip: Some(tip) })?;

        let kind = if self.chain.len() == 1 && winner.angle_deg < CORRECTION_ANGLE_DEG {
            self.chain[0] = winner.point;
            StepKind::Corrected
        } else {
            self.chain.push(winner.point);
            StepKind::Appended
        };
        Ok(self.progressed(kind, pruned, winner.point, Some(winner.angle_deg)))
    }

    /// Step until closure, returning the report of every productive step.
    pub fn run_to_closure(&mut self) -> Result<Vec<StepReport>, WalkError> {
        let mut reports = Vec::new();
        loop {
            match self.step()? {
                StepOutcome::Progressed(r) => reports.push(r),
                StepOutcome::Done => return Ok(reports),
            }
        }
    }

    fn progressed(
        &mut self,
        kind: StepKind,
        pruned: usize,
        vertex: Vector2<f64>,
        angle_deg: Option<f64>,
    ) -> StepOutcome {
        self.productive += 1;
        StepOutcome::Progressed(StepReport {
            step: self.productive,
            kind,
            pruned,
            vertex,
            angle_deg,
            chain_len: self.chain.len(),
        })
    }

    #[inline]
    pub fn chain(&self) -> &[Vector2<f64>] {
        &self.chain
    }

    #[inline]
    pub fn point_set(&self) -> &Arc<PointSet> {
        &self.points
    }

    #[inline]
    pub fn cfg(&self) -> WalkCfg {
        self.cfg
    }

    /// Number of productive steps so far.
    #[inline]
    pub fn productive_steps(&self) -> u64 {
        self.productive
    }

    /// Non-terminal calls consumed from the budget.
    #[inline]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    #[inline]
    pub fn call_limit(&self) -> u64 {
        self.limit
    }

    /// Whether the chain's tip equals its start (and it has at least one edge).
    pub fn is_closed(&self) -> bool {
        self.chain.len() >= 2 && first_revisit(&self.chain, self.cfg.eps) == Some(0)
    }
}

/// Convenience: walk `points` with default tolerances and return the closed chain.
pub fn walk_with_defaults(points: Arc<PointSet>) -> Result<Vec<Vector2<f64>>, WalkError> {
    let mut walker = HullWalker::new(points, WalkCfg::default());
    walker.run_to_closure()?;
    Ok(walker.chain)
}
