//! Incremental hull walk: grow a polyline over a point set, one vertex per step.
//!
//! Purpose
//! - Hold the chain and advance it with `HullWalker::step()`, which the
//!   caller invokes on its own cadence (a render tick, a batch loop, a test).
//!
//! Rule per step
//! - If the tip repeats an earlier vertex: at index 0 the walk is closed
//!   (`Done`, idempotent); anywhere else the prefix up to and including that
//!   vertex is dropped and the step continues on the shortened chain.
//! - Empty chain: seed with the first point of the set.
//! - Otherwise rank every point `p != tip` by
//!   `oriented_angle_deg(tip - centroid, p - tip)` and take the smallest.
//!   While the chain has a single vertex, a winner scoring below 90° replaces
//!   that vertex instead of being appended.
//!
//! The reference direction is tip→away-from-centroid, not the previous edge,
//! so this is not gift wrapping; the walk may cross itself, and pruning is
//! what removes those excursions.
//!
//! Layout: `types.rs` (config, reports, errors), `select.rs` (ranking and
//! revisit detection), `walker.rs` (state machine).

mod select;
mod types;
mod walker;

pub use select::{first_revisit, select_next, Candidate};
pub use types::{StepKind, StepOutcome, StepReport, WalkCfg, WalkError, MIN_CALL_BUDGET};
pub use walker::{walk_with_defaults, HullWalker, CORRECTION_ANGLE_DEG};

#[cfg(test)]
mod tests;
