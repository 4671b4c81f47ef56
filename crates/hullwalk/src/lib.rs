//! Centroid-referenced incremental hull walk.
//!
//! A `HullWalker` grows a polyline over a fixed `PointSet`, one decision per
//! `step()`, until the polyline returns to its start. Callers own the cadence:
//! a renderer can redraw `walker.chain()` after every call and export a frame
//! whenever `productive_steps()` moves.
//!
//! Modules
//! - `geom`: epsilon equality and the oriented-angle score.
//! - `sample`: reproducible uniform point sets and their centroid.
//! - `walk`: the walker state machine, its config, reports and errors.

pub mod api;
pub mod geom;
pub mod sample;
pub mod walk;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{oriented_angle_deg, points_eq, EQ_EPS};
    pub use crate::sample::{PointSet, SampleCfg, SampleError, SeedSource};
    pub use crate::walk::{
        HullWalker, StepKind, StepOutcome, StepReport, WalkCfg, WalkError,
    };
    pub use nalgebra::Vector2 as Vec2;
}
