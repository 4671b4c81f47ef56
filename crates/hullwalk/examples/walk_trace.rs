//! Print the step-by-step trace of one walk.
//!
//! Usage:
//!   cargo run -p hullwalk --example walk_trace -- [seed] [count]

use std::sync::Arc;

use hullwalk::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let count = args.next().and_then(|s| s.parse().ok()).unwrap_or(20);
    let cfg = SampleCfg {
        count,
        ..SampleCfg::default()
    };
    let points = Arc::new(PointSet::generate(cfg, SeedSource::Fixed(seed)).expect("sample"));
    let c = points.centroid();
    println!("seed {seed}: n={count}, centroid=({:.4}, {:.4})", c.x, c.y);

    let mut walker = HullWalker::new(points, WalkCfg::default());
    loop {
        match walker.step() {
            Ok(StepOutcome::Progressed(r)) => println!(
                "step {:>3} {:<9} pruned={} len={} angle={} -> ({:.4}, {:.4})",
                r.step,
                r.kind.as_str(),
                r.pruned,
                r.chain_len,
                r.angle_deg
                    .map(|a| format!("{a:.2}"))
                    .unwrap_or_else(|| "-".into()),
                r.vertex.x,
                r.vertex.y
            ),
            Ok(StepOutcome::Done) => {
                println!("closed after {} steps", walker.productive_steps());
                break;
            }
            Err(e) => {
                eprintln!("walk failed: {e}");
                break;
            }
        }
    }
}
