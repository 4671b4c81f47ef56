use super::*;
use crate::geom::points_eq;
use crate::sample::{PointSet, SampleCfg, SeedSource};
use nalgebra::{vector, Vector2};
use proptest::prelude::*;
use std::sync::Arc;

fn set(points: &[Vector2<f64>]) -> Arc<PointSet> {
    Arc::new(PointSet::from_points(points.to_vec()).unwrap())
}

fn square() -> Vec<Vector2<f64>> {
    vec![
        vector![1.0, 1.0],
        vector![-1.0, 1.0],
        vector![-1.0, -1.0],
        vector![1.0, -1.0],
    ]
}

fn expect_report(outcome: StepOutcome) -> StepReport {
    match outcome {
        StepOutcome::Progressed(r) => r,
        StepOutcome::Done => panic!("expected progress"),
    }
}

#[test]
fn square_closes_counterclockwise() {
    let pts = square();
    let mut w = HullWalker::new(set(&pts), WalkCfg::default());
    let reports = w.run_to_closure().unwrap();
    assert_eq!(reports.len(), 5);
    assert_eq!(reports[0].kind, StepKind::Seeded);
    assert!(reports[1..].iter().all(|r| r.kind == StepKind::Appended));
    assert!(reports.iter().all(|r| r.pruned == 0));
    assert_eq!(w.chain(), &[pts[0], pts[1], pts[2], pts[3], pts[0]][..]);
    assert!(w.is_closed());
    assert_eq!(w.productive_steps(), 5);
}

#[test]
fn done_is_idempotent() {
    let mut w = HullWalker::new(set(&square()), WalkCfg::default());
    w.run_to_closure().unwrap();
    let frozen = w.chain().to_vec();
    let calls = w.calls();
    for _ in 0..5 {
        assert_eq!(w.step().unwrap(), StepOutcome::Done);
    }
    assert_eq!(w.chain(), &frozen[..]);
    assert_eq!(w.productive_steps(), 5);
    assert_eq!(w.calls(), calls);
}

#[test]
fn closure_on_resumed_chain() {
    let pts = square();
    let chain = vec![pts[0], pts[1], pts[2], pts[0]];
    let mut w = HullWalker::from_chain(set(&pts), WalkCfg::default(), chain.clone()).unwrap();
    assert_eq!(w.step().unwrap(), StepOutcome::Done);
    assert_eq!(w.chain(), &chain[..]);
    assert_eq!(w.productive_steps(), 0);
}

#[test]
fn loop_prefix_is_pruned_then_selection_continues() {
    // Chain [A, B, C, B]: B first repeats at index 1, so A and the first B
    // are dropped and selection resumes from the tip of [C, B].
    let pts = square();
    let (a, b, c) = (pts[0], pts[1], pts[2]);
    let mut w =
        HullWalker::from_chain(set(&pts), WalkCfg::default(), vec![a, b, c, b]).unwrap();
    let r = expect_report(w.step().unwrap());
    assert_eq!(r.pruned, 2);
    assert_eq!(r.kind, StepKind::Appended);
    assert_eq!(&w.chain()[..2], &[c, b][..]);
    // From B=(-1,1) with centroid 0 the next vertex is C=(-1,-1) at 135°.
    assert_eq!(w.chain().len(), 3);
    assert_eq!(r.vertex, c);
    assert!((r.angle_deg.unwrap() - 135.0).abs() < 1e-9);
    // [C, B, C] is closed on its new start.
    assert_eq!(w.step().unwrap(), StepOutcome::Done);
}

#[test]
fn full_chain_can_overshoot_by_one_before_pruning() {
    // Every point is in the body when the tip revisits index 1, so the chain
    // holds N + 1 vertices without being closed.
    let pts = [
        vector![0.3, 0.4],
        vector![-0.8, -0.1],
        vector![0.7, 0.6],
        vector![0.3, 0.0],
    ];
    let mut w = HullWalker::new(set(&pts), WalkCfg::default());
    for _ in 0..5 {
        w.step().unwrap();
    }
    assert_eq!(w.chain(), &[pts[0], pts[1], pts[3], pts[2], pts[1]][..]);
    assert!(!w.is_closed());
    let r = expect_report(w.step().unwrap());
    assert_eq!(r.pruned, 2);
    assert_eq!(w.chain(), &[pts[3], pts[2], pts[1], pts[3]][..]);
    assert_eq!(w.step().unwrap(), StepOutcome::Done);
}

#[test]
fn selection_uses_remapped_angle() {
    let tip = vector![1.0, 0.0];
    let pts = [tip, vector![0.0, 1.0], vector![-1.0, 0.0], vector![0.0, -1.0]];
    let mut w = HullWalker::new(set(&pts), WalkCfg::default());
    assert_eq!(expect_report(w.step().unwrap()).kind, StepKind::Seeded);
    let r = expect_report(w.step().unwrap());
    // 135° for (0,1) beats 180° for (-1,0) and 315° for (0,-1).
    assert_eq!(r.vertex, vector![0.0, 1.0]);
    assert_eq!(r.kind, StepKind::Appended);
    assert_eq!(w.chain(), &[tip, vector![0.0, 1.0]][..]);
}

#[test]
fn sharp_second_decision_replaces_seed() {
    // Centroid (0,0); from (1,0) the winner (2,1) scores 45°.
    let pts = [vector![1.0, 0.0], vector![2.0, 1.0], vector![-3.0, -1.0]];
    let mut w = HullWalker::new(set(&pts), WalkCfg::default());
    w.step().unwrap();
    assert_eq!(w.chain(), &[pts[0]][..]);
    let r = expect_report(w.step().unwrap());
    assert_eq!(r.kind, StepKind::Corrected);
    assert!((r.angle_deg.unwrap() - 45.0).abs() < 1e-9);
    assert_eq!(r.chain_len, 1);
    assert_eq!(w.chain(), &[pts[1]][..]);
    assert_eq!(w.productive_steps(), 2);
}

#[test]
fn single_point_has_no_candidate() {
    let p = vector![0.1, 0.2];
    let mut w = HullWalker::new(set(&[p]), WalkCfg::default());
    assert_eq!(expect_report(w.step().unwrap()).kind, StepKind::Seeded);
    assert_eq!(
        w.step().unwrap_err(),
        WalkError::NoCandidate { tip: Some(p) }
    );
    // coincident duplicates are not candidates either
    let mut w = HullWalker::new(set(&[p, p, p]), WalkCfg::default());
    w.step().unwrap();
    assert!(matches!(w.step(), Err(WalkError::NoCandidate { .. })));
}

#[test]
fn call_budget_is_enforced() {
    let cfg = WalkCfg {
        call_budget_factor: 0,
        ..WalkCfg::default()
    };
    let pts = PointSet::generate(
        SampleCfg {
            count: 50,
            half_extent: 0.9,
        },
        SeedSource::Fixed(9),
    )
    .unwrap();
    let mut w = HullWalker::new(Arc::new(pts), cfg);
    assert_eq!(w.call_limit(), MIN_CALL_BUDGET);
    let mut err = None;
    for _ in 0..=MIN_CALL_BUDGET {
        match w.step() {
            Ok(StepOutcome::Done) => break,
            Ok(_) => {}
            Err(e) => {
                err = Some(e);
                break;
            }
        }
    }
    match err {
        Some(e) => assert_eq!(
            e,
            WalkError::IterationLimitExceeded {
                limit: MIN_CALL_BUDGET
            }
        ),
        None => assert!(w.is_closed()),
    }
    assert!(w.calls() <= MIN_CALL_BUDGET);
}

#[test]
fn call_limit_scales_with_n_squared() {
    let cfg = WalkCfg::default();
    assert_eq!(cfg.call_limit(20), 1600);
    assert_eq!(cfg.call_limit(1), MIN_CALL_BUDGET);
}

#[test]
fn resume_rejects_foreign_vertices() {
    let pts = square();
    let err = HullWalker::from_chain(
        set(&pts),
        WalkCfg::default(),
        vec![pts[0], vector![0.0, 0.0]],
    )
    .unwrap_err();
    assert_eq!(err, WalkError::ForeignVertex { index: 1 });
}

#[test]
fn walk_with_defaults_returns_closed_chain() {
    let chain = walk_with_defaults(set(&square())).unwrap();
    assert_eq!(chain.first(), chain.last());
    assert_eq!(chain.len(), 5);
}

/// Step until closure or failure, checking chain invariants after every call.
fn check_invariants(points: &PointSet, cfg: WalkCfg) -> Result<(), TestCaseError> {
    let n = points.len();
    let eps = cfg.eps;
    let mut w = HullWalker::new(Arc::new(points.clone()), cfg);
    loop {
        let before = w.productive_steps();
        let outcome = match w.step() {
            Ok(o) => o,
            Err(e) => return Err(TestCaseError::fail(format!("walk did not close: {e}"))),
        };
        let chain = w.chain();
        for v in chain {
            prop_assert!(points.points().iter().any(|p| points_eq(*p, *v, eps)));
        }
        for pair in chain.windows(2) {
            prop_assert!(!points_eq(pair[0], pair[1], eps));
        }
        // only the tip may repeat an earlier vertex
        let body = &chain[..chain.len().saturating_sub(1)];
        for (i, a) in body.iter().enumerate() {
            for b in &body[i + 1..] {
                prop_assert!(!points_eq(*a, *b, eps));
            }
        }
        // N + 1 only while the tip repeats a body vertex
        prop_assert!(chain.len() <= n + 1);
        prop_assert!(chain.len() <= n || first_revisit(chain, eps).is_some());
        match outcome {
            StepOutcome::Done => {
                prop_assert_eq!(w.productive_steps(), before);
                let frozen = chain.to_vec();
                prop_assert_eq!(w.step().unwrap(), StepOutcome::Done);
                prop_assert_eq!(w.chain(), &frozen[..]);
                prop_assert!(w.is_closed());
                return Ok(());
            }
            StepOutcome::Progressed(r) => {
                prop_assert_eq!(r.step, before + 1);
                prop_assert_eq!(r.chain_len, w.chain().len());
            }
        }
    }
}

proptest! {
    #[test]
    fn invariants_hold_on_random_sets(seed in any::<u64>(), count in 2usize..40) {
        let cfg = SampleCfg { count, half_extent: 0.9 };
        let points = PointSet::generate(cfg, SeedSource::Fixed(seed)).unwrap();
        check_invariants(&points, WalkCfg::default())?;
    }

    #[test]
    fn invariants_hold_with_duplicate_points(seed in any::<u64>(), count in 2usize..15) {
        let cfg = SampleCfg { count, half_extent: 0.9 };
        let base = PointSet::generate(cfg, SeedSource::Fixed(seed)).unwrap();
        let mut doubled = base.points().to_vec();
        doubled.extend_from_slice(base.points());
        let points = PointSet::from_points(doubled).unwrap();
        check_invariants(&points, WalkCfg::default())?;
    }
}
