//! Fixed-cadence driver: one `step()` per tick, observer notified after each.

use anyhow::Result;
use hullwalk::api::{HullWalker, StepOutcome, StepReport, WalkError};
use std::time::{Duration, Instant};

/// Paces calls at a fixed period. The first tick fires immediately; a zero
/// period never sleeps.
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Block until the next tick is due.
    pub fn wait(&mut self) {
        if self.period.is_zero() {
            return;
        }
        if let Some(due) = self.next {
            let now = Instant::now();
            if due > now {
                std::thread::sleep(due - now);
            }
        }
        self.next = Some(Instant::now() + self.period);
    }
}

/// Reader side of the walk: sees the chain after every call, changed or not.
pub trait TickObserver {
    fn on_tick(&mut self, walker: &HullWalker, outcome: &StepOutcome) -> Result<()>;
}

/// What a drive produced. `failure` holds the walker error that ended it, if any.
#[derive(Debug)]
pub struct DriveSummary {
    pub reports: Vec<StepReport>,
    pub ticks: u64,
    pub elapsed: Duration,
    pub failure: Option<WalkError>,
}

impl DriveSummary {
    pub fn closed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Step `walker` on `ticker` until it reports `Done` or fails.
///
/// Walker errors end the drive and are returned in the summary; observer
/// errors (I/O) abort with `Err`.
pub fn drive<O: TickObserver>(
    walker: &mut HullWalker,
    ticker: &mut Ticker,
    observer: &mut O,
) -> Result<DriveSummary> {
    let start = Instant::now();
    let mut reports = Vec::new();
    let mut ticks = 0u64;
    let failure = loop {
        ticker.wait();
        ticks += 1;
        let outcome = match walker.step() {
            Ok(o) => o,
            Err(e) => break Some(e),
        };
        observer.on_tick(walker, &outcome)?;
        match outcome {
            StepOutcome::Progressed(r) => reports.push(r),
            StepOutcome::Done => break None,
        }
    };
    Ok(DriveSummary {
        reports,
        ticks,
        elapsed: start.elapsed(),
        failure,
    })
}
