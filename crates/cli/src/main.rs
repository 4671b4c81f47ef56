use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use hullwalk::api::{
    closed_length, HullWalker, PointSet, SampleCfg, SeedSource, StepOutcome, WalkCfg,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod driver;
mod frames;
mod provenance;
mod trace;

use driver::{drive, Ticker, TickObserver};
use frames::{prepare_out_dir, FrameWriter};
use provenance::{write_manifest, Manifest, Outcome};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Drive the centroid hull walk and export its frames")]
struct Cmd {
    /// Log every step, not just exported frames
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Walk a point set on a fixed tick, writing one SVG per productive step
    Run(RunArgs),
    /// Draw a point set and write it as CSV (x,y) for later replay
    Sample {
        #[command(flatten)]
        sample: SampleArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone)]
struct SampleArgs {
    /// Sampler seed; drawn from OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 20)]
    count: usize,
    /// Each axis is sampled from [-half_extent, half_extent)
    #[arg(long, default_value_t = 0.9)]
    half_extent: f64,
}

impl SampleArgs {
    fn cfg(&self) -> SampleCfg {
        SampleCfg {
            count: self.count,
            half_extent: self.half_extent,
        }
    }

    fn source(&self) -> SeedSource {
        self.seed.map_or(SeedSource::Entropy, SeedSource::Fixed)
    }
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    sample: SampleArgs,
    /// Load points from a CSV with x,y columns instead of sampling
    #[arg(long, conflicts_with_all = ["seed", "count", "half_extent"])]
    points: Option<PathBuf>,
    /// Frame directory; removed and recreated at startup
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Milliseconds between steps (0 = as fast as possible)
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
    /// Write the step trace here (.csv or .parquet)
    #[arg(long)]
    trace: Option<PathBuf>,
    /// Skip SVG export
    #[arg(long)]
    no_frames: bool,
    /// Call budget is budget_factor * N^2
    #[arg(long, default_value_t = 4)]
    budget_factor: u64,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Run(args) => run(args),
        Action::Sample { sample, out } => sample_points(sample, out),
        Action::Report => report(),
    }
}

/// Logs each tick and exports frames when the productive-step counter moves.
struct RunObserver {
    frames: Option<FrameWriter>,
}

impl TickObserver for RunObserver {
    fn on_tick(&mut self, walker: &HullWalker, outcome: &StepOutcome) -> Result<()> {
        match outcome {
            StepOutcome::Progressed(r) => tracing::debug!(
                step = r.step,
                kind = r.kind.as_str(),
                pruned = r.pruned,
                chain_len = r.chain_len,
                angle_deg = ?r.angle_deg,
                "step"
            ),
            StepOutcome::Done => tracing::debug!(chain_len = walker.chain().len(), "closed"),
        }
        if let Some(frames) = self.frames.as_mut() {
            if let Some(path) = frames.observe(walker)? {
                tracing::info!(path = %path.display(), "frame");
            }
        }
        Ok(())
    }
}

fn load_points(args: &RunArgs) -> Result<PointSet> {
    match &args.points {
        Some(path) => {
            let pts = trace::read_points(path)?;
            PointSet::from_points(pts).with_context(|| format!("points from {}", path.display()))
        }
        None => PointSet::generate(args.sample.cfg(), args.sample.source())
            .context("sampling point set"),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let points = Arc::new(load_points(&args)?);
    let c = points.centroid();
    tracing::info!(
        points = points.len(),
        seed = ?points.seed(),
        centroid_x = c.x,
        centroid_y = c.y,
        "point set"
    );

    prepare_out_dir(&args.out)?;
    let cfg = WalkCfg {
        call_budget_factor: args.budget_factor,
        ..WalkCfg::default()
    };
    let mut walker = HullWalker::new(points.clone(), cfg);
    let mut observer = RunObserver {
        frames: (!args.no_frames).then(|| FrameWriter::new(&args.out)),
    };
    let mut ticker = Ticker::from_millis(args.tick_ms);
    let summary = drive(&mut walker, &mut ticker, &mut observer)?;

    let half_extent = args.points.is_none().then_some(args.sample.half_extent);
    let mut manifest = Manifest::new(serde_json::json!({
        "count": points.len(),
        "half_extent": half_extent,
        "points_file": args.points.as_ref().map(|p| p.display().to_string()),
        "tick_ms": args.tick_ms,
        "eps": cfg.eps,
        "budget_factor": cfg.call_budget_factor,
        "call_limit": walker.call_limit(),
    }));
    manifest.seed = points.seed();
    manifest.points = points.len();
    manifest.centroid = [c.x, c.y];
    if let Some(frames) = &observer.frames {
        for path in frames.written() {
            manifest.push_output(path);
        }
    }
    if let Some(trace_path) = &args.trace {
        let mut df = trace::trace_frame(&summary.reports)?;
        trace::write_table(&mut df, trace_path)?;
        manifest.push_output(trace_path);
        tracing::info!(path = %trace_path.display(), rows = df.height(), "trace");
    }
    manifest.outcome = match &summary.failure {
        None => Outcome::Closed {
            productive_steps: walker.productive_steps(),
            chain_len: walker.chain().len(),
            perimeter: closed_length(walker.chain()),
        },
        Some(e) => Outcome::Failed {
            productive_steps: walker.productive_steps(),
            error: e.to_string(),
        },
    };
    let manifest_path = write_manifest(&args.out, &manifest)?;
    tracing::info!(
        closed = summary.closed(),
        steps = walker.productive_steps(),
        ticks = summary.ticks,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        manifest = %manifest_path.display(),
        "run finished"
    );

    match summary.failure {
        None => Ok(()),
        Some(e) => Err(anyhow!(e).context("hull walk failed")),
    }
}

fn sample_points(args: SampleArgs, out: PathBuf) -> Result<()> {
    let set = PointSet::generate(args.cfg(), args.source()).context("sampling point set")?;
    let mut df = trace::points_frame(set.points())?;
    trace::write_table(&mut df, &out)?;
    tracing::info!(
        out = %out.display(),
        count = set.len(),
        seed = ?set.seed(),
        "sample"
    );
    Ok(())
}

fn report() -> Result<()> {
    let sample = SampleCfg::default();
    let walk = WalkCfg::default();
    let manifest = Manifest::new(serde_json::json!({
        "count": sample.count,
        "half_extent": sample.half_extent,
        "eps": walk.eps,
        "budget_factor": walk.call_budget_factor,
    }));
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}
