//! Tabular IO via Polars: step traces out, point sets in and out.
//!
//! Format is picked by extension: `.parquet` writes Parquet, anything else CSV.

use anyhow::{bail, Context, Result};
use hullwalk::api::StepReport;
use hullwalk::Vec2;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// One row per productive step.
pub fn trace_frame(reports: &[StepReport]) -> PolarsResult<DataFrame> {
    let step: Vec<u64> = reports.iter().map(|r| r.step).collect();
    let kind: Vec<&str> = reports.iter().map(|r| r.kind.as_str()).collect();
    let pruned: Vec<u64> = reports.iter().map(|r| r.pruned as u64).collect();
    let chain_len: Vec<u64> = reports.iter().map(|r| r.chain_len as u64).collect();
    let angle: Vec<Option<f64>> = reports.iter().map(|r| r.angle_deg).collect();
    let x: Vec<f64> = reports.iter().map(|r| r.vertex.x).collect();
    let y: Vec<f64> = reports.iter().map(|r| r.vertex.y).collect();
    df!(
        "step" => step,
        "kind" => kind,
        "pruned" => pruned,
        "chain_len" => chain_len,
        "angle_deg" => angle,
        "x" => x,
        "y" => y
    )
}

pub fn points_frame(points: &[Vec2<f64>]) -> PolarsResult<DataFrame> {
    let x: Vec<f64> = points.iter().map(|p| p.x).collect();
    let y: Vec<f64> = points.iter().map(|p| p.y).collect();
    df!("x" => x, "y" => y)
}

/// Write `df` to `path` (Parquet or CSV by extension), creating parent dirs.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let is_parquet = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        ParquetWriter::new(file)
            .finish(df)
            .with_context(|| format!("writing parquet {}", path.display()))?;
    } else {
        CsvWriter::new(file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("writing csv {}", path.display()))?;
    }
    Ok(())
}

/// Load points from a CSV with `x` and `y` columns. Rows with a missing
/// coordinate are rejected.
pub fn read_points(path: &Path) -> Result<Vec<Vec2<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("reading {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("parsing x,y columns of {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.into_iter().zip(ys.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) => out.push(Vec2::new(x, y)),
            _ => bail!("{}: row {row} is missing a coordinate", path.display()),
        }
    }
    Ok(out)
}
