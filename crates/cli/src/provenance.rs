use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const MANIFEST_NAME: &str = "manifest.json";

/// How the run ended.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Closed {
        productive_steps: u64,
        chain_len: usize,
        perimeter: f64,
    },
    Failed {
        productive_steps: u64,
        error: String,
    },
    NotRun,
}

/// Run manifest written next to the frames.
#[derive(Clone, Debug, Serialize)]
pub struct Manifest {
    pub code_rev: String,
    pub version: &'static str,
    pub params: Value,
    pub seed: Option<u64>,
    pub points: usize,
    pub centroid: [f64; 2],
    pub outcome: Outcome,
    pub outputs: Vec<String>,
}

impl Manifest {
    pub fn new(params: Value) -> Self {
        Self {
            code_rev: current_git_rev(),
            version: hullwalk::VERSION,
            params,
            seed: None,
            points: 0,
            centroid: [0.0, 0.0],
            outcome: Outcome::NotRun,
            outputs: Vec::new(),
        }
    }

    pub fn push_output(&mut self, path: &Path) {
        self.outputs.push(path.to_string_lossy().into_owned());
    }
}

/// Write `<dir>/manifest.json`.
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(MANIFEST_NAME);
    fs::write(&path, serde_json::to_vec_pretty(manifest)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
