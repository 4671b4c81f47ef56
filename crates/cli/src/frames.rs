//! SVG frame export: one document per productive step.
//!
//! Canvas is `FRAME_PX`² showing the world square `[-1, 1]²` with y up.
//! Layers, back to front: sample points (white rings), chain edges and
//! vertices (green), then the tip vertex, the centroid, and the tip→centroid
//! guide in translucent magenta.

use anyhow::{Context, Result};
use hullwalk::api::HullWalker;
use hullwalk::Vec2;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const FRAME_PX: f64 = 900.0;
const RING_OUTER: f64 = 0.02;
const RING_INNER: f64 = 0.015;
const EDGE_WIDTH: f64 = 0.01;

const BACKGROUND: &str = "rgb(18,33,43)";
const POINT: &str = "#ffffff";
const CHAIN: &str = "#00ff00";
const TIP: &str = "#ff00ff";
const TIP_OPACITY: f64 = 0.1;

/// Minimal SVG builder in world coordinates.
struct Svg {
    content: String,
    px: f64,
}

impl Svg {
    fn new(px: f64) -> Self {
        Self {
            content: String::new(),
            px,
        }
    }

    #[inline]
    fn to_px(&self, p: Vec2<f64>) -> (f64, f64) {
        let half = self.px / 2.0;
        (half + p.x * half, half - p.y * half)
    }

    #[inline]
    fn len_px(&self, w: f64) -> f64 {
        w * self.px / 2.0
    }

    fn background(&mut self, fill: &str) {
        let _ = write!(
            self.content,
            r#"<rect x="0" y="0" width="{:.0}" height="{:.0}" fill="{}"/>"#,
            self.px, self.px, fill
        );
    }

    /// Annulus between `RING_INNER` and `RING_OUTER` around `c`.
    fn ring(&mut self, c: Vec2<f64>, stroke: &str, opacity: f64) {
        let (cx, cy) = self.to_px(c);
        let r = self.len_px((RING_OUTER + RING_INNER) / 2.0);
        let w = self.len_px(RING_OUTER - RING_INNER);
        let _ = write!(
            self.content,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="none" stroke="{stroke}" stroke-width="{w:.2}" stroke-opacity="{opacity}"/>"#
        );
    }

    fn line(&mut self, a: Vec2<f64>, b: Vec2<f64>, stroke: &str, opacity: f64) {
        if (b - a).norm() == 0.0 {
            return;
        }
        let (x1, y1) = self.to_px(a);
        let (x2, y2) = self.to_px(b);
        let w = self.len_px(EDGE_WIDTH);
        let _ = write!(
            self.content,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{stroke}" stroke-width="{w:.2}" stroke-opacity="{opacity}"/>"#
        );
    }

    fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0:.0}" height="{0:.0}" viewBox="0 0 {0:.0} {0:.0}">{1}</svg>"#,
            self.px, self.content
        )
    }
}

/// Render one frame for the given points, centroid, and chain.
pub fn render_frame(points: &[Vec2<f64>], centroid: Vec2<f64>, chain: &[Vec2<f64>]) -> String {
    let mut svg = Svg::new(FRAME_PX);
    svg.background(BACKGROUND);
    for p in points {
        svg.ring(*p, POINT, 1.0);
    }
    if let Some((tip, body)) = chain.split_last() {
        for w in chain.windows(2) {
            svg.line(w[0], w[1], CHAIN, 1.0);
        }
        for v in body {
            svg.ring(*v, CHAIN, 1.0);
        }
        svg.line(centroid, *tip, TIP, TIP_OPACITY);
        svg.ring(*tip, TIP, TIP_OPACITY);
    }
    svg.ring(centroid, TIP, TIP_OPACITY);
    svg.finish()
}

/// Remove `dir` if present and create it empty.
pub fn prepare_out_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).with_context(|| format!("clearing {}", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

/// Writes `<dir>/<k>.svg` whenever the walker's productive-step counter moves.
pub struct FrameWriter {
    dir: PathBuf,
    saved: u64,
    written: Vec<PathBuf>,
}

impl FrameWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            saved: 0,
            written: Vec::new(),
        }
    }

    /// Export the current state if it is new. Returns the written path.
    pub fn observe(&mut self, walker: &HullWalker) -> Result<Option<PathBuf>> {
        let k = walker.productive_steps();
        if k == self.saved {
            return Ok(None);
        }
        let set = walker.point_set();
        let doc = render_frame(set.points(), set.centroid(), walker.chain());
        let path = self.dir.join(format!("{k}.svg"));
        fs::write(&path, doc).with_context(|| format!("writing {}", path.display()))?;
        self.saved = k;
        self.written.push(path.clone());
        Ok(Some(path))
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}
