//! Batch breach analysis.
//!
//! A batch checks one or more screws against a medial and a lateral wall:
//!
//! 1. load both walls once
//! 2. detect the side from the wall vertices
//! 3. for each screw, in discovery order: load it, find its closest
//!    vertex pair to each wall, classify the breach
//!
//! The result is a [`BatchReport`] holding the side, one [`BreachRecord`] per
//! screw, and a human-readable trace of the run. Each call builds its own
//! trace; nothing is shared between batches.
//!
//! Any failure (a wall or screw that does not load, an empty point set)
//! aborts the whole batch. There is no partial report. Callers wanting to
//! skip bad screws can drive [`analyze_screws`] with their own [`ScrewInput`]
//! that substitutes or filters failing sources.
//!
//! # Example
//!
//! ```no_run
//! use screwbreach::algo::batch::{process_batch, BatchOptions};
//!
//! let options = BatchOptions::default().with_tolerance(0.5);
//! let report = process_batch("medial.stl", "lateral.stl", "screws/", &options).unwrap();
//!
//! println!("{}", report.side().side);
//! for record in report.records() {
//!     println!("{}: {}", record.screw_id, record.status);
//! }
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::classify::{classify, BreachRecord, BreachStatus, DEFAULT_TOLERANCE};
use super::distance::{nearest_distance, nearest_distance_par, DistanceResult};
use super::side::{detect_side, SideResult};
use super::Progress;
use crate::error::{BreachError, Result};
use crate::io::{self, ScrewSource};
use crate::mesh::PointSet;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Minimum acceptable clearance between screw and wall, in mesh units.
    /// A wall closer than this is breached.
    pub tolerance: f64,

    /// Whether to analyze screws on the rayon thread pool (default: true).
    /// Records and trace lines come out in the same order either way.
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            parallel: true,
        }
    }
}

impl BatchOptions {
    /// Set the clearance tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check the options before any work starts.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(BreachError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        Ok(())
    }
}

/// A screw that can be named and loaded as a point set.
///
/// Implemented for [`ScrewSource`] (files and archive entries) and for
/// `(String, PointSet)` pairs already in memory.
pub trait ScrewInput: Sync {
    /// Identifier used in records and trace lines.
    fn name(&self) -> String;

    /// Load the screw's vertices.
    fn load_points(&self) -> Result<PointSet>;
}

impl ScrewInput for ScrewSource {
    fn name(&self) -> String {
        ScrewSource::name(self)
    }

    fn load_points(&self) -> Result<PointSet> {
        self.load().map(|mesh| mesh.into_points())
    }
}

impl ScrewInput for (String, PointSet) {
    fn name(&self) -> String {
        self.0.clone()
    }

    fn load_points(&self) -> Result<PointSet> {
        Ok(self.1.clone())
    }
}

/// Per-status record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreachSummary {
    /// Number of screws analyzed.
    pub total: usize,
    /// Screws clear of both walls.
    pub no_breach: usize,
    /// Screws breaching only the medial wall.
    pub medial: usize,
    /// Screws breaching only the lateral wall.
    pub lateral: usize,
    /// Screws breaching both walls.
    pub both: usize,
}

impl BreachSummary {
    /// Screws breaching at least one wall.
    pub fn breached(&self) -> usize {
        self.medial + self.lateral + self.both
    }
}

/// Result of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    side: SideResult,
    tolerance: f64,
    records: Vec<BreachRecord>,
    log: Vec<String>,
}

impl BatchReport {
    /// Detected side and the mean X values it was derived from.
    pub fn side(&self) -> &SideResult {
        &self.side
    }

    /// Tolerance the screws were classified with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// One record per screw, in discovery order.
    pub fn records(&self) -> &[BreachRecord] {
        &self.records
    }

    /// Trace lines, in processing order.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Trace lines joined with newlines.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }

    /// Records of screws that breach at least one wall.
    pub fn breached(&self) -> impl Iterator<Item = &BreachRecord> {
        self.records.iter().filter(|r| r.status.is_breach())
    }

    /// Count records per status.
    pub fn summary(&self) -> BreachSummary {
        let mut summary = BreachSummary {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.status {
                BreachStatus::NoBreach => summary.no_breach += 1,
                BreachStatus::MedialBreach => summary.medial += 1,
                BreachStatus::LateralBreach => summary.lateral += 1,
                BreachStatus::BothBreach => summary.both += 1,
            }
        }
        summary
    }
}

/// Builds the human-readable trace of a batch.
struct TraceLog {
    lines: Vec<String>,
}

impl TraceLog {
    fn new() -> Self {
        Self {
            lines: vec!["=== Processing Started ===".to_string(), String::new()],
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn side(&mut self, side: &SideResult) {
        self.push("=== Side Detection ===");
        self.push("");
        self.push(format!("Mean X (Medial) = {:.2} mm", side.mean_x_medial));
        self.push(format!("Mean X (Lateral) = {:.2} mm", side.mean_x_lateral));
        self.push(format!("Result: This is a {}", side.side));
        self.push("");
    }

    fn screw(&mut self, record: &BreachRecord) {
        self.push("");
        self.push(format!("Processing: {}", record.screw_id));

        if record.status.is_breach() {
            self.push("🚨 Screw Breach Detected:");
            if let Some(p) = record.medial_breach_point() {
                self.push(format!("Medial wall breach at {} mm", format_point(p)));
            }
            if let Some(p) = record.lateral_breach_point() {
                self.push(format!("Lateral wall breach at {} mm", format_point(p)));
            }
        } else {
            self.push("No breach detected.");
        }
        self.push("");

        self.push(format!(
            "Shortest distance to medial wall = {:.2} mm",
            record.distance_to_medial
        ));
        self.push(format!(
            "Shortest distance to lateral wall = {:.2} mm",
            record.distance_to_lateral
        ));
    }

    fn finish(mut self) -> Vec<String> {
        self.push("");
        self.push("=== Processing Completed ===");
        self.lines
    }
}

fn format_point(p: &Point3<f64>) -> String {
    format!(
        "[{}, {}, {}]",
        format_coord(p.x),
        format_coord(p.y),
        format_coord(p.z)
    )
}

/// Shortest round-trip form of `v`, with a signed two-digit exponent when
/// one is needed (`1e-07`, `2.5e+16`).
fn format_coord(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let repr = format!("{v:?}");
    match repr.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            Err(_) => repr,
        },
        None => repr,
    }
}

/// Check one screw against both walls.
///
/// The walls must be non-empty; an empty screw is an
/// [`BreachError::EmptyPointSet`] naming the screw.
pub fn analyze_screw(
    name: &str,
    screw: &PointSet,
    medial: &PointSet,
    lateral: &PointSet,
    options: &BatchOptions,
) -> Result<BreachRecord> {
    if screw.is_empty() {
        return Err(BreachError::empty(name));
    }
    if medial.is_empty() {
        return Err(BreachError::empty("medial"));
    }
    if lateral.is_empty() {
        return Err(BreachError::empty("lateral"));
    }

    let scan: fn(&PointSet, &PointSet) -> Result<DistanceResult> = if options.parallel {
        nearest_distance_par
    } else {
        nearest_distance
    };

    let to_medial = scan(screw, medial)?;
    let to_lateral = scan(screw, lateral)?;

    debug!(
        screw = name,
        vertices = screw.len(),
        medial = to_medial.distance,
        lateral = to_lateral.distance,
        "Computed wall distances"
    );

    Ok(classify(
        name,
        to_medial.distance,
        to_lateral.distance,
        to_medial.point_a,
        to_lateral.point_a,
        options.tolerance,
    ))
}

/// Analyze already-loaded walls against a list of screws.
///
/// Side detection runs first, so empty walls are reported before any screw
/// is loaded. With `options.parallel` the screws are processed concurrently,
/// but the first failure in screw order is the one returned and records keep
/// screw order.
pub fn analyze_screws<S: ScrewInput>(
    medial: &PointSet,
    lateral: &PointSet,
    screws: &[S],
    options: &BatchOptions,
    progress: &Progress,
) -> Result<BatchReport> {
    options.validate()?;

    let side = detect_side(medial, lateral)?;
    info!(
        side = %side.side,
        mean_x_medial = side.mean_x_medial,
        mean_x_lateral = side.mean_x_lateral,
        "Detected side"
    );

    let total = screws.len();
    let completed = AtomicUsize::new(0);

    let run_one = |screw: &S| -> Result<BreachRecord> {
        let name = screw.name();
        let points = screw.load_points()?;
        let record = analyze_screw(&name, &points, medial, lateral, options)?;

        if record.status.is_breach() {
            warn!(screw = %name, status = %record.status, "Screw breaches wall");
        } else {
            info!(screw = %name, "Screw clear of both walls");
        }

        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        progress.report(done, total, &name);
        Ok(record)
    };

    let records: Result<Vec<BreachRecord>> = if options.parallel {
        let outcomes: Vec<Result<BreachRecord>> = screws.par_iter().map(run_one).collect();
        outcomes.into_iter().collect()
    } else {
        screws.iter().map(run_one).collect()
    };
    let records = records?;

    let mut log = TraceLog::new();
    log.side(&side);
    for record in &records {
        log.screw(record);
    }

    Ok(BatchReport {
        side,
        tolerance: options.tolerance,
        records,
        log: log.finish(),
    })
}

/// Run a batch from files.
///
/// `screws` may be a single mesh file, a directory of mesh files, or a `.zip`
/// archive of mesh files; see [`io::resolve_screws`].
pub fn process_batch<P, Q, R>(
    medial: P,
    lateral: Q,
    screws: R,
    options: &BatchOptions,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    process_batch_with_progress(medial, lateral, screws, options, &Progress::none())
}

/// Run a batch from files, reporting progress after each screw.
pub fn process_batch_with_progress<P, Q, R>(
    medial: P,
    lateral: Q,
    screws: R,
    options: &BatchOptions,
    progress: &Progress,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    options.validate()?;

    let (medial, lateral, screws) = (medial.as_ref(), lateral.as_ref(), screws.as_ref());
    info!(
        medial = %medial.display(),
        lateral = %lateral.display(),
        screws = %screws.display(),
        tolerance = options.tolerance,
        "Starting breach analysis"
    );

    let medial_mesh = io::load(medial)?;
    let lateral_mesh = io::load(lateral)?;
    let sources = io::resolve_screws(screws)?;

    if sources.is_empty() {
        warn!(path = %screws.display(), "No screw meshes found");
    }

    analyze_screws(
        medial_mesh.points(),
        lateral_mesh.points(),
        &sources,
        options,
        progress,
    )
}
