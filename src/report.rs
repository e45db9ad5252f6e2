//! Report output.
//!
//! [`ReportDocument`] is the JSON shape consumers of the tool expect:
//!
//! ```json
//! {
//!   "side": "Left Calcaneus",
//!   "meanXMedial": 10.0,
//!   "meanXLateral": -10.0,
//!   "results": [
//!     {
//!       "fileName": "screw_1.stl",
//!       "distanceToMedial": 0.3,
//!       "distanceToLateral": 5.0,
//!       "breachStatus": "Medial breach",
//!       "breachPoints": [[9.7, 0.0, 0.0]]
//!     }
//!   ],
//!   "logs": "=== Processing Started ===\n..."
//! }
//! ```
//!
//! `breachPoints` is `null` when a screw breaches nothing.
//! [`render_text`] gives the same content as a plain-text table.

use std::fmt::Write as _;

use serde::Serialize;

use crate::algo::BatchReport;

/// Serialized form of a [`BatchReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    /// "Left Calcaneus" or "Right Calcaneus".
    pub side: String,
    /// Mean X of the medial wall.
    pub mean_x_medial: f64,
    /// Mean X of the lateral wall.
    pub mean_x_lateral: f64,
    /// One entry per screw.
    pub results: Vec<ScrewResult>,
    /// Trace lines joined with newlines.
    pub logs: String,
}

/// Serialized form of one screw's record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrewResult {
    /// Screw file name.
    pub file_name: String,
    /// Shortest distance to the medial wall.
    pub distance_to_medial: f64,
    /// Shortest distance to the lateral wall.
    pub distance_to_lateral: f64,
    /// "No breach", "Medial breach", "Lateral breach" or "Both breach".
    pub breach_status: String,
    /// Breach points as `[x, y, z]`, or `None` when there are none.
    pub breach_points: Option<Vec<[f64; 3]>>,
}

impl From<&BatchReport> for ReportDocument {
    fn from(report: &BatchReport) -> Self {
        let side = report.side();
        let results = report
            .records()
            .iter()
            .map(|record| {
                let points: Vec<[f64; 3]> = record
                    .breach_points
                    .iter()
                    .map(|p| [p.x, p.y, p.z])
                    .collect();
                ScrewResult {
                    file_name: record.screw_id.clone(),
                    distance_to_medial: record.distance_to_medial,
                    distance_to_lateral: record.distance_to_lateral,
                    breach_status: record.status.to_string(),
                    breach_points: (!points.is_empty()).then_some(points),
                }
            })
            .collect();

        ReportDocument {
            side: side.side.to_string(),
            mean_x_medial: side.mean_x_medial,
            mean_x_lateral: side.mean_x_lateral,
            results,
            logs: report.log_text(),
        }
    }
}

/// Serialize a report as a JSON string.
pub fn to_json(report: &BatchReport, pretty: bool) -> serde_json::Result<String> {
    let document = ReportDocument::from(report);
    if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
}

/// Render a report as a plain-text table followed by the trace.
pub fn render_text(report: &BatchReport) -> String {
    let side = report.side();
    let summary = report.summary();
    let mut out = String::new();

    let _ = writeln!(out, "Side: {}", side.side);
    let _ = writeln!(
        out,
        "Mean X: medial {:.2} mm, lateral {:.2} mm",
        side.mean_x_medial, side.mean_x_lateral
    );
    let _ = writeln!(out, "Tolerance: {:.2} mm", report.tolerance());
    let _ = writeln!(out);

    let width = report
        .records()
        .iter()
        .map(|r| r.screw_id.chars().count())
        .max()
        .unwrap_or(0)
        .max("Screw".len());

    let _ = writeln!(
        out,
        "{:<width$}  {:>10}  {:>10}  {}",
        "Screw", "Medial", "Lateral", "Status"
    );
    for record in report.records() {
        let _ = writeln!(
            out,
            "{:<width$}  {:>10.2}  {:>10.2}  {}",
            record.screw_id, record.distance_to_medial, record.distance_to_lateral, record.status
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} screws, {} breached ({} medial, {} lateral, {} both)",
        summary.total, summary.breached(), summary.medial, summary.lateral, summary.both
    );
    let _ = writeln!(out);
    out.push_str(&report.log_text());
    out.push('\n');
    out
}
