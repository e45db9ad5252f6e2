//! # screwbreach
//!
//! Detects surgical screws that come too close to the medial or lateral wall
//! of a bone, working from triangulated surface meshes (STL or PLY).
//!
//! Each mesh is reduced to its vertex cloud. For every screw, the closest
//! vertex pair to each wall is found by exhaustive search, and a wall counts
//! as breached when that distance is below the clearance tolerance. The side
//! of the calcaneus is inferred once per batch from the walls' mean X.
//!
//! ## Quick Start
//!
//! ```no_run
//! use screwbreach::prelude::*;
//!
//! let options = BatchOptions::default().with_tolerance(0.5);
//! let report = process_batch("medial.stl", "lateral.stl", "screws/", &options).unwrap();
//!
//! println!("{}", report.side().side);
//! for record in report.records() {
//!     println!(
//!         "{}: medial {:.2} mm, lateral {:.2} mm, {}",
//!         record.screw_id, record.distance_to_medial, record.distance_to_lateral, record.status
//!     );
//! }
//! ```
//!
//! ## Working In Memory
//!
//! ```
//! use screwbreach::prelude::*;
//! use nalgebra::Point3;
//!
//! let medial: PointSet = vec![Point3::new(10.0, 0.0, 0.0), Point3::new(10.0, 1.0, 0.0)].into();
//! let lateral: PointSet = vec![Point3::new(-10.0, 0.0, 0.0)].into();
//! let screw: PointSet = vec![Point3::new(9.75, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)].into();
//!
//! let side = detect_side(&medial, &lateral).unwrap();
//! assert_eq!(side.side, Side::LeftCalcaneus);
//!
//! let to_medial = nearest_distance(&screw, &medial).unwrap();
//! let to_lateral = nearest_distance(&screw, &lateral).unwrap();
//! let record = classify(
//!     "screw.stl",
//!     to_medial.distance,
//!     to_lateral.distance,
//!     to_medial.point_a,
//!     to_lateral.point_a,
//!     DEFAULT_TOLERANCE,
//! );
//! assert_eq!(record.status, BreachStatus::MedialBreach);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;
pub mod report;

/// Prelude module for convenient imports.
///
/// ```
/// use screwbreach::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::batch::{
        analyze_screws, process_batch, BatchOptions, BatchReport, ScrewInput,
    };
    pub use crate::algo::{
        classify, detect_side, nearest_distance, BreachRecord, BreachStatus, DistanceResult,
        Progress, Side, SideResult, DEFAULT_TOLERANCE,
    };
    pub use crate::error::{BreachError, Result};
    pub use crate::mesh::{PointSet, SurfaceMesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
