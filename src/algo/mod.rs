//! Breach analysis algorithms.
//!
//! - **Distance**: exhaustive closest-pair search between two point sets
//! - **Side**: left/right calcaneus from the walls' mean X
//! - **Classify**: breach status of one screw from its wall distances
//! - **Batch**: load walls and screws, run the above, collect a report

pub mod batch;
pub mod classify;
pub mod distance;
pub mod progress;
pub mod side;

pub use batch::{process_batch, BatchOptions, BatchReport};
pub use classify::{classify, BreachRecord, BreachStatus, DEFAULT_TOLERANCE};
pub use distance::{nearest_distance, DistanceResult};
pub use progress::Progress;
pub use side::{detect_side, Side, SideResult};
