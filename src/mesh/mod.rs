//! Point sets and surface meshes.
//!
//! The analysis works on vertex clouds only. A [`SurfaceMesh`] is what the
//! loaders produce; its [`PointSet`] of vertices is what the distance engine
//! and side detector consume.
//!
//! ```
//! use screwbreach::mesh::{PointSet, SurfaceMesh};
//! use nalgebra::Point3;
//!
//! let vertices = PointSet::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ]);
//! let mesh = SurfaceMesh::new(vertices, vec![[0, 1, 2]]);
//!
//! assert_eq!(mesh.num_vertices(), 3);
//! assert_eq!(mesh.points().mean_x(), Some(0.5));
//! ```

mod points;
mod surface;

pub use points::PointSet;
pub use surface::SurfaceMesh;
