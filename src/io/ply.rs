//! PLY (Stanford polygon) format support.
//!
//! Polygons with more than three corners are fan-triangulated. A PLY file
//! without a face element is accepted as a bare point cloud.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use tracing::debug;

use crate::error::{BreachError, Result};
use crate::mesh::{PointSet, SurfaceMesh};

/// Load a mesh from a PLY file.
///
/// # Example
///
/// ```no_run
/// use screwbreach::io::ply;
///
/// let mesh = ply::load("lateral.ply").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<SurfaceMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BreachError::load(path, e))?;
    let mut reader = BufReader::new(file);
    read(&mut reader, path)
}

/// Read a PLY mesh from a buffered reader.
///
/// `origin` is only used to label errors.
pub fn read<R: BufRead>(reader: &mut R, origin: &Path) -> Result<SurfaceMesh> {
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| BreachError::load(origin, e))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| BreachError::load(origin, "PLY file has no vertex element"))?;

    let mut vertices = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let coord = |name: &str| {
            get_float_property(vertex, name).ok_or_else(|| {
                BreachError::load(origin, format!("vertex missing {name} coordinate"))
            })
        };
        vertices.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    let mut faces: Vec<[usize; 3]> = Vec::new();
    if let Some(face_element) = ply.payload.get("face") {
        faces.reserve(face_element.len());
        for face in face_element {
            let indices = get_list_property(face, "vertex_indices")
                .or_else(|| get_list_property(face, "vertex_index"))
                .ok_or_else(|| BreachError::load(origin, "face missing vertex_indices property"))?;

            if let Some(&bad) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(BreachError::load(
                    origin,
                    format!("face references invalid vertex index {bad}"),
                ));
            }

            for i in 1..indices.len().saturating_sub(1) {
                faces.push([indices[0], indices[i], indices[i + 1]]);
            }
        }
    }

    debug!(
        origin = %origin.display(),
        vertices = vertices.len(),
        faces = faces.len(),
        "Read PLY mesh"
    );

    Ok(SurfaceMesh::new(PointSet::new(vertices), faces))
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

/// Save a mesh to a PLY file (ASCII format).
pub fn save<P: AsRef<Path>>(mesh: &SurfaceMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by screwbreach")?;
    writeln!(writer, "element vertex {}", mesh.num_vertices())?;
    writeln!(writer, "property double x")?;
    writeln!(writer, "property double y")?;
    writeln!(writer, "property double z")?;
    writeln!(writer, "element face {}", mesh.num_faces())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in mesh.points() {
        writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
    }

    for f in &mesh.faces {
        writeln!(writer, "3 {} {} {}", f[0], f[1], f[2])?;
    }

    writer.flush()?;
    Ok(())
}
