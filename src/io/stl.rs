//! STL (stereolithography) format support.
//!
//! Binary and ASCII STL are both read. STL stores three corners per facet;
//! corners with identical coordinates are merged into one vertex while
//! reading, so the vertex set matches the mesh's distinct points.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use nalgebra::Point3;
use tracing::debug;

use crate::error::{BreachError, Result};
use crate::mesh::{PointSet, SurfaceMesh};

/// Load a mesh from an STL file.
///
/// # Example
///
/// ```no_run
/// use screwbreach::io::stl;
///
/// let mesh = stl::load("medial.stl").unwrap();
/// println!("{} vertices", mesh.num_vertices());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<SurfaceMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BreachError::load(path, e))?;
    let mut reader = BufReader::new(file);
    read(&mut reader, path)
}

/// Read an STL mesh from any seekable reader.
///
/// `origin` is only used to label errors.
pub fn read<R: Read + Seek>(reader: &mut R, origin: &Path) -> Result<SurfaceMesh> {
    let stl = stl_io::read_stl(reader).map_err(|e| BreachError::load(origin, e))?;

    let vertices: PointSet = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();

    // Facets that collapsed to a line or point keep their vertices but no face
    let faces: Vec<[usize; 3]> = stl
        .faces
        .iter()
        .map(|tri| tri.vertices)
        .filter(|[i0, i1, i2]| i0 != i1 && i1 != i2 && i0 != i2)
        .collect();

    debug!(
        origin = %origin.display(),
        vertices = vertices.len(),
        faces = faces.len(),
        "Read STL mesh"
    );

    Ok(SurfaceMesh::new(vertices, faces))
}

/// Save a mesh to a binary STL file.
///
/// # Example
///
/// ```no_run
/// use screwbreach::io::stl;
/// use screwbreach::mesh::SurfaceMesh;
///
/// let mesh = SurfaceMesh::default();
/// stl::save(&mesh, "output.stl").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &SurfaceMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as binary STL.
pub fn write<W: Write>(mesh: &SurfaceMesh, writer: &mut W) -> Result<()> {
    let vertices = mesh.points();

    let triangles: Vec<stl_io::Triangle> = mesh
        .faces
        .iter()
        .map(|f| {
            let p0 = &vertices[f[0]];
            let p1 = &vertices[f[1]];
            let p2 = &vertices[f[2]];

            let n = (p1 - p0).cross(&(p2 - p0));
            let n = n.try_normalize(f64::EPSILON).unwrap_or(n);

            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [
                    stl_io::Vertex::new([p0.x as f32, p0.y as f32, p0.z as f32]),
                    stl_io::Vertex::new([p1.x as f32, p1.y as f32, p1.z as f32]),
                    stl_io::Vertex::new([p2.x as f32, p2.y as f32, p2.z as f32]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(writer, triangles.iter())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn two_triangles() -> SurfaceMesh {
        let vertices = PointSet::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        SurfaceMesh::new(vertices, vec![[0, 1, 2], [0, 2, 3]])
    }

    #[test]
    fn test_shared_corners_are_merged() {
        let mut buffer = Cursor::new(Vec::new());
        write(&two_triangles(), &mut buffer).unwrap();
        buffer.set_position(0);

        let mesh = read(&mut buffer, Path::new("quad.stl")).unwrap();
        assert_eq!(mesh.num_faces(), 2);
        // six facet corners, four distinct points
        assert_eq!(mesh.num_vertices(), 4);
    }

    #[test]
    fn test_ascii_stl() {
        let ascii = "solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 2 0 0
      vertex 0 2 0
    endloop
  endfacet
endsolid tri
";
        let mut cursor = Cursor::new(ascii.as_bytes().to_vec());
        let mesh = read(&mut cursor, Path::new("tri.stl")).unwrap();
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.points().mean_x(), Some(2.0 / 3.0));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load("/nonexistent/definitely/missing.stl").unwrap_err();
        assert!(matches!(err, BreachError::Load { .. }));
    }

    #[test]
    fn test_garbage_is_load_error() {
        let mut cursor = Cursor::new(vec![0xffu8; 10]);
        let err = read(&mut cursor, Path::new("junk.stl")).unwrap_err();
        assert!(matches!(err, BreachError::Load { .. }));
    }
}
