use super::PointSet;

/// A triangulated surface mesh in face-vertex form.
///
/// Faces index into `vertices`. The breach analysis never looks at faces;
/// they are kept so meshes can be written back out and inspected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions.
    pub vertices: PointSet,
    /// Triangles as vertex index triples.
    pub faces: Vec<[usize; 3]>,
}

impl SurfaceMesh {
    /// Create a mesh from vertices and triangles.
    pub fn new(vertices: PointSet, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Borrow the vertex point set.
    pub fn points(&self) -> &PointSet {
        &self.vertices
    }

    /// Consume the mesh, keeping only its vertices.
    pub fn into_points(self) -> PointSet {
        self.vertices
    }
}
