//! Mesh data structures and functionality

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh with optional per-vertex normals and UVs.
///
/// Attribute arrays are either absent, empty, or exactly as long as
/// `vertices`. An empty attribute array is treated the same as an absent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub uvs: Option<Vec<Point2f>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
            uvs: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
            uvs: None,
        }
    }

    /// Create a mesh from a flat index buffer (three indices per triangle).
    pub fn from_flat_indices(vertices: Vec<Point3f>, indices: &[u32]) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(Error::MalformedIndices { len: indices.len() });
        }
        let faces = indices
            .chunks_exact(3)
            .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
            .collect();
        let mesh = Self::from_vertices_and_faces(vertices, faces);
        mesh.validate()?;
        Ok(mesh)
    }

    /// Flatten the faces into a `u32` index buffer.
    ///
    /// Fails if any index does not fit in a `u32`.
    pub fn flat_indices(&self) -> Result<Vec<u32>> {
        self.faces
            .iter()
            .flat_map(|face| face.iter())
            .map(|&index| u32::try_from(index).map_err(|_| Error::IndexOverflow { index }))
            .collect()
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Whether the mesh carries a non-empty normal array
    pub fn has_normals(&self) -> bool {
        self.normals.as_ref().is_some_and(|n| !n.is_empty())
    }

    /// Whether the mesh carries a non-empty UV array
    pub fn has_uvs(&self) -> bool {
        self.uvs.as_ref().is_some_and(|uv| !uv.is_empty())
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Check index ranges and attribute lengths.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i >= vertex_count) {
                return Err(Error::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        if let Some(normals) = &self.normals {
            check_attribute_len("normals", normals.len(), vertex_count)?;
        }
        if let Some(uvs) = &self.uvs {
            check_attribute_len("uvs", uvs.len(), vertex_count)?;
        }
        Ok(())
    }

    /// Number of faces that repeat a vertex index.
    pub fn degenerate_face_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|f| f[0] == f[1] || f[1] == f[2] || f[0] == f[2])
            .count()
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                edge1.cross(&edge2).try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros)
            })
            .collect()
    }

    /// Area-weighted vertex normals.
    ///
    /// Vertices not referenced by any face (or only by zero-area faces) get a
    /// zero normal.
    pub fn compute_vertex_normals(&self) -> Vec<Vector3f> {
        let mut normals = vec![Vector3f::zeros(); self.vertices.len()];
        for face in &self.faces {
            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];
            // Unnormalized cross product is weighted by twice the face area
            let n = (v1 - v0).cross(&(v2 - v0));
            for &i in face {
                normals[i] += n;
            }
        }
        for n in &mut normals {
            *n = n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros);
        }
        normals
    }

    /// Replace the normals with freshly computed area-weighted ones.
    pub fn recalculate_normals(&mut self) {
        self.normals = Some(self.compute_vertex_normals());
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Set vertex texture coordinates
    pub fn set_uvs(&mut self, uvs: Vec<Point2f>) {
        if uvs.len() == self.vertices.len() {
            self.uvs = Some(uvs);
        }
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

fn check_attribute_len(attribute: &'static str, len: usize, expected: usize) -> Result<()> {
    if len == 0 || len == expected {
        Ok(())
    } else {
        Err(Error::AttributeLength {
            attribute,
            len,
            expected,
        })
    }
}
