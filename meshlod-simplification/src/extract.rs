//! Compaction of the surviving triangles into a fresh mesh

use crate::collapse::CollapseExecutor;
use meshlod_core::TriangleMesh;
use std::collections::HashMap;

/// Emit the active triangles of `executor` with densely renumbered vertices.
///
/// Vertices are numbered in the order surviving triangles first reference
/// them. Vertices no surviving triangle references are dropped. Normal and UV
/// arrays are emitted iff the working copy carries them.
pub fn extract(executor: &mut CollapseExecutor) -> TriangleMesh {
    let mut dense: HashMap<usize, usize> = HashMap::new();
    let mut order: Vec<usize> = Vec::new();
    let mut faces = Vec::with_capacity(executor.active_triangles());

    for t in 0..executor.faces.len() {
        if executor.removed[t] {
            continue;
        }
        let resolved = executor.resolve_face(t);
        let face = resolved.map(|v| {
            *dense.entry(v).or_insert_with(|| {
                order.push(v);
                order.len() - 1
            })
        });
        faces.push(face);
    }

    let vertices = order.iter().map(|&v| executor.positions[v]).collect();
    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    if let Some(normals) = &executor.normals {
        mesh.normals = Some(order.iter().map(|&v| normals[v]).collect());
    }
    if let Some(uvs) = &executor.uvs {
        mesh.uvs = Some(order.iter().map(|&v| uvs[v]).collect());
    }
    mesh
}
