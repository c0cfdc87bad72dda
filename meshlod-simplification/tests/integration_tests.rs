//! Integration tests for meshlod-simplification
//!
//! These tests exercise the public simplifier on small meshes with known
//! structure and check the guarantees every output must satisfy.

use meshlod_core::{Drawable, Point2f, Point3f, TriangleMesh, Vector3f};
use meshlod_simplification::collapse::CollapseExecutor;
use meshlod_simplification::*;
use nalgebra::Point3;

/// Unit cube, 8 vertices and 12 outward-facing triangles, with corner normals
fn create_unit_cube() -> TriangleMesh {
    let vertices: Vec<Point3f> = (0..8)
        .map(|i| Point3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32))
        .collect();
    let faces = vec![
        [0, 2, 1], [1, 2, 3], // z = 0
        [4, 5, 6], [5, 7, 6], // z = 1
        [0, 1, 4], [1, 5, 4], // y = 0
        [2, 6, 3], [3, 6, 7], // y = 1
        [0, 4, 2], [2, 4, 6], // x = 0
        [1, 3, 5], [3, 7, 5], // x = 1
    ];
    let normals = vertices
        .iter()
        .map(|p| (p.coords - Vector3f::repeat(0.5)).normalize())
        .collect();
    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    mesh.set_normals(normals);
    mesh
}

/// Height-field grid with normals and UVs
fn create_curved_surface(size: usize) -> TriangleMesh {
    let mut vertices = Vec::new();
    let mut uvs = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI;
            vertices.push(Point3::new(x as f32, y as f32, (fx.sin() * fy.sin()) * 2.0));
            uvs.push(Point2f::new(x as f32 / (size - 1) as f32, y as f32 / (size - 1) as f32));
        }
    }
    let mut faces = Vec::new();
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    mesh.recalculate_normals();
    mesh.set_uvs(uvs);
    mesh
}

fn assert_well_formed(input: &TriangleMesh, target: usize, result: &SimplificationResult) {
    let out = &result.mesh;
    assert!(out.face_count() <= input.face_count());
    match result.status {
        SimplificationStatus::ReachedTarget => assert!(out.face_count() <= target),
        SimplificationStatus::ExhaustedEarly { achieved } => {
            assert!(achieved > target);
            assert_eq!(achieved, out.face_count());
        }
    }
    for face in &out.faces {
        assert!(face[0] != face[1] && face[1] != face[2] && face[0] != face[2], "degenerate face {:?}", face);
        assert!(face.iter().all(|&i| i < out.vertex_count()), "dangling index in {:?}", face);
    }
    assert_eq!(out.normals.as_ref().map(Vec::len), input.normals.as_ref().map(|_| out.vertex_count()));
    assert_eq!(out.uvs.as_ref().map(Vec::len), input.uvs.as_ref().map(|_| out.vertex_count()));
    for p in &out.vertices {
        assert!(p.coords.iter().all(|c| c.is_finite()), "non-finite vertex {:?}", p);
    }
}

/// Triangles as sorted position triples, for order-independent comparison
fn triangle_set(mesh: &TriangleMesh) -> Vec<[[u32; 3]; 3]> {
    let key = |p: &Point3f| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
    let mut tris: Vec<_> = mesh
        .faces
        .iter()
        .map(|f| {
            let mut t = [key(&mesh.vertices[f[0]]), key(&mesh.vertices[f[1]]), key(&mesh.vertices[f[2]])];
            t.sort();
            t
        })
        .collect();
    tris.sort();
    tris
}

#[test]
fn test_outputs_are_well_formed() {
    let simplifier = EdgeCollapseSimplifier::new();
    let meshes = [create_unit_cube(), create_curved_surface(6), create_curved_surface(10)];
    for mesh in &meshes {
        for target in [0, 1, 4, mesh.face_count() / 3, mesh.face_count() / 2] {
            let result = simplifier.simplify(mesh, target).unwrap();
            assert_well_formed(mesh, target, &result);
        }
    }
}

#[test]
fn test_well_formed_with_boundary_preservation() {
    let simplifier = EdgeCollapseSimplifier::with_params(true, false);
    let mesh = create_curved_surface(8);
    for target in [0, 10, 50] {
        let result = simplifier.simplify(&mesh, target).unwrap();
        assert_well_formed(&mesh, target, &result);
    }
}

#[test]
fn test_generous_target_is_a_noop() {
    let mesh = create_curved_surface(5);
    let simplifier = EdgeCollapseSimplifier::new();
    for target in [mesh.face_count(), mesh.face_count() + 10] {
        let result = simplifier.simplify(&mesh, target).unwrap();
        assert_eq!(result.status, SimplificationStatus::ReachedTarget);
        assert_eq!(result.stats.collapses, 0);
        assert_eq!(result.mesh.vertex_count(), mesh.vertex_count());
        assert_eq!(triangle_set(&result.mesh), triangle_set(&mesh));
    }
}

#[test]
fn test_input_is_not_modified() {
    let mesh = create_curved_surface(6);
    let snapshot = mesh.clone();
    EdgeCollapseSimplifier::new().simplify(&mesh, 3).unwrap();
    assert_eq!(mesh, snapshot);
}

#[test]
fn test_runs_are_deterministic() {
    let mesh = create_curved_surface(9);
    let s = EdgeCollapseSimplifier::new();
    let a = s.simplify(&mesh, 20).unwrap();
    let b = s.simplify(&mesh, 20).unwrap();
    assert_eq!(a.mesh, b.mesh);
    assert_eq!(a.stats, b.stats);
}

#[test]
fn test_flat_indices_round_trip_through_simplifier() {
    let cube = create_unit_cube();
    let flat = cube.flat_indices().unwrap();
    let rebuilt = TriangleMesh::from_flat_indices(cube.vertices.clone(), &flat).unwrap();
    let result = EdgeCollapseSimplifier::new().simplify(&rebuilt, 6).unwrap();
    let out_flat = result.mesh.flat_indices().unwrap();
    assert_eq!(out_flat.len(), result.mesh.face_count() * 3);
    assert!(out_flat.iter().all(|&i| (i as usize) < result.mesh.vertex_count()));
}

// ---- Scenarios ----

#[test]
fn test_cube_to_four_triangles() {
    let cube = create_unit_cube();
    let result = EdgeCollapseSimplifier::new().simplify(&cube, 4).unwrap();

    assert!(result.status.is_complete());
    assert!(result.mesh.face_count() <= 4);
    let (min, max) = cube.bounding_box();
    for p in &result.mesh.vertices {
        for i in 0..3 {
            assert!(p[i].is_finite());
            assert!(p[i] >= min[i] - 1e-6 && p[i] <= max[i] + 1e-6, "{:?} outside cube", p);
        }
    }
    for n in result.mesh.normals.as_ref().unwrap() {
        assert!(n.iter().all(|c| c.is_finite()));
    }
}

#[test]
fn test_single_triangle_to_zero() {
    let mesh = TriangleMesh::from_vertices_and_faces(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    );
    let result = EdgeCollapseSimplifier::new().simplify(&mesh, 0).unwrap();

    // One collapse removes the only triangle, leaving nothing referenced
    assert_eq!(result.status, SimplificationStatus::ReachedTarget);
    assert_eq!(result.stats.collapses, 1);
    assert_eq!(result.mesh.face_count(), 0);
    assert_eq!(result.mesh.vertex_count(), 0);
}

#[test]
fn test_disjoint_triangles_lose_the_cheaper_one() {
    let mesh = TriangleMesh::from_vertices_and_faces(
        vec![
            // Large triangle first so index order does not decide the outcome
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(12.0, 0.0, 0.0),
            Point3::new(10.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(0.0, 0.1, 0.0),
        ],
        vec![[0, 1, 2], [3, 4, 5]],
    );
    let result = EdgeCollapseSimplifier::new().simplify(&mesh, 1).unwrap();

    assert_eq!(result.status, SimplificationStatus::ReachedTarget);
    assert_eq!(result.stats.collapses, 1);
    assert_eq!(result.mesh.face_count(), 1);
    assert_eq!(result.mesh.vertices, mesh.vertices[0..3].to_vec());
}

#[test]
fn test_flat_grid_collapse_order_follows_length_and_sharing() {
    // Uneven 3x3 grid: columns at x = 0, 0.5, 2 and rows at y = 0, 1.5, 3
    let xs = [0.0, 0.5, 2.0];
    let ys = [0.0, 1.5, 3.0];
    let mut mesh = TriangleMesh::new();
    for &y in &ys {
        for &x in &xs {
            mesh.add_vertex(Point3::new(x, y, 0.0));
        }
    }
    for y in 0..2 {
        for x in 0..2 {
            let tl = y * 3 + x;
            mesh.add_face([tl, tl + 3, tl + 1]);
            mesh.add_face([tl + 1, tl + 3, tl + 4]);
        }
    }
    mesh.set_normals(vec![Vector3f::z(); 9]);

    let mut executor = CollapseExecutor::new(&mesh, false);
    executor.populate();
    // All normals agree, so cost is length * (1 + 1 / (shared + 1)):
    // the short interior edge (3, 4) beats the equally short border edges
    assert_eq!(executor.collapse_next(), Some((3, 4)));
    assert_eq!(executor.collapse_next(), Some((0, 1)));
    assert_eq!(executor.collapse_next(), Some((6, 7)));
}

#[test]
fn test_batch_simplification() {
    let meshes = vec![create_unit_cube(), create_curved_surface(6), create_curved_surface(7)];
    let results = simplify_batch(&EdgeCollapseSimplifier::new(), &meshes, |m| m.face_count() / 4);
    for (mesh, result) in meshes.iter().zip(&results) {
        let result = result.as_ref().unwrap();
        assert_well_formed(mesh, mesh.face_count() / 4, result);
    }
}
