//! Edge collapse cost
//!
//! The cost multiplies edge length by a normal-divergence penalty and a
//! shared-triangle factor:
//!
//! ```text
//! cost = distance * (1 + 2 * curvature) * (1 + 1 / (shared + 1))
//! ```
//!
//! There is no quadric term. Changing the formula changes which edges go
//! first and therefore the shape of every simplified mesh.

use meshlod_core::{Point3f, Vector3f};

/// Weight of the normal divergence term.
pub const CURVATURE_WEIGHT: f64 = 2.0;

/// `1 - dot(n1, n2)` of the normalized inputs, in `[0, 2]`.
///
/// Returns 0 when either normal is missing or has zero length.
pub fn curvature(n1: Option<&Vector3f>, n2: Option<&Vector3f>) -> f64 {
    let (Some(n1), Some(n2)) = (n1, n2) else {
        return 0.0;
    };
    let a = n1.cast::<f64>();
    let b = n2.cast::<f64>();
    match (a.try_normalize(f64::EPSILON), b.try_normalize(f64::EPSILON)) {
        (Some(a), Some(b)) => (1.0 - a.dot(&b)).clamp(0.0, 2.0),
        _ => 0.0,
    }
}

/// Collapse cost of an edge.
///
/// `shared` is the number of active triangles incident to both endpoints.
/// A zero-length edge costs 0. The result is only non-finite when a
/// position is.
pub fn edge_cost(p1: &Point3f, p2: &Point3f, curvature: f64, shared: usize) -> f64 {
    let distance = (p1.cast::<f64>() - p2.cast::<f64>()).norm();
    let shared_factor = 1.0 + 1.0 / (shared as f64 + 1.0);
    distance * (1.0 + curvature * CURVATURE_WEIGHT) * shared_factor
}
