//! Parallel simplification of independent meshes

use crate::{MeshSimplifier, SimplificationResult};
use meshlod_core::{Result, TriangleMesh};
use rayon::prelude::*;

/// Simplify every mesh in `meshes` on the rayon thread pool.
///
/// `target` picks the triangle budget for each mesh. Runs share no state, so
/// one failing mesh does not affect the others; results keep input order.
pub fn simplify_batch<S, F>(
    simplifier: &S,
    meshes: &[TriangleMesh],
    target: F,
) -> Vec<Result<SimplificationResult>>
where
    S: MeshSimplifier + Sync,
    F: Fn(&TriangleMesh) -> usize + Sync,
{
    meshes
        .par_iter()
        .map(|mesh| simplifier.simplify(mesh, target(mesh)))
        .collect()
}
