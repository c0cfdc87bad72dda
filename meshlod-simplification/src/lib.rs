//! Mesh simplification and decimation algorithms
//!
//! Greedy edge collapse decimation for building low-resolution LOD and
//! collision proxies. The pipeline is split into:
//! - connectivity building
//! - edge cost evaluation
//! - a lazily invalidated candidate queue
//! - union-find vertex remapping
//! - the collapse loop and final compaction

pub mod batch;
pub mod cancel;
pub mod collapse;
pub mod connectivity;
pub mod cost;
pub mod edge_collapse;
pub mod extract;
pub mod queue;
pub mod union_find;

pub use batch::*;
pub use cancel::*;
pub use edge_collapse::*;

use meshlod_core::{Error, Result, TriangleMesh};

/// Simplify a mesh by reducing the number of faces
pub trait MeshSimplifier {
    /// Simplify `mesh` down to at most `target_triangles` faces.
    ///
    /// Running out of collapsible edges is not an error; it is reported
    /// through [`SimplificationResult::status`].
    fn simplify(&self, mesh: &TriangleMesh, target_triangles: usize) -> Result<SimplificationResult>;

    /// Simplify mesh with target reduction ratio (0.0 = no reduction, 1.0 = maximum reduction)
    fn simplify_ratio(&self, mesh: &TriangleMesh, reduction_ratio: f32) -> Result<SimplificationResult> {
        if !(0.0..=1.0).contains(&reduction_ratio) {
            return Err(Error::InvalidData(
                "Reduction ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        let target = ((1.0 - reduction_ratio) * mesh.face_count() as f32) as usize;
        self.simplify(mesh, target)
    }
}
