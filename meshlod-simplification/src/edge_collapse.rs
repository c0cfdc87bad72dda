//! Edge collapse simplification
//!
//! Greedy simplification that repeatedly collapses the cheapest edge until a
//! target triangle count is reached. Costs combine edge length, normal
//! divergence and the number of triangles sharing the edge (see
//! [`crate::cost`]). Collapsed vertices are placed at the edge midpoint.

use crate::cancel::CancelToken;
use crate::collapse::CollapseExecutor;
use crate::extract::extract;
use crate::MeshSimplifier;
use meshlod_core::{Result, TriangleMesh};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a simplification run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimplificationStatus {
    /// The output has at most the requested number of triangles.
    ReachedTarget,
    /// Candidates ran out first; `achieved` triangles remain.
    ExhaustedEarly { achieved: usize },
}

impl SimplificationStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, SimplificationStatus::ReachedTarget)
    }
}

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplificationStats {
    pub input_triangles: usize,
    pub output_triangles: usize,
    pub output_vertices: usize,
    pub collapses: usize,
    pub discarded_candidates: usize,
    pub degenerate_input_faces: usize,
}

/// Compacted mesh plus how the run went.
#[derive(Debug, Clone)]
pub struct SimplificationResult {
    pub mesh: TriangleMesh,
    pub status: SimplificationStatus,
    pub stats: SimplificationStats,
}

/// Greedy edge collapse simplifier.
///
/// With default settings border edges are treated like any other edge and
/// normals are carried through the merges as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeCollapseSimplifier {
    /// Never collapse an edge used by exactly one active triangle
    pub preserve_boundary: bool,
    /// Replace output normals with area-weighted normals of the result
    pub recalculate_normals: bool,
}

impl EdgeCollapseSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(preserve_boundary: bool, recalculate_normals: bool) -> Self {
        Self {
            preserve_boundary,
            recalculate_normals,
        }
    }

    /// Like [`MeshSimplifier::simplify`], but stops with
    /// [`meshlod_core::Error::Cancelled`] once `cancel` fires.
    pub fn simplify_cancellable(
        &self,
        mesh: &TriangleMesh,
        target_triangles: usize,
        cancel: &CancelToken,
    ) -> Result<SimplificationResult> {
        self.run(mesh, target_triangles, Some(cancel))
    }

    fn run(
        &self,
        mesh: &TriangleMesh,
        target_triangles: usize,
        cancel: Option<&CancelToken>,
    ) -> Result<SimplificationResult> {
        mesh.validate()?;

        let mut executor = CollapseExecutor::new(mesh, self.preserve_boundary);
        debug!(
            "simplifying {} triangles / {} vertices to {} triangles",
            executor.active_triangles(),
            mesh.vertex_count(),
            target_triangles
        );

        if executor.active_triangles() > target_triangles {
            executor.populate();
            executor.run(target_triangles, cancel)?;
        }

        let achieved = executor.active_triangles();
        let status = if achieved <= target_triangles {
            SimplificationStatus::ReachedTarget
        } else {
            debug!(
                "candidates exhausted at {} triangles, target was {}",
                achieved, target_triangles
            );
            SimplificationStatus::ExhaustedEarly { achieved }
        };

        let mut output = extract(&mut executor);
        if self.recalculate_normals {
            output.recalculate_normals();
        }

        let stats = SimplificationStats {
            input_triangles: mesh.face_count(),
            output_triangles: output.face_count(),
            output_vertices: output.vertex_count(),
            collapses: executor.collapses(),
            discarded_candidates: executor.discarded_candidates(),
            degenerate_input_faces: executor.degenerate_input_faces(),
        };
        debug!(
            "simplified to {} triangles / {} vertices in {} collapses",
            stats.output_triangles, stats.output_vertices, stats.collapses
        );

        Ok(SimplificationResult {
            mesh: output,
            status,
            stats,
        })
    }
}

impl MeshSimplifier for EdgeCollapseSimplifier {
    fn simplify(&self, mesh: &TriangleMesh, target_triangles: usize) -> Result<SimplificationResult> {
        self.run(mesh, target_triangles, None)
    }
}
