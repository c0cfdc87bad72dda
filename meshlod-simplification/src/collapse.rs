//! Greedy edge collapse loop
//!
//! The executor owns a working copy of the mesh. Each step pops the cheapest
//! current candidate, folds the higher-indexed endpoint into the lower one,
//! drops triangles that became degenerate and re-scores the survivor's edges.

use crate::cancel::CancelToken;
use crate::connectivity::Connectivity;
use crate::cost::{curvature, edge_cost};
use crate::queue::{Candidate, CandidateQueue};
use crate::union_find::UnionFind;
use meshlod_core::{Error, Point2f, Point3f, Result, TriangleMesh, Vector3f};
use tracing::{debug, trace};

/// Mutable simplification state for a single mesh.
#[derive(Debug)]
pub struct CollapseExecutor {
    pub(crate) positions: Vec<Point3f>,
    pub(crate) normals: Option<Vec<Vector3f>>,
    pub(crate) uvs: Option<Vec<Point2f>>,
    pub(crate) faces: Vec<[usize; 3]>,
    pub(crate) removed: Vec<bool>,
    pub(crate) remap: UnionFind,
    connectivity: Connectivity,
    versions: Vec<u32>,
    queue: CandidateQueue,
    active_triangles: usize,
    preserve_boundary: bool,
    collapses: usize,
    self_merges: usize,
}

impl CollapseExecutor {
    /// Copy `mesh` into a working state. The mesh must already be validated.
    ///
    /// Degenerate input faces start out removed and never count as active.
    pub fn new(mesh: &TriangleMesh, preserve_boundary: bool) -> Self {
        let nv = mesh.vertices.len();
        let connectivity = Connectivity::build(nv, &mesh.faces);

        let mut removed = vec![false; mesh.faces.len()];
        for &fi in connectivity.degenerate_faces() {
            removed[fi] = true;
        }
        let active_triangles = mesh.faces.len() - connectivity.degenerate_faces().len();

        Self {
            positions: mesh.vertices.clone(),
            normals: mesh.normals.clone().filter(|_| mesh.has_normals()),
            uvs: mesh.uvs.clone().filter(|_| mesh.has_uvs()),
            faces: mesh.faces.clone(),
            removed,
            remap: UnionFind::new(nv),
            connectivity,
            versions: vec![0; nv],
            queue: CandidateQueue::new(),
            active_triangles,
            preserve_boundary,
            collapses: 0,
            self_merges: 0,
        }
    }

    pub fn active_triangles(&self) -> usize {
        self.active_triangles
    }

    pub fn collapses(&self) -> usize {
        self.collapses
    }

    /// Candidates dropped at pop time, either stale or already merged.
    pub fn discarded_candidates(&self) -> usize {
        self.queue.stale_discarded() + self.self_merges
    }

    pub fn degenerate_input_faces(&self) -> usize {
        self.connectivity.degenerate_faces().len()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_alive(&self, v: usize) -> bool {
        self.remap.is_root(v)
    }

    pub fn position(&self, v: usize) -> Point3f {
        self.positions[v]
    }

    /// Queue one candidate for every edge of the input.
    pub fn populate(&mut self) {
        let edges: Vec<_> = self.connectivity.edges().collect();
        for (a, b) in edges {
            self.enqueue(a, b);
        }
        debug!(
            "queued {} of {} edges for {} active triangles",
            self.queue.len(),
            self.connectivity.edges().count(),
            self.active_triangles
        );
    }

    /// Collapse until at most `target` triangles remain or the queue runs dry.
    pub fn run(&mut self, target: usize, cancel: Option<&CancelToken>) -> Result<()> {
        while self.active_triangles > target {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                debug!("cancelled after {} collapses", self.collapses);
                return Err(Error::Cancelled);
            }
            if self.collapse_next().is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Perform the next valid collapse.
    ///
    /// Returns `(survivor, removed)` or `None` once the queue is exhausted.
    pub fn collapse_next(&mut self) -> Option<(usize, usize)> {
        loop {
            let candidate = self.queue.pop_valid(&self.versions)?;
            let a = self.remap.find(candidate.v1);
            let b = self.remap.find(candidate.v2);
            if a == b {
                self.self_merges += 1;
                continue;
            }
            let (keep, drop) = (a.min(b), a.max(b));
            self.collapse(keep, drop, candidate.cost);
            return Some((keep, drop));
        }
    }

    fn collapse(&mut self, keep: usize, drop: usize, cost: f64) {
        self.merge_attributes(keep, drop);
        self.remap.union_into(drop, keep);

        let before = self.active_triangles;
        for t in self.connectivity.take_triangles(drop) {
            if self.removed[t] {
                continue;
            }
            let [a, b, c] = self.resolve_face(t);
            if a == b || b == c || a == c {
                self.removed[t] = true;
                self.active_triangles -= 1;
            } else {
                self.connectivity.add_triangle(keep, t);
            }
        }
        let removed = &self.removed;
        self.connectivity.retain_triangles(keep, |&t| !removed[t]);

        let mut merged = self.connectivity.take_neighbors(keep);
        merged.extend(self.connectivity.take_neighbors(drop));
        for n in &mut merged {
            *n = self.remap.find(*n);
        }
        merged.retain(|&n| n != keep);
        self.connectivity.set_neighbors(keep, merged);

        // Bump after all adjacency edits so every older candidate on either
        // endpoint is stale
        self.versions[keep] += 1;
        self.versions[drop] += 1;
        self.collapses += 1;

        trace!(
            "collapsed {} into {} (cost {:.6}), removed {} triangles, {} remain",
            drop,
            keep,
            cost,
            before - self.active_triangles,
            self.active_triangles
        );

        let neighbors = self.connectivity.neighbors(keep).to_vec();
        for n in neighbors {
            self.enqueue(keep, n);
        }
    }

    fn merge_attributes(&mut self, keep: usize, drop: usize) {
        self.positions[keep] = nalgebra::center(&self.positions[keep], &self.positions[drop]);

        if let Some(normals) = &mut self.normals {
            // A sum that cancels out leaves the survivor's normal alone
            if let Some(n) = (normals[keep] + normals[drop]).try_normalize(f32::EPSILON) {
                normals[keep] = n;
            }
        }

        if let Some(uvs) = &mut self.uvs {
            uvs[keep] = nalgebra::center(&uvs[keep], &uvs[drop]);
        }
    }

    pub(crate) fn resolve_face(&mut self, t: usize) -> [usize; 3] {
        let [a, b, c] = self.faces[t];
        [self.remap.find(a), self.remap.find(b), self.remap.find(c)]
    }

    /// Active triangles containing both live vertices `a` and `b`.
    pub fn shared_triangles(&mut self, a: usize, b: usize) -> usize {
        let mut count = 0;
        for &t in self.connectivity.triangles(a) {
            if self.removed[t] {
                continue;
            }
            let [x, y, z] = self.faces[t];
            let resolved = [self.remap.find(x), self.remap.find(y), self.remap.find(z)];
            if resolved.contains(&a) && resolved.contains(&b) {
                count += 1;
            }
        }
        count
    }

    /// Score the edge `(a, b)` and queue it with the current version stamps.
    ///
    /// Non-finite costs are never queued. Border edges are skipped when
    /// boundary preservation is on.
    fn enqueue(&mut self, a: usize, b: usize) {
        let (v1, v2) = (a.min(b), a.max(b));
        if v1 == v2 || !self.is_alive(v1) || !self.is_alive(v2) {
            return;
        }

        let shared = self.shared_triangles(v1, v2);
        if self.preserve_boundary && shared == 1 {
            return;
        }

        let normals = self.normals.as_ref();
        let curv = curvature(normals.map(|n| &n[v1]), normals.map(|n| &n[v2]));
        let cost = edge_cost(&self.positions[v1], &self.positions[v2], curv, shared);
        if !cost.is_finite() {
            trace!("skipping edge ({}, {}) with non-finite cost", v1, v2);
            return;
        }

        self.queue.push(Candidate {
            v1,
            v2,
            cost,
            stamp1: self.versions[v1],
            stamp2: self.versions[v2],
        });
    }
}
