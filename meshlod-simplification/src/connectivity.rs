//! Per-vertex triangle incidence and neighbour lists
//!
//! Both lists are kept sorted so membership checks and inserts are binary
//! searches. They only ever grow through merges during a run.

use itertools::Itertools;
use tracing::warn;

/// Vertex adjacency for an indexed triangle list.
#[derive(Debug, Clone)]
pub struct Connectivity {
    triangles: Vec<Vec<usize>>,
    neighbors: Vec<Vec<usize>>,
    degenerate: Vec<usize>,
}

impl Connectivity {
    /// Build adjacency for `vertex_count` vertices.
    ///
    /// Indices must already be range-checked. Faces that repeat a vertex index
    /// are skipped and reported through [`Connectivity::degenerate_faces`].
    pub fn build(vertex_count: usize, faces: &[[usize; 3]]) -> Self {
        let mut triangles = vec![Vec::new(); vertex_count];
        let mut neighbors = vec![Vec::new(); vertex_count];
        let mut degenerate = Vec::new();

        for (fi, face) in faces.iter().enumerate() {
            if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
                degenerate.push(fi);
                continue;
            }
            for &v in face {
                insert_sorted(&mut triangles[v], fi);
            }
            for (&a, &b) in face.iter().tuple_combinations() {
                insert_sorted(&mut neighbors[a], b);
                insert_sorted(&mut neighbors[b], a);
            }
        }

        if !degenerate.is_empty() {
            warn!(
                "skipped {} degenerate input faces (first at index {})",
                degenerate.len(),
                degenerate[0]
            );
        }

        Self {
            triangles,
            neighbors,
            degenerate,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangles incident to `v`, including ones merged in from collapsed vertices.
    pub fn triangles(&self, v: usize) -> &[usize] {
        &self.triangles[v]
    }

    /// Neighbour vertices of `v`. Entries may name vertices that have since
    /// been collapsed; resolve them before use.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    /// Indices of input faces skipped at build time.
    pub fn degenerate_faces(&self) -> &[usize] {
        &self.degenerate
    }

    /// Every edge once, as `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(v, list)| {
            list.iter()
                .copied()
                .filter(move |&n| n > v)
                .map(move |n| (v, n))
        })
    }

    /// Add `t` to the incidence list of `v` if it is not already there.
    pub(crate) fn add_triangle(&mut self, v: usize, t: usize) -> bool {
        insert_sorted(&mut self.triangles[v], t)
    }

    pub(crate) fn take_triangles(&mut self, v: usize) -> Vec<usize> {
        std::mem::take(&mut self.triangles[v])
    }

    pub(crate) fn retain_triangles(&mut self, v: usize, keep: impl FnMut(&usize) -> bool) {
        self.triangles[v].retain(keep);
    }

    pub(crate) fn take_neighbors(&mut self, v: usize) -> Vec<usize> {
        std::mem::take(&mut self.neighbors[v])
    }

    pub(crate) fn set_neighbors(&mut self, v: usize, mut list: Vec<usize>) {
        list.sort_unstable();
        list.dedup();
        self.neighbors[v] = list;
    }
}

/// Insert into a sorted list, returning `false` on duplicates.
fn insert_sorted(list: &mut Vec<usize>, value: usize) -> bool {
    match list.binary_search(&value) {
        Ok(_) => false,
        Err(pos) => {
            list.insert(pos, value);
            true
        }
    }
}
