//! Vertex remapping for collapsed vertices
//!
//! A flat parent table with path compression. Unions are directed: the caller
//! picks which vertex survives, so there is no rank or size balancing.

/// Array-backed union-find over vertex indices.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    /// Every vertex starts as its own representative.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Resolve `v` to its representative, pointing every visited node
    /// directly at the root.
    pub fn find(&mut self, v: usize) -> usize {
        let root = self.root(v);
        let mut current = v;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Resolve `v` without modifying the table.
    pub fn root(&self, v: usize) -> usize {
        let mut current = v;
        while self.parent[current] != current {
            current = self.parent[current];
        }
        current
    }

    /// Fold the group of `loser` into the group of `winner`.
    ///
    /// Returns `false` when both already share a representative.
    pub fn union_into(&mut self, loser: usize, winner: usize) -> bool {
        let l = self.find(loser);
        let w = self.find(winner);
        if l == w {
            return false;
        }
        self.parent[l] = w;
        true
    }

    /// A vertex is alive while it is its own representative.
    pub fn is_root(&self, v: usize) -> bool {
        self.parent[v] == v
    }
}
