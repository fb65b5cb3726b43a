/// Disjoint sets for building a single linkage tree. Every union creates a new label, so the
/// merged set of `m` and `n` is known by the id of the merge rather than by `m` or `n`.
pub(crate) struct UnionFind {
    parent: Vec<Option<usize>>,
    size: Vec<usize>,
    next_label: usize,
}

impl UnionFind {
    pub(crate) fn new(n_samples: usize) -> Self {
        let capacity = (2 * n_samples).saturating_sub(1);
        let size = (0..capacity)
            .map(|n| if n < n_samples { 1 } else { 0 })
            .collect();
        UnionFind {
            parent: vec![None; capacity],
            size,
            next_label: n_samples,
        }
    }

    /// Merges the sets rooted at `m` and `n`, returning the id of the new set.
    pub(crate) fn union(&mut self, m: usize, n: usize) -> usize {
        let label = self.next_label;
        self.parent[m] = Some(label);
        self.parent[n] = Some(label);
        self.size[label] = self.size[m] + self.size[n];
        self.next_label += 1;
        label
    }

    pub(crate) fn find(&mut self, n: usize) -> usize {
        let mut root = n;
        while let Some(parent) = self.parent[root] {
            root = parent;
        }
        // Path compression
        let mut current = n;
        while let Some(parent) = self.parent[current] {
            if parent != root {
                self.parent[current] = Some(root);
            }
            current = parent;
        }
        root
    }

    pub(crate) fn size_of(&self, n: usize) -> usize {
        self.size[n]
    }
}
