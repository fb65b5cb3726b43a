use crate::data_wrappers::{CondensedNode, SltNode};
use crate::NOISE_LABEL;
use num_traits::Float;
use std::collections::VecDeque;

/// The single linkage tree with every split that sheds fewer than `min_cluster_size` points
/// treated as points falling out of a cluster rather than as a new cluster.
///
/// Clusters are numbered from `n_samples` (the root) upwards, parents before children.
pub(crate) struct CondensedTree<T> {
    nodes: Vec<CondensedNode<T>>,
    n_samples: usize,
    n_clusters: usize,
}

impl<T: Float> CondensedTree<T> {
    /// `single_linkage_tree` must hold the `n_samples - 1` merges of at least two points.
    pub(crate) fn new(
        single_linkage_tree: &[SltNode<T>],
        n_samples: usize,
        min_cluster_size: usize,
    ) -> Self {
        let root = 2 * (n_samples - 1);
        let mut relabel = vec![0_usize; root + 1];
        relabel[root] = n_samples;
        let mut next_label = n_samples + 1;
        let mut ignore = vec![false; root + 1];
        let mut nodes = Vec::with_capacity(n_samples * 2);

        let size_of = |node_id: usize| {
            if node_id < n_samples {
                1
            } else {
                single_linkage_tree[node_id - n_samples].size
            }
        };

        for node_id in descendants(single_linkage_tree, n_samples, root) {
            if ignore[node_id] || node_id < n_samples {
                continue;
            }
            let slt_node = &single_linkage_tree[node_id - n_samples];
            let parent = relabel[node_id];
            let lambda = calc_lambda(slt_node.distance);
            let (left, right) = (slt_node.left_child, slt_node.right_child);
            let (left_size, right_size) = (size_of(left), size_of(right));

            match (left_size >= min_cluster_size, right_size >= min_cluster_size) {
                (true, true) => {
                    for (child, size) in [(left, left_size), (right, right_size)] {
                        relabel[child] = next_label;
                        nodes.push(CondensedNode {
                            parent,
                            child: next_label,
                            lambda,
                            size,
                        });
                        next_label += 1;
                    }
                }
                (false, false) => {
                    for child in [left, right] {
                        for sub_node in descendants(single_linkage_tree, n_samples, child) {
                            if sub_node < n_samples {
                                nodes.push(CondensedNode {
                                    parent,
                                    child: sub_node,
                                    lambda,
                                    size: 1,
                                });
                            }
                            ignore[sub_node] = true;
                        }
                    }
                }
                (big_left, _) => {
                    // One side carries on as the parent cluster, the other falls out
                    let (kept, shed) = if big_left { (left, right) } else { (right, left) };
                    relabel[kept] = parent;
                    for sub_node in descendants(single_linkage_tree, n_samples, shed) {
                        if sub_node < n_samples {
                            nodes.push(CondensedNode {
                                parent,
                                child: sub_node,
                                lambda,
                                size: 1,
                            });
                        }
                        ignore[sub_node] = true;
                    }
                }
            }
        }

        CondensedTree {
            nodes,
            n_samples,
            n_clusters: next_label - n_samples,
        }
    }

    fn root(&self) -> usize {
        self.n_samples
    }

    fn is_cluster(&self, node_id: usize) -> bool {
        node_id >= self.n_samples
    }

    fn children_of(&self, cluster_id: usize) -> impl Iterator<Item = &CondensedNode<T>> + '_ {
        self.nodes.iter().filter(move |node| node.parent == cluster_id)
    }

    fn lambda_birth(&self, cluster_id: usize) -> T {
        self.nodes
            .iter()
            .find(|node| node.child == cluster_id)
            .map(|node| node.lambda)
            .unwrap_or_else(T::zero)
    }

    /// Excess of mass of every cluster, indexed by `cluster_id - n_samples`.
    fn calc_stabilities(&self) -> Vec<T> {
        let births: Vec<T> = (0..self.n_clusters)
            .map(|n| self.lambda_birth(self.n_samples + n))
            .collect();
        let mut stabilities = vec![T::zero(); self.n_clusters];
        for node in &self.nodes {
            let idx = node.parent - self.n_samples;
            let size = T::from(node.size).unwrap_or_else(T::one);
            stabilities[idx] = stabilities[idx] + (node.lambda - births[idx]) * size;
        }
        stabilities
    }

    /// Picks the clusters that maximise total stability: a cluster wins unless its child
    /// clusters are, together, more stable. Returned ids are ascending.
    pub(crate) fn select_clusters(&self, allow_single_cluster: bool) -> Vec<usize> {
        let mut stabilities = self.calc_stabilities();
        let mut selected = vec![false; self.n_clusters];
        let first = if allow_single_cluster { 0 } else { 1 };

        // Children always have larger ids than their parents
        for idx in (first..self.n_clusters).rev() {
            let cluster_id = self.n_samples + idx;
            let child_stability = self
                .children_of(cluster_id)
                .filter(|node| self.is_cluster(node.child))
                .map(|node| stabilities[node.child - self.n_samples])
                .fold(T::zero(), |acc, stability| acc + stability);

            if child_stability > stabilities[idx] {
                stabilities[idx] = child_stability;
            } else {
                selected[idx] = true;
                for descendant in self.descendant_clusters(cluster_id) {
                    selected[descendant - self.n_samples] = false;
                }
            }
        }

        (0..self.n_clusters)
            .filter(|&idx| selected[idx])
            .map(|idx| self.n_samples + idx)
            .collect()
    }

    fn descendant_clusters(&self, cluster_id: usize) -> Vec<usize> {
        let mut process_queue = VecDeque::from([cluster_id]);
        let mut clusters = Vec::new();
        while let Some(current) = process_queue.pop_front() {
            for node in self.children_of(current) {
                if self.is_cluster(node.child) {
                    clusters.push(node.child);
                    process_queue.push_back(node.child);
                }
            }
        }
        clusters
    }

    /// Labels each point with the position of its selected cluster in `winning_clusters`, or
    /// noise if it belongs to none.
    pub(crate) fn label_points(&self, winning_clusters: &[usize]) -> Vec<i32> {
        let mut labels = vec![NOISE_LABEL; self.n_samples];

        for (label, &cluster_id) in winning_clusters.iter().enumerate() {
            // Only points that survive to the root's densest split belong to a root cluster
            let lambda_threshold = if cluster_id == self.root() {
                self.children_of(cluster_id)
                    .map(|node| node.lambda)
                    .fold(T::neg_infinity(), T::max)
            } else {
                T::neg_infinity()
            };

            let mut process_queue = VecDeque::from([cluster_id]);
            while let Some(current) = process_queue.pop_front() {
                for node in self.children_of(current) {
                    if self.is_cluster(node.child) {
                        process_queue.push_back(node.child);
                    } else if node.lambda >= lambda_threshold {
                        labels[node.child] = label as i32;
                    }
                }
            }
        }
        labels
    }
}

fn calc_lambda<T: Float>(distance: T) -> T {
    if distance > T::zero() {
        T::one() / distance
    } else {
        T::infinity()
    }
}

/// Breadth first walk of the single linkage tree from `root`, `root` included.
fn descendants<T>(single_linkage_tree: &[SltNode<T>], n_samples: usize, root: usize) -> Vec<usize> {
    let mut process_queue = VecDeque::from([root]);
    let mut node_ids = Vec::new();
    while let Some(node_id) = process_queue.pop_front() {
        node_ids.push(node_id);
        if node_id >= n_samples {
            let node = &single_linkage_tree[node_id - n_samples];
            process_queue.push_back(node.left_child);
            process_queue.push_back(node.right_child);
        }
    }
    node_ids
}
