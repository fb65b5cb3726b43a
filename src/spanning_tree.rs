use crate::data_wrappers::{MstEdge, SltNode};
use crate::union_find::UnionFind;
use crate::DistanceMetric;
use num_traits::Float;
use std::cmp::Ordering;

/// Prim's algorithm over the complete graph of mutual reachability distances, which is never
/// materialised. Edges come back sorted by ascending distance. Ties between candidate nodes go
/// to the lowest index.
pub(crate) fn prims_min_spanning_tree<T: Float>(
    data: &[Vec<T>],
    core_distances: &[T],
    dist_metric: DistanceMetric,
) -> Vec<MstEdge<T>> {
    let n_samples = data.len();
    let mut in_tree = vec![false; n_samples];
    let mut min_dists = vec![T::infinity(); n_samples];
    let mut closest = vec![0_usize; n_samples];
    let mut mst = Vec::with_capacity(n_samples.saturating_sub(1));

    let mut current = 0;
    for _ in 1..n_samples {
        in_tree[current] = true;
        let mut next: Option<usize> = None;

        for other in 0..n_samples {
            if in_tree[other] {
                continue;
            }
            let mrd = mutual_reachability_dist(data, core_distances, dist_metric, current, other);
            if mrd < min_dists[other] {
                min_dists[other] = mrd;
                closest[other] = current;
            }
            if next.map_or(true, |best| min_dists[other] < min_dists[best]) {
                next = Some(other);
            }
        }

        // Every pass leaves at least one node outside the tree
        let Some(next) = next else { break };
        mst.push(MstEdge {
            left: closest[next],
            right: next,
            distance: min_dists[next],
        });
        current = next;
    }

    mst.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    mst
}

fn mutual_reachability_dist<T: Float>(
    data: &[Vec<T>],
    core_distances: &[T],
    dist_metric: DistanceMetric,
    a: usize,
    b: usize,
) -> T {
    let dist = dist_metric.calc_dist(&data[a], &data[b]);
    core_distances[a].max(core_distances[b]).max(dist)
}

/// Replays the sorted spanning tree edges as merges, producing `n_samples - 1` nodes.
pub(crate) fn make_single_linkage_tree<T: Float>(
    min_spanning_tree: &[MstEdge<T>],
    n_samples: usize,
) -> Vec<SltNode<T>> {
    let mut union_find = UnionFind::new(n_samples);

    min_spanning_tree
        .iter()
        .map(|edge| {
            let left_child = union_find.find(edge.left);
            let right_child = union_find.find(edge.right);
            let size = union_find.size_of(left_child) + union_find.size_of(right_child);
            union_find.union(left_child, right_child);
            SltNode {
                left_child,
                right_child,
                distance: edge.distance,
                size,
            }
        })
        .collect()
}
