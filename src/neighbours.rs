use crate::{DistanceMetric, Result};
use kdtree::KdTree;
use num_traits::Float;

#[cfg(feature = "parallel")]
pub(crate) mod parallel;
pub(crate) mod serial;

/// Above this many points, `NnAlgorithm::Auto` switches from brute force to a kd-tree.
pub(crate) const BRUTE_FORCE_N_SAMPLES_LIMIT: usize = 250;

/// The nearest neighbour algorithm options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NnAlgorithm {
    /// Selects the algorithm based on the size of the input data
    #[default]
    Auto,
    /// Measures each point against all others
    BruteForce,
    /// K-dimensional tree algorithm.
    KdTree,
}

/// Answers the two neighbourhood questions density clustering asks of a point set: how far is
/// a point's kth nearest neighbour, and which points lie within a radius of it.
pub(crate) enum NeighbourSearch<'a, T: PartialEq> {
    BruteForce {
        data: &'a [Vec<T>],
        metric: DistanceMetric,
    },
    KdTree {
        data: &'a [Vec<T>],
        tree: KdTree<T, usize, &'a Vec<T>>,
        metric: DistanceMetric,
    },
}

impl<'a, T: Float> NeighbourSearch<'a, T> {
    pub(crate) fn new(
        data: &'a [Vec<T>],
        nn_algo: NnAlgorithm,
        metric: DistanceMetric,
    ) -> Result<Self> {
        let use_tree = match nn_algo {
            NnAlgorithm::Auto => data.len() > BRUTE_FORCE_N_SAMPLES_LIMIT,
            NnAlgorithm::BruteForce => false,
            NnAlgorithm::KdTree => true,
        };
        if !use_tree || data.first().map_or(true, Vec::is_empty) {
            return Ok(Self::BruteForce { data, metric });
        }

        let mut tree = KdTree::new(data[0].len());
        for (n, point) in data.iter().enumerate() {
            tree.add(point, n)?;
        }
        Ok(Self::KdTree { data, tree, metric })
    }

    pub(crate) fn len(&self) -> usize {
        self.data().len()
    }

    fn data(&self) -> &'a [Vec<T>] {
        match self {
            Self::BruteForce { data, .. } | Self::KdTree { data, .. } => *data,
        }
    }

    /// Distance from point `idx` to its kth nearest neighbour, where the point itself is the
    /// first. `k` must be in `1..=len()`.
    pub(crate) fn kth_neighbour_distance(&self, idx: usize, k: usize) -> Result<T> {
        match self {
            Self::BruteForce { data, metric } => {
                let point = &data[idx];
                let mut distances: Vec<T> =
                    data.iter().map(|other| metric.calc_dist(point, other)).collect();
                let (_, kth, _) = distances.select_nth_unstable_by(k - 1, |a, b| {
                    a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
                });
                Ok(*kth)
            }
            Self::KdTree { data, tree, metric } => {
                let dist_func = metric.as_fn::<T>();
                let nearest = tree.nearest(&data[idx], k, &dist_func)?;
                Ok(nearest.last().map(|(dist, _)| *dist).unwrap_or_else(T::zero))
            }
        }
    }

    /// Indices of every point within `radius` of point `idx`, itself included, ascending.
    pub(crate) fn within(&self, idx: usize, radius: T) -> Result<Vec<usize>> {
        match self {
            Self::BruteForce { data, metric } => {
                let point = &data[idx];
                Ok(data
                    .iter()
                    .enumerate()
                    .filter(|(_, other)| metric.calc_dist(point, other) <= radius)
                    .map(|(n, _)| n)
                    .collect())
            }
            Self::KdTree { data, tree, metric } => {
                let dist_func = metric.as_fn::<T>();
                let mut found: Vec<usize> = tree
                    .within(&data[idx], radius, &dist_func)?
                    .into_iter()
                    .map(|(_, &n)| n)
                    .collect();
                found.sort_unstable();
                Ok(found)
            }
        }
    }
}
