use crate::condensed_tree::CondensedTree;
#[cfg(feature = "parallel")]
use crate::neighbours::parallel;
use crate::neighbours::{serial, NeighbourSearch};
use crate::spanning_tree::{make_single_linkage_tree, prims_min_spanning_tree};
use crate::validation::DataValidator;
#[cfg(feature = "parallel")]
use crate::clustering::summarise;
#[cfg(feature = "parallel")]
use crate::ClusteringResult;
use crate::{Algorithm, DensityClusterer, HdbscanHyperParams, Result, NOISE_LABEL};
use num_traits::Float;

// A cluster of one point is no cluster at all
const MIN_CLUSTER_SIZE_MINIMUM: usize = 2;

/// Hierarchical density based clustering (HDBSCAN) over a borrowed point set.
///
/// Rather than a single radius, HDBSCAN looks at the data at every density. It links points by
/// mutual reachability distance, condenses the resulting hierarchy so that only groups of at
/// least `min_cluster_size` points count as clusters, and keeps the clusters that persist over
/// the widest range of densities. Points outside those clusters are noise.
#[derive(Debug, Clone, PartialEq)]
pub struct Hdbscan<'a, T> {
    data: &'a [Vec<T>],
    hp: HdbscanHyperParams,
}

/// Sizes after clamping to what the data allows.
struct EffectiveSizes {
    min_cluster_size: usize,
    min_samples: usize,
}

impl<'a, T: Float> Hdbscan<'a, T> {
    /// Creates an HDBSCAN clusterer using a custom hyper parameter configuration.
    ///
    /// # Examples
    /// ```
    ///use density_outliers::{Hdbscan, HdbscanHyperParams};
    ///
    ///let data: Vec<Vec<f32>> = vec![
    ///    vec![1.3, 1.1],
    ///    vec![1.3, 1.2],
    ///    vec![1.0, 1.1],
    ///    vec![1.2, 1.2],
    ///    vec![0.9, 1.0],
    ///    vec![0.9, 1.0],
    ///    vec![3.7, 4.0],
    ///    vec![3.9, 3.9],
    ///];
    ///let config = HdbscanHyperParams::builder()
    ///    .min_cluster_size(3)
    ///    .min_samples(2)
    ///    .build();
    ///let clusterer = Hdbscan::new(&data, config);
    ///assert_eq!(data.len(), clusterer.cluster().unwrap().len());
    /// ```
    pub fn new(data: &'a [Vec<T>], hyper_params: HdbscanHyperParams) -> Self {
        Hdbscan {
            data,
            hp: hyper_params,
        }
    }

    /// Creates an HDBSCAN clusterer using the default hyper parameters.
    pub fn default_hyper_params(data: &'a [Vec<T>]) -> Self {
        Hdbscan::new(data, HdbscanHyperParams::default())
    }

    /// Performs clustering on the points passed to the constructor.
    ///
    /// # Returns
    /// * A label per point: a cluster id from 0 upwards, or -1 for noise. An error is
    ///   returned if the data is empty, has mismatched dimensions or non-finite coordinates,
    ///   or if a hyper parameter is zero.
    ///
    /// # Examples
    /// ```
    ///use std::collections::HashSet;
    ///use density_outliers::Hdbscan;
    ///
    ///let data: Vec<Vec<f32>> = vec![
    ///    vec![1.5, 2.2],
    ///    vec![1.0, 1.1],
    ///    vec![1.2, 1.4],
    ///    vec![0.8, 1.0],
    ///    vec![1.1, 1.0],
    ///    vec![3.7, 4.0],
    ///    vec![3.9, 3.9],
    ///    vec![3.6, 4.1],
    ///    vec![3.8, 3.9],
    ///    vec![4.0, 4.1],
    ///    vec![10.0, 10.0],
    ///];
    ///let clusterer = Hdbscan::default_hyper_params(&data);
    ///let labels = clusterer.cluster().unwrap();
    /// // First five points form one cluster
    ///assert_eq!(1, labels[..5].iter().collect::<HashSet<_>>().len());
    /// // Next five points are a second cluster
    ///assert_eq!(1, labels[5..10].iter().collect::<HashSet<_>>().len());
    /// // The final point is noise
    ///assert_eq!(-1, labels[10]);
    /// ```
    pub fn cluster(&self) -> Result<Vec<i32>> {
        let Some(sizes) = self.prepare()? else {
            return Ok(vec![NOISE_LABEL; self.data.len()]);
        };
        let search = NeighbourSearch::new(self.data, self.hp.nn_algo, self.hp.dist_metric)?;
        let core_distances = serial::calc_core_distances(&search, sizes.min_samples)?;
        Ok(self.label_hierarchy(&core_distances, sizes.min_cluster_size))
    }

    /// Validates the input and settles the sizes to cluster with. `None` means there are
    /// too few points for any cluster, so everything is noise.
    fn prepare(&self) -> Result<Option<EffectiveSizes>> {
        DataValidator::infer(self.data)?.validate_input_data(self.data)?;
        self.hp.validate()?;
        let n_samples = self.data.len();

        let mut min_cluster_size = self.hp.min_cluster_size;
        if min_cluster_size < MIN_CLUSTER_SIZE_MINIMUM {
            tracing::warn!(
                min_cluster_size,
                "min_cluster_size is below the minimum of {MIN_CLUSTER_SIZE_MINIMUM}, raising it"
            );
            min_cluster_size = MIN_CLUSTER_SIZE_MINIMUM;
        }
        if n_samples < min_cluster_size {
            tracing::debug!(n_samples, min_cluster_size, "too few points to form a cluster");
            return Ok(None);
        }

        let mut min_samples = self.hp.min_samples;
        if min_samples > n_samples {
            tracing::warn!(
                min_samples,
                n_samples,
                "min_samples exceeds the number of points, using {n_samples}"
            );
            min_samples = n_samples;
        }

        Ok(Some(EffectiveSizes {
            min_cluster_size,
            min_samples,
        }))
    }

    fn label_hierarchy(&self, core_distances: &[T], min_cluster_size: usize) -> Vec<i32> {
        let n_samples = self.data.len();
        let min_spanning_tree =
            prims_min_spanning_tree(self.data, core_distances, self.hp.dist_metric);
        let single_linkage_tree = make_single_linkage_tree(&min_spanning_tree, n_samples);
        let condensed_tree = CondensedTree::new(&single_linkage_tree, n_samples, min_cluster_size);
        let winning_clusters = condensed_tree.select_clusters(self.hp.allow_single_cluster);
        condensed_tree.label_points(&winning_clusters)
    }
}

#[cfg(feature = "parallel")]
impl<'a, T: Float + Send + Sync> Hdbscan<'a, T> {
    /// Performs clustering with core distances computed on the rayon thread pool. Produces the
    /// same labels as [`Hdbscan::cluster`]. Not worthwhile for small datasets.
    pub fn cluster_par(&self) -> Result<Vec<i32>> {
        let Some(sizes) = self.prepare()? else {
            return Ok(vec![NOISE_LABEL; self.data.len()]);
        };
        let search = NeighbourSearch::new(self.data, self.hp.nn_algo, self.hp.dist_metric)?;
        let core_distances = parallel::calc_core_distances(&search, sizes.min_samples)?;
        Ok(self.label_hierarchy(&core_distances, sizes.min_cluster_size))
    }

    pub fn fit_par(&self) -> Result<ClusteringResult> {
        Ok(summarise(Algorithm::Hdbscan, self.cluster_par()?))
    }
}

impl<'a, T: Float> DensityClusterer for Hdbscan<'a, T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Hdbscan
    }

    fn cluster(&self) -> Result<Vec<i32>> {
        Hdbscan::cluster(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DistanceMetric, NnAlgorithm, OutlierError};
    use std::collections::HashSet;

    fn two_blobs() -> Vec<Vec<f64>> {
        vec![
            vec![1.5, 2.2],
            vec![1.0, 1.1],
            vec![1.2, 1.4],
            vec![0.8, 1.0],
            vec![1.1, 1.0],
            vec![3.7, 4.0],
            vec![3.9, 3.9],
            vec![3.6, 4.1],
            vec![3.8, 3.9],
            vec![4.0, 4.1],
            vec![10.0, 10.0],
        ]
    }

    #[test]
    fn cluster() {
        let data = two_blobs();
        let labels = Hdbscan::default_hyper_params(&data).cluster().unwrap();
        assert_eq!(1, labels[..5].iter().collect::<HashSet<_>>().len());
        assert_eq!(1, labels[5..10].iter().collect::<HashSet<_>>().len());
        assert_ne!(labels[0], labels[5]);
        assert!(labels[0] >= 0 && labels[5] >= 0);
        assert_eq!(-1, labels[10]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn fit_par_matches_fit() {
        let data = two_blobs();
        let hdbscan = Hdbscan::default_hyper_params(&data);
        let result = hdbscan.fit_par().unwrap();
        assert_eq!(hdbscan.fit().unwrap(), result);
        assert_eq!(2, result.n_clusters());
        assert_eq!(1, result.n_noise_points());
    }

    #[test]
    fn kd_tree_agrees_with_brute_force() {
        let data = two_blobs();
        let brute = HdbscanHyperParams::builder().nn_algorithm(NnAlgorithm::BruteForce).build();
        let tree = HdbscanHyperParams::builder().nn_algorithm(NnAlgorithm::KdTree).build();
        assert_eq!(
            Hdbscan::new(&data, brute).cluster().unwrap(),
            Hdbscan::new(&data, tree).cluster().unwrap()
        );
    }

    #[test]
    fn manhattan() {
        let data = two_blobs();
        let hp = HdbscanHyperParams::builder().dist_metric(DistanceMetric::Manhattan).build();
        let labels = Hdbscan::new(&data, hp).cluster().unwrap();
        assert_eq!(-1, labels[10]);
        assert_eq!(2, labels.iter().filter(|&&l| l >= 0).collect::<HashSet<_>>().len());
    }

    #[test]
    fn too_few_points_are_all_noise() {
        let data = vec![vec![0.0, 0.0], vec![0.1, 0.1]];
        let labels = Hdbscan::default_hyper_params(&data).cluster().unwrap();
        assert_eq!(vec![-1, -1], labels);
    }

    #[test]
    fn min_samples_larger_than_data_is_clamped() {
        let data = two_blobs();
        let hp = HdbscanHyperParams::builder().min_cluster_size(5).min_samples(50).build();
        let labels = Hdbscan::new(&data, hp).cluster().unwrap();
        assert_eq!(data.len(), labels.len());
    }

    #[test]
    fn zero_min_cluster_size() {
        let data = two_blobs();
        let hp = HdbscanHyperParams::builder().min_cluster_size(0).min_samples(3).build();
        let result = Hdbscan::new(&data, hp).cluster();
        assert!(matches!(
            result,
            Err(OutlierError::InvalidParameter { name: "min_cluster_size", .. })
        ));
    }

    #[test]
    fn non_finite_coordinate() {
        let data = vec![vec![1.5, f64::INFINITY]];
        let result = Hdbscan::default_hyper_params(&data).cluster();
        assert!(matches!(result, Err(OutlierError::NonFiniteCoordinate(..))));
    }
}
