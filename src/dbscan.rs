#[cfg(feature = "parallel")]
use crate::neighbours::parallel;
use crate::neighbours::{serial, NeighbourSearch};
use crate::validation::DataValidator;
#[cfg(feature = "parallel")]
use crate::clustering::summarise;
#[cfg(feature = "parallel")]
use crate::ClusteringResult;
use crate::{Algorithm, DbscanHyperParams, DensityClusterer, OutlierError, Result, NOISE_LABEL};
use num_traits::Float;
use std::collections::VecDeque;

/// Flat density based clustering (DBSCAN) over a borrowed point set.
///
/// A point is a core point when at least `min_pts` points, itself included, lie within `eps`
/// of it. Core points within `eps` of each other share a cluster, non-core points within `eps`
/// of a core point join that core point's cluster, and everything else is noise.
///
/// Points are visited in ascending index order and clusters are numbered from 0 in the order
/// they are discovered. A border point within reach of two clusters joins the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dbscan<'a, T> {
    data: &'a [Vec<T>],
    hp: DbscanHyperParams,
}

impl<'a, T: Float> Dbscan<'a, T> {
    /// Creates a DBSCAN clusterer using a custom hyper parameter configuration.
    ///
    /// # Examples
    /// ```
    ///use density_outliers::{Dbscan, DbscanHyperParams};
    ///
    ///let data: Vec<Vec<f64>> = vec![
    ///    vec![0.0, 0.0, 0.0],
    ///    vec![1.0, 1.0, 1.0],
    ///    vec![2.0, 2.0, 2.0],
    ///    vec![100.0, 100.0, 100.0],
    ///];
    ///let config = DbscanHyperParams::builder().eps(2.0).min_pts(2).build();
    ///let clusterer = Dbscan::new(&data, config);
    ///assert_eq!(vec![0, 0, 0, -1], clusterer.cluster().unwrap());
    /// ```
    pub fn new(data: &'a [Vec<T>], hyper_params: DbscanHyperParams) -> Self {
        Dbscan {
            data,
            hp: hyper_params,
        }
    }

    /// Creates a DBSCAN clusterer using the default hyper parameters.
    pub fn default_hyper_params(data: &'a [Vec<T>]) -> Self {
        Dbscan::new(data, DbscanHyperParams::default())
    }

    /// Performs clustering on the points passed to the constructor.
    ///
    /// # Returns
    /// * A label per point: a cluster id from 0 upwards, or -1 for noise. An error is
    ///   returned if the data is empty, has mismatched dimensions or non-finite coordinates,
    ///   or if a hyper parameter is out of range.
    pub fn cluster(&self) -> Result<Vec<i32>> {
        let (search, eps) = self.prepare()?;
        let neighbourhoods = serial::calc_neighbourhoods(&search, eps)?;
        Ok(self.expand_clusters(&neighbourhoods))
    }

    fn prepare(&self) -> Result<(NeighbourSearch<'a, T>, T)> {
        DataValidator::infer(self.data)?.validate_input_data(self.data)?;
        self.hp.validate()?;
        let eps = T::from(self.hp.eps).ok_or(OutlierError::InvalidParameter {
            name: "eps",
            message: "cannot be represented in the point coordinate type",
        })?;
        let search = NeighbourSearch::new(self.data, self.hp.nn_algo, self.hp.dist_metric)?;
        Ok((search, eps))
    }

    fn expand_clusters(&self, neighbourhoods: &[Vec<usize>]) -> Vec<i32> {
        let is_core: Vec<bool> = neighbourhoods
            .iter()
            .map(|neighbourhood| neighbourhood.len() >= self.hp.min_pts)
            .collect();

        // Unreached points keep the noise label, so noise doubles as "unassigned"
        let mut labels = vec![NOISE_LABEL; neighbourhoods.len()];
        let mut cluster_id = 0;

        for seed in 0..neighbourhoods.len() {
            if !is_core[seed] || labels[seed] != NOISE_LABEL {
                continue;
            }
            labels[seed] = cluster_id;
            let mut process_queue = VecDeque::from([seed]);

            while let Some(current) = process_queue.pop_front() {
                // Border points join the cluster but don't extend it
                if !is_core[current] {
                    continue;
                }
                for &neighbour in &neighbourhoods[current] {
                    if labels[neighbour] == NOISE_LABEL {
                        labels[neighbour] = cluster_id;
                        process_queue.push_back(neighbour);
                    }
                }
            }
            cluster_id += 1;
        }
        labels
    }
}

#[cfg(feature = "parallel")]
impl<'a, T: Float + Send + Sync> Dbscan<'a, T> {
    /// Performs clustering with neighbourhood queries spread over the rayon thread pool.
    /// Produces the same labels as [`Dbscan::cluster`].
    pub fn cluster_par(&self) -> Result<Vec<i32>> {
        let (search, eps) = self.prepare()?;
        let neighbourhoods = parallel::calc_neighbourhoods(&search, eps)?;
        Ok(self.expand_clusters(&neighbourhoods))
    }

    pub fn fit_par(&self) -> Result<ClusteringResult> {
        Ok(summarise(Algorithm::Dbscan, self.cluster_par()?))
    }
}

impl<'a, T: Float> DensityClusterer for Dbscan<'a, T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dbscan
    }

    fn cluster(&self) -> Result<Vec<i32>> {
        Dbscan::cluster(self)
    }
}
