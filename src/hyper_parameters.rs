use crate::neighbours::NnAlgorithm;
use crate::validation::{validate_count, validate_radius};
use crate::{DistanceMetric, Result};

// Defaults for parameters
const EPS_DEFAULT: f64 = 0.5;
const MIN_PTS_DEFAULT: usize = 5;
const MIN_CLUSTER_SIZE_DEFAULT: usize = 5;
const ALLOW_SINGLE_CLUSTER_DEFAULT: bool = false;

/// Hyper parameters for flat, DBSCAN style clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct DbscanHyperParams {
    pub(crate) eps: f64,
    pub(crate) min_pts: usize,
    pub(crate) dist_metric: DistanceMetric,
    pub(crate) nn_algo: NnAlgorithm,
}

/// Builder object to set custom DBSCAN hyper parameters.
#[derive(Debug, Clone, Default)]
pub struct DbscanParamBuilder {
    eps: Option<f64>,
    min_pts: Option<usize>,
    dist_metric: Option<DistanceMetric>,
    nn_algo: Option<NnAlgorithm>,
}

impl DbscanHyperParams {
    /// Enters the builder pattern.
    ///
    /// # Examples
    /// ```
    ///use density_outliers::DbscanHyperParams;
    ///
    ///let config = DbscanHyperParams::builder().eps(2.0).min_pts(3).build();
    ///assert_eq!(2.0, config.eps());
    ///assert_eq!(3, config.min_pts());
    /// ```
    pub fn builder() -> DbscanParamBuilder {
        DbscanParamBuilder::default()
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_radius(self.eps, "eps")?;
        validate_count(self.min_pts, "min_pts")
    }
}

impl Default for DbscanHyperParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DbscanParamBuilder {
    /// Sets the neighbourhood radius. Two points are directly density reachable when their
    /// distance is at most `eps`. Must be positive. Defaults to 0.5.
    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = Some(eps);
        self
    }

    /// Sets the number of points, the point itself included, that must lie within `eps` of a
    /// point for it to be a core point. Must be at least 1. Defaults to 5.
    pub fn min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = Some(min_pts);
        self
    }

    /// Sets the distance metric. Defaults to Euclidean.
    pub fn dist_metric(mut self, dist_metric: DistanceMetric) -> Self {
        self.dist_metric = Some(dist_metric);
        self
    }

    /// Sets how neighbourhoods are searched. Only affects performance. Defaults to Auto.
    pub fn nn_algorithm(mut self, nn_algorithm: NnAlgorithm) -> Self {
        self.nn_algo = Some(nn_algorithm);
        self
    }

    /// Finishes the building of the hyper parameter configuration. Values are checked when
    /// clustering starts.
    pub fn build(self) -> DbscanHyperParams {
        DbscanHyperParams {
            eps: self.eps.unwrap_or(EPS_DEFAULT),
            min_pts: self.min_pts.unwrap_or(MIN_PTS_DEFAULT),
            dist_metric: self.dist_metric.unwrap_or_default(),
            nn_algo: self.nn_algo.unwrap_or_default(),
        }
    }
}

/// Hyper parameters for hierarchical, HDBSCAN style clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct HdbscanHyperParams {
    pub(crate) min_cluster_size: usize,
    pub(crate) min_samples: usize,
    pub(crate) allow_single_cluster: bool,
    pub(crate) dist_metric: DistanceMetric,
    pub(crate) nn_algo: NnAlgorithm,
}

/// Builder object to set custom HDBSCAN hyper parameters.
#[derive(Debug, Clone, Default)]
pub struct HdbscanParamBuilder {
    min_cluster_size: Option<usize>,
    min_samples: Option<usize>,
    allow_single_cluster: Option<bool>,
    dist_metric: Option<DistanceMetric>,
    nn_algo: Option<NnAlgorithm>,
}

impl HdbscanHyperParams {
    /// Enters the builder pattern.
    ///
    /// # Examples
    /// ```
    ///use density_outliers::HdbscanHyperParams;
    ///
    ///let config = HdbscanHyperParams::builder().min_cluster_size(4).build();
    ///assert_eq!(4, config.min_cluster_size());
    /// // min_samples falls back to min_cluster_size
    ///assert_eq!(4, config.min_samples());
    /// ```
    pub fn builder() -> HdbscanParamBuilder {
        HdbscanParamBuilder::default()
    }

    pub fn min_cluster_size(&self) -> usize {
        self.min_cluster_size
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_count(self.min_cluster_size, "min_cluster_size")?;
        validate_count(self.min_samples, "min_samples")
    }
}

impl Default for HdbscanHyperParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl HdbscanParamBuilder {
    /// Sets the minimum cluster size: groups of points smaller than this are considered noise.
    /// This is the main lever for changing the results of clustering. Defaults to 5.
    pub fn min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = Some(min_cluster_size);
        self
    }

    /// Sets min samples, the neighbour used for core distances: a point's core distance is the
    /// distance to its `min_samples`-th nearest neighbour, counting itself as the first.
    /// Defaults to min_cluster_size.
    pub fn min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = Some(min_samples);
        self
    }

    /// Sets whether the root of the hierarchy, i.e. all points in one cluster, may be selected.
    /// Defaults to false.
    pub fn allow_single_cluster(mut self, allow_single_cluster: bool) -> Self {
        self.allow_single_cluster = Some(allow_single_cluster);
        self
    }

    /// Sets the distance metric. Defaults to Euclidean.
    pub fn dist_metric(mut self, dist_metric: DistanceMetric) -> Self {
        self.dist_metric = Some(dist_metric);
        self
    }

    /// Sets how core distances are computed. Only affects performance. Defaults to Auto.
    pub fn nn_algorithm(mut self, nn_algorithm: NnAlgorithm) -> Self {
        self.nn_algo = Some(nn_algorithm);
        self
    }

    /// Finishes the building of the hyper parameter configuration. Values are checked when
    /// clustering starts.
    pub fn build(self) -> HdbscanHyperParams {
        let min_cluster_size = self.min_cluster_size.unwrap_or(MIN_CLUSTER_SIZE_DEFAULT);
        HdbscanHyperParams {
            min_cluster_size,
            min_samples: self.min_samples.unwrap_or(min_cluster_size),
            allow_single_cluster: self
                .allow_single_cluster
                .unwrap_or(ALLOW_SINGLE_CLUSTER_DEFAULT),
            dist_metric: self.dist_metric.unwrap_or_default(),
            nn_algo: self.nn_algo.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutlierError;

    #[test]
    fn dbscan_defaults() {
        let hp = DbscanHyperParams::default();
        assert_eq!(EPS_DEFAULT, hp.eps);
        assert_eq!(MIN_PTS_DEFAULT, hp.min_pts);
        assert_eq!(DistanceMetric::Euclidean, hp.dist_metric);
        assert_eq!(NnAlgorithm::Auto, hp.nn_algo);
    }

    #[test]
    fn dbscan_rejects_non_positive_eps() {
        let hp = DbscanHyperParams::builder().eps(0.0).build();
        assert!(matches!(
            hp.validate(),
            Err(OutlierError::InvalidParameter { name: "eps", .. })
        ));
    }

    #[test]
    fn min_samples_defaults_to_min_cluster_size() {
        let hp = HdbscanHyperParams::builder().min_cluster_size(7).build();
        assert_eq!(7, hp.min_samples);
        let hp = HdbscanHyperParams::builder().min_cluster_size(7).min_samples(2).build();
        assert_eq!(2, hp.min_samples);
    }

    #[test]
    fn hdbscan_rejects_zero_sizes() {
        let hp = HdbscanHyperParams::builder().min_cluster_size(0).min_samples(1).build();
        assert!(matches!(
            hp.validate(),
            Err(OutlierError::InvalidParameter { name: "min_cluster_size", .. })
        ));
        let hp = HdbscanHyperParams::builder().min_samples(0).build();
        assert!(matches!(
            hp.validate(),
            Err(OutlierError::InvalidParameter { name: "min_samples", .. })
        ));
    }
}
