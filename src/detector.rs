use crate::neighbour_count::{neighbour_count_flags, outliers_by_neighbour_count};
use crate::outliers::classify_candidates;
use crate::{
    Classification, ClusteringResult, Dbscan, DbscanHyperParams, DensityClusterer, Hdbscan,
    HdbscanHyperParams, MergedPoints, Result, NOISE_LABEL,
};
use num_traits::Float;

/// A strategy for deciding which candidate points are density outliers relative to a set of
/// reference populations.
pub trait OutlierDetector<T: Float> {
    /// Classifies every candidate, in candidate order.
    fn classify(
        &self,
        candidates: &[Vec<T>],
        reference_groups: &[Vec<Vec<T>>],
    ) -> Result<Vec<Classification>>;

    /// The candidates classified as outliers, in candidate order.
    fn outliers(
        &self,
        candidates: &[Vec<T>],
        reference_groups: &[Vec<Vec<T>>],
    ) -> Result<Vec<Vec<T>>> {
        let classifications = self.classify(candidates, reference_groups)?;
        Ok(candidates
            .iter()
            .zip(classifications)
            .filter(|(_, classification)| classification.is_outlier())
            .map(|(candidate, _)| candidate.clone())
            .collect())
    }
}

/// Clusters candidates together with the references using DBSCAN; candidates left as noise
/// are outliers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatClusteringDetector {
    hp: DbscanHyperParams,
}

impl FlatClusteringDetector {
    pub fn new(hyper_params: DbscanHyperParams) -> Self {
        Self { hp: hyper_params }
    }

    /// The full clustering outcome over the merged candidates and references.
    pub fn cluster<T: Float>(
        &self,
        candidates: &[Vec<T>],
        reference_groups: &[Vec<Vec<T>>],
    ) -> Result<ClusteringResult> {
        let merged = MergedPoints::merge(candidates, reference_groups)?;
        Dbscan::new(merged.points(), self.hp.clone()).fit()
    }
}

impl<T: Float> OutlierDetector<T> for FlatClusteringDetector {
    fn classify(
        &self,
        candidates: &[Vec<T>],
        reference_groups: &[Vec<Vec<T>>],
    ) -> Result<Vec<Classification>> {
        let merged = MergedPoints::merge(candidates, reference_groups)?;
        let clusterer = Dbscan::new(merged.points(), self.hp.clone());
        classify_merged(candidates, &merged, &clusterer)
    }
}

/// Clusters candidates together with the references using HDBSCAN; candidates left as noise
/// are outliers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HierarchicalClusteringDetector {
    hp: HdbscanHyperParams,
}

impl HierarchicalClusteringDetector {
    pub fn new(hyper_params: HdbscanHyperParams) -> Self {
        Self { hp: hyper_params }
    }

    /// The full clustering outcome over the merged candidates and references.
    pub fn cluster<T: Float>(
        &self,
        candidates: &[Vec<T>],
        reference_groups: &[Vec<Vec<T>>],
    ) -> Result<ClusteringResult> {
        let merged = MergedPoints::merge(candidates, reference_groups)?;
        Hdbscan::new(merged.points(), self.hp.clone()).fit()
    }
}

impl<T: Float> OutlierDetector<T> for HierarchicalClusteringDetector {
    fn classify(
        &self,
        candidates: &[Vec<T>],
        reference_groups: &[Vec<Vec<T>>],
    ) -> Result<Vec<Classification>> {
        let merged = MergedPoints::merge(candidates, reference_groups)?;
        let clusterer = Hdbscan::new(merged.points(), self.hp.clone());
        classify_merged(candidates, &merged, &clusterer)
    }
}

fn classify_merged<T: Float, C: DensityClusterer>(
    candidates: &[Vec<T>],
    merged: &MergedPoints<T>,
    clusterer: &C,
) -> Result<Vec<Classification>> {
    let result = clusterer.fit()?;
    classify_candidates(candidates, merged.points(), result.labels(), NOISE_LABEL)
}

/// Counts reference points near each candidate directly, with no clustering. A candidate is an
/// outlier when fewer than `min_neighbours` reference points lie within `eps` of it.
/// Candidates never count as each other's neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighbourCountDetector<T> {
    eps: T,
    min_neighbours: usize,
}

impl<T: Float> NeighbourCountDetector<T> {
    pub fn new(eps: T, min_neighbours: usize) -> Self {
        Self {
            eps,
            min_neighbours,
        }
    }
}

impl<T: Float> OutlierDetector<T> for NeighbourCountDetector<T> {
    fn classify(
        &self,
        candidates: &[Vec<T>],
        reference_groups: &[Vec<Vec<T>>],
    ) -> Result<Vec<Classification>> {
        let flags =
            neighbour_count_flags(candidates, reference_groups, self.eps, self.min_neighbours)?;
        Ok(flags
            .into_iter()
            .map(|is_outlier| {
                if is_outlier {
                    Classification::Outlier
                } else {
                    Classification::Inlier
                }
            })
            .collect())
    }

    fn outliers(
        &self,
        candidates: &[Vec<T>],
        reference_groups: &[Vec<Vec<T>>],
    ) -> Result<Vec<Vec<T>>> {
        outliers_by_neighbour_count(candidates, reference_groups, self.eps, self.min_neighbours)
    }
}

/// Clusters candidates and reference groups together with DBSCAN.
///
/// # Parameters
/// * `candidates` - the points under test. Must not be empty.
/// * `reference_groups` - zero or more reference populations.
/// * `eps` - the neighbourhood radius.
/// * `min_pts` - points, the point itself included, needed within `eps` for a core point.
///
/// # Returns
/// * The clustering of the merged set, candidates first.
///
/// # Examples
/// ```
///use density_outliers::cluster_flat;
///
///let candidates = vec![vec![0.0, 0.0, 0.0]];
///let references = vec![vec![
///    vec![1.0, 1.0, 1.0],
///    vec![2.0, 2.0, 2.0],
///    vec![100.0, 100.0, 100.0],
///]];
///let result = cluster_flat(&candidates, &references, 2.0, 2).unwrap();
///assert_eq!("DBSCAN", result.algorithm_name());
///assert_eq!(1, result.n_clusters());
///assert_eq!(1, result.n_noise_points());
///assert_eq!(&[0, 0, 0, -1], result.labels());
/// ```
pub fn cluster_flat<T: Float>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
    eps: f64,
    min_pts: usize,
) -> Result<ClusteringResult> {
    flat_detector(eps, min_pts).cluster(candidates, reference_groups)
}

/// The candidates DBSCAN leaves as noise when clustered with the reference groups.
pub fn return_outliers_flat<T: Float>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
    eps: f64,
    min_pts: usize,
) -> Result<Vec<Vec<T>>> {
    flat_detector(eps, min_pts).outliers(candidates, reference_groups)
}

/// Clusters candidates and reference groups together with HDBSCAN. `min_samples` defaults to
/// `min_cluster_size`.
pub fn cluster_hierarchical<T: Float>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
    min_cluster_size: usize,
    min_samples: Option<usize>,
) -> Result<ClusteringResult> {
    hierarchical_detector(min_cluster_size, min_samples).cluster(candidates, reference_groups)
}

/// The candidates HDBSCAN leaves as noise when clustered with the reference groups.
///
/// # Examples
/// ```
///use density_outliers::return_outliers_hierarchical;
///
///let candidates = vec![vec![1.1, 1.0], vec![10.0, 10.0]];
///let references = vec![
///    vec![vec![1.5, 2.2], vec![1.0, 1.1], vec![1.2, 1.4], vec![0.8, 1.0]],
///    vec![
///        vec![3.7, 4.0],
///        vec![3.9, 3.9],
///        vec![3.6, 4.1],
///        vec![3.8, 3.9],
///        vec![4.0, 4.1],
///    ],
///];
///let outliers = return_outliers_hierarchical(&candidates, &references, 5, None).unwrap();
///assert_eq!(vec![vec![10.0, 10.0]], outliers);
/// ```
pub fn return_outliers_hierarchical<T: Float>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
    min_cluster_size: usize,
    min_samples: Option<usize>,
) -> Result<Vec<Vec<T>>> {
    hierarchical_detector(min_cluster_size, min_samples).outliers(candidates, reference_groups)
}

fn flat_detector(eps: f64, min_pts: usize) -> FlatClusteringDetector {
    FlatClusteringDetector::new(DbscanHyperParams::builder().eps(eps).min_pts(min_pts).build())
}

fn hierarchical_detector(
    min_cluster_size: usize,
    min_samples: Option<usize>,
) -> HierarchicalClusteringDetector {
    let mut builder = HdbscanHyperParams::builder().min_cluster_size(min_cluster_size);
    if let Some(min_samples) = min_samples {
        builder = builder.min_samples(min_samples);
    }
    HierarchicalClusteringDetector::new(builder.build())
}
