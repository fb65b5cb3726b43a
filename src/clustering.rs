use crate::Result;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// The label clusterers give to points that belong to no cluster.
pub const NOISE_LABEL: i32 = -1;

/// The density clustering algorithms this crate can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dbscan,
    Hdbscan,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dbscan => "DBSCAN",
            Algorithm::Hdbscan => "HDBSCAN",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A tagged view of a raw label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Cluster(usize),
    Noise,
}

impl From<i32> for Label {
    fn from(raw: i32) -> Self {
        if raw < 0 {
            Label::Noise
        } else {
            Label::Cluster(raw as usize)
        }
    }
}

/// The outcome of a single clustering run. Counts are derived from the labels, so they always
/// agree with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    algorithm: Algorithm,
    n_clusters: usize,
    n_noise_points: usize,
    labels: Vec<i32>,
}

impl ClusteringResult {
    pub fn from_labels(algorithm: Algorithm, labels: Vec<i32>) -> Self {
        let n_noise_points = labels.iter().filter(|&&label| label == NOISE_LABEL).count();
        let n_clusters = labels
            .iter()
            .filter(|&&label| label >= 0)
            .collect::<HashSet<_>>()
            .len();
        Self {
            algorithm,
            n_clusters,
            n_noise_points,
            labels,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn n_noise_points(&self) -> usize {
        self.n_noise_points
    }

    /// One label per point of the clustered set, in input order. `NOISE_LABEL` marks noise.
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn label(&self, idx: usize) -> Option<Label> {
        self.labels.get(idx).map(|&raw| Label::from(raw))
    }

    pub fn into_labels(self) -> Vec<i32> {
        self.labels
    }
}

/// A density based clusterer bound to the data it will cluster.
pub trait DensityClusterer {
    fn algorithm(&self) -> Algorithm;

    /// Clusters the data, returning one label per point. `NOISE_LABEL` marks noise.
    fn cluster(&self) -> Result<Vec<i32>>;

    /// Clusters the data and wraps the labels in a [`ClusteringResult`].
    fn fit(&self) -> Result<ClusteringResult> {
        Ok(summarise(self.algorithm(), self.cluster()?))
    }
}

/// Wraps the labels of a finished run and logs its summary.
pub(crate) fn summarise(algorithm: Algorithm, labels: Vec<i32>) -> ClusteringResult {
    let result = ClusteringResult::from_labels(algorithm, labels);
    tracing::debug!(
        algorithm = %result.algorithm(),
        n_points = result.labels().len(),
        n_clusters = result.n_clusters(),
        n_noise_points = result.n_noise_points(),
        "clustering complete"
    );
    result
}
