//! Density based outlier detection in Rust. Generic over floating point numeric types.
//!
//! A set of candidate points is tested against zero or more groups of reference points. The
//! candidates and references are merged into one point set, candidates first, and clustered
//! with a density based algorithm. Any candidate the clusterer leaves as noise is an outlier:
//! it doesn't sit in a dense enough region of the combined data.
//!
//! Two clusterers are available:
//!  1. DBSCAN, which uses a fixed neighbourhood radius (`eps`) and a minimum number of points
//!     within it (`min_pts`, the point itself included) to decide which points are dense; and
//!  2. HDBSCAN, which looks at the data at every density and keeps the clusters that persist
//!     the longest, so it copes with clusters of varying densities.
//!
//! For small reference sets there is also a direct test with no clustering at all: a candidate
//! is an outlier if too few reference points lie within a radius of it.
//!
//! # Examples
//! ```
//!use density_outliers::{cluster_flat, return_outliers_flat};
//!
//!let candidates = vec![vec![0.0, 0.0, 0.0]];
//!let references = vec![vec![
//!    vec![1.0, 1.0, 1.0],
//!    vec![2.0, 2.0, 2.0],
//!    vec![100.0, 100.0, 100.0],
//!]];
//!let result = cluster_flat(&candidates, &references, 2.0, 2).unwrap();
//!assert_eq!(result.labels(), &[0, 0, 0, -1]);
//!
//! // The noise point is a reference, so no candidate is an outlier
//!let outliers = return_outliers_flat(&candidates, &references, 2.0, 2).unwrap();
//!assert!(outliers.is_empty());
//! ```
//!
//! # References
//! * [Ester, M.; Kriegel, H.-P.; Sander, J.; Xu, X. A density-based algorithm for discovering clusters in large spatial databases with noise.](https://dl.acm.org/doi/10.5555/3001460.3001507)
//! * [Campello, R.J.G.B.; Moulavi, D.; Sander, J. Density-based clustering based on hierarchical density estimates.](https://link.springer.com/chapter/10.1007/978-3-642-37456-2_14)
//! * [How HDBSCAN Works](https://hdbscan.readthedocs.io/en/latest/how_hdbscan_works.html)

pub use crate::clustering::{Algorithm, ClusteringResult, DensityClusterer, Label, NOISE_LABEL};
pub use crate::dbscan::Dbscan;
pub use crate::detector::{
    cluster_flat, cluster_hierarchical, return_outliers_flat, return_outliers_hierarchical,
    FlatClusteringDetector, HierarchicalClusteringDetector, NeighbourCountDetector,
    OutlierDetector,
};
pub use crate::distance::DistanceMetric;
pub use crate::error::{OutlierError, Result};
pub use crate::hdbscan::Hdbscan;
pub use crate::hyper_parameters::{
    DbscanHyperParams, DbscanParamBuilder, HdbscanHyperParams, HdbscanParamBuilder,
};
#[cfg(feature = "parallel")]
pub use crate::neighbour_count::outliers_by_neighbour_count_par;
pub use crate::neighbour_count::{is_outlier_by_neighbour_count, outliers_by_neighbour_count};
pub use crate::neighbours::NnAlgorithm;
pub use crate::outliers::{classify_candidates, extract_outliers, Classification};
pub use crate::point_set::{merge, MergedPoints};

mod clustering;
mod condensed_tree;
mod data_wrappers;
mod dbscan;
mod detector;
mod distance;
mod error;
mod hdbscan;
mod hyper_parameters;
mod neighbour_count;
mod neighbours;
mod outliers;
mod point_set;
mod spanning_tree;
mod union_find;
mod validation;
