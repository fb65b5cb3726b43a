#![allow(dead_code)]
use density_outliers::{
    extract_outliers, Dbscan, DbscanHyperParams, Hdbscan, HdbscanHyperParams, MergedPoints,
    NnAlgorithm, OutlierError, Result, NOISE_LABEL,
};
use std::collections::HashSet;

pub type DbscanFn = fn(&Dbscan<f64>) -> Result<Vec<i32>>;
pub type HdbscanFn = fn(&Hdbscan<f64>) -> Result<Vec<i32>>;
pub type NeighbourCountFn = fn(&[Vec<f64>], &[Vec<Vec<f64>>], f64, usize) -> Result<Vec<Vec<f64>>>;

fn scenario() -> (Vec<Vec<f64>>, Vec<Vec<Vec<f64>>>) {
    let candidates = vec![vec![0.0, 0.0, 0.0]];
    let references = vec![vec![
        vec![1.0, 1.0, 1.0],
        vec![2.0, 2.0, 2.0],
        vec![100.0, 100.0, 100.0],
    ]];
    (candidates, references)
}

fn two_blobs() -> (Vec<Vec<f64>>, Vec<Vec<Vec<f64>>>) {
    let candidates = vec![vec![1.1, 1.0], vec![10.0, 10.0]];
    let references = vec![
        vec![vec![1.5, 2.2], vec![1.0, 1.1], vec![1.2, 1.4], vec![0.8, 1.0]],
        vec![
            vec![3.7, 4.0],
            vec![3.9, 3.9],
            vec![3.6, 4.1],
            vec![3.8, 3.9],
            vec![4.0, 4.1],
        ],
    ];
    (candidates, references)
}

fn grid(n_points: usize) -> Vec<Vec<f64>> {
    (0..n_points)
        .map(|n| vec![(n % 20) as f64 * 0.5, (n / 20) as f64 * 0.5])
        .collect()
}

fn dbscan_params(eps: f64, min_pts: usize) -> DbscanHyperParams {
    DbscanHyperParams::builder().eps(eps).min_pts(min_pts).build()
}

pub fn test_dbscan_scenario(cluster_fn: DbscanFn) {
    let (candidates, references) = scenario();
    let merged = MergedPoints::merge(&candidates, &references).unwrap();
    let labels = cluster_fn(&Dbscan::new(merged.points(), dbscan_params(2.0, 2))).unwrap();

    assert_eq!(vec![0, 0, 0, -1], labels);
    let outliers = extract_outliers(&candidates, merged.points(), &labels, NOISE_LABEL).unwrap();
    assert!(outliers.is_empty());
}

pub fn test_dbscan_outlier_candidate(cluster_fn: DbscanFn) {
    let (_, references) = scenario();
    let candidates = vec![vec![-30.0, 0.0, 0.0], vec![1.5, 1.5, 1.5], vec![0.0, 0.0, 60.0]];
    let merged = MergedPoints::merge(&candidates, &references).unwrap();
    let labels = cluster_fn(&Dbscan::new(merged.points(), dbscan_params(2.0, 2))).unwrap();

    assert_eq!(merged.len(), labels.len());
    let outliers = extract_outliers(&candidates, merged.points(), &labels, NOISE_LABEL).unwrap();
    assert_eq!(vec![vec![-30.0, 0.0, 0.0], vec![0.0, 0.0, 60.0]], outliers);
}

pub fn test_dbscan_kd_tree_agrees(cluster_fn: DbscanFn) {
    let mut data = grid(300);
    data.push(vec![50.0, 50.0]);
    let brute = DbscanHyperParams::builder()
        .eps(0.6)
        .min_pts(4)
        .nn_algorithm(NnAlgorithm::BruteForce)
        .build();
    // More than 250 points, so auto picks the kd-tree
    let auto = dbscan_params(0.6, 4);

    let expected = cluster_fn(&Dbscan::new(&data, brute)).unwrap();
    assert_eq!(expected, cluster_fn(&Dbscan::new(&data, auto)).unwrap());
    assert_eq!(NOISE_LABEL, expected[300]);
    assert!(expected[..300].iter().all(|&label| label == 0));
}

pub fn test_dbscan_empty_data(cluster_fn: DbscanFn) {
    let data: Vec<Vec<f64>> = Vec::new();
    let result = cluster_fn(&Dbscan::default_hyper_params(&data));
    assert_eq!(Err(OutlierError::EmptyInput), result);
}

pub fn test_dbscan_mismatched_dimensions(cluster_fn: DbscanFn) {
    let data = vec![vec![1.5, 2.2], vec![1.0, 1.1], vec![1.2]];
    let result = cluster_fn(&Dbscan::default_hyper_params(&data));
    assert_eq!(
        Err(OutlierError::DimensionMismatch {
            index: 2,
            expected: 2,
            found: 1,
        }),
        result
    );
}

pub fn test_dbscan_non_finite_coordinate(cluster_fn: DbscanFn) {
    let data = vec![vec![1.5, f64::NAN]];
    let result = cluster_fn(&Dbscan::default_hyper_params(&data));
    assert!(matches!(result, Err(OutlierError::NonFiniteCoordinate(..))));
}

pub fn test_hdbscan_cluster(cluster_fn: HdbscanFn) {
    let (candidates, references) = two_blobs();
    let merged = MergedPoints::merge(&candidates, &references).unwrap();
    let labels = cluster_fn(&Hdbscan::default_hyper_params(merged.points())).unwrap();

    // Merged order: the two candidates, then the first blob's four, then the second blob
    let first_blob: HashSet<_> = [labels[0], labels[2], labels[3], labels[4], labels[5]].into();
    let second_blob: HashSet<_> = labels[6..].iter().copied().collect();
    assert_eq!(1, first_blob.len());
    assert_eq!(1, second_blob.len());
    assert_ne!(first_blob, second_blob);
    assert!(!first_blob.contains(&NOISE_LABEL) && !second_blob.contains(&NOISE_LABEL));
    assert_eq!(NOISE_LABEL, labels[1]);

    let outliers = extract_outliers(&candidates, merged.points(), &labels, NOISE_LABEL).unwrap();
    assert_eq!(vec![vec![10.0, 10.0]], outliers);
}

pub fn test_hdbscan_single_cluster(cluster_fn: HdbscanFn) {
    let data = vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
        vec![10.0, 10.0],
    ];
    let builder = HdbscanHyperParams::builder().min_cluster_size(4).min_samples(2);

    let single = builder.clone().allow_single_cluster(true).build();
    let labels = cluster_fn(&Hdbscan::new(&data, single)).unwrap();
    assert_eq!(vec![0, 0, 0, 0, -1], labels);

    let labels = cluster_fn(&Hdbscan::new(&data, builder.build())).unwrap();
    assert_eq!(vec![NOISE_LABEL; 5], labels);
}

pub fn test_hdbscan_kd_tree_agrees(cluster_fn: HdbscanFn) {
    let (candidates, references) = two_blobs();
    let merged = MergedPoints::merge(&candidates, &references).unwrap();
    let brute = HdbscanHyperParams::builder()
        .nn_algorithm(NnAlgorithm::BruteForce)
        .build();
    let tree = HdbscanHyperParams::builder()
        .nn_algorithm(NnAlgorithm::KdTree)
        .build();
    assert_eq!(
        cluster_fn(&Hdbscan::new(merged.points(), brute)).unwrap(),
        cluster_fn(&Hdbscan::new(merged.points(), tree)).unwrap()
    );
}

pub fn test_hdbscan_too_few_points(cluster_fn: HdbscanFn) {
    let data = vec![vec![0.0, 0.0], vec![0.1, 0.0], vec![0.0, 0.1]];
    let labels = cluster_fn(&Hdbscan::default_hyper_params(&data)).unwrap();
    assert_eq!(vec![NOISE_LABEL; 3], labels);
}

pub fn test_hdbscan_empty_data(cluster_fn: HdbscanFn) {
    let data: Vec<Vec<f64>> = Vec::new();
    let result = cluster_fn(&Hdbscan::default_hyper_params(&data));
    assert_eq!(Err(OutlierError::EmptyInput), result);
}

pub fn test_hdbscan_mismatched_dimensions(cluster_fn: HdbscanFn) {
    let data = vec![vec![1.5, 2.2], vec![1.0, 1.1], vec![1.2]];
    let result = cluster_fn(&Hdbscan::default_hyper_params(&data));
    assert!(matches!(result, Err(OutlierError::DimensionMismatch { .. })));
}

pub fn test_neighbour_count_threshold(outliers_fn: NeighbourCountFn) {
    let references = vec![
        vec![vec![1.0, 0.0], vec![0.0, 4.0]],
        vec![vec![5.0, 0.0], vec![0.0, 5.5], vec![20.0, 20.0]],
    ];
    let candidates = vec![vec![0.0, 0.0], vec![19.0, 20.0], vec![-40.0, 0.0]];

    let outliers = outliers_fn(&candidates, &references, 5.0, 3).unwrap();
    assert_eq!(vec![vec![19.0, 20.0], vec![-40.0, 0.0]], outliers);
    let outliers = outliers_fn(&candidates, &references, 5.0, 4).unwrap();
    assert_eq!(candidates, outliers);
}

pub fn test_neighbour_count_errors(outliers_fn: NeighbourCountFn) {
    let references = vec![vec![vec![1.0, 0.0, 0.0]]];
    let candidates = vec![vec![0.0, 0.0]];
    assert!(matches!(
        outliers_fn(&candidates, &references, 5.0, 1),
        Err(OutlierError::DimensionMismatch { expected: 2, found: 3, .. })
    ));
    assert!(matches!(
        outliers_fn(&candidates, &references, -5.0, 1),
        Err(OutlierError::InvalidParameter { name: "eps", .. })
    ));
    assert_eq!(Err(OutlierError::EmptyInput), outliers_fn(&[], &references, 5.0, 1));
}
