use crate::distance::euclidean_distance;
use crate::validation::{validate_count, validate_radius, DataValidator};
use crate::Result;
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tests a single point against the reference groups without clustering: the point is an
/// outlier when fewer than `min_neighbours` reference points lie within Euclidean distance
/// `eps` of it. Counting stops as soon as `min_neighbours` is reached.
///
/// All reference points are validated against the point before counting starts, so a
/// malformed group is reported wherever it sits. Every reference point is measured in the
/// worst case, so this suits small reference sets.
///
/// # Examples
/// ```
///use density_outliers::is_outlier_by_neighbour_count;
///
///let references = vec![vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec![vec![8.0, 8.0]]];
///assert!(!is_outlier_by_neighbour_count(&[0.0, 0.0], &references, 1.5, 2).unwrap());
///assert!(is_outlier_by_neighbour_count(&[0.0, 0.0], &references, 1.5, 3).unwrap());
/// ```
pub fn is_outlier_by_neighbour_count<T: Float>(
    point: &[T],
    reference_groups: &[Vec<Vec<T>>],
    eps: T,
    min_neighbours: usize,
) -> Result<bool> {
    validate_radius(eps, "eps")?;
    validate_count(min_neighbours, "min_neighbours")?;
    let validator = DataValidator::with_dims(point.len());
    validator.check_point(0, point)?;
    validate_references(&validator, reference_groups)?;
    Ok(count_is_short(point, reference_groups, eps, min_neighbours))
}

/// Applies [`is_outlier_by_neighbour_count`] to every candidate and returns the outliers in
/// candidate order.
pub fn outliers_by_neighbour_count<T: Float>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
    eps: T,
    min_neighbours: usize,
) -> Result<Vec<Vec<T>>> {
    let flags = neighbour_count_flags(candidates, reference_groups, eps, min_neighbours)?;
    let outliers = select_flagged(candidates, &flags);
    tracing::debug!(
        n_candidates = candidates.len(),
        n_outliers = outliers.len(),
        "neighbour count complete"
    );
    Ok(outliers)
}

/// Parallel counterpart of [`outliers_by_neighbour_count`], testing candidates on the rayon
/// thread pool. Output order still follows the candidates.
#[cfg(feature = "parallel")]
pub fn outliers_by_neighbour_count_par<T: Float + Send + Sync>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
    eps: T,
    min_neighbours: usize,
) -> Result<Vec<Vec<T>>> {
    validate_inputs(candidates, reference_groups, eps, min_neighbours)?;
    let flags: Vec<bool> = candidates
        .par_iter()
        .map(|candidate| count_is_short(candidate, reference_groups, eps, min_neighbours))
        .collect();
    Ok(select_flagged(candidates, &flags))
}

/// Whether each candidate is short of neighbours, in candidate order.
pub(crate) fn neighbour_count_flags<T: Float>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
    eps: T,
    min_neighbours: usize,
) -> Result<Vec<bool>> {
    validate_inputs(candidates, reference_groups, eps, min_neighbours)?;
    Ok(candidates
        .iter()
        .map(|candidate| count_is_short(candidate, reference_groups, eps, min_neighbours))
        .collect())
}

fn validate_inputs<T: Float>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
    eps: T,
    min_neighbours: usize,
) -> Result<()> {
    validate_radius(eps, "eps")?;
    validate_count(min_neighbours, "min_neighbours")?;
    let validator = DataValidator::infer(candidates)?;
    validator.validate_input_data(candidates)?;
    validate_references(&validator, reference_groups)
}

/// `DimensionMismatch` indices count through the flattened reference groups.
fn validate_references<T: Float>(
    validator: &DataValidator,
    reference_groups: &[Vec<Vec<T>>],
) -> Result<()> {
    reference_groups
        .iter()
        .flatten()
        .enumerate()
        .try_for_each(|(n, reference)| validator.check_point(n, reference))
}

fn select_flagged<T: Float>(candidates: &[Vec<T>], flags: &[bool]) -> Vec<Vec<T>> {
    candidates
        .iter()
        .zip(flags)
        .filter(|(_, is_outlier)| **is_outlier)
        .map(|(candidate, _)| candidate.clone())
        .collect()
}

fn count_is_short<T: Float>(
    point: &[T],
    reference_groups: &[Vec<Vec<T>>],
    eps: T,
    min_neighbours: usize,
) -> bool {
    let mut neighbours = 0;
    for reference in reference_groups.iter().flatten() {
        if euclidean_distance(point, reference) <= eps {
            neighbours += 1;
            if neighbours == min_neighbours {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutlierError;

    fn refs_at(distances: &[f64]) -> Vec<Vec<Vec<f64>>> {
        vec![distances.iter().map(|&d| vec![d, 0.0]).collect()]
    }

    #[test]
    fn threshold_boundary() {
        let origin = [0.0, 0.0];
        let two_close = refs_at(&[1.0, 5.0, 5.5, 20.0]);
        assert!(is_outlier_by_neighbour_count(&origin, &two_close, 5.0, 3).unwrap());
        let three_close = refs_at(&[1.0, 4.0, 5.0, 5.5]);
        assert!(!is_outlier_by_neighbour_count(&origin, &three_close, 5.0, 3).unwrap());
    }

    #[test]
    fn counts_across_groups() {
        let groups = vec![
            vec![vec![0.5, 0.0]],
            vec![],
            vec![vec![0.0, 0.5], vec![30.0, 0.0]],
        ];
        assert!(!is_outlier_by_neighbour_count(&[0.0, 0.0], &groups, 1.0, 2).unwrap());
        assert!(is_outlier_by_neighbour_count(&[0.0, 0.0], &groups, 1.0, 3).unwrap());
    }

    #[test]
    fn no_references_means_outlier() {
        assert!(is_outlier_by_neighbour_count(&[0.0, 0.0], &[], 1.0, 1).unwrap());
    }

    #[test]
    fn malformed_reference_reported_in_any_group_order() {
        let close = vec![vec![0.0, 0.0]];
        let malformed = vec![vec![5.0, 5.0], vec![0.0, 0.0, 0.0]];

        // The close group alone would satisfy the count
        let groups = vec![close.clone(), malformed.clone()];
        assert_eq!(
            Err(OutlierError::DimensionMismatch {
                index: 2,
                expected: 2,
                found: 3,
            }),
            is_outlier_by_neighbour_count(&[0.0, 0.0], &groups, 1.0, 1)
        );
        let groups = vec![malformed, close];
        assert_eq!(
            Err(OutlierError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 3,
            }),
            is_outlier_by_neighbour_count(&[0.0, 0.0], &groups, 1.0, 1)
        );
    }

    #[test]
    fn batch_checks_references_before_counting() {
        let candidates = vec![vec![0.0, 0.0]];
        let groups = vec![vec![vec![0.0, 0.0]], vec![vec![f64::NAN, 0.0]]];
        let result = outliers_by_neighbour_count(&candidates, &groups, 1.0, 1);
        assert!(matches!(result, Err(OutlierError::NonFiniteCoordinate(..))));
    }

    #[test]
    fn invalid_params() {
        let groups = refs_at(&[1.0]);
        assert!(matches!(
            is_outlier_by_neighbour_count(&[0.0, 0.0], &groups, 0.0, 1),
            Err(OutlierError::InvalidParameter { name: "eps", .. })
        ));
        assert!(matches!(
            is_outlier_by_neighbour_count(&[0.0, 0.0], &groups, 1.0, 0),
            Err(OutlierError::InvalidParameter { name: "min_neighbours", .. })
        ));
    }

    #[test]
    fn batch_keeps_candidate_order() {
        let candidates = vec![vec![100.0, 0.0], vec![0.0, 0.0], vec![-100.0, 0.0]];
        let groups = refs_at(&[0.5, 1.0, 1.5]);
        let outliers = outliers_by_neighbour_count(&candidates, &groups, 2.0, 2).unwrap();
        assert_eq!(vec![vec![100.0, 0.0], vec![-100.0, 0.0]], outliers);
    }

    #[test]
    fn batch_rejects_empty_candidates() {
        let candidates: Vec<Vec<f64>> = Vec::new();
        let result = outliers_by_neighbour_count(&candidates, &refs_at(&[1.0]), 2.0, 2);
        assert_eq!(Err(OutlierError::EmptyInput), result);
    }
}
