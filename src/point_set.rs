use crate::validation::DataValidator;
use crate::Result;
use num_traits::Float;

/// Candidate points followed by every reference group, flattened into one collection that can
/// be handed to a clusterer. The first `n_candidates` points are the candidates, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPoints<T> {
    points: Vec<Vec<T>>,
    n_candidates: usize,
    dims: usize,
}

impl<T: Float> MergedPoints<T> {
    /// Merges candidates and reference groups. Points are copied as is: nothing is
    /// deduplicated or reordered.
    ///
    /// # Parameters
    /// * `candidates` - the points to test for anomalies. Must not be empty, as the
    ///                  dimensionality of the run is taken from the first candidate.
    /// * `reference_groups` - zero or more reference populations.
    ///
    /// # Returns
    /// * The merged set, or an error if there are no candidates, dimensions disagree or a
    ///   coordinate is not finite.
    ///
    /// # Examples
    /// ```
    ///use density_outliers::MergedPoints;
    ///
    ///let candidates = vec![vec![0.0, 0.0]];
    ///let references = vec![vec![vec![1.0, 1.0]], vec![vec![2.0, 2.0], vec![3.0, 3.0]]];
    ///let merged = MergedPoints::merge(&candidates, &references).unwrap();
    ///assert_eq!(4, merged.len());
    ///assert_eq!(&candidates[..], merged.candidates());
    /// ```
    pub fn merge(candidates: &[Vec<T>], reference_groups: &[Vec<Vec<T>>]) -> Result<Self> {
        let validator = DataValidator::infer(candidates)?;
        let n_points =
            candidates.len() + reference_groups.iter().map(Vec::len).sum::<usize>();

        let mut points = Vec::with_capacity(n_points);
        let all_points = candidates.iter().chain(reference_groups.iter().flatten());
        for (n, point) in all_points.enumerate() {
            validator.check_point(n, point)?;
            points.push(point.clone());
        }

        Ok(Self {
            points,
            n_candidates: candidates.len(),
            dims: validator.dims(),
        })
    }

    pub fn points(&self) -> &[Vec<T>] {
        &self.points
    }

    /// The candidate prefix of the merged set.
    pub fn candidates(&self) -> &[Vec<T>] {
        &self.points[..self.n_candidates]
    }

    /// Every reference point, in group order.
    pub fn references(&self) -> &[Vec<T>] {
        &self.points[self.n_candidates..]
    }

    pub fn n_candidates(&self) -> usize {
        self.n_candidates
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a merged set holds at least one candidate.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Vec<T>> {
        self.points
    }
}

/// Shorthand for [`MergedPoints::merge`].
pub fn merge<T: Float>(
    candidates: &[Vec<T>],
    reference_groups: &[Vec<Vec<T>>],
) -> Result<MergedPoints<T>> {
    MergedPoints::merge(candidates, reference_groups)
}
