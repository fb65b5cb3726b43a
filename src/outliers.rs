use crate::validation::DataValidator;
use crate::{OutlierError, Result};
use num_traits::Float;

/// Whether a candidate point is density-isolated from the data it was tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Inlier,
    Outlier,
}

impl Classification {
    pub fn is_outlier(&self) -> bool {
        *self == Classification::Outlier
    }
}

/// Classifies each candidate from the labels of a merged point set, whose first
/// `candidates.len()` points must be the candidates themselves.
///
/// # Returns
/// * One classification per candidate, in order. Candidates must have finite coordinates and
///   a shared dimensionality, as [`crate::merge`] requires; otherwise the matching validation
///   error is returned. An `IntegrityViolation` is returned, and logged, if `labels` doesn't
///   match `merged_points` in length, if there are more candidates than merged points, or if
///   the merged prefix differs from the candidates. Any of these means the labels can't be
///   trusted to describe the candidates.
pub fn classify_candidates<T: Float>(
    candidates: &[Vec<T>],
    merged_points: &[Vec<T>],
    labels: &[i32],
    noise_label: i32,
) -> Result<Vec<Classification>> {
    check_integrity(candidates, merged_points, labels)?;
    Ok(labels[..candidates.len()]
        .iter()
        .map(|&label| {
            if label == noise_label {
                Classification::Outlier
            } else {
                Classification::Inlier
            }
        })
        .collect())
}

/// Selects the candidates labelled `noise_label`, preserving their order. See
/// [`classify_candidates`] for the requirements on the inputs.
///
/// # Examples
/// ```
///use density_outliers::{extract_outliers, NOISE_LABEL};
///
///let candidates = vec![vec![0.0], vec![50.0]];
///let merged = vec![vec![0.0], vec![50.0], vec![0.5]];
///let labels = vec![0, NOISE_LABEL, 0];
///let outliers = extract_outliers(&candidates, &merged, &labels, NOISE_LABEL).unwrap();
///assert_eq!(vec![vec![50.0]], outliers);
/// ```
pub fn extract_outliers<T: Float>(
    candidates: &[Vec<T>],
    merged_points: &[Vec<T>],
    labels: &[i32],
    noise_label: i32,
) -> Result<Vec<Vec<T>>> {
    let classifications = classify_candidates(candidates, merged_points, labels, noise_label)?;
    Ok(candidates
        .iter()
        .zip(classifications)
        .filter(|(_, classification)| classification.is_outlier())
        .map(|(point, _)| point.clone())
        .collect())
}

fn check_integrity<T: Float>(
    candidates: &[Vec<T>],
    merged_points: &[Vec<T>],
    labels: &[i32],
) -> Result<()> {
    // The prefix comparison below needs finite candidates
    if let Ok(validator) = DataValidator::infer(candidates) {
        validator.validate_input_data(candidates)?;
    }
    if merged_points.len() != labels.len() {
        return Err(integrity_violation(format!(
            "{} labels for {} merged points",
            labels.len(),
            merged_points.len()
        )));
    }
    if candidates.len() > merged_points.len() {
        return Err(integrity_violation(format!(
            "{} candidates but only {} merged points",
            candidates.len(),
            merged_points.len()
        )));
    }
    match candidates
        .iter()
        .zip(merged_points)
        .position(|(candidate, merged)| candidate != merged)
    {
        Some(n) => Err(integrity_violation(format!(
            "merged point {n} does not match candidate {n}"
        ))),
        None => Ok(()),
    }
}

fn integrity_violation(message: String) -> OutlierError {
    tracing::error!("candidate points do not line up with the clustered points: {message}");
    OutlierError::IntegrityViolation(message)
}
