use thiserror::Error;

/// Possible errors that arise while merging point sets, clustering them or extracting outliers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutlierError {
    /// No candidate points were supplied, so the dimensionality can't be inferred.
    #[error("The candidate point set provided is empty")]
    EmptyInput,

    /// A point's dimensionality disagrees with the first candidate point's.
    #[error("Mismatched dimensions: expected {expected}, but point {index} has {found}")]
    DimensionMismatch {
        /// Position of the offending point in the merged point set.
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A point contains an infinite or NaN coordinate.
    #[error("Non finite coordinate: {0}")]
    NonFiniteCoordinate(String),

    /// A hyper parameter is outside its valid range.
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: &'static str,
    },

    /// The candidate prefix of a merged point set doesn't line up with the candidates.
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    /// The kd-tree rejected a point or a query.
    #[error("Spatial index failure: {0}")]
    SpatialIndex(String),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, OutlierError>;

impl From<kdtree::ErrorKind> for OutlierError {
    fn from(err: kdtree::ErrorKind) -> Self {
        OutlierError::SpatialIndex(format!("{err:?}"))
    }
}
