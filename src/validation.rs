use crate::{OutlierError, Result};
use num_traits::Float;

/// Checks that points share one dimensionality and only hold finite coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DataValidator {
    dims: usize,
}

impl DataValidator {
    /// Infers the expected dimensionality from the first point.
    pub(crate) fn infer<T>(data: &[Vec<T>]) -> Result<Self> {
        match data.first() {
            Some(first) => Ok(Self { dims: first.len() }),
            None => Err(OutlierError::EmptyInput),
        }
    }

    pub(crate) fn with_dims(dims: usize) -> Self {
        Self { dims }
    }

    pub(crate) fn dims(&self) -> usize {
        self.dims
    }

    pub(crate) fn validate_input_data<T: Float>(&self, data: &[Vec<T>]) -> Result<()> {
        data.iter()
            .enumerate()
            .try_for_each(|(n, point)| self.check_point(n, point))
    }

    /// `index` is only used to point at the culprit in the error.
    pub(crate) fn check_point<T: Float>(&self, index: usize, point: &[T]) -> Result<()> {
        if point.len() != self.dims {
            return Err(OutlierError::DimensionMismatch {
                index,
                expected: self.dims,
                found: point.len(),
            });
        }
        if point.iter().any(|coord| !coord.is_finite()) {
            return Err(OutlierError::NonFiniteCoordinate(format!(
                "{index}th vector contains non-finite element(s)"
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_radius<T: Float>(radius: T, name: &'static str) -> Result<()> {
    if radius.is_finite() && radius > T::zero() {
        Ok(())
    } else {
        Err(OutlierError::InvalidParameter {
            name,
            message: "must be a positive, finite distance",
        })
    }
}

pub(crate) fn validate_count(count: usize, name: &'static str) -> Result<()> {
    if count == 0 {
        Err(OutlierError::InvalidParameter {
            name,
            message: "must be at least 1",
        })
    } else {
        Ok(())
    }
}
