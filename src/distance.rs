use num_traits::Float;

/// Distance metrics available when measuring how far apart two points are.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Straight line distance. The metric density reachability is normally defined over.
    #[default]
    Euclidean,
    /// Sum of the absolute coordinate differences.
    Manhattan,
}

impl DistanceMetric {
    pub(crate) fn calc_dist<T: Float>(&self, a: &[T], b: &[T]) -> T {
        match self {
            Self::Euclidean => euclidean_distance(a, b),
            Self::Manhattan => manhattan_distance(a, b),
        }
    }

    /// A plain function pointer, the shape `kdtree` queries expect.
    pub(crate) fn as_fn<T: Float>(&self) -> fn(&[T], &[T]) -> T {
        match self {
            Self::Euclidean => euclidean_distance,
            Self::Manhattan => manhattan_distance,
        }
    }
}

pub(crate) fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y) * (x - y))
        .fold(T::zero(), |acc, sq| acc + sq)
        .sqrt()
}

pub(crate) fn manhattan_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y).abs())
        .fold(T::zero(), |acc, d| acc + d)
}
