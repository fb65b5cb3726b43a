#![cfg(feature = "parallel")]
use super::NeighbourSearch;
use crate::Result;
use num_traits::Float;
use rayon::prelude::*;

/// Parallel counterpart of [`super::serial::calc_core_distances`].
pub(crate) fn calc_core_distances<T: Float + Send + Sync>(
    search: &NeighbourSearch<'_, T>,
    k: usize,
) -> Result<Vec<T>> {
    (0..search.len())
        .into_par_iter()
        .map(|n| search.kth_neighbour_distance(n, k))
        .collect()
}

/// Parallel counterpart of [`super::serial::calc_neighbourhoods`].
pub(crate) fn calc_neighbourhoods<T: Float + Send + Sync>(
    search: &NeighbourSearch<'_, T>,
    radius: T,
) -> Result<Vec<Vec<usize>>> {
    (0..search.len())
        .into_par_iter()
        .map(|n| search.within(n, radius))
        .collect()
}
