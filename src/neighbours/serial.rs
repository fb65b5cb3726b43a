use super::NeighbourSearch;
use crate::Result;
use num_traits::Float;

/// Core distance of every point: the distance to its kth nearest neighbour.
pub(crate) fn calc_core_distances<T: Float>(
    search: &NeighbourSearch<'_, T>,
    k: usize,
) -> Result<Vec<T>> {
    (0..search.len())
        .map(|n| search.kth_neighbour_distance(n, k))
        .collect()
}

/// The `radius` neighbourhood of every point, each one including the point itself.
pub(crate) fn calc_neighbourhoods<T: Float>(
    search: &NeighbourSearch<'_, T>,
    radius: T,
) -> Result<Vec<Vec<usize>>> {
    (0..search.len()).map(|n| search.within(n, radius)).collect()
}
