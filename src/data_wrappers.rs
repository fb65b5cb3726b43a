/// An edge of the minimum spanning tree over mutual reachability distances.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MstEdge<T> {
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) distance: T,
}

/// A merge in the single linkage tree. Node `n_samples + i` is the ith merge.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SltNode<T> {
    pub(crate) left_child: usize,
    pub(crate) right_child: usize,
    pub(crate) distance: T,
    pub(crate) size: usize,
}

/// A parent/child link in the condensed tree. Children below `n_samples` are points, the
/// rest are clusters. `lambda` is the density (1 / distance) at which the child left the parent.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CondensedNode<T> {
    pub(crate) parent: usize,
    pub(crate) child: usize,
    pub(crate) lambda: T,
    pub(crate) size: usize,
}
