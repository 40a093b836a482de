use thiserror::Error;

/// Errors raised while building or querying a [`KdTree`](crate::KdTree).
///
/// Every failure is detected by validation before any recursive work starts,
/// so a failed `build` never leaves a partial tree behind and a failed query
/// never touches the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KdTreeError {
    /// The deduplicated input contains no points.
    #[error("cannot build a tree from an empty point set")]
    EmptyInput,

    /// `k` is zero or larger than the number of distinct points.
    #[error("k must be between 1 and {available}, got {k}")]
    InvalidK { k: usize, available: usize },

    /// A point does not have the dimension established by the index.
    #[error("expected a point of dimension {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The requested axis lies outside `[0, dim)`.
    #[error("axis {axis} is out of range for dimension {dim}")]
    InvalidAxis { axis: usize, dim: usize },

    /// An average was requested over a leaf that holds no points.
    #[error("the located leaf holds no points")]
    EmptyLeaf,
}

pub type Result<T> = std::result::Result<T, KdTreeError>;
