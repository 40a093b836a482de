use crate::candidates::{BoundedCandidateSet, Neighbor};
use crate::error::{KdTreeError, Result};
use crate::node::Node;
use crate::point::{Point, PointSet};
use rayon::prelude::*;
use tracing::{debug, trace};

/// A static k-d tree answering approximate k-nearest-neighbour and leaf aggregate queries.
///
/// The tree is built once from a point set and never mutated afterwards, so it
/// can be shared freely between threads.
#[derive(Clone, Debug)]
pub struct KdTree {
    root: Node,
    dim: usize,
    k: usize,
    len: usize,
}

impl KdTree {
    /// Builds a tree from raw points, collapsing exact duplicates.
    ///
    /// Fails with [`KdTreeError::EmptyInput`] for an empty input,
    /// [`KdTreeError::DimensionMismatch`] if points disagree on their length, and
    /// [`KdTreeError::InvalidK`] unless `1 <= k <= distinct points`.
    pub fn build<I, P>(points: I, k: usize) -> Result<KdTree>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let points: Vec<Point> = points.into_iter().map(Into::into).collect();
        let dim = check_dimensions(&points)?;
        KdTree::from_checked(PointSet::new(points), k, dim)
    }

    /// Builds a tree from an already deduplicated point set.
    pub fn from_point_set(points: PointSet, k: usize) -> Result<KdTree> {
        let dim = check_dimensions(points.as_slice())?;
        KdTree::from_checked(points, k, dim)
    }

    /// Builds from a non-empty set whose points all have dimension `dim`.
    fn from_checked(points: PointSet, k: usize, dim: usize) -> Result<KdTree> {
        let len = points.len();
        if k == 0 || k > len {
            return Err(KdTreeError::InvalidK { k, available: len });
        }

        let root = Node::build(points.into_vec(), k, 0, dim);
        let tree = KdTree { root, dim, k, len };
        debug!(
            points = len,
            dim,
            k,
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built k-d tree"
        );
        Ok(tree)
    }

    /// Returns `k` indexed points close to `point`, closest first.
    ///
    /// The search is approximate: the far side of a split is only visited
    /// while fewer than `k` candidates have been found.
    pub fn knn(&self, point: &[f64]) -> Result<Vec<Point>> {
        Ok(self
            .knn_with_distances(point)?
            .into_iter()
            .map(|n| n.point)
            .collect())
    }

    /// Like [`knn`](Self::knn), paired with each point's Euclidean distance.
    pub fn knn_with_distances(&self, point: &[f64]) -> Result<Vec<Neighbor>> {
        self.check_query(point)?;
        Ok(self.search(point, self.k))
    }

    /// Runs the same bounded traversal with a capacity other than the tree's `k`.
    pub fn nearest(&self, point: &[f64], count: usize) -> Result<Vec<Neighbor>> {
        self.check_query(point)?;
        if count == 0 || count > self.len {
            return Err(KdTreeError::InvalidK {
                k: count,
                available: self.len,
            });
        }
        Ok(self.search(point, count))
    }

    /// Answers many [`knn`](Self::knn) queries in parallel, preserving query order.
    ///
    /// All queries are validated up front; the first invalid one is reported.
    pub fn knn_batch<Q>(&self, queries: &[Q]) -> Result<Vec<Vec<Point>>>
    where
        Q: AsRef<[f64]> + Sync,
    {
        for query in queries {
            self.check_query(query.as_ref())?;
        }
        debug!(queries = queries.len(), "running batch knn");
        Ok(queries
            .par_iter()
            .map(|query| {
                self.search(query.as_ref(), self.k)
                    .into_iter()
                    .map(|n| n.point)
                    .collect()
            })
            .collect())
    }

    /// Mean of coordinate `axis` over the points in the leaf `point` routes to.
    pub fn leaf_axis_average(&self, point: &[f64], axis: usize) -> Result<f64> {
        self.check_query(point)?;
        if axis >= self.dim {
            return Err(KdTreeError::InvalidAxis { axis, dim: self.dim });
        }
        let leaf = self.root.find_leaf(point);
        if leaf.is_empty() {
            return Err(KdTreeError::EmptyLeaf);
        }
        let sum: f64 = leaf.values().iter().map(|p| p[axis]).sum();
        Ok(sum / leaf.len() as f64)
    }

    /// Mean z coordinate (axis 2) of the leaf containing `point`.
    pub fn z_average(&self, point: &[f64]) -> Result<f64> {
        self.leaf_axis_average(point, 2)
    }

    /// Points of the leaf `point` routes to.
    pub fn find_leaf(&self, point: &[f64]) -> Result<&[Point]> {
        self.check_query(point)?;
        Ok(self.root.find_leaf(point).values())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of distinct indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Point slices of every leaf, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.root.leaves().map(|leaf| leaf.values())
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    fn check_query(&self, point: &[f64]) -> Result<()> {
        if point.len() != self.dim {
            return Err(KdTreeError::DimensionMismatch {
                expected: self.dim,
                found: point.len(),
            });
        }
        Ok(())
    }

    fn search(&self, point: &[f64], capacity: usize) -> Vec<Neighbor> {
        trace!(capacity, "knn search");
        let mut candidates = BoundedCandidateSet::new(capacity);
        collect_candidates(&self.root, point, &mut candidates);
        candidates.into_sorted()
    }
}

fn collect_candidates<'a>(node: &'a Node, query: &[f64], candidates: &mut BoundedCandidateSet<'a>) {
    match node {
        Node::Leaf(leaf) => {
            for p in leaf.values() {
                candidates.offer(p.distance(query), p);
            }
        }
        Node::Internal(inner) => {
            let (primary, secondary) = inner.children_for(query);
            collect_candidates(primary, query, candidates);
            if !candidates.is_full() {
                collect_candidates(secondary, query, candidates);
            }
        }
    }
}

/// Returns the shared dimension, or the first mismatch against the first point.
fn check_dimensions(points: &[Point]) -> Result<usize> {
    let first = points.first().ok_or(KdTreeError::EmptyInput)?;
    let expected = first.dim();
    match points.iter().find(|p| p.dim() != expected) {
        Some(p) => Err(KdTreeError::DimensionMismatch {
            expected,
            found: p.dim(),
        }),
        None => Ok(expected),
    }
}
