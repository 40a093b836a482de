use crate::point::Point;

/// A node of the k-d tree.
///
/// Each node owns its children, so a tree is released together with its root.
#[derive(Clone, Debug)]
pub enum Node {
    Leaf(Leaf),
    Internal(Box<Internal>),
}

/// Terminal node holding at most `k` raw points.
#[derive(Clone, Debug, Default)]
pub struct Leaf {
    values: Vec<Point>,
}

/// Splitting node. `left` holds the points sorted before the median on
/// `split_axis`, `right` holds the median and everything after it.
#[derive(Clone, Debug)]
pub struct Internal {
    split_axis: usize,
    split_value: Point,
    left: Node,
    right: Node,
}

impl Node {
    /// Recursively partitions `points` into a subtree whose leaves hold at most `k` points.
    ///
    /// Axes are visited round-robin starting from `axis`. Sorting is stable, so
    /// points tied on the split axis keep their incoming order.
    pub(crate) fn build(mut points: Vec<Point>, k: usize, axis: usize, dim: usize) -> Node {
        if points.len() <= k {
            return Node::Leaf(Leaf { values: points });
        }

        // More than k >= 1 distinct points means dim >= 1.
        points.sort_by(|a, b| a[axis].total_cmp(&b[axis]));
        let median = points.len() / 2;
        let split_value = points[median].clone();
        let right_points = points.split_off(median);

        let next = (axis + 1) % dim;
        let left = Node::build(points, k, next, dim);
        let right = Node::build(right_points, k, next, dim);

        Node::Internal(Box::new(Internal {
            split_axis: axis,
            split_value,
            left,
            right,
        }))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal(inner) => 1 + inner.left.depth().max(inner.right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Iterates over all leaves, left to right.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Follows the single primary path for `point` down to a leaf.
    pub(crate) fn find_leaf(&self, point: &[f64]) -> &Leaf {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf,
                Node::Internal(inner) => node = inner.children_for(point).0,
            }
        }
    }
}

impl Leaf {
    pub fn values(&self) -> &[Point] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Internal {
    pub fn split_axis(&self) -> usize {
        self.split_axis
    }

    pub fn split_value(&self) -> &Point {
        &self.split_value
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> &Node {
        &self.right
    }

    /// Returns `(primary, secondary)` children for a query point, using the
    /// same comparison that placed points on either side at build time.
    pub(crate) fn children_for(&self, point: &[f64]) -> (&Node, &Node) {
        let axis = self.split_axis;
        if point[axis] < self.split_value[axis] {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        }
    }
}

/// Depth-first iterator over the leaves of a subtree.
pub struct Leaves<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Leaf;

    fn next(&mut self) -> Option<&'a Leaf> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(leaf) => return Some(leaf),
                Node::Internal(inner) => {
                    self.stack.push(&inner.right);
                    self.stack.push(&inner.left);
                }
            }
        }
        None
    }
}
