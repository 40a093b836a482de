//! # kdknn
//!
//! `kdknn` is a Rust library for approximate k-nearest-neighbour queries over a static set
//! of fixed-dimension points, designed to be used in Rust as well as compiled to WebAssembly
//! (WASM). The index is built once and queried many times.
//!
//! ## Features
//!
//! - **Balanced k-d tree**: Points are split at the median, cycling through the axes, until
//!   every leaf holds at most `k` points.
//! - **Bounded KNN traversal**: Queries visit the nearest side of each split first and only
//!   cross to the other side while fewer than `k` candidates have been found.
//! - **Leaf aggregates**: The mean of any coordinate over the leaf a point falls into.
//! - **Parallel batches**: Many queries can be answered at once with `rayon`.
//! - **WASM-first**: Built with `wasm-bindgen` for use from JavaScript and TypeScript.
//!
//! ## Example
//!
//! ```
//! use kdknn::KdTree;
//!
//! let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [5.0, 5.0, 5.0]];
//! let tree = KdTree::build(points, 2).unwrap();
//!
//! let neighbors = tree.knn(&[0.0, 0.0, 0.0]).unwrap();
//! assert_eq!(neighbors.len(), 2);
//! assert_eq!(neighbors[0].coords(), &[0.0, 0.0, 0.0]);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct.

mod candidates;
mod error;
mod node;
mod point;
mod tree;
pub mod wasm;

pub use candidates::BoundedCandidateSet;
pub use candidates::Neighbor;
pub use error::KdTreeError;
pub use error::Result;
pub use node::Internal;
pub use node::Leaf;
pub use node::Leaves;
pub use node::Node;
pub use point::Point;
pub use point::PointSet;
pub use tree::KdTree;
