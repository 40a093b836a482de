use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Index;

/// A point with a fixed number of real coordinates.
///
/// Equality, hashing and ordering work on the exact bit pattern of each
/// coordinate, so points can be deduplicated and sorted deterministically.
/// `-0.0` is stored as `0.0` so that numerically equal coordinates collapse.
#[derive(Clone, Debug)]
pub struct Point(Vec<f64>);

impl Point {
    pub fn new(coords: impl Into<Vec<f64>>) -> Self {
        let mut coords = coords.into();
        for c in coords.iter_mut() {
            if *c == 0.0 {
                *c = 0.0;
            }
        }
        Point(coords)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Squared Euclidean distance. Both points must share a dimension.
    pub fn distance_sq(&self, other: &[f64]) -> f64 {
        self.0
            .iter()
            .zip(other)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    pub fn distance(&self, other: &[f64]) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for c in &self.0 {
            c.to_bits().hash(state);
        }
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    /// Lexicographic over coordinates, shorter points first on a common prefix.
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(&other.0) {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point::new(coords)
    }
}

impl From<&[f64]> for Point {
    fn from(coords: &[f64]) -> Self {
        Point::new(coords.to_vec())
    }
}

impl<const D: usize> From<[f64; D]> for Point {
    fn from(coords: [f64; D]) -> Self {
        Point::new(coords.to_vec())
    }
}

impl<const D: usize> From<&[f64; D]> for Point {
    fn from(coords: &[f64; D]) -> Self {
        Point::new(coords.to_vec())
    }
}

/// A collection of points with exact duplicates collapsed.
///
/// Points are kept in lexicographic order, so two inputs holding the same
/// points in any order produce the same `PointSet`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let mut points: Vec<Point> = points.into_iter().map(Into::into).collect();
        points.sort();
        points.dedup();
        PointSet { points }
    }

    /// Generates `count` points uniformly inside `[min, max)` on every axis.
    ///
    /// Native builds use a fixed seed so results are reproducible.
    pub fn random(count: usize, dim: usize, min: f64, max: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let span = max - min;
        let points = (0..count).map(|_| {
            (0..dim)
                .map(|_| min + rng.r#gen::<f64>() * span)
                .collect::<Vec<f64>>()
        });
        PointSet::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension of the first point, if any.
    pub fn dim(&self) -> Option<usize> {
        self.points.first().map(Point::dim)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<P: Into<Point>> FromIterator<P> for PointSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        PointSet::new(iter)
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}
