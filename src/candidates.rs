use crate::point::Point;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A point returned by a nearest-neighbour query, with its Euclidean distance to the query.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub point: Point,
    pub distance: f64,
}

struct Candidate<'a> {
    distance: f64,
    seq: u64,
    point: &'a Point,
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    // Farther is greater; on equal distance the later discovery is greater,
    // so it is the one evicted first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Fixed-capacity selector keeping the closest candidates seen so far.
///
/// Backed by a max-heap on distance. Once full, a new candidate replaces the
/// current farthest one only if it is strictly closer.
pub struct BoundedCandidateSet<'a> {
    capacity: usize,
    heap: BinaryHeap<Candidate<'a>>,
    seen: u64,
}

impl<'a> BoundedCandidateSet<'a> {
    pub fn new(capacity: usize) -> Self {
        BoundedCandidateSet {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
            seen: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Largest distance currently retained.
    pub fn max_distance(&self) -> Option<f64> {
        self.heap.peek().map(|c| c.distance)
    }

    /// Offers a candidate. Returns `true` if it was retained.
    ///
    /// A NaN distance ranks farther than every real distance.
    pub fn offer(&mut self, distance: f64, point: &'a Point) -> bool {
        let distance = if distance.is_nan() { distance.abs() } else { distance };
        let seq = self.seen;
        self.seen += 1;

        if self.capacity == 0 {
            return false;
        }
        if !self.is_full() {
            self.heap.push(Candidate { distance, seq, point });
            return true;
        }
        match self.heap.peek() {
            Some(worst) if distance.total_cmp(&worst.distance) == Ordering::Less => {
                self.heap.pop();
                self.heap.push(Candidate { distance, seq, point });
                true
            }
            _ => false,
        }
    }

    /// Consumes the set, returning its contents closest first.
    /// Equal distances keep discovery order.
    pub fn into_sorted(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                point: c.point.clone(),
                distance: c.distance,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_to_capacity() {
        let a = Point::from([1.0]);
        let b = Point::from([2.0]);
        let c = Point::from([3.0]);
        let mut set = BoundedCandidateSet::new(2);
        assert!(set.offer(3.0, &c));
        assert!(set.offer(1.0, &a));
        assert!(set.is_full());
        assert_eq!(set.max_distance(), Some(3.0));
        assert!(set.offer(2.0, &b));
        assert_eq!(set.len(), 2);
        assert_eq!(set.max_distance(), Some(2.0));

        let out = set.into_sorted();
        assert_eq!(out[0].point, a);
        assert_eq!(out[1].point, b);
    }

    #[test]
    fn test_farther_candidate_rejected_when_full() {
        let a = Point::from([0.0]);
        let far = Point::from([9.0]);
        let mut set = BoundedCandidateSet::new(1);
        assert!(set.offer(0.0, &a));
        assert!(!set.offer(9.0, &far));
        assert_eq!(set.into_sorted()[0].point, a);
    }

    #[test]
    fn test_equal_distance_does_not_evict() {
        let first = Point::from([1.0, 0.0]);
        let second = Point::from([0.0, 1.0]);
        let mut set = BoundedCandidateSet::new(1);
        assert!(set.offer(1.0, &first));
        assert!(!set.offer(1.0, &second));
        assert_eq!(set.into_sorted()[0].point, first);
    }

    #[test]
    fn test_sorted_ties_keep_discovery_order() {
        let p: Vec<Point> = (0..4).map(|i| Point::from([i as f64])).collect();
        let mut set = BoundedCandidateSet::new(4);
        set.offer(2.0, &p[0]);
        set.offer(1.0, &p[1]);
        set.offer(2.0, &p[2]);
        set.offer(1.0, &p[3]);
        let order: Vec<f64> = set.into_sorted().iter().map(|n| n.point[0]).collect();
        assert_eq!(order, vec![1.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    fn test_nan_distance_is_evicted_by_closer_candidate() {
        let nan = Point::from([-f64::NAN]);
        let near = Point::from([0.0]);
        let far = Point::from([5.0]);
        let mut set = BoundedCandidateSet::new(1);
        assert!(set.offer(-f64::NAN, &nan));
        assert!(set.offer(0.0, &near));
        assert!(!set.offer(5.0, &far));
        assert!(!set.offer(f64::NAN, &nan));
        assert_eq!(set.into_sorted()[0].point, near);
    }

    #[test]
    fn test_nan_distances_sort_last() {
        let nan = Point::from([f64::NAN]);
        let a = Point::from([1.0]);
        let mut set = BoundedCandidateSet::new(2);
        set.offer(-f64::NAN, &nan);
        set.offer(f64::INFINITY, &a);
        let out = set.into_sorted();
        assert_eq!(out[0].point, a);
        assert!(out[1].distance.is_nan());
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let a = Point::from([0.0]);
        let mut set = BoundedCandidateSet::new(0);
        assert!(!set.offer(0.0, &a));
        assert!(set.is_empty());
    }
}
