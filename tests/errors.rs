use kdknn::{KdTree, KdTreeError, Point, PointSet};

#[test]
fn test_empty_input() {
    let err = KdTree::build(Vec::<[f64; 3]>::new(), 1).unwrap_err();
    assert_eq!(err, KdTreeError::EmptyInput);
}

#[test]
fn test_k_larger_than_point_count() {
    let err = KdTree::build(vec![[0.0, 0.0, 0.0]], 2).unwrap_err();
    assert_eq!(err, KdTreeError::InvalidK { k: 2, available: 1 });
}

#[test]
fn test_k_counts_distinct_points() {
    let points = vec![[1.0, 2.0], [1.0, 2.0], [1.0, 2.0]];
    let err = KdTree::build(points, 2).unwrap_err();
    assert_eq!(err, KdTreeError::InvalidK { k: 2, available: 1 });
}

#[test]
fn test_k_zero() {
    let err = KdTree::build(vec![[0.0], [1.0]], 0).unwrap_err();
    assert_eq!(err, KdTreeError::InvalidK { k: 0, available: 2 });
}

#[test]
fn test_mismatched_dimensions_at_build() {
    let points = vec![vec![0.0, 0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0, 2.0]];
    let err = KdTree::build(points, 1).unwrap_err();
    assert_eq!(err, KdTreeError::DimensionMismatch { expected: 3, found: 2 });
}

#[test]
fn test_from_point_set_validates_dimensions() {
    let set = PointSet::new(vec![vec![0.0, 0.0], vec![1.0], vec![2.0, 2.0]]);
    let err = KdTree::from_point_set(set, 1).unwrap_err();
    assert!(matches!(err, KdTreeError::DimensionMismatch { .. }), "got {:?}", err);

    let set = PointSet::new(vec![[0.0, 0.0], [1.0, 1.0]]);
    let err = KdTree::from_point_set(set, 3).unwrap_err();
    assert_eq!(err, KdTreeError::InvalidK { k: 3, available: 2 });
}

#[test]
fn test_mismatched_dimensions_at_query() {
    let tree = KdTree::build(vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], 1).unwrap();
    let expected = KdTreeError::DimensionMismatch { expected: 3, found: 2 };

    assert_eq!(tree.knn(&[0.0, 0.0]).unwrap_err(), expected);
    assert_eq!(tree.knn_with_distances(&[0.0, 0.0]).unwrap_err(), expected);
    assert_eq!(tree.nearest(&[0.0, 0.0], 1).unwrap_err(), expected);
    assert_eq!(tree.leaf_axis_average(&[0.0, 0.0], 0).unwrap_err(), expected);
    assert_eq!(tree.find_leaf(&[0.0, 0.0]).unwrap_err(), expected);

    let queries = vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0], vec![0.0]];
    assert_eq!(tree.knn_batch(&queries).unwrap_err(), expected);
}

#[test]
fn test_invalid_axis() {
    let tree = KdTree::build(vec![[0.0, 0.0], [1.0, 1.0]], 2).unwrap();
    let err = tree.leaf_axis_average(&[0.0, 0.0], 2).unwrap_err();
    assert_eq!(err, KdTreeError::InvalidAxis { axis: 2, dim: 2 });
    // z is undefined in two dimensions.
    assert_eq!(tree.z_average(&[0.0, 0.0]).unwrap_err(), err);
}

#[test]
fn test_nearest_count_out_of_range() {
    let tree = KdTree::build(vec![[0.0], [1.0], [2.0]], 1).unwrap();
    assert_eq!(
        tree.nearest(&[0.0], 0).unwrap_err(),
        KdTreeError::InvalidK { k: 0, available: 3 }
    );
    assert_eq!(
        tree.nearest(&[0.0], 4).unwrap_err(),
        KdTreeError::InvalidK { k: 4, available: 3 }
    );
}

#[test]
fn test_nan_coordinates_do_not_panic() {
    let points = vec![[0.0, f64::NAN], [1.0, 2.0], [f64::NAN, 3.0], [4.0, 5.0]];
    let tree = KdTree::build(points, 1).unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.knn(&[1.0, 2.0]).unwrap().len(), 1);
    assert!(tree.leaf_axis_average(&[f64::NAN, 0.0], 0).is_ok());

    // Visiting every point: real distances first, NaN distances last.
    let all = tree.nearest(&[1.0, 2.0], 4).unwrap();
    assert_eq!(all[0].point, Point::from([1.0, 2.0]));
    assert_eq!(all[1].point, Point::from([4.0, 5.0]));
    assert!(all[2].distance.is_nan() && all[3].distance.is_nan());
}

#[test]
fn test_nan_neighbor_replaced_by_closer_point() {
    let tree = KdTree::build(vec![[-f64::NAN], [0.0], [5.0]], 3).unwrap();
    let got = tree.nearest(&[0.0], 1).unwrap();
    assert_eq!(got[0].point, Point::from([0.0]));
    assert_eq!(got[0].distance, 0.0);

    let got = tree.nearest(&[4.0], 2).unwrap();
    assert_eq!(got[0].point, Point::from([5.0]));
    assert_eq!(got[1].point, Point::from([0.0]));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        KdTreeError::InvalidAxis { axis: 3, dim: 3 }.to_string(),
        "axis 3 is out of range for dimension 3"
    );
    assert_eq!(
        KdTreeError::DimensionMismatch { expected: 3, found: 2 }.to_string(),
        "expected a point of dimension 3, got 2"
    );
}
