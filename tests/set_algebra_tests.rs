//! Unit tests for distinct, union, intersect and except.

use lambars_query::prelude::*;
use rstest::rstest;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

const fn point(x: i32, y: i32) -> Point {
    Point { x, y }
}

fn by_x(left: &Point, right: &Point) -> Ordering {
    left.x.cmp(&right.x)
}

// =============================================================================
// Distinct Tests
// =============================================================================

#[rstest]
#[case(vec![], vec![])]
#[case(vec![1, 1, 1], vec![1])]
#[case(vec![3, 1, 2], vec![3, 1, 2])]
#[case(vec![2, 1, 2, 3, 1], vec![2, 1, 3])]
fn test_distinct(#[case] elements: Vec<i32>, #[case] expected: Vec<i32>) {
    assert_eq!(Array::from(elements.clone()).distinct().into_vec(), expected);
    assert_eq!(Iterable::from_vec(elements).distinct().to_vec(), expected);
}

#[rstest]
fn test_distinct_by_on_type_without_ord() {
    let points = Array::from(vec![point(1, 0), point(2, 0), point(1, 9)]);
    assert_eq!(
        points.distinct_by(by_x).as_slice(),
        &[point(1, 0), point(2, 0)]
    );
}

#[rstest]
fn test_distinct_with_reversed_comparer_struct() {
    let values = Iterable::from_vec(vec![1, 2, 1]);
    let comparer = Reversed(Natural);
    let distinct = values.distinct_by(move |left: &i32, right: &i32| comparer.compare(left, right));
    assert_eq!(distinct.to_vec(), vec![1, 2]);
}

// =============================================================================
// Union Tests
// =============================================================================

#[rstest]
fn test_union_removes_duplicates_across_both_inputs() {
    let left = Iterable::from_vec(vec![1, 1, 2]);
    let right = Iterable::from_vec(vec![2, 3, 3]);
    assert_eq!(left.union(&right).to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_concat_distinct_removes_duplicates_per_input() {
    let left = Array::from(vec![1, 1, 2]);
    let right = Array::from(vec![2, 3, 3]);
    assert_eq!(left.concat_distinct(&right).as_slice(), &[1, 2, 2, 3]);
}

#[rstest]
fn test_union_by() {
    let left = Iterable::from_vec(vec![point(1, 1)]);
    let right = Iterable::from_vec(vec![point(1, 2), point(3, 3)]);
    assert_eq!(
        left.union_by(&right, by_x).to_vec(),
        vec![point(1, 1), point(3, 3)]
    );
}

// =============================================================================
// Intersect / Except Tests
// =============================================================================

#[rstest]
#[case(vec![1, 2, 3], vec![2, 3, 4], vec![2, 3], vec![1])]
#[case(vec![1, 1, 2], vec![1], vec![1], vec![2])]
#[case(vec![], vec![1], vec![], vec![])]
#[case(vec![5, 6], vec![], vec![], vec![5, 6])]
fn test_intersect_and_except(
    #[case] left: Vec<i32>,
    #[case] right: Vec<i32>,
    #[case] intersection: Vec<i32>,
    #[case] difference: Vec<i32>,
) {
    let eager_left = Array::from(left.clone());
    let eager_right = Array::from(right.clone());
    assert_eq!(eager_left.intersect(&eager_right).into_vec(), intersection);
    assert_eq!(eager_left.except(&eager_right).into_vec(), difference);

    let lazy_left = Iterable::from_vec(left);
    let lazy_right = Iterable::from_vec(right);
    assert_eq!(lazy_left.intersect(&lazy_right).to_vec(), intersection);
    assert_eq!(lazy_left.except(&lazy_right).to_vec(), difference);
}

#[rstest]
fn test_intersect_by_keeps_left_representatives() {
    let left = Array::from(vec![point(1, 0), point(2, 0), point(1, 5)]);
    let right = Array::from(vec![point(1, 9)]);
    assert_eq!(left.intersect_by(&right, by_x).as_slice(), &[point(1, 0)]);
    assert_eq!(left.except_by(&right, by_x).as_slice(), &[point(2, 0)]);
}

#[rstest]
fn test_except_with_itself_is_empty() {
    let values = Iterable::from_vec(vec![3, 1, 3]);
    assert!(values.except(&values).to_vec().is_empty());
}
