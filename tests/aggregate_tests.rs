//! Unit tests for folds, extremes, zipping and partitioning.

use lambars_query::prelude::*;
use rstest::rstest;

#[rstest]
fn test_zip_truncates_in_both_shapes() {
    let eager = Array::from(vec![1, 2, 3]).zip(&Array::from(vec![10, 20]), |left, right| left + right);
    assert_eq!(eager.as_slice(), &[11, 22]);

    let deferred =
        Iterable::from_vec(vec![1, 2, 3]).zip(&Iterable::from_vec(vec![10, 20]), |left, right| left + right);
    assert_eq!(deferred.to_vec(), vec![11, 22]);
}

#[rstest]
fn test_zip_with_infinite_side() {
    let naturals = Iterable::iterate(0, |value| value + 1);
    let letters = Iterable::from_vec(vec!['a', 'b', 'c']);
    assert_eq!(
        naturals.zip_pairs(&letters).to_vec(),
        vec![(0, 'a'), (1, 'b'), (2, 'c')]
    );
}

#[rstest]
fn test_aggregate_with_result_selector() {
    let values = Iterable::from_vec(vec![2.0, 4.0, 9.0]);
    let mean = values.aggregate_with(
        (0.0, 0_u32),
        |(sum, count), value| (sum + value, count + 1),
        |(sum, count)| sum / f64::from(count),
    );
    assert!((mean - 5.0_f64).abs() < f64::EPSILON);
}

#[rstest]
#[case(vec![], vec![], vec![])]
#[case(vec![1, 3], vec![1, 3], vec![])]
#[case(vec![2, 1, 4, 3], vec![1, 3], vec![2, 4])]
fn test_partition(#[case] elements: Vec<i32>, #[case] odd: Vec<i32>, #[case] even: Vec<i32>) {
    let (matching, rest) = Iterable::from_vec(elements).partition(|value| value % 2 != 0);
    assert_eq!(matching.into_vec(), odd);
    assert_eq!(rest.into_vec(), even);
}

#[rstest]
fn test_unzip_from_zip_pairs() {
    let left = Array::from(vec![1, 2, 3]);
    let right = Array::from(vec!["a", "b"]);
    let (numbers, letters) = left.zip_pairs(&right).unzip();
    assert_eq!(numbers.as_slice(), &[1, 2]);
    assert_eq!(letters.as_slice(), &["a", "b"]);
}

#[rstest]
fn test_min_max() {
    let values = Array::from(vec![3, 9, -2, 9]);
    assert_eq!(values.min(), Ok(-2));
    assert_eq!(values.max(), Ok(9));
    let empty: Iterable<i32> = Iterable::empty();
    assert_eq!(
        empty.max_by(|left: &i32, right: &i32| left.cmp(right)),
        Err(QueryError::NoSuchElement { operation: "max_by" })
    );
}

#[rstest]
fn test_sequence_equal_across_operations() {
    let values = Iterable::from_vec(vec![3, 1, 2]);
    let sorted = values.sorted();
    let expected = Iterable::from_vec(vec![1, 2, 3]);
    assert!(sorted.sequence_equal(&expected));
    assert!(!values.sequence_equal(&expected));
}
