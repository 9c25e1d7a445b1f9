//! Unit tests for sorting, first-wins keying and grouping.

use lambars_query::prelude::*;
use rstest::rstest;

// =============================================================================
// order_by Tests
// =============================================================================

#[rstest]
fn test_order_by_is_stable_in_both_shapes() {
    let rows = vec![(1, "a"), (1, "b"), (0, "c")];
    let expected = vec![(0, "c"), (1, "a"), (1, "b")];
    assert_eq!(
        Array::from(rows.clone()).order_by(|row| row.0).into_vec(),
        expected
    );
    assert_eq!(
        Iterable::from_vec(rows).order_by(|row| row.0).to_vec(),
        expected
    );
}

#[rstest]
fn test_order_by_with_natural_comparer_struct() {
    let comparer = Reversed(Natural);
    let rows = Array::from(vec![("b", 2), ("a", 1), ("c", 2)]);
    let descending = rows.order_by_with(
        |row| row.1,
        move |left: &i32, right: &i32| comparer.compare(left, right),
    );
    assert_eq!(descending.as_slice(), &[("b", 2), ("c", 2), ("a", 1)]);
}

#[rstest]
fn test_order_by_on_empty() {
    let empty: Iterable<i32> = Iterable::empty();
    assert!(empty.order_by(|value| *value).to_vec().is_empty());
}

#[rstest]
fn test_order_by_then_by_keeps_ties_in_encounter_order() {
    let rows = Iterable::from_vec(vec![
        ("smith", "jo", 1),
        ("adams", "al", 2),
        ("smith", "al", 3),
        ("smith", "jo", 4),
    ]);
    let ordered = rows.order_by_then_by(|row| row.0, |row| row.1);
    let identifiers: Vec<i32> = ordered.map(|row| row.2).to_vec();
    assert_eq!(identifiers, vec![2, 3, 1, 4]);
}

#[rstest]
#[case(vec![], vec![])]
#[case(vec![2, 2, 1], vec![1, 2, 2])]
#[case(vec![5, -1, 3, 0], vec![-1, 0, 3, 5])]
fn test_sorted(#[case] elements: Vec<i32>, #[case] expected: Vec<i32>) {
    assert_eq!(Array::from(elements.clone()).sorted().into_vec(), expected);
    assert_eq!(Iterable::from_vec(elements).sorted().to_vec(), expected);
}

#[rstest]
fn test_sorted_by_descending() {
    let values = Array::from(vec![1, 3, 2]);
    let descending = values.sorted_by(|left: &i32, right: &i32| right.cmp(left));
    assert_eq!(descending.as_slice(), &[3, 2, 1]);
}

// =============================================================================
// group_by Tests
// =============================================================================

#[rstest]
fn test_group_by_is_first_wins() {
    let rows = vec![(1, "a"), (1, "b"), (2, "c")];
    let expected = vec![(1, "a"), (2, "c")];
    assert_eq!(
        Array::from(rows.clone()).group_by(|row| row.0).into_vec(),
        expected
    );
    assert_eq!(
        Iterable::from_vec(rows).group_by(|row| row.0).to_vec(),
        expected
    );
}

#[rstest]
fn test_group_by_output_follows_key_order() {
    let rows = Array::from(vec![(3, 'x'), (1, 'y'), (2, 'z'), (1, 'w')]);
    assert_eq!(
        rows.group_by(|row| row.0).as_slice(),
        &[(1, 'y'), (2, 'z'), (3, 'x')]
    );
}

#[rstest]
fn test_group_by_with_comparer() {
    let values = Iterable::from_vec(vec![10, 21, 12, 33, 24]);
    let by_parity = values.group_by_with(
        |value| value % 2,
        |left: &i32, right: &i32| left.cmp(right),
    );
    assert_eq!(by_parity.to_vec(), vec![10, 21]);
}

// =============================================================================
// lookup Tests
// =============================================================================

#[rstest]
fn test_lookup_collects_every_element() {
    let rows = Iterable::from_vec(vec![(1, "a"), (1, "b"), (2, "c")]);
    let groups = rows.lookup(|row| row.0);
    assert_eq!(
        groups.to_vec(),
        vec![(1, vec![(1, "a"), (1, "b")]), (2, vec![(2, "c")])]
    );
}

// =============================================================================
// Occurrence Tests
// =============================================================================

#[rstest]
fn test_max_occurring_tie_goes_to_smallest_key() {
    let values = Array::from(vec!["pear", "fig", "pear", "fig", "kiwi"]);
    assert_eq!(values.max_occurring(), Ok("fig"));
    assert_eq!(values.min_occurring(), Ok("kiwi"));
}

#[rstest]
fn test_min_occurring_by() {
    let words = Iterable::from_vec(vec!["A", "a", "b", "B", "b", "c", "C"]);
    let least = words.min_occurring_by(|left: &&str, right: &&str| {
        left.to_lowercase().cmp(&right.to_lowercase())
    });
    assert_eq!(least, Ok("A"));
}
