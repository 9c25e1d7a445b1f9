//! Unit tests for the deferred Iterable shape.

use lambars_query::prelude::*;
use rstest::rstest;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Builds an iterable over `elements` that counts how often it was traversed.
fn counted(elements: Vec<i32>) -> (Iterable<i32>, Rc<Cell<usize>>) {
    let traversals = Rc::new(Cell::new(0));
    let counter = Rc::clone(&traversals);
    let iterable = Iterable::new(move || {
        counter.set(counter.get() + 1);
        elements.clone()
    });
    (iterable, traversals)
}

// =============================================================================
// Deferred Execution Tests
// =============================================================================

#[rstest]
fn test_operators_do_not_touch_the_source() {
    let (source, traversals) = counted(vec![1, 2, 3]);
    let _chain = source
        .filter(|value| *value > 1)
        .map(|value| value * 10)
        .distinct()
        .order_by(|value| -value);
    assert_eq!(traversals.get(), 0);
}

#[rstest]
fn test_retraversal_reruns_the_source() {
    let (source, traversals) = counted(vec![1, 2, 3]);
    let chain = source.filter(|value| *value != 2).map(|value| value + 1);
    assert_eq!(chain.to_vec(), vec![2, 4]);
    assert_eq!(chain.to_vec(), vec![2, 4]);
    assert_eq!(traversals.get(), 2);
}

#[rstest]
fn test_retraversal_reruns_side_effects_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let chain = Iterable::from_vec(vec!['a', 'b']).map(move |letter| {
        sink.borrow_mut().push(letter);
        letter
    });
    chain.to_vec();
    chain.to_vec();
    assert_eq!(*log.borrow(), vec!['a', 'b', 'a', 'b']);
}

#[rstest]
fn test_pull_is_incremental() {
    let pulled = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulled);
    let chain = Iterable::iterate(0, |value| value + 1).map(move |value| {
        counter.set(counter.get() + 1);
        value
    });
    let mut cursor = chain.traverse();
    assert_eq!(cursor.next(), Some(0));
    assert_eq!(cursor.next(), Some(1));
    assert_eq!(pulled.get(), 2);
}

#[rstest]
fn test_independent_cursors() {
    let iterable = Iterable::from_vec(vec![1, 2, 3]);
    let mut first = iterable.traverse();
    let mut second = iterable.traverse();
    assert_eq!(first.next(), Some(1));
    assert_eq!(first.next(), Some(2));
    assert_eq!(second.next(), Some(1));
}

#[rstest]
fn test_known_length_is_unknown() {
    let iterable = Iterable::from_vec(vec![1, 2, 3]);
    assert_eq!(iterable.known_length(), None);
    assert_eq!(iterable.count(), 3);
}

// =============================================================================
// Constructor Tests
// =============================================================================

#[rstest]
fn test_empty() {
    let empty: Iterable<String> = Iterable::empty();
    assert!(empty.to_vec().is_empty());
}

#[rstest]
#[case(0, vec![])]
#[case(2, vec!["hi", "hi"])]
fn test_repeat(#[case] count: usize, #[case] expected: Vec<&'static str>) {
    assert_eq!(Iterable::repeat("hi", count).to_vec(), expected);
}

#[rstest]
fn test_iterate_is_infinite_and_bounded_by_take() {
    let powers = Iterable::iterate(1_u32, |value| value * 3);
    assert_eq!(powers.take(4).to_vec(), vec![1, 3, 9, 27]);
    assert_eq!(powers.element_at(5), Ok(243));
}

#[rstest]
fn test_round_trip_between_shapes() {
    let array = Array::from(vec![4, 5, 6]);
    let iterable = array.to_iterable();
    assert_eq!(iterable.to_array(), array);
    assert_eq!(Iterable::from(array.clone()).to_vec(), vec![4, 5, 6]);
}

#[rstest]
fn test_for_loop_over_reference() {
    let iterable = Iterable::from_vec(vec![1, 2, 3]);
    let mut total = 0;
    for value in &iterable {
        total += value;
    }
    assert_eq!(total, 6);
}

// =============================================================================
// Range Tests
// =============================================================================

#[rstest]
fn test_range_empty_when_start_equals_finish() {
    let window = Iterable::from_vec(vec![1, 2, 3]).range(2, 2).unwrap();
    assert!(window.to_vec().is_empty());
}

#[rstest]
fn test_range_rejects_reversed_bounds_at_call_time() {
    let (source, traversals) = counted(vec![1, 2, 3]);
    assert!(matches!(
        source.range(3, 1),
        Err(QueryError::InvalidArgument { operation: "range", .. })
    ));
    assert_eq!(traversals.get(), 0);
}

#[rstest]
fn test_range_shortfall_only_reported_when_observed() {
    let window = Iterable::from_vec(vec![1, 2, 3]).range(1, 10).unwrap();

    let prefix: Vec<QueryResult<i32>> = window.take(2).to_vec();
    assert_eq!(prefix, vec![Ok(2), Ok(3)]);

    let drained = window.to_vec();
    assert_eq!(
        drained.last(),
        Some(&Err(QueryError::IndexOutOfRange {
            operation: "range",
            index: 10,
            length: 3,
        }))
    );
}

#[rstest]
fn test_range_over_infinite_source() {
    let window = Iterable::iterate(0, |value| value + 1).range(5, 8).unwrap();
    assert_eq!(window.to_vec(), vec![Ok(5), Ok(6), Ok(7)]);
}

// =============================================================================
// Swap Tests
// =============================================================================

#[rstest]
#[case(0, 2, vec!['c', 'b', 'a', 'd'])]
#[case(3, 1, vec!['a', 'd', 'c', 'b'])]
#[case(2, 2, vec!['a', 'b', 'c', 'd'])]
fn test_swapped(#[case] first: usize, #[case] second: usize, #[case] expected: Vec<char>) {
    let letters = Iterable::from_vec(vec!['a', 'b', 'c', 'd']);
    let swapped: QueryResult<Vec<char>> = letters.swapped(first, second).to_vec().into_iter().collect();
    assert_eq!(swapped, Ok(expected));
}

#[rstest]
fn test_swapped_never_mutates_source_array() {
    let array = Array::from(vec![1, 2, 3]);
    let swapped = array.to_iterable().swapped(0, 2);
    assert_eq!(swapped.to_vec(), vec![Ok(3), Ok(2), Ok(1)]);
    assert_eq!(array.as_slice(), &[1, 2, 3]);
}

#[rstest]
#[case(usize::MAX)]
#[case(isize::MAX as usize)]
#[case(1 << 40)]
fn test_swapped_far_past_end_yields_one_error(#[case] second: usize) {
    let swapped = Iterable::from_vec(vec![1, 2, 3]).swapped(0, second);
    assert_eq!(
        swapped.to_vec(),
        vec![Err(QueryError::IndexOutOfRange {
            operation: "swapped",
            index: second,
            length: 3,
        })]
    );
}

#[rstest]
fn test_swapped_out_of_range() {
    let swapped = Iterable::from_vec(vec![1, 2]).swapped(0, 4);
    let drained = swapped.to_vec();
    assert!(matches!(
        drained.last(),
        Some(Err(QueryError::IndexOutOfRange { operation: "swapped", .. }))
    ));
}
