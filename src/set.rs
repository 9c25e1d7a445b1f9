//! Set operators backed by the ordered tree.
//!
//! Membership is decided by a [`Comparer`]: natural order for the plain
//! operators, a caller-supplied ordering function for the `_by` forms. Two
//! elements belong to the same class when the comparer returns
//! [`Ordering::Equal`]. Results keep the order of first occurrence; the tree
//! only answers "seen before?".
//!
//! Every operator reduces its inputs to distinct classes, so
//! `intersect` and `except` never yield duplicates.
//!
//! # Examples
//!
//! ```rust
//! use lambars_query::prelude::*;
//!
//! let left = Array::from(vec![3, 1, 3, 2]);
//! let right = Array::from(vec![2, 4, 1]);
//!
//! assert_eq!(left.distinct().as_slice(), &[3, 1, 2]);
//! assert_eq!(left.union(&right).as_slice(), &[3, 1, 2, 4]);
//! assert_eq!(left.intersect(&right).as_slice(), &[1, 2]);
//! assert_eq!(left.except(&right).as_slice(), &[3]);
//! ```

use std::cmp::Ordering;

use crate::compare::{Comparer, Natural};
use crate::cursor::Distinct;
use crate::sequence::Sequence;
use crate::tree::OrderedSet;

/// Distinct, union, intersection and difference on every [`Sequence`].
pub trait SetAlgebra: Sequence {
    /// Drops every element equal to an earlier one.
    ///
    /// Deferred results pull only as far as the consumer asks.
    fn distinct(&self) -> Self::Shape<Self::Item>
    where
        Self::Item: Ord,
    {
        self.pipe(|cursor| Distinct::new(cursor, Natural))
    }

    /// Drops every element `comparer` deems equal to an earlier one.
    fn distinct_by<F>(&self, comparer: F) -> Self::Shape<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering + Clone + 'static,
    {
        self.pipe(move |cursor| Distinct::new(cursor, comparer.clone()))
    }

    /// Yields the distinct elements of `self` followed by those of `other`
    /// not already seen.
    ///
    /// Duplicates are removed across both inputs, in both shapes.
    fn union(&self, other: &Self::Shape<Self::Item>) -> Self::Shape<Self::Item>
    where
        Self::Item: Ord,
    {
        self.pipe_with(other, |first, second| {
            Distinct::new(first.chain(second), Natural)
        })
    }

    /// [`union`](SetAlgebra::union) under `comparer`.
    fn union_by<F>(&self, other: &Self::Shape<Self::Item>, comparer: F) -> Self::Shape<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering + Clone + 'static,
    {
        self.pipe_with(other, move |first, second| {
            Distinct::new(first.chain(second), comparer.clone())
        })
    }

    /// Deduplicates each input on its own and concatenates the results.
    ///
    /// Unlike [`union`](SetAlgebra::union), an element present in both
    /// inputs appears twice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let left = Iterable::from_vec(vec![1, 1, 2]);
    /// let right = Iterable::from_vec(vec![2, 3, 3]);
    /// assert_eq!(left.concat_distinct(&right).to_vec(), vec![1, 2, 2, 3]);
    /// ```
    fn concat_distinct(&self, other: &Self::Shape<Self::Item>) -> Self::Shape<Self::Item>
    where
        Self::Item: Ord,
    {
        self.pipe_with(other, |first, second| {
            Distinct::new(first, Natural).chain(Distinct::new(second, Natural))
        })
    }

    /// Yields the distinct elements of `self` that also occur in `other`.
    ///
    /// `other` is drained into a set when the traversal starts.
    fn intersect(&self, other: &Self::Shape<Self::Item>) -> Self::Shape<Self::Item>
    where
        Self::Item: Ord,
    {
        self.pipe_with(other, |first, second| {
            let members = collect_set(second, Natural);
            Distinct::new(first, Natural).filter(move |element| members.contains(element))
        })
    }

    /// [`intersect`](SetAlgebra::intersect) under `comparer`.
    fn intersect_by<F>(
        &self,
        other: &Self::Shape<Self::Item>,
        comparer: F,
    ) -> Self::Shape<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering + Clone + 'static,
    {
        self.pipe_with(other, move |first, second| {
            let members = collect_set(second, comparer.clone());
            Distinct::new(first, comparer.clone()).filter(move |element| members.contains(element))
        })
    }

    /// Yields the distinct elements of `self` that do not occur in `other`.
    fn except(&self, other: &Self::Shape<Self::Item>) -> Self::Shape<Self::Item>
    where
        Self::Item: Ord,
    {
        self.pipe_with(other, |first, second| {
            let excluded = collect_set(second, Natural);
            Distinct::new(first, Natural).filter(move |element| !excluded.contains(element))
        })
    }

    /// [`except`](SetAlgebra::except) under `comparer`.
    fn except_by<F>(&self, other: &Self::Shape<Self::Item>, comparer: F) -> Self::Shape<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering + Clone + 'static,
    {
        self.pipe_with(other, move |first, second| {
            let excluded = collect_set(second, comparer.clone());
            Distinct::new(first, comparer.clone())
                .filter(move |element| !excluded.contains(element))
        })
    }
}

impl<S: Sequence> SetAlgebra for S {}

fn collect_set<I, C>(cursor: I, comparer: C) -> OrderedSet<I::Item, C>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
    let mut set = OrderedSet::with_comparer(comparer);
    set.extend(cursor);
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::iterable::Iterable;
    use crate::query::Query;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    fn by_magnitude(left: &i32, right: &i32) -> Ordering {
        left.abs().cmp(&right.abs())
    }

    #[rstest]
    fn test_distinct_keeps_first_occurrence() {
        let values = Iterable::from_vec(vec![5, 1, 5, 2, 1]);
        assert_eq!(values.distinct().to_vec(), vec![5, 1, 2]);
    }

    #[rstest]
    fn test_distinct_is_lazy_on_infinite_input() {
        let cycle = Iterable::iterate(0, |value| (value + 1) % 3);
        assert_eq!(cycle.distinct().take(3).to_vec(), vec![0, 1, 2]);
    }

    #[rstest]
    fn test_distinct_by() {
        let values = Array::from(vec![-1, 2, 1, -2, 3]);
        assert_eq!(values.distinct_by(by_magnitude).as_slice(), &[-1, 2, 3]);
    }

    #[rstest]
    fn test_union_is_distinct_across_inputs_in_both_shapes() {
        let left = vec![1, 2, 2];
        let right = vec![2, 3, 1];
        let eager = Array::from(left.clone()).union(&Array::from(right.clone()));
        let deferred = Iterable::from_vec(left).union(&Iterable::from_vec(right));
        assert_eq!(eager.as_slice(), &[1, 2, 3]);
        assert_eq!(deferred.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_union_by() {
        let left = Array::from(vec![1, -2]);
        let right = Array::from(vec![2, -3]);
        assert_eq!(left.union_by(&right, by_magnitude).as_slice(), &[1, -2, -3]);
    }

    #[rstest]
    fn test_intersect_and_except_reduce_duplicates() {
        let left = Iterable::from_vec(vec![4, 1, 4, 2, 1]);
        let right = Iterable::from_vec(vec![1, 1, 4]);
        assert_eq!(left.intersect(&right).to_vec(), vec![4, 1]);
        assert_eq!(left.except(&right).to_vec(), vec![2]);
    }

    #[rstest]
    fn test_intersect_by_and_except_by() {
        let left = Array::from(vec![-1, 2, -3]);
        let right = Array::from(vec![1, 3]);
        assert_eq!(left.intersect_by(&right, by_magnitude).as_slice(), &[-1, -3]);
        assert_eq!(left.except_by(&right, by_magnitude).as_slice(), &[2]);
    }

    #[rstest]
    fn test_intersect_rebuilds_membership_per_traversal() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let right = Iterable::new(move || {
            counter.set(counter.get() + 1);
            vec![2, 3]
        });
        let intersection = Iterable::from_vec(vec![1, 2, 3]).intersect(&right);
        assert_eq!(runs.get(), 0);
        assert_eq!(intersection.to_vec(), vec![2, 3]);
        assert_eq!(intersection.to_vec(), vec![2, 3]);
        assert_eq!(runs.get(), 2);
    }

    #[rstest]
    fn test_set_operators_on_empty_inputs() {
        let empty: Array<i32> = Array::new();
        let values = Array::from(vec![1, 2]);
        assert!(empty.union(&empty).is_empty());
        assert_eq!(empty.union(&values).as_slice(), &[1, 2]);
        assert!(values.intersect(&empty).is_empty());
        assert_eq!(values.except(&empty).as_slice(), &[1, 2]);
    }
}
