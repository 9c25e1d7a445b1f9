//! Folds, extremes and whole-sequence comparisons.
//!
//! These operators are terminal: they drain the receiver and return plain
//! values, or eager [`Array`]s where a sequence-valued result is needed.

use std::cmp::Ordering;

use crate::array::Array;
use crate::compare::{Comparer, Natural};
use crate::error::{QueryError, QueryResult};
use crate::sequence::Sequence;

/// Aggregating operators on every [`Sequence`].
///
/// # Examples
///
/// ```rust
/// use lambars_query::prelude::*;
///
/// let values = Iterable::from_vec(vec![3, 1, 4, 1, 5]);
/// assert_eq!(values.aggregate(0, |total, value| total + value), 14);
/// assert_eq!(values.max(), Ok(5));
///
/// let (odd, even) = values.partition(|value| value % 2 == 1);
/// assert_eq!(odd.as_slice(), &[3, 1, 1, 5]);
/// assert_eq!(even.as_slice(), &[4]);
/// ```
pub trait Aggregate: Sequence {
    /// Folds the elements left to right, starting from `seed`.
    fn aggregate<A, F>(&self, seed: A, accumulate: F) -> A
    where
        F: Fn(A, Self::Item) -> A,
    {
        self.traverse().fold(seed, accumulate)
    }

    /// Folds the elements and projects the final accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let words = Array::from(vec!["a", "bb", "ccc"]);
    /// let average = words.aggregate_with(
    ///     (0, 0),
    ///     |(total, count), word| (total + word.len(), count + 1),
    ///     |(total, count)| total / count,
    /// );
    /// assert_eq!(average, 2);
    /// ```
    fn aggregate_with<A, R, F, G>(&self, seed: A, accumulate: F, result_selector: G) -> R
    where
        F: Fn(A, Self::Item) -> A,
        G: FnOnce(A) -> R,
    {
        result_selector(self.aggregate(seed, accumulate))
    }

    /// Splits the elements by `predicate` in a single pass.
    ///
    /// Returns the matching elements first. Both halves keep the original
    /// relative order.
    fn partition<P>(&self, predicate: P) -> (Array<Self::Item>, Array<Self::Item>)
    where
        P: Fn(&Self::Item) -> bool,
    {
        let (matching, rest): (Vec<Self::Item>, Vec<Self::Item>) =
            self.traverse().partition(|element| predicate(element));
        (
            matching.into_iter().collect(),
            rest.into_iter().collect(),
        )
    }

    /// Splits a sequence of pairs into two arrays.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let pairs = Iterable::from_vec(vec![(1, 'a'), (2, 'b')]);
    /// let (numbers, letters) = pairs.unzip();
    /// assert_eq!(numbers.as_slice(), &[1, 2]);
    /// assert_eq!(letters.as_slice(), &['a', 'b']);
    /// ```
    fn unzip<A, B>(&self) -> (Array<A>, Array<B>)
    where
        Self: Sequence<Item = (A, B)>,
        A: Clone + 'static,
        B: Clone + 'static,
    {
        let (left, right): (Vec<A>, Vec<B>) = self.traverse().unzip();
        (left.into_iter().collect(), right.into_iter().collect())
    }

    /// Returns the smallest element, the first one among equals.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    fn min(&self) -> QueryResult<Self::Item>
    where
        Self::Item: Ord,
    {
        first_extreme(self.traverse(), &Natural, Ordering::Less, "min")
    }

    /// Returns the largest element, the first one among equals.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    fn max(&self) -> QueryResult<Self::Item>
    where
        Self::Item: Ord,
    {
        first_extreme(self.traverse(), &Natural, Ordering::Greater, "max")
    }

    /// Returns the smallest element under `comparer`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    fn min_by<F>(&self, comparer: F) -> QueryResult<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        first_extreme(self.traverse(), &comparer, Ordering::Less, "min_by")
    }

    /// Returns the largest element under `comparer`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let words = Array::from(vec!["kiwi", "banana", "cherry"]);
    /// let longest = words.max_by(|left, right| left.len().cmp(&right.len()));
    /// assert_eq!(longest, Ok("banana"));
    /// ```
    fn max_by<F>(&self, comparer: F) -> QueryResult<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        first_extreme(self.traverse(), &comparer, Ordering::Greater, "max_by")
    }

    /// Returns `true` if both sequences hold equal elements in the same order.
    fn sequence_equal(&self, other: &Self::Shape<Self::Item>) -> bool
    where
        Self::Item: PartialEq,
    {
        self.traverse().eq(other.traverse())
    }

    /// Returns `true` if both sequences hold equivalent elements in the same
    /// order under `comparer`.
    fn sequence_equal_by<F>(&self, other: &Self::Shape<Self::Item>, comparer: F) -> bool
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        let mut left = self.traverse();
        let mut right = other.traverse();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(first), Some(second)) if comparer.equivalent(&first, &second) => {}
                _ => return false,
            }
        }
    }
}

impl<S: Sequence> Aggregate for S {}

/// Keeps the first element that no later element beats in direction `wanted`.
fn first_extreme<I, C>(
    cursor: I,
    comparer: &C,
    wanted: Ordering,
    operation: &'static str,
) -> QueryResult<I::Item>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
    cursor
        .reduce(|best, element| {
            if comparer.compare(&element, &best) == wanted {
                element
            } else {
                best
            }
        })
        .ok_or_else(|| QueryError::no_such_element(operation))
}
