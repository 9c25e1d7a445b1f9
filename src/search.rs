//! Element lookup and predicate queries.
//!
//! Every operation in this module is terminal: it drains (part of) one
//! traversal and returns a plain value, even on a deferred
//! [`Iterable`](crate::iterable::Iterable).
//!
//! Membership tests come in two flavors: the plain form uses [`PartialEq`],
//! the `_by` form takes an ordering function and treats elements as equal
//! when it returns [`Ordering::Equal`].
//!
//! Sequences of [`Option`] elements get the extra [`NullableSearch`]
//! operators, which treat `None` as an absent value that can still be
//! searched for.

use std::cmp::Ordering;

use crate::compare::Comparer;
use crate::error::{QueryError, QueryResult};
use crate::sequence::Sequence;

// =============================================================================
// Search
// =============================================================================

/// Lookup, counting and quantifier operators available on every [`Sequence`].
///
/// # Examples
///
/// ```rust
/// use lambars_query::prelude::*;
///
/// let values = Iterable::from_vec(vec![4, 8, 15, 16, 23, 42]);
/// assert_eq!(values.index_of(&16), Some(3));
/// assert_eq!(values.first_where(|value| value % 2 == 1), Ok(15));
/// assert!(values.all(|value| *value > 0));
/// assert_eq!(values.count(), 6);
/// ```
pub trait Search: Sequence {
    /// Returns `true` if any element equals `value`.
    fn contains(&self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.traverse().any(|element| element == *value)
    }

    /// Returns `true` if any element is equivalent to `value` under `comparer`.
    fn contains_by<F>(&self, value: &Self::Item, comparer: F) -> bool
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        self.traverse()
            .any(|element| comparer.equivalent(&element, value))
    }

    /// Counts the elements equal to `value`.
    fn count_of(&self, value: &Self::Item) -> usize
    where
        Self::Item: PartialEq,
    {
        self.traverse().filter(|element| element == value).count()
    }

    /// Counts the elements equivalent to `value` under `comparer`.
    fn count_of_by<F>(&self, value: &Self::Item, comparer: F) -> usize
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        self.traverse()
            .filter(|element| comparer.equivalent(element, value))
            .count()
    }

    /// Returns the position of the first element equal to `value`.
    fn index_of(&self, value: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.traverse().position(|element| element == *value)
    }

    /// Returns the position of the first element equivalent to `value`.
    fn index_of_by<F>(&self, value: &Self::Item, comparer: F) -> Option<usize>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        self.traverse()
            .position(|element| comparer.equivalent(&element, value))
    }

    /// Returns the position of the last element equal to `value`.
    fn last_index_of(&self, value: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.position_last(|element| element == value)
    }

    /// Returns the position of the last element equivalent to `value`.
    fn last_index_of_by<F>(&self, value: &Self::Item, comparer: F) -> Option<usize>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        self.position_last(|element| comparer.equivalent(element, value))
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    fn first(&self) -> QueryResult<Self::Item> {
        self.traverse()
            .next()
            .ok_or_else(|| QueryError::no_such_element("first"))
    }

    /// Returns the first element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if no element matches.
    fn first_where<P>(&self, predicate: P) -> QueryResult<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.traverse()
            .find(|element| predicate(element))
            .ok_or_else(|| QueryError::no_such_element("first_where"))
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    fn last(&self) -> QueryResult<Self::Item> {
        let last = match self.known_length() {
            Some(0) => None,
            Some(length) => self.nth_element(length - 1),
            None => self.traverse().last(),
        };
        last.ok_or_else(|| QueryError::no_such_element("last"))
    }

    /// Returns the last element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if no element matches.
    fn last_where<P>(&self, predicate: P) -> QueryResult<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.traverse()
            .filter(|element| predicate(element))
            .last()
            .ok_or_else(|| QueryError::no_such_element("last_where"))
    }

    /// Returns the only element.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty and
    /// [`QueryError::AmbiguousResult`] if it holds more than one element.
    fn single(&self) -> QueryResult<Self::Item> {
        exactly_one(self.traverse(), "single")
    }

    /// Returns the only element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if no element matches and
    /// [`QueryError::AmbiguousResult`] if more than one does.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let values = Array::from(vec![1, 2, 3, 4]);
    /// assert_eq!(values.single_where(|value| *value > 3), Ok(4));
    /// assert_eq!(
    ///     values.single_where(|value| *value > 2),
    ///     Err(QueryError::AmbiguousResult { operation: "single_where" })
    /// );
    /// ```
    fn single_where<P>(&self, predicate: P) -> QueryResult<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        exactly_one(
            self.traverse().filter(|element| predicate(element)),
            "single_where",
        )
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::IndexOutOfRange`] if the sequence is shorter
    /// than `index + 1`.
    fn element_at(&self, index: usize) -> QueryResult<Self::Item> {
        if let Some(length) = self.known_length() {
            return self
                .nth_element(index)
                .ok_or_else(|| QueryError::index_out_of_range("element_at", index, length));
        }
        let mut seen = 0;
        for element in self.traverse() {
            if seen == index {
                return Ok(element);
            }
            seen += 1;
        }
        Err(QueryError::index_out_of_range("element_at", index, seen))
    }

    /// Counts the elements.
    ///
    /// Arrays answer without traversing; iterables are drained once.
    fn count(&self) -> usize {
        self.known_length()
            .unwrap_or_else(|| self.traverse().count())
    }

    /// Counts the elements satisfying `predicate`.
    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.traverse().filter(|element| predicate(element)).count()
    }

    /// Returns `true` if the sequence has no elements.
    ///
    /// Pulls at most one element.
    fn is_empty(&self) -> bool {
        self.known_length()
            .map_or_else(|| self.traverse().next().is_none(), |length| length == 0)
    }

    /// Returns `true` if any element satisfies `predicate`.
    ///
    /// Stops at the first match.
    fn any<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.traverse().any(|element| predicate(&element))
    }

    /// Returns `true` if every element satisfies `predicate`.
    ///
    /// Stops at the first failure. Vacuously `true` on an empty sequence.
    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.traverse().all(|element| predicate(&element))
    }
}

impl<S: Sequence> Search for S {}

fn exactly_one<I: Iterator>(mut cursor: I, operation: &'static str) -> QueryResult<I::Item> {
    let only = cursor
        .next()
        .ok_or_else(|| QueryError::no_such_element(operation))?;
    if cursor.next().is_some() {
        return Err(QueryError::ambiguous_result(operation));
    }
    Ok(only)
}

// =============================================================================
// NullableSearch
// =============================================================================

/// Operators for sequences whose elements may be absent.
///
/// A `None` element is a legitimate value here: it can be searched for and
/// counted. Searching for `None` only ever matches `None`, and a comparer is
/// only consulted when both sides are present.
///
/// # Examples
///
/// ```rust
/// use lambars_query::prelude::*;
///
/// let values = Array::from(vec![Some(1), None, Some(3), None]);
/// assert_eq!(values.index_of_nullable(None), Some(1));
/// assert_eq!(values.last_index_of_nullable(None), Some(3));
/// assert_eq!(values.count_nullable(Some(&3)), 1);
/// assert_eq!(values.non_null().to_vec(), vec![1, 3]);
/// ```
pub trait NullableSearch<T>: Sequence<Item = Option<T>>
where
    T: Clone + 'static,
{
    /// Returns `true` if any element matches `value`.
    fn contains_nullable(&self, value: Option<&T>) -> bool
    where
        T: PartialEq,
    {
        self.traverse()
            .any(|element| element.as_ref() == value)
    }

    /// Returns `true` if any element matches `value` under `comparer`.
    fn contains_nullable_by<F>(&self, value: Option<&T>, comparer: F) -> bool
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.traverse()
            .any(|element| nullable_equivalent(element.as_ref(), value, &comparer))
    }

    /// Returns the position of the first element matching `value`.
    fn index_of_nullable(&self, value: Option<&T>) -> Option<usize>
    where
        T: PartialEq,
    {
        self.traverse()
            .position(|element| element.as_ref() == value)
    }

    /// Returns the position of the first element matching `value` under `comparer`.
    fn index_of_nullable_by<F>(&self, value: Option<&T>, comparer: F) -> Option<usize>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.traverse()
            .position(|element| nullable_equivalent(element.as_ref(), value, &comparer))
    }

    /// Returns the position of the last element matching `value`.
    fn last_index_of_nullable(&self, value: Option<&T>) -> Option<usize>
    where
        T: PartialEq,
    {
        self.position_last(|element| element.as_ref() == value)
    }

    /// Returns the position of the last element matching `value` under `comparer`.
    fn last_index_of_nullable_by<F>(&self, value: Option<&T>, comparer: F) -> Option<usize>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.position_last(|element| nullable_equivalent(element.as_ref(), value, &comparer))
    }

    /// Counts the elements matching `value`.
    fn count_nullable(&self, value: Option<&T>) -> usize
    where
        T: PartialEq,
    {
        self.traverse()
            .filter(|element| element.as_ref() == value)
            .count()
    }

    /// Counts the elements matching `value` under `comparer`.
    fn count_nullable_by<F>(&self, value: Option<&T>, comparer: F) -> usize
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.traverse()
            .filter(|element| nullable_equivalent(element.as_ref(), value, &comparer))
            .count()
    }

    /// Drops absent elements.
    fn non_null(&self) -> Self::Shape<T> {
        self.pipe(|cursor| cursor.flatten())
    }

    /// Unwraps every element, failing on the first absent one.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NullArgument`] carrying the position of the
    /// first `None`.
    fn require_values(&self) -> QueryResult<Vec<T>> {
        self.traverse()
            .enumerate()
            .map(|(index, element)| {
                element.ok_or_else(|| QueryError::null_argument("require_values", Some(index)))
            })
            .collect()
    }
}

impl<T, S> NullableSearch<T> for S
where
    T: Clone + 'static,
    S: Sequence<Item = Option<T>>,
{
}

fn nullable_equivalent<T, C>(element: Option<&T>, value: Option<&T>, comparer: &C) -> bool
where
    C: Comparer<T>,
{
    match (element, value) {
        (Some(element), Some(value)) => comparer.equivalent(element, value),
        (None, None) => true,
        _ => false,
    }
}
