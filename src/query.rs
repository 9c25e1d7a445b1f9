//! Projection, filtering and structural operators.
//!
//! [`Query`] is implemented for every [`Sequence`]. Each operator returns a
//! sequence of the receiver's shape: eager on an [`Array`], deferred on an
//! [`Iterable`].
//!
//! Predicates and selectors must be pure. A deferred result calls them again
//! on every traversal.
//!
//! # Examples
//!
//! ```rust
//! use lambars_query::prelude::*;
//!
//! let words = Array::from(vec!["alpha", "beta", "gamma", "delta"]);
//! let lengths = words
//!     .skip_while(|word| word.starts_with('a'))
//!     .map(|word| word.len())
//!     .take(2);
//! assert_eq!(lengths.as_slice(), &[4, 5]);
//! ```
//!
//! [`Array`]: crate::array::Array
//! [`Iterable`]: crate::iterable::Iterable

use std::rc::Rc;

use crate::array::Array;
use crate::cursor::{Chunks, Split};
use crate::error::{QueryError, QueryResult};
use crate::sequence::Sequence;

/// Element-wise and structural operators available on every [`Sequence`].
pub trait Query: Sequence {
    /// Keeps the elements satisfying `predicate`.
    fn filter<P>(&self, predicate: P) -> Self::Shape<Self::Item>
    where
        P: Fn(&Self::Item) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.pipe(move |cursor| {
            let predicate = Rc::clone(&predicate);
            cursor.filter(move |element| predicate(element))
        })
    }

    /// Projects every element through `selector`.
    fn map<U, F>(&self, selector: F) -> Self::Shape<U>
    where
        U: Clone + 'static,
        F: Fn(Self::Item) -> U + 'static,
    {
        let selector = Rc::new(selector);
        self.pipe(move |cursor| {
            let selector = Rc::clone(&selector);
            cursor.map(move |element| selector(element))
        })
    }

    /// Projects every element to a collection and flattens the results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let expanded = Iterable::from_vec(vec![1_usize, 2, 3]).flat_map(|value| vec![value; value]);
    /// assert_eq!(expanded.to_vec(), vec![1, 2, 2, 3, 3, 3]);
    /// ```
    fn flat_map<U, I, F>(&self, selector: F) -> Self::Shape<U>
    where
        U: Clone + 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
        F: Fn(Self::Item) -> I + 'static,
    {
        let selector = Rc::new(selector);
        self.pipe(move |cursor| {
            let selector = Rc::clone(&selector);
            cursor.flat_map(move |element| selector(element))
        })
    }

    /// Bypasses the first `count` elements.
    fn skip(&self, count: usize) -> Self::Shape<Self::Item> {
        self.pipe(move |cursor| cursor.skip(count))
    }

    /// Yields at most the first `count` elements.
    ///
    /// Stops pulling from upstream once `count` elements were produced, so
    /// `take` bounds infinite iterables.
    fn take(&self, count: usize) -> Self::Shape<Self::Item> {
        self.pipe(move |cursor| cursor.take(count))
    }

    /// Bypasses elements while `predicate` holds, then yields the rest.
    ///
    /// Once `predicate` fails, it is not consulted again during that
    /// traversal.
    fn skip_while<P>(&self, predicate: P) -> Self::Shape<Self::Item>
    where
        P: Fn(&Self::Item) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.pipe(move |cursor| {
            let predicate = Rc::clone(&predicate);
            cursor.skip_while(move |element| predicate(element))
        })
    }

    /// Yields elements while `predicate` holds, then stops for good.
    fn take_while<P>(&self, predicate: P) -> Self::Shape<Self::Item>
    where
        P: Fn(&Self::Item) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.pipe(move |cursor| {
            let predicate = Rc::clone(&predicate);
            cursor.take_while(move |element| predicate(element))
        })
    }

    /// Yields the elements of `self` followed by the elements of `other`.
    fn concat(&self, other: &Self::Shape<Self::Item>) -> Self::Shape<Self::Item> {
        self.pipe_with(other, |first, second| first.chain(second))
    }

    /// Yields the elements of `self` followed by `element`.
    fn append(&self, element: Self::Item) -> Self::Shape<Self::Item> {
        self.pipe(move |cursor| cursor.chain(std::iter::once(element.clone())))
    }

    /// Yields `element` followed by the elements of `self`.
    fn prepend(&self, element: Self::Item) -> Self::Shape<Self::Item> {
        self.pipe(move |cursor| std::iter::once(element.clone()).chain(cursor))
    }

    /// Combines elements pairwise with `combine`, stopping at the shorter input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let sums = Array::from(vec![1, 2, 3]).zip(&Array::from(vec![10, 20]), |left, right| left + right);
    /// assert_eq!(sums.as_slice(), &[11, 22]);
    /// ```
    fn zip<V, U, F>(&self, other: &Self::Shape<V>, combine: F) -> Self::Shape<U>
    where
        V: Clone + 'static,
        U: Clone + 'static,
        F: Fn(Self::Item, V) -> U + 'static,
    {
        let combine = Rc::new(combine);
        self.pipe_with(other, move |first, second| {
            let combine = Rc::clone(&combine);
            first.zip(second).map(move |(left, right)| combine(left, right))
        })
    }

    /// Pairs elements positionally, stopping at the shorter input.
    fn zip_pairs<V>(&self, other: &Self::Shape<V>) -> Self::Shape<(Self::Item, V)>
    where
        V: Clone + 'static,
    {
        self.pipe_with(other, |first, second| first.zip(second))
    }

    /// Returns the elements in reverse order.
    ///
    /// The receiver is never modified; see
    /// [`Array::reverse`](crate::array::Array::reverse) for the in-place form.
    fn reversed(&self) -> Self::Shape<Self::Item> {
        self.pipe(|cursor| {
            let mut elements: Vec<Self::Item> = cursor.collect();
            elements.reverse();
            elements.into_iter()
        })
    }

    /// Splits the sequence at every element equal to `delimiter`.
    ///
    /// Empty segments (between consecutive delimiters, or at either end) are
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let words = Array::from("a  bc d ".chars().collect::<Vec<_>>()).split(' ');
    /// assert_eq!(words.as_slice(), &[vec!['a'], vec!['b', 'c'], vec!['d']]);
    /// ```
    fn split(&self, delimiter: Self::Item) -> Self::Shape<Vec<Self::Item>>
    where
        Self::Item: PartialEq,
    {
        self.pipe(move |cursor| {
            let delimiter = delimiter.clone();
            Split::new(cursor, move |element: &Self::Item| *element == delimiter)
        })
    }

    /// Splits the sequence at every element `comparer` deems equal to `delimiter`.
    fn split_by<F>(&self, delimiter: Self::Item, comparer: F) -> Self::Shape<Vec<Self::Item>>
    where
        F: Fn(&Self::Item, &Self::Item) -> std::cmp::Ordering + 'static,
    {
        let comparer = Rc::new(comparer);
        self.pipe(move |cursor| {
            let delimiter = delimiter.clone();
            let comparer = Rc::clone(&comparer);
            Split::new(cursor, move |element: &Self::Item| {
                comparer(element, &delimiter).is_eq()
            })
        })
    }

    /// Groups consecutive elements into chunks of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidArgument`] if `size` is zero.
    fn chunk(&self, size: usize) -> QueryResult<Self::Shape<Vec<Self::Item>>> {
        if size == 0 {
            return Err(QueryError::invalid_argument(
                "chunk",
                "size must be positive",
            ));
        }
        Ok(self.pipe(move |cursor| Chunks::new(cursor, size)))
    }

    /// Yields `default` if the sequence is empty, otherwise the sequence itself.
    fn default_if_empty(&self, default: Self::Item) -> Self::Shape<Self::Item> {
        self.pipe(move |cursor| {
            let mut cursor = cursor.peekable();
            let fallback = cursor.peek().is_none().then(|| default.clone());
            fallback.into_iter().chain(cursor)
        })
    }

    /// Drains one traversal into an [`Array`].
    fn to_array(&self) -> Array<Self::Item> {
        Array::from_cursor(self.traverse())
    }
}

impl<S: Sequence> Query for S {}
