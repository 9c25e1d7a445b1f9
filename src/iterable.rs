//! Deferred, re-runnable sequences.
//!
//! [`Iterable`] is the deferred shape of [`Sequence`]. It holds a *producer*:
//! a function that builds a fresh cursor each time the iterable is traversed.
//! Operators wrap the upstream producer in a new producer and return
//! immediately without reading a single element.
//!
//! # Re-execution
//!
//! An iterable is not memoized. Each traversal re-runs the producer chain
//! from the source, including every side effect of the source and of
//! caller-supplied closures. Use [`Iterable::to_array`] to evaluate once and
//! keep the result.
//!
//! ```rust
//! use lambars_query::prelude::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let pulls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&pulls);
//! let source = Iterable::new(move || {
//!     let counter = Rc::clone(&counter);
//!     (1..=3).inspect(move |_| counter.set(counter.get() + 1))
//! });
//!
//! let doubled = source.map(|value| value * 2);
//! assert_eq!(pulls.get(), 0);
//!
//! assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
//! assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
//! assert_eq!(pulls.get(), 6);
//! ```
//!
//! # Thread Safety
//!
//! Producers are shared through `Rc`, so an `Iterable` is neither `Send` nor
//! `Sync`. Traversing one iterable from several threads at once cannot be
//! expressed.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::array::{Array, ArrayCursor};
use crate::cursor::{Swap, Window};
use crate::error::{QueryError, QueryResult};
use crate::sequence::Sequence;

/// The cursor type produced by traversing an [`Iterable`].
pub type BoxedCursor<T> = Box<dyn Iterator<Item = T>>;

/// A deferred sequence whose elements are produced on each traversal.
pub struct Iterable<T> {
    producer: Rc<dyn Fn() -> BoxedCursor<T>>,
}

impl<T: 'static> Iterable<T> {
    /// Creates an iterable from a producer.
    ///
    /// `producer` is called once at the start of every traversal and must
    /// return a fresh iterator each time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let squares = Iterable::new(|| (1..=4).map(|value| value * value));
    /// assert_eq!(squares.to_vec(), vec![1, 4, 9, 16]);
    /// assert_eq!(squares.to_vec(), vec![1, 4, 9, 16]);
    /// ```
    pub fn new<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            producer: Rc::new(move || Box::new(producer().into_iter()) as BoxedCursor<T>),
        }
    }

    /// Creates an iterable with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty)
    }

    /// Creates an infinite iterable `seed, step(seed), step(step(seed)), ...`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let powers = Iterable::iterate(1_u64, |value| value * 2);
    /// assert_eq!(powers.take(5).to_vec(), vec![1, 2, 4, 8, 16]);
    /// ```
    pub fn iterate<F>(seed: T, step: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> T + 'static,
    {
        let step = Rc::new(step);
        Self::new(move || {
            let step = Rc::clone(&step);
            std::iter::successors(Some(seed.clone()), move |previous| Some(step(previous)))
        })
    }
}

impl<T: Clone + 'static> Iterable<T> {
    /// Creates an iterable over the elements of `elements`.
    ///
    /// The vector is moved into shared storage; traversals clone elements out
    /// of it one at a time.
    #[must_use]
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self::from_shared(Arc::new(elements))
    }

    pub(crate) fn from_shared(elements: Arc<Vec<T>>) -> Self {
        Self::new(move || ArrayCursor::new(Arc::clone(&elements)))
    }

    /// Creates an iterable yielding `value` exactly `count` times.
    ///
    /// A `count` of zero yields an empty sequence.
    #[must_use]
    pub fn repeat(value: T, count: usize) -> Self {
        Self::new(move || std::iter::repeat_n(value.clone(), count))
    }

    /// Returns the half-open window `[start, finish)` of this sequence.
    ///
    /// The window is deferred like every other operator. Elements before
    /// `start` are pulled and discarded; pulling stops once `finish` elements
    /// have been seen.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidArgument`] immediately if `finish < start`.
    /// If the upstream runs out before `finish` elements were seen, the
    /// traversal yields one `Err(QueryError::IndexOutOfRange)` item at the
    /// point the shortfall is observed, then ends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let window = Iterable::from_vec(vec![1, 2, 3]).range(1, 5).unwrap();
    /// let drained: Vec<QueryResult<i32>> = window.to_vec();
    /// assert_eq!(drained[0], Ok(2));
    /// assert_eq!(drained[1], Ok(3));
    /// assert!(drained[2].is_err());
    /// ```
    pub fn range(&self, start: usize, finish: usize) -> QueryResult<Iterable<QueryResult<T>>> {
        if finish < start {
            return Err(QueryError::invalid_argument(
                "range",
                format!("finish {finish} precedes start {start}"),
            ));
        }
        Ok(self.pipe(move |cursor| Window::new(cursor, start, finish)))
    }

    /// Returns a copy of this sequence with the elements at `first` and
    /// `second` exchanged.
    ///
    /// Elements between the two positions are buffered; everything else
    /// streams through.
    ///
    /// # Errors
    ///
    /// If the upstream runs out before the larger position is reached, the
    /// traversal yields one `Err(QueryError::IndexOutOfRange)` item and ends.
    #[must_use]
    pub fn swapped(&self, first: usize, second: usize) -> Iterable<QueryResult<T>> {
        self.pipe(move |cursor| Swap::new(cursor, first, second))
    }

    /// Drains one traversal into an [`Array`].
    #[must_use]
    pub fn to_array(&self) -> Array<T> {
        Array::from_cursor(self.traverse())
    }
}

// =============================================================================
// Sequence Implementation
// =============================================================================

impl<T: Clone + 'static> Sequence for Iterable<T> {
    type Item = T;
    type Cursor = BoxedCursor<T>;
    type Shape<U: Clone + 'static> = Iterable<U>;

    fn traverse(&self) -> Self::Cursor {
        trace_query!("starting deferred traversal");
        (self.producer)()
    }

    #[inline]
    fn known_length(&self) -> Option<usize> {
        None
    }

    fn pipe<U, F, J>(&self, stage: F) -> Self::Shape<U>
    where
        U: Clone + 'static,
        F: Fn(Self::Cursor) -> J + 'static,
        J: Iterator<Item = U> + 'static,
    {
        let upstream = self.clone();
        Iterable::new(move || stage(upstream.traverse()))
    }

    fn pipe_with<V, U, F, J>(&self, other: &Self::Shape<V>, stage: F) -> Self::Shape<U>
    where
        V: Clone + 'static,
        U: Clone + 'static,
        F: Fn(Self::Cursor, <Self::Shape<V> as Sequence>::Cursor) -> J + 'static,
        J: Iterator<Item = U> + 'static,
    {
        let upstream = self.clone();
        let other = other.clone();
        Iterable::new(move || stage(upstream.traverse(), other.traverse()))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for Iterable<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            producer: Rc::clone(&self.producer),
        }
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Iterable<T> {
    #[inline]
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T: Clone + 'static> From<Array<T>> for Iterable<T> {
    #[inline]
    fn from(array: Array<T>) -> Self {
        array.to_iterable()
    }
}

impl<T: Clone + 'static> IntoIterator for &Iterable<T> {
    type Item = T;
    type IntoIter = BoxedCursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

impl<T> fmt::Debug for Iterable<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Iterable(<deferred>)")
    }
}

// =============================================================================
// Tests
// =============================================================================
