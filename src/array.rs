//! Eager, fixed-length sequences.
//!
//! [`Array`] is the eager shape of [`Sequence`]: every operator consumes the
//! whole input immediately and returns a freshly allocated array sized to the
//! exact result count.
//!
//! Storage is reference counted, so cloning an array or turning it into an
//! [`Iterable`] is O(1). The in-place operations [`Array::reverse`] and
//! [`Array::swap`] mutate the caller's storage and copy it first only when it
//! is shared with another array, iterable or live cursor.
//!
//! # Examples
//!
//! ```rust
//! use lambars_query::prelude::*;
//!
//! let mut array = Array::from(vec![1, 2, 3]);
//! array.reverse();
//! assert_eq!(array.as_slice(), &[3, 2, 1]);
//!
//! let window = array.range(1, 3).unwrap();
//! assert_eq!(window.as_slice(), &[2, 1]);
//! ```

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use crate::error::{QueryError, QueryResult};
use crate::iterable::Iterable;
use crate::sequence::Sequence;

/// A fixed-length, randomly accessible sequence evaluated eagerly.
///
/// # Time Complexity
///
/// | Operation     | Complexity                    |
/// |---------------|-------------------------------|
/// | `len`         | O(1)                          |
/// | `get`         | O(1)                          |
/// | `clone`       | O(1)                          |
/// | `to_iterable` | O(1)                          |
/// | `reverse`     | O(N), plus a copy when shared |
/// | `swap`        | O(1), plus a copy when shared |
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Array<T> {
    elements: Arc<Vec<T>>,
}

impl<T> Array<T> {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Arc::new(Vec::new()),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the array has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns a reference to the element at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Views the elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns an iterator over references to the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T: Clone> Array<T> {
    /// Creates an array holding `count` copies of `value`.
    ///
    /// A `count` of zero yields an empty array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::array::Array;
    ///
    /// assert_eq!(Array::repeat('x', 3).as_slice(), &['x', 'x', 'x']);
    /// assert!(Array::repeat('x', 0).is_empty());
    /// ```
    #[must_use]
    pub fn repeat(value: T, count: usize) -> Self {
        Self::from(vec![value; count])
    }

    /// Reverses the elements in place and returns the same array.
    ///
    /// Use [`Query::reversed`](crate::query::Query::reversed) for a reversed
    /// copy that leaves `self` untouched.
    pub fn reverse(&mut self) -> &mut Self {
        Arc::make_mut(&mut self.elements).reverse();
        self
    }

    /// Swaps the elements at `first` and `second` in place.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::IndexOutOfRange`] if either position is past the
    /// end of the array; the array is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::array::Array;
    ///
    /// let mut array = Array::from(vec!['a', 'b', 'c']);
    /// array.swap(0, 2).unwrap();
    /// assert_eq!(array.as_slice(), &['c', 'b', 'a']);
    /// assert!(array.swap(0, 3).is_err());
    /// ```
    pub fn swap(&mut self, first: usize, second: usize) -> QueryResult<&mut Self> {
        let length = self.len();
        let largest = first.max(second);
        if largest >= length {
            return Err(QueryError::index_out_of_range("swap", largest, length));
        }
        Arc::make_mut(&mut self.elements).swap(first, second);
        Ok(self)
    }

    /// Returns the half-open window `[start, finish)` as a new array.
    ///
    /// # Errors
    ///
    /// - [`QueryError::InvalidArgument`] if `finish < start`
    /// - [`QueryError::IndexOutOfRange`] if `finish` exceeds the length
    pub fn range(&self, start: usize, finish: usize) -> QueryResult<Self> {
        if finish < start {
            return Err(QueryError::invalid_argument(
                "range",
                format!("finish {finish} precedes start {start}"),
            ));
        }
        if finish > self.len() {
            return Err(QueryError::index_out_of_range("range", finish, self.len()));
        }
        Ok(Self::from(self.elements[start..finish].to_vec()))
    }

    /// Returns a deferred view over a snapshot of this array.
    ///
    /// The iterable shares the storage; later in-place mutation of this array
    /// copies first, so the iterable keeps seeing the original elements.
    #[must_use]
    pub fn to_iterable(&self) -> Iterable<T>
    where
        T: 'static,
    {
        Iterable::from_shared(Arc::clone(&self.elements))
    }

    /// Consumes the array and returns its elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        Arc::try_unwrap(self.elements).unwrap_or_else(|shared| (*shared).clone())
    }

    pub(crate) fn from_cursor<I: Iterator<Item = T>>(cursor: I) -> Self {
        let mut elements: Vec<T> = cursor.collect();
        elements.shrink_to_fit();
        trace_query!(length = elements.len(), "materialized eager stage");
        Self::from(elements)
    }
}

// =============================================================================
// Sequence Implementation
// =============================================================================

impl<T: Clone + 'static> Sequence for Array<T> {
    type Item = T;
    type Cursor = ArrayCursor<T>;
    type Shape<U: Clone + 'static> = Array<U>;

    #[inline]
    fn traverse(&self) -> Self::Cursor {
        ArrayCursor::new(Arc::clone(&self.elements))
    }

    #[inline]
    fn known_length(&self) -> Option<usize> {
        Some(self.len())
    }

    fn pipe<U, F, J>(&self, stage: F) -> Self::Shape<U>
    where
        U: Clone + 'static,
        F: Fn(Self::Cursor) -> J + 'static,
        J: Iterator<Item = U> + 'static,
    {
        Array::from_cursor(stage(self.traverse()))
    }

    fn pipe_with<V, U, F, J>(&self, other: &Self::Shape<V>, stage: F) -> Self::Shape<U>
    where
        V: Clone + 'static,
        U: Clone + 'static,
        F: Fn(Self::Cursor, <Self::Shape<V> as Sequence>::Cursor) -> J + 'static,
        J: Iterator<Item = U> + 'static,
    {
        Array::from_cursor(stage(self.traverse(), other.traverse()))
    }

    #[inline]
    fn nth_element(&self, index: usize) -> Option<T> {
        self.elements.get(index).cloned()
    }

    fn position_last<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.elements.iter().rposition(predicate)
    }

    fn to_vec(&self) -> Vec<T> {
        (*self.elements).clone()
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A cursor over a shared snapshot of array storage.
///
/// Yields clones of the elements front to back; also double-ended and exact
/// sized.
#[derive(Clone)]
pub struct ArrayCursor<T> {
    elements: Arc<Vec<T>>,
    front: usize,
    back: usize,
}

impl<T> ArrayCursor<T> {
    pub(crate) fn new(elements: Arc<Vec<T>>) -> Self {
        let back = elements.len();
        Self {
            elements,
            front: 0,
            back,
        }
    }
}

impl<T: Clone> Iterator for ArrayCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let element = self.elements[self.front].clone();
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, count: usize) -> Option<T> {
        self.front = self.front.saturating_add(count).min(self.back);
        self.next()
    }
}

impl<T: Clone> DoubleEndedIterator for ArrayCursor<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.elements[self.back].clone())
    }
}

impl<T: Clone> ExactSizeIterator for ArrayCursor<T> {}

impl<T: Clone> std::iter::FusedIterator for ArrayCursor<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Array<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Array<T> {
    #[inline]
    fn from(elements: Vec<T>) -> Self {
        Self {
            elements: Arc::new(elements),
        }
    }
}

impl<T: Clone> From<&[T]> for Array<T> {
    #[inline]
    fn from(elements: &[T]) -> Self {
        Self::from(elements.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    #[inline]
    fn from(elements: [T; N]) -> Self {
        Self::from(Vec::from(elements))
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut elements: Vec<T> = iter.into_iter().collect();
        elements.shrink_to_fit();
        Self::from(elements)
    }
}

impl<T: Clone> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T> AsRef<[T]> for Array<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.elements
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.elements.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Array<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.elements.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Array<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Vec<T> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}

// =============================================================================
// Tests
// =============================================================================
