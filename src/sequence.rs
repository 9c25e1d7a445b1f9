//! The sequence abstraction shared by both container shapes.
//!
//! [`Sequence`] unifies an eager, randomly accessible [`Array`] and a
//! deferred, forward-only [`Iterable`]. Operators never branch on the shape:
//! they describe a *stage*, a function from an input cursor to an output
//! cursor, and hand it to [`Sequence::pipe`]. The shape decides when the
//! stage runs:
//!
//! - `Array` runs the stage immediately and materializes an exactly sized
//!   array.
//! - `Iterable` captures the stage and runs it from scratch on every
//!   traversal of the result.
//!
//! Because both shapes drive the very same stage, an operator yields the
//! same elements in the same order whichever shape it is called on.
//!
//! # Examples
//!
//! ```rust
//! use lambars_query::prelude::*;
//!
//! fn evens<S: Sequence<Item = i32>>(values: &S) -> S::Shape<i32> {
//!     values.pipe(|cursor| cursor.filter(|value| value % 2 == 0))
//! }
//!
//! let array = Array::from(vec![1, 2, 3, 4]);
//! let iterable = Iterable::from_vec(vec![1, 2, 3, 4]);
//! assert_eq!(evens(&array).to_vec(), evens(&iterable).to_vec());
//! ```
//!
//! [`Array`]: crate::array::Array
//! [`Iterable`]: crate::iterable::Iterable

/// A sequence that can be traversed any number of times.
///
/// # Traversal
///
/// [`traverse`](Sequence::traverse) returns a fresh, independent cursor.
/// For arrays the cursor walks a snapshot of the stored elements. For
/// iterables it re-runs the producer, including any side effects of the
/// upstream chain. Two cursors never share state.
///
/// # Shapes
///
/// [`Shape<U>`](Sequence::Shape) is the container of the same shape holding
/// `U`: operators on an array return arrays, operators on an iterable return
/// iterables.
pub trait Sequence: Sized {
    /// The element type.
    type Item: Clone + 'static;

    /// The cursor produced by one traversal.
    type Cursor: Iterator<Item = Self::Item> + 'static;

    /// The same container shape with a different element type.
    type Shape<U: Clone + 'static>: Sequence<Item = U>;

    /// Starts a new, independent traversal.
    fn traverse(&self) -> Self::Cursor;

    /// Returns the length if it is known without traversing.
    ///
    /// Arrays always know their length; iterables never do.
    fn known_length(&self) -> Option<usize>;

    /// Applies a cursor stage in the evaluation strategy of this shape.
    ///
    /// The stage receives a fresh cursor over `self` and returns the cursor of
    /// the result. Arrays run it once, now. Iterables run it once per
    /// traversal of the returned sequence.
    fn pipe<U, F, J>(&self, stage: F) -> Self::Shape<U>
    where
        U: Clone + 'static,
        F: Fn(Self::Cursor) -> J + 'static,
        J: Iterator<Item = U> + 'static;

    /// Applies a two-input cursor stage in the evaluation strategy of this shape.
    fn pipe_with<V, U, F, J>(&self, other: &Self::Shape<V>, stage: F) -> Self::Shape<U>
    where
        V: Clone + 'static,
        U: Clone + 'static,
        F: Fn(Self::Cursor, <Self::Shape<V> as Sequence>::Cursor) -> J + 'static,
        J: Iterator<Item = U> + 'static;

    /// Returns the element at `index`, if present.
    ///
    /// The default walks a cursor; arrays answer in O(1).
    fn nth_element(&self, index: usize) -> Option<Self::Item> {
        self.traverse().nth(index)
    }

    /// Returns the position of the last element satisfying `predicate`.
    ///
    /// The default scans forward and remembers the last match; arrays scan
    /// backward from the end.
    fn position_last<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.traverse()
            .enumerate()
            .filter(|(_, element)| predicate(element))
            .last()
            .map(|(index, _)| index)
    }

    /// Drains one traversal into a `Vec`.
    fn to_vec(&self) -> Vec<Self::Item> {
        self.traverse().collect()
    }
}
