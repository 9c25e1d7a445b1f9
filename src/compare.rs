//! Comparator capability.
//!
//! Operations that order, deduplicate or match elements accept either the
//! natural ordering of the element type or an injected comparator. Both are
//! expressed through the [`Comparer`] trait:
//!
//! - [`Natural`] delegates to [`Ord`]
//! - every closure `Fn(&T, &T) -> Ordering` is a `Comparer<T>` as well
//!
//! # Examples
//!
//! ```rust
//! use lambars_query::compare::{Comparer, Natural};
//! use std::cmp::Ordering;
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//!
//! let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
//! assert!(by_length.equivalent(&"abc", &"xyz"));
//! ```

use std::cmp::Ordering;

/// A total order over `T`.
///
/// Implementations must be consistent: `compare(a, b)` and `compare(b, a)`
/// are opposite, and `Equal` is an equivalence relation. The library treats
/// two elements as the same element exactly when the comparer reports
/// `Ordering::Equal`.
pub trait Comparer<T: ?Sized> {
    /// Compares two values.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Returns `true` if the two values are equivalent under this order.
    #[inline]
    fn equivalent(&self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Equal
    }
}

/// The natural ordering of a type, as defined by its [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparer<T> for Natural {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// Inverts the order of another comparer.
///
/// # Examples
///
/// ```rust
/// use lambars_query::compare::{Comparer, Natural, Reversed};
/// use std::cmp::Ordering;
///
/// assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparer<T>> Comparer<T> for Reversed<C> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(right, left)
    }
}
