//! Equi-join of two sequences.
//!
//! The receiver is the *outer* side. It is reduced to one element per key,
//! the first one encountered, and indexed in an [`OrderedMap`]. The *inner*
//! side then streams: every inner element whose key is present yields one
//! result, and the rest are dropped. Results follow inner traversal order.
//!
//! On a deferred [`Iterable`](crate::iterable::Iterable) the outer index is
//! rebuilt at the start of every traversal.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::compare::{Comparer, Natural};
use crate::sequence::Sequence;
use crate::tree::OrderedMap;

/// Key-equality join on every [`Sequence`].
pub trait Join: Sequence {
    /// Joins `self` with `inner` on equal keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let owners = Array::from(vec![(1, "ann"), (2, "bo"), (1, "cy")]);
    /// let pets = Array::from(vec![(1, "rex"), (3, "tom"), (2, "kit"), (1, "max")]);
    ///
    /// let pairs = owners.join(
    ///     &pets,
    ///     |owner| owner.0,
    ///     |pet| pet.0,
    ///     |owner, pet| (owner.1, pet.1),
    /// );
    /// assert_eq!(
    ///     pairs.as_slice(),
    ///     &[("ann", "rex"), ("bo", "kit"), ("ann", "max")]
    /// );
    /// ```
    fn join<I, K, R, FO, FI, FR>(
        &self,
        inner: &Self::Shape<I>,
        outer_key: FO,
        inner_key: FI,
        result: FR,
    ) -> Self::Shape<R>
    where
        I: Clone + 'static,
        K: Ord + 'static,
        R: Clone + 'static,
        FO: Fn(&Self::Item) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        FR: Fn(&Self::Item, &I) -> R + 'static,
    {
        join_stage(self, inner, outer_key, inner_key, result, Natural)
    }

    /// Joins `self` with `inner` on keys `key_comparer` deems equal.
    fn join_with<I, K, R, FO, FI, FR, C>(
        &self,
        inner: &Self::Shape<I>,
        outer_key: FO,
        inner_key: FI,
        result: FR,
        key_comparer: C,
    ) -> Self::Shape<R>
    where
        I: Clone + 'static,
        K: 'static,
        R: Clone + 'static,
        FO: Fn(&Self::Item) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        FR: Fn(&Self::Item, &I) -> R + 'static,
        C: Fn(&K, &K) -> Ordering + Clone + 'static,
    {
        join_stage(self, inner, outer_key, inner_key, result, key_comparer)
    }
}

impl<S: Sequence> Join for S {}

fn join_stage<S, I, K, R, FO, FI, FR, C>(
    outer: &S,
    inner: &S::Shape<I>,
    outer_key: FO,
    inner_key: FI,
    result: FR,
    key_comparer: C,
) -> S::Shape<R>
where
    S: Sequence,
    I: Clone + 'static,
    K: 'static,
    R: Clone + 'static,
    FO: Fn(&S::Item) -> K + 'static,
    FI: Fn(&I) -> K + 'static,
    FR: Fn(&S::Item, &I) -> R + 'static,
    C: Comparer<K> + Clone + 'static,
{
    let inner_key = Rc::new(inner_key);
    let result = Rc::new(result);
    outer.pipe_with(inner, move |outer_cursor, inner_cursor| {
        let mut index = OrderedMap::with_comparer(key_comparer.clone());
        for element in outer_cursor {
            index.insert(outer_key(&element), element);
        }
        let inner_key = Rc::clone(&inner_key);
        let result = Rc::clone(&result);
        inner_cursor.filter_map(move |row| {
            index
                .get(&inner_key(&row))
                .map(|element| result(element, &row))
        })
    })
}
