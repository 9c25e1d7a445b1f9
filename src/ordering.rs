//! Sorting and keyed partitioning.
//!
//! The keyed operators bucket elements into an [`OrderedMap`] from key to
//! the elements carrying that key, in encounter order, and then walk the map
//! in key order. Because a bucket is appended to and never reordered, every
//! sort here is stable.
//!
//! Keys are ordered by their natural order, or by an ordering function in the
//! `_with` forms. Keys `key_comparer` deems equal share a bucket.
//!
//! # Examples
//!
//! ```rust
//! use lambars_query::prelude::*;
//!
//! let people = Array::from(vec![("eve", 31), ("bob", 25), ("amy", 31), ("dan", 25)]);
//!
//! let by_age = people.order_by(|(_, age)| *age);
//! assert_eq!(
//!     by_age.as_slice(),
//!     &[("bob", 25), ("dan", 25), ("eve", 31), ("amy", 31)]
//! );
//!
//! // One representative per age, the first one encountered.
//! let representatives = people.group_by(|(_, age)| *age);
//! assert_eq!(representatives.as_slice(), &[("bob", 25), ("eve", 31)]);
//! ```

use std::cmp::Ordering;

use smallvec::{SmallVec, smallvec};

use crate::compare::{Comparer, Natural};
use crate::error::{QueryError, QueryResult};
use crate::sequence::Sequence;
use crate::tree::OrderedMap;

/// An encounter-ordered bucket. Most keys hold a single element.
type Bucket<T> = SmallVec<[T; 1]>;

/// Ordering and keyed-partition operators on every [`Sequence`].
pub trait Sorting: Sequence {
    /// Sorts by the key `key` extracts, stably.
    fn order_by<K, F>(&self, key: F) -> Self::Shape<Self::Item>
    where
        K: Ord + 'static,
        F: Fn(&Self::Item) -> K + 'static,
    {
        order_stage(self, key, Natural)
    }

    /// Sorts by the key `key` extracts under `key_comparer`, stably.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let words = Iterable::from_vec(vec!["pear", "Fig", "apple", "fig"]);
    /// let sorted = words.order_by_with(
    ///     |word| word.to_lowercase(),
    ///     |left: &String, right: &String| right.cmp(left),
    /// );
    /// assert_eq!(sorted.to_vec(), vec!["pear", "Fig", "fig", "apple"]);
    /// ```
    fn order_by_with<K, F, C>(&self, key: F, key_comparer: C) -> Self::Shape<Self::Item>
    where
        K: 'static,
        F: Fn(&Self::Item) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + Clone + 'static,
    {
        order_stage(self, key, key_comparer)
    }

    /// Sorts by `first_key`, then by `second_key` within equal first keys.
    ///
    /// Elements with equal key pairs keep their relative order.
    fn order_by_then_by<K1, K2, F1, F2>(
        &self,
        first_key: F1,
        second_key: F2,
    ) -> Self::Shape<Self::Item>
    where
        K1: Ord + 'static,
        K2: Ord + 'static,
        F1: Fn(&Self::Item) -> K1 + 'static,
        F2: Fn(&Self::Item) -> K2 + 'static,
    {
        order_then_stage(self, first_key, Natural, second_key, Natural)
    }

    /// [`order_by_then_by`](Sorting::order_by_then_by) with a comparer per key.
    fn order_by_then_by_with<K1, K2, F1, F2, C1, C2>(
        &self,
        first_key: F1,
        first_comparer: C1,
        second_key: F2,
        second_comparer: C2,
    ) -> Self::Shape<Self::Item>
    where
        K1: 'static,
        K2: 'static,
        F1: Fn(&Self::Item) -> K1 + 'static,
        F2: Fn(&Self::Item) -> K2 + 'static,
        C1: Fn(&K1, &K1) -> Ordering + Clone + 'static,
        C2: Fn(&K2, &K2) -> Ordering + Clone + 'static,
    {
        order_then_stage(self, first_key, first_comparer, second_key, second_comparer)
    }

    /// Sorts the elements by their natural order, stably.
    fn sorted(&self) -> Self::Shape<Self::Item>
    where
        Self::Item: Ord,
    {
        sort_stage(self, Natural)
    }

    /// Sorts the elements under `comparer`, stably.
    fn sorted_by<C>(&self, comparer: C) -> Self::Shape<Self::Item>
    where
        C: Fn(&Self::Item, &Self::Item) -> Ordering + Clone + 'static,
    {
        sort_stage(self, comparer)
    }

    /// Keeps the first element encountered for each key, in key order.
    ///
    /// This does not build groups: later elements with an already seen key
    /// are dropped. See [`lookup`](Sorting::lookup) for grouping.
    fn group_by<K, F>(&self, key: F) -> Self::Shape<Self::Item>
    where
        K: Ord + 'static,
        F: Fn(&Self::Item) -> K + 'static,
    {
        first_per_key_stage(self, key, Natural)
    }

    /// [`group_by`](Sorting::group_by) under `key_comparer`.
    fn group_by_with<K, F, C>(&self, key: F, key_comparer: C) -> Self::Shape<Self::Item>
    where
        K: 'static,
        F: Fn(&Self::Item) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + Clone + 'static,
    {
        first_per_key_stage(self, key, key_comparer)
    }

    /// Groups the elements by key, in key order.
    ///
    /// Each group lists its elements in encounter order. The key reported
    /// for a group is the first one produced for it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::prelude::*;
    ///
    /// let words = Array::from(vec!["kiwi", "fig", "plum", "yam", "pear"]);
    /// let by_length = words.lookup(|word| word.len());
    /// assert_eq!(
    ///     by_length.as_slice(),
    ///     &[(3, vec!["fig", "yam"]), (4, vec!["kiwi", "plum", "pear"])]
    /// );
    /// ```
    fn lookup<K, F>(&self, key: F) -> Self::Shape<(K, Vec<Self::Item>)>
    where
        K: Ord + Clone + 'static,
        F: Fn(&Self::Item) -> K + 'static,
    {
        lookup_stage(self, key, Natural)
    }

    /// [`lookup`](Sorting::lookup) under `key_comparer`.
    fn lookup_with<K, F, C>(&self, key: F, key_comparer: C) -> Self::Shape<(K, Vec<Self::Item>)>
    where
        K: Clone + 'static,
        F: Fn(&Self::Item) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + Clone + 'static,
    {
        lookup_stage(self, key, key_comparer)
    }

    /// Returns the most frequent element.
    ///
    /// Ties go to the smallest element.
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
    /// let votes = Iterable::from_vec(vec!['b', 'a', 'b', 'c', 'a']);
    /// assert_eq!(votes.max_occurring(), Ok('a'));
    /// assert_eq!(votes.min_occurring(), Ok('c'));
    /// ```
    fn max_occurring(&self) -> QueryResult<Self::Item>
    where
        Self::Item: Ord,
    {
        extreme_occurrence(self.traverse(), Natural, Ordering::Greater, "max_occurring")
    }

    /// [`max_occurring`](Sorting::max_occurring) under `comparer`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    fn max_occurring_by<C>(&self, comparer: C) -> QueryResult<Self::Item>
    where
        C: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        extreme_occurrence(self.traverse(), comparer, Ordering::Greater, "max_occurring")
    }

    /// Returns the least frequent element.
    ///
    /// Ties go to the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    fn min_occurring(&self) -> QueryResult<Self::Item>
    where
        Self::Item: Ord,
    {
        extreme_occurrence(self.traverse(), Natural, Ordering::Less, "min_occurring")
    }

    /// [`min_occurring`](Sorting::min_occurring) under `comparer`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoSuchElement`] if the sequence is empty.
    fn min_occurring_by<C>(&self, comparer: C) -> QueryResult<Self::Item>
    where
        C: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        extreme_occurrence(self.traverse(), comparer, Ordering::Less, "min_occurring")
    }
}

impl<S: Sequence> Sorting for S {}

// =============================================================================
// Stages
// =============================================================================

fn push_into<K, T, C>(buckets: &mut OrderedMap<K, Bucket<T>, C>, key: K, element: T)
where
    C: Comparer<K>,
{
    match buckets.get_mut(&key) {
        Some(bucket) => bucket.push(element),
        None => {
            buckets.insert(key, smallvec![element]);
        }
    }
}

fn order_stage<S, K, F, C>(sequence: &S, key: F, key_comparer: C) -> S::Shape<S::Item>
where
    S: Sequence,
    K: 'static,
    F: Fn(&S::Item) -> K + 'static,
    C: Comparer<K> + Clone + 'static,
{
    sequence.pipe(move |cursor| {
        let mut buckets = OrderedMap::with_comparer(key_comparer.clone());
        for element in cursor {
            push_into(&mut buckets, key(&element), element);
        }
        buckets.into_values().flatten()
    })
}

fn order_then_stage<S, K1, K2, F1, F2, C1, C2>(
    sequence: &S,
    first_key: F1,
    first_comparer: C1,
    second_key: F2,
    second_comparer: C2,
) -> S::Shape<S::Item>
where
    S: Sequence,
    K1: 'static,
    K2: 'static,
    F1: Fn(&S::Item) -> K1 + 'static,
    F2: Fn(&S::Item) -> K2 + 'static,
    C1: Comparer<K1> + Clone + 'static,
    C2: Comparer<K2> + Clone + 'static,
{
    sequence.pipe(move |cursor| {
        let mut buckets = OrderedMap::with_comparer(first_comparer.clone());
        for element in cursor {
            let outer = first_key(&element);
            let inner = second_key(&element);
            match buckets.get_mut(&outer) {
                Some(nested) => push_into(nested, inner, element),
                None => {
                    let mut nested = OrderedMap::with_comparer(second_comparer.clone());
                    push_into(&mut nested, inner, element);
                    buckets.insert(outer, nested);
                }
            }
        }
        buckets
            .into_values()
            .flat_map(|nested| nested.into_values().flatten())
    })
}

fn sort_stage<S, C>(sequence: &S, comparer: C) -> S::Shape<S::Item>
where
    S: Sequence,
    C: Comparer<S::Item> + Clone + 'static,
{
    sequence.pipe(move |cursor| {
        let mut elements: Vec<S::Item> = cursor.collect();
        elements.sort_by(|left, right| comparer.compare(left, right));
        elements.into_iter()
    })
}

fn first_per_key_stage<S, K, F, C>(sequence: &S, key: F, key_comparer: C) -> S::Shape<S::Item>
where
    S: Sequence,
    K: 'static,
    F: Fn(&S::Item) -> K + 'static,
    C: Comparer<K> + Clone + 'static,
{
    sequence.pipe(move |cursor| {
        let mut firsts = OrderedMap::with_comparer(key_comparer.clone());
        for element in cursor {
            firsts.insert(key(&element), element);
        }
        firsts.into_values()
    })
}

fn lookup_stage<S, K, F, C>(
    sequence: &S,
    key: F,
    key_comparer: C,
) -> S::Shape<(K, Vec<S::Item>)>
where
    S: Sequence,
    K: Clone + 'static,
    F: Fn(&S::Item) -> K + 'static,
    C: Comparer<K> + Clone + 'static,
{
    sequence.pipe(move |cursor| {
        let mut groups: OrderedMap<K, Vec<S::Item>, C> =
            OrderedMap::with_comparer(key_comparer.clone());
        for element in cursor {
            let group_key = key(&element);
            match groups.get_mut(&group_key) {
                Some(group) => group.push(element),
                None => {
                    groups.insert(group_key, vec![element]);
                }
            }
        }
        groups.into_iter()
    })
}

/// Counts occurrences and picks the count furthest in direction `wanted`.
///
/// Candidates are visited in key order and only a strictly better count
/// replaces the current pick.
fn extreme_occurrence<I, C>(
    cursor: I,
    comparer: C,
    wanted: Ordering,
    operation: &'static str,
) -> QueryResult<I::Item>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
    let mut counts = OrderedMap::with_comparer(comparer);
    for element in cursor {
        counts.upsert(element, |count| *count += 1, || 1_usize);
    }
    let mut best: Option<(I::Item, usize)> = None;
    for (element, count) in counts {
        let replace = best
            .as_ref()
            .is_none_or(|(_, best_count)| count.cmp(best_count) == wanted);
        if replace {
            best = Some((element, count));
        }
    }
    best.map(|(element, _)| element)
        .ok_or_else(|| QueryError::no_such_element(operation))
}
