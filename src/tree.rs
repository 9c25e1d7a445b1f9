//! Comparator-keyed ordered map and set based on a Red-Black Tree.
//!
//! This module provides [`OrderedMap`] and [`OrderedSet`], the ordered
//! tree primitive used by set algebra, ordering, grouping, occurrence
//! counting and joins.
//!
//! # Overview
//!
//! Unlike [`std::collections::BTreeMap`], the order is not fixed by the
//! key's [`Ord`] implementation: every tree carries a [`Comparer`] chosen at
//! construction time. Keys the comparer reports as `Equal` are the same key.
//!
//! - O(log N) insert
//! - O(log N) get / `get_mut` / `contains_key`
//! - O(1) len and `is_empty`
//! - O(N) in-order iteration
//!
//! Insertion is **first-wins**: inserting a key that is already present
//! leaves the stored entry untouched and returns `false`.
//!
//! # Examples
//!
//! ```rust
//! use lambars_query::tree::OrderedMap;
//!
//! let mut map = OrderedMap::with_comparer(|left: &i32, right: &i32| right.cmp(left));
//! map.insert(1, "one");
//! map.insert(3, "three");
//! map.insert(2, "two");
//! assert!(!map.insert(1, "uno"));
//!
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&3, &2, &1]);
//! assert_eq!(map.get(&1), Some(&"one"));
//! ```
//!
//! # Internal Structure
//!
//! The Red-Black Tree maintains the following invariants:
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. Red nodes have only black children
//! 4. Every path from root to leaf has the same number of black nodes

use std::cmp::Ordering;
use std::fmt;

use crate::compare::{Comparer, Natural};

// =============================================================================
// Node Definition
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    left: Option<Box<Self>>,
    right: Option<Box<Self>>,
}

impl<K, V> Node<K, V> {
    const fn new_red(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
        }
    }
}

fn is_red<K, V>(node: Option<&Box<Node<K, V>>>) -> bool {
    node.is_some_and(|node| node.color == Color::Red)
}

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// An ordered map whose key order is defined by an injected [`Comparer`].
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `insert`       | O(log N)   |
/// | `get`          | O(log N)   |
/// | `get_mut`      | O(log N)   |
/// | `contains_key` | O(log N)   |
/// | `len`          | O(1)       |
/// | `iter`         | O(N)       |
pub struct OrderedMap<K, V, C = Natural> {
    root: Option<Box<Node<K, V>>>,
    length: usize,
    comparer: C,
}

impl<K: Ord, V> OrderedMap<K, V, Natural> {
    /// Creates an empty map ordered by the natural order of `K`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::tree::OrderedMap;
    ///
    /// let map: OrderedMap<i32, String> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparer(Natural)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Creates an empty map ordered by `comparer`.
    #[inline]
    #[must_use]
    pub const fn with_comparer(comparer: C) -> Self {
        Self {
            root: None,
            length: 0,
            comparer,
        }
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns an iterator over entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iterator = Iter {
            stack: Vec::new(),
            remaining: self.length,
        };
        iterator.push_left_spine(self.root.as_deref());
        iterator
    }

    /// Returns an iterator over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Consumes the map, returning its values in key order.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            entries: self.into_iter(),
        }
    }
}

impl<K, V, C: Comparer<K>> OrderedMap<K, V, C> {
    /// Returns a reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match self.comparer.compare(key, &node.key) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let comparer = &self.comparer;
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match comparer.compare(key, &node.key) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Returns `true` if the map contains an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts an entry unless an equivalent key is already present.
    ///
    /// Returns `true` if the entry was added. When the key already exists the
    /// stored entry wins and the arguments are dropped.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_query::tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.insert("a", 1));
    /// assert!(!map.insert("a", 2));
    /// assert_eq!(map.get(&"a"), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let (mut new_root, added) =
            Self::insert_into_node(self.root.take(), key, value, &self.comparer);
        new_root.color = Color::Black;
        self.root = Some(new_root);
        if added {
            self.length += 1;
        }
        added
    }

    /// Updates the value under `key` with `update`, or inserts `default()`.
    pub fn upsert<U, D>(&mut self, key: K, update: U, default: D)
    where
        U: FnOnce(&mut V),
        D: FnOnce() -> V,
    {
        if let Some(value) = self.get_mut(&key) {
            update(value);
        } else {
            self.insert(key, default());
        }
    }

    /// Recursive helper for insert.
    /// Returns (`new_node`, `was_added`).
    fn insert_into_node(
        node: Option<Box<Node<K, V>>>,
        key: K,
        value: V,
        comparer: &C,
    ) -> (Box<Node<K, V>>, bool) {
        match node {
            None => (Box::new(Node::new_red(key, value)), true),
            Some(mut node) => match comparer.compare(&key, &node.key) {
                Ordering::Less => {
                    let (new_left, added) =
                        Self::insert_into_node(node.left.take(), key, value, comparer);
                    node.left = Some(new_left);
                    (Self::balance(node), added)
                }
                Ordering::Greater => {
                    let (new_right, added) =
                        Self::insert_into_node(node.right.take(), key, value, comparer);
                    node.right = Some(new_right);
                    (Self::balance(node), added)
                }
                Ordering::Equal => (node, false),
            },
        }
    }

    /// Balances a black node after insertion.
    /// Handles the four cases of red-red violation.
    fn balance(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if node.color != Color::Black {
            return node;
        }

        // Case 1: Left-Left
        if let Some(left) = node.left.as_ref()
            && left.color == Color::Red
            && is_red(left.left.as_ref())
        {
            return Self::recolor_split(Self::rotate_right(node));
        }

        // Case 2: Left-Right
        if let Some(left) = node.left.as_ref()
            && left.color == Color::Red
            && is_red(left.right.as_ref())
        {
            node.left = node.left.take().map(Self::rotate_left);
            return Self::recolor_split(Self::rotate_right(node));
        }

        // Case 3: Right-Right
        if let Some(right) = node.right.as_ref()
            && right.color == Color::Red
            && is_red(right.right.as_ref())
        {
            return Self::recolor_split(Self::rotate_left(node));
        }

        // Case 4: Right-Left
        if let Some(right) = node.right.as_ref()
            && right.color == Color::Red
            && is_red(right.left.as_ref())
        {
            node.right = node.right.take().map(Self::rotate_right);
            return Self::recolor_split(Self::rotate_left(node));
        }

        node
    }

    /// Rotates the tree to the right around the given node.
    fn rotate_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        match node.left.take() {
            Some(mut left) => {
                node.left = left.right.take();
                left.right = Some(node);
                left
            }
            None => node,
        }
    }

    /// Rotates the tree to the left around the given node.
    fn rotate_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        match node.right.take() {
            Some(mut right) => {
                node.right = right.left.take();
                right.left = Some(node);
                right
            }
            None => node,
        }
    }

    /// Makes the node red and both children black.
    fn recolor_split(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        node.color = Color::Red;
        if let Some(left) = node.left.as_mut() {
            left.color = Color::Black;
        }
        if let Some(right) = node.right.as_mut() {
            right.color = Color::Black;
        }
        node
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`] in key order.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An owning iterator over the entries of an [`OrderedMap`] in key order.
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    fn push_left_spine(&mut self, mut node: Option<Box<Node<K, V>>>) {
        while let Some(mut current) = node {
            node = current.left.take();
            self.stack.push(current);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An owning iterator over the values of an [`OrderedMap`] in key order.
pub struct IntoValues<K, V> {
    entries: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iterator = IntoIter {
            stack: Vec::new(),
            remaining: self.length,
        };
        iterator.push_left_spine(self.root);
        iterator
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> Default for OrderedMap<K, V, Natural> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparer<K> + Default> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_comparer(C::default());
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparer<K>> Extend<(K, V)> for OrderedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// OrderedSet Definition
// =============================================================================

/// An ordered set whose element order is defined by an injected [`Comparer`].
///
/// # Examples
///
/// ```rust
/// use lambars_query::tree::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// assert!(set.insert(2));
/// assert!(set.insert(1));
/// assert!(!set.insert(2));
/// assert!(set.contains(&1));
///
/// let elements: Vec<&i32> = set.iter().collect();
/// assert_eq!(elements, vec![&1, &2]);
/// ```
pub struct OrderedSet<T, C = Natural> {
    map: OrderedMap<T, (), C>,
}

impl<T: Ord> OrderedSet<T, Natural> {
    /// Creates an empty set ordered by the natural order of `T`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparer(Natural)
    }
}

impl<T, C> OrderedSet<T, C> {
    /// Creates an empty set ordered by `comparer`.
    #[inline]
    #[must_use]
    pub const fn with_comparer(comparer: C) -> Self {
        Self {
            map: OrderedMap::with_comparer(comparer),
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.keys()
    }
}

impl<T, C: Comparer<T>> OrderedSet<T, C> {
    /// Adds an element; returns `false` if an equivalent element was present.
    #[inline]
    pub fn insert(&mut self, element: T) -> bool {
        self.map.insert(element, ())
    }

    /// Returns `true` if an equivalent element is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.map.contains_key(element)
    }
}

impl<T: Ord> Default for OrderedSet<T, Natural> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparer<T>> Extend<T> for OrderedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
