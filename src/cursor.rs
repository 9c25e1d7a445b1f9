//! Cursor adapters that drive deferred operators.
//!
//! Most operators are plain compositions of standard iterator adapters. The
//! adapters in this module carry state the standard library has no adapter
//! for: a membership tree, a bounded window that can report a shortfall, a
//! buffered swap, delimiter splitting and fixed-size chunking.
//!
//! Every adapter follows the same life cycle:
//!
//! ```text
//!   NotStarted ──next()──► Pulling ──yield──► Suspended
//!                             ▲                  │
//!                             └─────next()───────┘
//!                             │
//!                             └──upstream done──► Exhausted
//! ```
//!
//! Nothing is pulled from upstream before the first call to `next`, each call
//! pulls only as many upstream elements as it needs to produce one output,
//! and `Exhausted` is terminal: the adapters are fused. Dropping an adapter
//! is the only form of cancellation.

use std::collections::VecDeque;
use std::iter::{Fuse, FusedIterator};

use crate::compare::Comparer;
use crate::error::{QueryError, QueryResult};
use crate::tree::OrderedSet;

// =============================================================================
// Distinct
// =============================================================================

/// Yields the first occurrence of each element, in encounter order.
///
/// Membership is tracked in an [`OrderedSet`] under the given comparer. The
/// set only answers "seen before?"; the output order is the upstream order.
///
/// # Examples
///
/// ```rust
/// use lambars_query::compare::Natural;
/// use lambars_query::cursor::Distinct;
///
/// let unique: Vec<i32> = Distinct::new(vec![3, 1, 3, 2, 1].into_iter(), Natural).collect();
/// assert_eq!(unique, vec![3, 1, 2]);
/// ```
pub struct Distinct<I: Iterator, C> {
    upstream: Fuse<I>,
    seen: OrderedSet<I::Item, C>,
}

impl<I: Iterator, C> Distinct<I, C> {
    /// Wraps `upstream`, deduplicating under `comparer`.
    pub fn new(upstream: I, comparer: C) -> Self {
        Self {
            upstream: upstream.fuse(),
            seen: OrderedSet::with_comparer(comparer),
        }
    }
}

impl<I, C> Iterator for Distinct<I, C>
where
    I: Iterator,
    I::Item: Clone,
    C: Comparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for element in self.upstream.by_ref() {
            if self.seen.insert(element.clone()) {
                return Some(element);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

impl<I, C> FusedIterator for Distinct<I, C>
where
    I: Iterator,
    I::Item: Clone,
    C: Comparer<I::Item>,
{
}

// =============================================================================
// Window
// =============================================================================

/// Yields the upstream elements at positions `[start, finish)`.
///
/// Stops pulling as soon as `finish` elements have been seen, so it is safe
/// over infinite upstreams. If the upstream ends first, a single
/// [`QueryError::IndexOutOfRange`] is yielded at that point.
pub struct Window<I> {
    upstream: Fuse<I>,
    start: usize,
    finish: usize,
    position: usize,
    exhausted: bool,
}

impl<I: Iterator> Window<I> {
    /// Wraps `upstream`; callers must ensure `start <= finish`.
    pub fn new(upstream: I, start: usize, finish: usize) -> Self {
        Self {
            upstream: upstream.fuse(),
            start,
            finish,
            position: 0,
            exhausted: false,
        }
    }
}

impl<I: Iterator> Iterator for Window<I> {
    type Item = QueryResult<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        while self.position < self.finish {
            let Some(element) = self.upstream.next() else {
                self.exhausted = true;
                return Some(Err(QueryError::index_out_of_range(
                    "range",
                    self.finish,
                    self.position,
                )));
            };
            let index = self.position;
            self.position += 1;
            if index >= self.start {
                return Some(Ok(element));
            }
        }
        self.exhausted = true;
        None
    }
}

impl<I: Iterator> FusedIterator for Window<I> {}

// =============================================================================
// Swap
// =============================================================================

/// Yields the upstream with the elements at two positions exchanged.
///
/// Elements before the lower position stream through. On reaching it, the
/// elements up to the higher position are buffered, emitted with their ends
/// exchanged, and streaming resumes. If the upstream ends before the higher
/// position, a single [`QueryError::IndexOutOfRange`] is yielded.
pub struct Swap<I: Iterator> {
    upstream: Fuse<I>,
    low: usize,
    high: usize,
    position: usize,
    pending: VecDeque<I::Item>,
    exhausted: bool,
}

impl<I: Iterator> Swap<I> {
    /// Wraps `upstream`, exchanging the elements at `first` and `second`.
    pub fn new(upstream: I, first: usize, second: usize) -> Self {
        Self {
            upstream: upstream.fuse(),
            low: first.min(second),
            high: first.max(second),
            position: 0,
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    fn shortfall(&mut self) -> QueryError {
        self.exhausted = true;
        QueryError::index_out_of_range("swapped", self.high, self.position)
    }

    fn fill_window(&mut self) -> QueryResult<()> {
        let mut window = VecDeque::new();
        while self.position <= self.high {
            let Some(element) = self.upstream.next() else {
                return Err(self.shortfall());
            };
            window.push_back(element);
            self.position += 1;
        }
        let last = window.len() - 1;
        window.swap(0, last);
        self.pending = window;
        Ok(())
    }
}

impl<I: Iterator> Iterator for Swap<I> {
    type Item = QueryResult<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(element) = self.pending.pop_front() {
            return Some(Ok(element));
        }
        if self.exhausted {
            return None;
        }
        if self.position == self.low {
            return match self.fill_window() {
                Ok(()) => self.pending.pop_front().map(Ok),
                Err(error) => Some(Err(error)),
            };
        }
        match self.upstream.next() {
            Some(element) => {
                self.position += 1;
                Some(Ok(element))
            }
            None if self.position <= self.high => Some(Err(self.shortfall())),
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl<I: Iterator> FusedIterator for Swap<I> {}

// =============================================================================
// Split
// =============================================================================

/// Yields the non-empty runs of elements between delimiters.
///
/// Consecutive delimiters, and delimiters at either end, produce no empty
/// segments.
///
/// # Examples
///
/// ```rust
/// use lambars_query::cursor::Split;
///
/// let segments: Vec<Vec<i32>> =
///     Split::new(vec![0, 1, 2, 0, 0, 3, 0].into_iter(), |value: &i32| *value == 0).collect();
/// assert_eq!(segments, vec![vec![1, 2], vec![3]]);
/// ```
pub struct Split<I, P> {
    upstream: Fuse<I>,
    is_delimiter: P,
}

impl<I: Iterator, P> Split<I, P> {
    /// Wraps `upstream`, splitting wherever `is_delimiter` holds.
    pub fn new(upstream: I, is_delimiter: P) -> Self {
        Self {
            upstream: upstream.fuse(),
            is_delimiter,
        }
    }
}

impl<I, P> Iterator for Split<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut segment = Vec::new();
        for element in self.upstream.by_ref() {
            if (self.is_delimiter)(&element) {
                if !segment.is_empty() {
                    return Some(segment);
                }
            } else {
                segment.push(element);
            }
        }
        (!segment.is_empty()).then_some(segment)
    }
}

impl<I, P> FusedIterator for Split<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
}

// =============================================================================
// Chunks
// =============================================================================

/// Yields consecutive chunks of at most `size` elements.
///
/// Only the last chunk may be shorter than `size`.
pub struct Chunks<I> {
    upstream: Fuse<I>,
    size: usize,
}

impl<I: Iterator> Chunks<I> {
    /// Wraps `upstream`; callers must ensure `size > 0`.
    pub fn new(upstream: I, size: usize) -> Self {
        Self {
            upstream: upstream.fuse(),
            size,
        }
    }
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<I::Item> = self.upstream.by_ref().take(self.size).collect();
        (!chunk.is_empty()).then_some(chunk)
    }
}

impl<I: Iterator> FusedIterator for Chunks<I> {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Natural;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_distinct_pulls_lazily() {
        let pulled = Cell::new(0);
        let upstream = [1, 1, 2, 3].into_iter().inspect(|_| pulled.set(pulled.get() + 1));
        let mut distinct = Distinct::new(upstream, Natural);

        assert_eq!(pulled.get(), 0);
        assert_eq!(distinct.next(), Some(1));
        assert_eq!(pulled.get(), 1);
        assert_eq!(distinct.next(), Some(2));
        assert_eq!(pulled.get(), 3);
    }

    #[rstest]
    fn test_distinct_with_comparer() {
        let by_parity = |left: &i32, right: &i32| (left % 2).cmp(&(right % 2));
        let unique: Vec<i32> = Distinct::new([4, 6, 1, 8, 3].into_iter(), by_parity).collect();
        assert_eq!(unique, vec![4, 1]);
    }

    #[rstest]
    #[case(0, 0, vec![])]
    #[case(1, 3, vec![2, 3])]
    #[case(0, 4, vec![1, 2, 3, 4])]
    fn test_window_within_bounds(
        #[case] start: usize,
        #[case] finish: usize,
        #[case] expected: Vec<i32>,
    ) {
        let window: QueryResult<Vec<i32>> =
            Window::new([1, 2, 3, 4].into_iter(), start, finish).collect();
        assert_eq!(window, Ok(expected));
    }

    #[rstest]
    fn test_window_stops_pulling_at_finish() {
        let pulled = Cell::new(0);
        let upstream = (0..).inspect(|_| pulled.set(pulled.get() + 1));
        let window: Vec<QueryResult<i32>> = Window::new(upstream, 2, 4).collect();
        assert_eq!(window, vec![Ok(2), Ok(3)]);
        assert_eq!(pulled.get(), 4);
    }

    #[rstest]
    fn test_window_shortfall_is_yielded_once() {
        let mut window = Window::new([1, 2].into_iter(), 1, 3);
        assert_eq!(window.next(), Some(Ok(2)));
        assert!(matches!(
            window.next(),
            Some(Err(QueryError::IndexOutOfRange { index: 3, length: 2, .. }))
        ));
        assert_eq!(window.next(), None);
        assert_eq!(window.next(), None);
    }

    #[rstest]
    #[case(0, 3, vec!['d', 'b', 'c', 'a', 'e'])]
    #[case(3, 1, vec!['a', 'd', 'c', 'b', 'e'])]
    #[case(2, 2, vec!['a', 'b', 'c', 'd', 'e'])]
    #[case(3, 4, vec!['a', 'b', 'c', 'e', 'd'])]
    fn test_swap_exchanges_positions(
        #[case] first: usize,
        #[case] second: usize,
        #[case] expected: Vec<char>,
    ) {
        let swapped: QueryResult<Vec<char>> =
            Swap::new(['a', 'b', 'c', 'd', 'e'].into_iter(), first, second).collect();
        assert_eq!(swapped, Ok(expected));
    }

    #[rstest]
    fn test_swap_shortfall() {
        let swapped: Vec<QueryResult<i32>> = Swap::new([1, 2, 3].into_iter(), 1, 5).collect();
        assert_eq!(swapped.len(), 2);
        assert_eq!(swapped[0], Ok(1));
        assert!(matches!(
            swapped[1],
            Err(QueryError::IndexOutOfRange { index: 5, length: 3, .. })
        ));
    }

    #[rstest]
    fn test_swap_shortfall_before_low_position() {
        let swapped: Vec<QueryResult<i32>> = Swap::new([1].into_iter(), 3, 4).collect();
        assert_eq!(swapped[0], Ok(1));
        assert!(matches!(
            swapped[1],
            Err(QueryError::IndexOutOfRange { index: 4, length: 1, .. })
        ));
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![0, 0], vec![])]
    #[case(vec![1, 2, 3], vec![vec![1, 2, 3]])]
    #[case(vec![0, 1, 0, 0, 2, 3, 0], vec![vec![1], vec![2, 3]])]
    fn test_split_drops_empty_segments(
        #[case] input: Vec<i32>,
        #[case] expected: Vec<Vec<i32>>,
    ) {
        let segments: Vec<Vec<i32>> =
            Split::new(input.into_iter(), |value: &i32| *value == 0).collect();
        assert_eq!(segments, expected);
    }

    #[rstest]
    fn test_chunks() {
        let chunks: Vec<Vec<i32>> = Chunks::new(1..=7, 3).collect();
        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }
}
