//! # lambars-query
//!
//! Composable sequence queries over two interchangeable container shapes.
//!
//! ## Overview
//!
//! This library provides a uniform algebra of transformations (filtering,
//! projection, set operations, ordering, grouping, joining, zipping and
//! partitioning) over:
//!
//! - [`Array`](array::Array): a fixed-length, randomly accessible sequence.
//!   Every operator runs **eagerly** and returns a new, exactly sized array.
//! - [`Iterable`](iterable::Iterable): a one-pass, possibly infinite producer.
//!   Every operator is **deferred**: it returns immediately, and the whole
//!   chain re-runs from the source each time the result is traversed.
//!
//! Both shapes implement [`Sequence`](sequence::Sequence), and every operator
//! is written once against that trait, so the eager and deferred results are
//! identical element for element.
//!
//! ## Feature Flags
//!
//! - `tracing`: emit `tracing` events for traversals and raised errors (default)
//! - `serde`: `Serialize`/`Deserialize` for [`Array`](array::Array)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lambars_query::prelude::*;
//!
//! let array = Array::from(vec![5, 3, 8, 1, 3]);
//! let eager = array.filter(|value| *value > 2).distinct().sorted();
//! assert_eq!(eager.as_slice(), &[3, 5, 8]);
//!
//! let deferred = Iterable::from_vec(vec![5, 3, 8, 1, 3])
//!     .filter(|value| *value > 2)
//!     .distinct()
//!     .sorted();
//! assert_eq!(deferred.to_vec(), vec![3, 5, 8]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Emits a `tracing::trace!` event when the `tracing` feature is enabled.
macro_rules! trace_query {
    ($($argument:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(target: "lambars_query", $($argument)*);
        }
    };
}

/// Emits a `tracing::debug!` event when the `tracing` feature is enabled.
macro_rules! debug_query {
    ($($argument:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(target: "lambars_query", $($argument)*);
        }
    };
}

/// Prelude module for convenient imports.
///
/// Re-exports both container shapes and every operator trait.
///
/// # Usage
///
/// ```rust
/// use lambars_query::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::Aggregate;
    pub use crate::array::Array;
    pub use crate::compare::{Comparer, Natural, Reversed};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::iterable::Iterable;
    pub use crate::join::Join;
    pub use crate::ordering::Sorting;
    pub use crate::query::Query;
    pub use crate::search::{NullableSearch, Search};
    pub use crate::sequence::Sequence;
    pub use crate::set::SetAlgebra;
    pub use crate::tree::{OrderedMap, OrderedSet};
}

pub mod aggregate;
pub mod array;
pub mod compare;
pub mod cursor;
pub mod error;
pub mod iterable;
pub mod join;
pub mod ordering;
pub mod query;
pub mod search;
pub mod sequence;
pub mod set;
pub mod tree;

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    // Arrays own their storage and may cross threads; iterables share their
    // producer through `Rc` and must stay on the thread that built them.
    assert_impl_all!(Array<i32>: Clone, Send, Sync);
    assert_not_impl_any!(Iterable<i32>: Send, Sync);
    assert_impl_all!(Iterable<i32>: Clone);
}
