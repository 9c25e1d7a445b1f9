//! Error types for sequence queries.
//!
//! Every fallible query operation reports failure through [`QueryError`].
//! Errors are raised synchronously at the point of misuse and are never
//! retried or swallowed by the library. Panics raised by caller-supplied
//! predicates, selectors or comparators propagate unchanged.

use std::fmt;

/// Represents an error raised by a query operation.
///
/// Each variant records the name of the operation that failed so that a
/// failure deep inside a composed pipeline can still be traced back to the
/// operator that produced it.
///
/// # Examples
///
/// ```rust
/// use lambars_query::error::QueryError;
///
/// let error = QueryError::NoSuchElement { operation: "first" };
/// assert_eq!(format!("{error}"), "first: sequence contains no matching element");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A value required to be present was absent.
    NullArgument {
        /// The operation that rejected the value.
        operation: &'static str,
        /// Position of the absent element, when the value was a sequence element.
        index: Option<usize>,
    },
    /// An explicit position exceeded the bounds of the sequence.
    IndexOutOfRange {
        /// The operation that failed.
        operation: &'static str,
        /// The requested position.
        index: usize,
        /// The number of elements actually available.
        length: usize,
    },
    /// An argument was malformed (for example a reversed range).
    InvalidArgument {
        /// The operation that rejected the argument.
        operation: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The sequence was empty, or no element matched the predicate.
    NoSuchElement {
        /// The operation that failed.
        operation: &'static str,
    },
    /// More than one element satisfied a query that expects exactly one.
    AmbiguousResult {
        /// The operation that failed.
        operation: &'static str,
    },
}

impl QueryError {
    /// Returns the name of the operation that raised this error.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::NullArgument { operation, .. }
            | Self::IndexOutOfRange { operation, .. }
            | Self::InvalidArgument { operation, .. }
            | Self::NoSuchElement { operation }
            | Self::AmbiguousResult { operation } => operation,
        }
    }

    pub(crate) fn null_argument(operation: &'static str, index: Option<usize>) -> Self {
        Self::NullArgument { operation, index }.raised()
    }

    pub(crate) fn index_out_of_range(operation: &'static str, index: usize, length: usize) -> Self {
        Self::IndexOutOfRange {
            operation,
            index,
            length,
        }
        .raised()
    }

    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
        .raised()
    }

    pub(crate) fn no_such_element(operation: &'static str) -> Self {
        Self::NoSuchElement { operation }.raised()
    }

    pub(crate) fn ambiguous_result(operation: &'static str) -> Self {
        Self::AmbiguousResult { operation }.raised()
    }

    fn raised(self) -> Self {
        debug_query!(operation = self.operation(), error = %self, "query failed");
        self
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullArgument {
                operation,
                index: Some(index),
            } => write!(formatter, "{operation}: element at index {index} is absent"),
            Self::NullArgument {
                operation,
                index: None,
            } => write!(formatter, "{operation}: required argument is absent"),
            Self::IndexOutOfRange {
                operation,
                index,
                length,
            } => write!(
                formatter,
                "{operation}: index {index} is out of range for a sequence of length {length}"
            ),
            Self::InvalidArgument { operation, reason } => {
                write!(formatter, "{operation}: invalid argument: {reason}")
            }
            Self::NoSuchElement { operation } => {
                write!(formatter, "{operation}: sequence contains no matching element")
            }
            Self::AmbiguousResult { operation } => write!(
                formatter,
                "{operation}: sequence contains more than one matching element"
            ),
        }
    }
}

impl std::error::Error for QueryError {}

/// Result type returned by fallible query operations.
pub type QueryResult<T> = Result<T, QueryError>;
