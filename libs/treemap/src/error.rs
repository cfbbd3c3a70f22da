// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use alloc::collections::TryReserveError;
use core::fmt;

use crate::{Count, Key};

/// Error type returned by the fallible [`TreeMap`](crate::TreeMap) operations.
///
/// Looking up an absent key is never an error, only misuse of the API and
/// resource exhaustion are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A range query where the upper bound is below the lower bound.
    InvalidRange {
        /// The requested lower bound.
        low: Key,
        /// The requested upper bound.
        high: Key,
    },
    /// An amount (or initial count) that is zero or negative.
    NonPositiveAmount(Count),
    /// Bulk-load input that is not strictly ascending by key at the given index.
    Unsorted {
        /// Index of the first pair that is not greater than its predecessor.
        index: usize,
    },
    /// A bulk load was requested on a tree that already holds entries.
    NotEmpty,
    /// A count or range sum does not fit into a [`Count`].
    Overflow,
    /// The node storage could not be grown.
    AllocError,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocError
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRange { low, high } => {
                write!(f, "invalid range: {low} shall not be greater than {high}")
            }
            Error::NonPositiveAmount(amount) => {
                write!(f, "amount must be greater than 0, but was {amount}")
            }
            Error::Unsorted { index } => {
                write!(f, "input is not strictly ascending by key at index {index}")
            }
            Error::NotEmpty => write!(f, "tree is not empty"),
            Error::Overflow => write!(f, "count overflow"),
            Error::AllocError => write!(f, "allocation failure"),
        }
    }
}

impl core::error::Error for Error {}
