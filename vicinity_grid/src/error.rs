// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid construction errors.

use thiserror::Error;

/// Why a [`Grid`](crate::Grid) could not be built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// No items were supplied.
    #[error("cannot build a grid over an empty item set")]
    EmptyInput,
    /// The requested cell count was zero.
    #[error("grid needs at least one cell")]
    ZeroCells,
    /// An item has a NaN or infinite coordinate.
    #[error("item {index} has a non-finite coordinate")]
    NonFinite {
        /// Position of the offending item in the input slice.
        index: usize,
    },
}
