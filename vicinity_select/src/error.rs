// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy shared by every stage.

use thiserror::Error;
use vicinity_grid::GridError;

use crate::strategy::{Params, Strategy};

/// Failure of a single stage.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Malformed parameter: non-positive cell count or weight, sample size out of range,
    /// duplicate identifiers, mismatched inputs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// More places requested than are available.
    #[error("insufficient candidates: requested {requested}, only {available} available")]
    InsufficientCandidates {
        /// Requested result size `k`.
        requested: usize,
        /// Number of candidates on offer.
        available: usize,
    },

    /// An operation that needs at least one place got none.
    #[error("empty input set")]
    EmptyInput,

    /// Scoring was asked to evaluate an empty selection.
    #[error("empty result set")]
    EmptyResult,
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::InvalidArgument(format!("grid: {err}"))
    }
}

/// A pipeline failure, tagged with the strategy and parameters that caused it.
///
/// Sweeps can log or skip the combination and move on.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{strategy} pipeline failed for {params}")]
pub struct PipelineError {
    /// Strategy that was running.
    pub strategy: Strategy,
    /// Parameters of the failed invocation.
    pub params: Params,
    /// Stage failure.
    #[source]
    pub source: Error,
}
