// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by clipping, cutting and stitching.

use core::ops::Range;

use thiserror::Error;

use crate::SegmentChain;

/// The error type for this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input geometry is degenerate in a way that can't be worked around,
    /// for example a control point that is NaN or infinite.
    #[error("degenerate input: {0}")]
    Degenerate(&'static str),

    /// Clipping didn't converge within its depth or work limits, so whether
    /// the curves intersect in this region is undetermined.
    #[error(
        "intersection undetermined after {depth} rounds for t1 in {t1:?}, t2 in {t2:?}"
    )]
    RecursionLimitExceeded {
        /// Depth of the branch when it was abandoned.
        depth: u32,
        /// Parameter interval on the first curve.
        t1: Range<f64>,
        /// Parameter interval on the second curve.
        t2: Range<f64>,
    },

    /// A segment would start and end at the same intersection with no length
    /// in between.
    #[error("zero-length segment")]
    DegenerateSegment,

    /// A segment was joined to one whose start doesn't match its end.
    #[error("segment end doesn't match the next segment's start")]
    NotPrependable,

    /// Stitching left chains that couldn't be closed, which means the input
    /// segment set was inconsistent. The open chains are handed back.
    #[error("{} open chain(s) left after stitching", .open.len())]
    InconsistentSegmentSet {
        /// The chains that couldn't be closed.
        open: Vec<SegmentChain>,
    },
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
