// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use thiserror::Error;

/// Any error that may arise from constructing or operating on a
/// [`SeqView`][crate::SeqView].
///
/// None of these conditions are retried internally - they indicate that the caller
/// violated an API contract or that a source violated its stability assumptions,
/// and they all propagate synchronously.
///
/// # Thread safety
///
/// This type is thread-safe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A required input was semantically absent, e.g. an empty search needle.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An offset, length or index violated the bounds of a view or source.
    ///
    /// The [`kind`][OutOfRangeKind] distinguishes a start offset that lies beyond the
    /// source from a span that starts in-bounds but runs past the end. Both are the
    /// same class of caller error; the distinction exists purely for diagnostics.
    #[error("{kind} (requested {requested}, available {available})")]
    OutOfRange {
        /// Which of the two bounds violations occurred.
        kind: OutOfRangeKind,

        /// The offset or end position the caller asked for.
        requested: usize,

        /// How many items were actually available.
        available: usize,
    },

    /// A source that was enumerated twice (once to size the destination, once to
    /// copy) yielded a different number of items on the second pass.
    ///
    /// This means the source violated the stability assumption that allowed the
    /// copy dispatcher to avoid buffering. The condition is fatal; it is never
    /// retried because the source cannot be trusted to stabilize.
    #[error("source declared {declared} items but delivered {actual} when copied")]
    InconsistentSequence {
        /// The item count the source declared before copying.
        declared: usize,

        /// The item count the source actually delivered.
        actual: usize,
    },

    /// A cursor was read while not positioned on an item, i.e. before the first
    /// advance or after advancing past the end.
    #[error("cursor is not positioned on an item")]
    InvalidState,
}

impl Error {
    pub(crate) const fn offset_beyond(requested: usize, available: usize) -> Self {
        Self::OutOfRange {
            kind: OutOfRangeKind::OffsetBeyondEnd,
            requested,
            available,
        }
    }

    pub(crate) const fn span_beyond(requested: usize, available: usize) -> Self {
        Self::OutOfRange {
            kind: OutOfRangeKind::SpanBeyondEnd,
            requested,
            available,
        }
    }
}

/// The two diagnostic flavors of [`Error::OutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutOfRangeKind {
    /// The start offset itself lies beyond the end of the source.
    OffsetBeyondEnd,

    /// The start offset is in-bounds but the requested span extends past the end
    /// of the source.
    SpanBeyondEnd,
}

impl fmt::Display for OutOfRangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetBeyondEnd => f.write_str("start offset is beyond the end of the source"),
            Self::SpanBeyondEnd => f.write_str("requested span extends past the end of the source"),
        }
    }
}

/// A specialized `Result` for use with sequence view operations.
pub type Result<T> = std::result::Result<T, Error>;
