//! Error taxonomy for [`SequenceBuffer`](crate::SequenceBuffer) and its cursors.
//!
//! Every rejected request is reported to the caller. Nothing here is fatal: the
//! buffer is left exactly as it was before the failing call.

use crate::cursor::Direction;

/// Errors raised by buffer and cursor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// An index fell outside `[0, len)`.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// The rejected index.
        index: isize,
        /// Length of the buffer at the time of the call.
        len: usize,
    },

    /// A cursor was dereferenced or stepped at its end marker.
    #[error("cursor exhausted at position {position} moving {direction}")]
    CursorExhausted {
        /// Position the cursor was left at.
        position: isize,
        /// Direction of travel.
        direction: Direction,
    },

    /// A raw direction other than `+1` or `-1` was supplied.
    #[error("invalid cursor direction {0}, expected 1 or -1")]
    InvalidDirection(isize),
}

/// Result alias used throughout the crate.
pub type Result<T, E = SequenceError> = core::result::Result<T, E>;
