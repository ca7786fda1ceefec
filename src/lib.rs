//! # Sequence Buffer
//!
//! A growable, indexable sequence container with bidirectional cursors.
//!
//! [`SequenceBuffer`] keeps its elements in one contiguous store that starts at
//! [`SequenceBuffer::DEFAULT_CAPACITY`] slots and doubles whenever an append finds it
//! full. [`BidirectionalCursor`] walks the buffer forwards or backwards until it
//! reaches the end marker for its direction.
//!
//! ## Key Features
//!
//! * **Checked access:** `get`, `set`, `get_mut` and `remove_at` take signed indices and
//!   report anything outside `[0, len)` as [`SequenceError::IndexOutOfRange`].
//! * **Doubling growth:** capacity is tracked explicitly and only ever doubles, on append.
//! * **Borrowed cursors:** cursors borrow the buffer, so a cursor can never observe a
//!   reallocation or outlive its buffer.
//! * **Explicit exhaustion:** stepping or dereferencing a cursor at its end marker is
//!   [`SequenceError::CursorExhausted`], never a silent no-op.
//!
//! ## Examples
//!
//! ```rust
//! use sequence_buffer::{SequenceBuffer, SequenceError};
//!
//! let mut buf = SequenceBuffer::new();
//! buf.append(3);
//! buf.append(2);
//! assert_eq!(buf.get(1), Ok(&2));
//!
//! buf.set(1, 10)?;
//! assert_eq!(buf.get(1), Ok(&10));
//! assert!(matches!(buf.get(2), Err(SequenceError::IndexOutOfRange { index: 2, len: 2 })));
//!
//! // for (it = begin; it != end; ++it)
//! let mut it = buf.begin();
//! let end = buf.end();
//! let mut seen = Vec::new();
//! while it != end {
//!     seen.push(*it.get()?);
//!     it.step()?;
//! }
//! assert_eq!(seen, [3, 10]);
//!
//! let reversed: Vec<i32> = buf.reverse_begin().walk().copied().collect();
//! assert_eq!(reversed, [10, 3]);
//! # Ok::<(), SequenceError>(())
//! ```
//!
//! ## Logging
//!
//! Growth steps are emitted at `TRACE` and rejected requests at `DEBUG` through
//! [`tracing`]. The crate never installs a subscriber.

// --- Module Declarations ---

pub mod buffer;
pub mod cursor;
pub mod error;

// --- Re-exports ---

pub use buffer::SequenceBuffer;
pub use cursor::{BidirectionalCursor, CursorMut, Direction, Walk};
pub use error::{Result, SequenceError};
