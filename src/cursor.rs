//! Position-and-direction cursors over a [`SequenceBuffer`].
//!
//! A [`BidirectionalCursor`] is a borrowed view: a reference to the buffer, a signed
//! position, and a [`Direction`]. Positions `-1` and `len` are the end markers for
//! backward and forward travel respectively. Once a cursor reaches the end marker
//! for its direction it is exhausted: dereferencing or stepping it again returns
//! [`SequenceError::CursorExhausted`] and leaves it where it is.
//!
//! [`CursorMut`] is the writable form, holding the buffer mutably.

use core::fmt;
use core::iter::FusedIterator;

use tracing::debug;

use crate::buffer::{SequenceBuffer, signed_len};
use crate::error::{Result, SequenceError};

/// Direction of cursor travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards higher indices, ending at `len`.
    Forward,
    /// Towards lower indices, ending at `-1`.
    Backward,
}

impl Direction {
    /// Signed position delta for one step: `1` or `-1`.
    #[inline(always)]
    pub const fn step(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// The opposite direction.
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        })
    }
}

impl TryFrom<isize> for Direction {
    type Error = SequenceError;

    fn try_from(raw: isize) -> Result<Self> {
        match raw {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Backward),
            _ => {
                debug!(raw, "rejected cursor direction");
                Err(SequenceError::InvalidDirection(raw))
            }
        }
    }
}

// ─── Position ────────────────────────────────────────────────────────────────

/// Index/direction state shared by both cursor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    index: isize,
    direction: Direction,
}

impl Position {
    #[inline(always)]
    fn is_exhausted(self, len: usize) -> bool {
        match self.direction {
            Direction::Forward => self.index >= signed_len(len),
            Direction::Backward => self.index < 0,
        }
    }

    fn exhausted(self) -> SequenceError {
        debug!(
            position = self.index,
            direction = %self.direction,
            "rejected use of exhausted cursor"
        );
        SequenceError::CursorExhausted {
            position: self.index,
            direction: self.direction,
        }
    }

    /// The element index this position points at, if it is in `[0, len)`.
    fn slot(self, len: usize) -> Option<usize> {
        usize::try_from(self.index).ok().filter(|&i| i < len)
    }

    fn checked_slot(self, len: usize) -> Result<usize> {
        self.slot(len).ok_or_else(|| self.exhausted())
    }

    fn advance(&mut self, len: usize) -> Result<()> {
        if self.is_exhausted(len) {
            return Err(self.exhausted());
        }
        self.index += self.direction.step();
        Ok(())
    }

    /// Elements left to visit before the end marker.
    fn remaining(self, len: usize) -> usize {
        self.slot(len).map_or(0, |i| match self.direction {
            Direction::Forward => len - i,
            Direction::Backward => i + 1,
        })
    }
}

// ─── BidirectionalCursor ─────────────────────────────────────────────────────

/// A read-only cursor over a [`SequenceBuffer`].
///
/// The cursor borrows the buffer, so the buffer cannot be appended to, shrunk,
/// or dropped while the cursor is alive.
///
/// # Equality
///
/// Two cursors are equal only when they share position and direction **and** their
/// buffers hold equal elements. Comparing contents makes `==` O(len); it is what
/// lets cursors over two distinct but identical buffers compare equal.
pub struct BidirectionalCursor<'a, T> {
    buffer: &'a SequenceBuffer<T>,
    position: Position,
}

impl<'a, T> BidirectionalCursor<'a, T> {
    /// Creates a cursor from a raw position and a raw direction (`1` or `-1`).
    ///
    /// The position must lie in `[-1, len]`.
    pub fn new(buffer: &'a SequenceBuffer<T>, position: isize, direction: isize) -> Result<Self> {
        let direction = Direction::try_from(direction)?;
        if !(-1..=signed_len(buffer.len())).contains(&position) {
            debug!(position, len = buffer.len(), "rejected cursor position");
            return Err(SequenceError::IndexOutOfRange {
                index: position,
                len: buffer.len(),
            });
        }
        Ok(Self::at(buffer, position, direction))
    }

    pub(crate) const fn at(buffer: &'a SequenceBuffer<T>, index: isize, direction: Direction) -> Self {
        Self {
            buffer,
            position: Position { index, direction },
        }
    }

    #[inline(always)]
    pub const fn position(&self) -> isize {
        self.position.index
    }

    #[inline(always)]
    pub const fn direction(&self) -> Direction {
        self.position.direction
    }

    /// True once the cursor sits on the end marker for its direction.
    pub fn is_exhausted(&self) -> bool {
        self.position.is_exhausted(self.buffer.len())
    }

    /// Dereferences the cursor.
    ///
    /// Any position outside `[0, len)` fails with [`SequenceError::CursorExhausted`],
    /// including the start-side marker of a cursor that is not yet exhausted (a forward
    /// cursor at `-1`, a backward cursor at `len`). The returned reference lives as long
    /// as the buffer borrow, not the cursor.
    pub fn get(&self) -> Result<&'a T> {
        let i = self.position.checked_slot(self.buffer.len())?;
        Ok(&self.buffer.as_slice()[i])
    }

    /// Moves one slot in the cursor's direction.
    ///
    /// Fails with [`SequenceError::CursorExhausted`] at the end marker, without moving.
    pub fn step(&mut self) -> Result<()> {
        self.position.advance(self.buffer.len())
    }

    /// Iterates from the current position up to the end marker.
    ///
    /// A cursor sitting on the start-side marker (a forward cursor at `-1`, a backward
    /// cursor at `len`) is stepped once first, so the walk covers every element the
    /// cursor would reach by stepping.
    pub fn walk(mut self) -> Walk<'a, T> {
        let len = self.buffer.len();
        if !self.position.is_exhausted(len) && self.position.slot(len).is_none() {
            self.position.index += self.position.direction.step();
        }
        Walk { cursor: self }
    }
}

impl<T> Clone for BidirectionalCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BidirectionalCursor<'_, T> {}

impl<T> fmt::Debug for BidirectionalCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BidirectionalCursor")
            .field("position", &self.position.index)
            .field("direction", &self.position.direction)
            .field("len", &self.buffer.len())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for BidirectionalCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.buffer.as_slice() == other.buffer.as_slice()
    }
}

impl<T: Eq> Eq for BidirectionalCursor<'_, T> {}

/// Iterator returned by [`BidirectionalCursor::walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a, T> {
    cursor: BidirectionalCursor<'a, T>,
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.cursor.buffer.len();
        let i = self.cursor.position.slot(len)?;
        self.cursor.position.index += self.cursor.position.direction.step();
        Some(&self.cursor.buffer.as_slice()[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.cursor.position.remaining(self.cursor.buffer.len());
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for Walk<'_, T> {}

impl<T> FusedIterator for Walk<'_, T> {}

// ─── CursorMut ───────────────────────────────────────────────────────────────

/// A cursor that can write through to the buffer.
pub struct CursorMut<'a, T> {
    buffer: &'a mut SequenceBuffer<T>,
    position: Position,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) const fn at(buffer: &'a mut SequenceBuffer<T>, index: isize, direction: Direction) -> Self {
        Self {
            buffer,
            position: Position { index, direction },
        }
    }

    #[inline(always)]
    pub const fn position(&self) -> isize {
        self.position.index
    }

    #[inline(always)]
    pub const fn direction(&self) -> Direction {
        self.position.direction
    }

    pub fn is_exhausted(&self) -> bool {
        self.position.is_exhausted(self.buffer.len())
    }

    pub fn get(&self) -> Result<&T> {
        let i = self.position.checked_slot(self.buffer.len())?;
        Ok(&self.buffer.as_slice()[i])
    }

    /// Mutable dereference, for in-place writes.
    pub fn get_mut(&mut self) -> Result<&mut T> {
        let i = self.position.checked_slot(self.buffer.len())?;
        Ok(&mut self.buffer.as_mut_slice()[i])
    }

    pub fn step(&mut self) -> Result<()> {
        self.position.advance(self.buffer.len())
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position.index)
            .field("direction", &self.position.direction)
            .field("len", &self.buffer.len())
            .finish()
    }
}
