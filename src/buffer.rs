//! Growable, bounds-checked sequence buffer.
//!
//! Provides [`SequenceBuffer`], a contiguous store that starts at a fixed capacity
//! (10 slots by default) and doubles it whenever an append finds the store full.
//! Every indexed operation is checked: an index outside `[0, len)` is reported as
//! [`SequenceError::IndexOutOfRange`] and the buffer is left untouched.
//!
//! Cursors obtained from [`SequenceBuffer::begin`] and friends borrow the buffer,
//! so the compiler rejects any mutation or reallocation while one is alive.

use core::fmt;
use core::ops::{Index, IndexMut};
use core::slice;

use tracing::{debug, trace};

use crate::cursor::{BidirectionalCursor, CursorMut, Direction};
use crate::error::{Result, SequenceError};

/// A growable array with a tracked logical capacity and checked access.
pub struct SequenceBuffer<T> {
    store: Vec<T>,
    capacity: usize,
}

/// Converts a length to the signed domain used by cursor positions.
#[inline(always)]
#[allow(clippy::cast_possible_wrap)]
pub(crate) const fn signed_len(len: usize) -> isize {
    // Lengths past isize::MAX would need that many appends; not reachable in practice.
    len as isize
}

impl<T> SequenceBuffer<T> {
    /// Initial number of slots allocated by [`SequenceBuffer::new`].
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Creates an empty buffer with [`Self::DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer with room for `capacity` elements.
    ///
    /// A capacity of zero is raised to one so that doubling always grows the store.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            store: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of elements currently held.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of slots allocated. Always `>= len()`.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends `item` at index `len()`, doubling the capacity first if the store is full.
    ///
    /// Amortized O(1); a growth step costs O(len).
    #[inline(always)]
    pub fn append(&mut self, item: T) {
        if self.store.len() == self.capacity {
            self.grow();
        }
        self.store.push(item);
    }

    #[inline(never)]
    fn grow(&mut self) {
        let new_capacity = self.capacity.saturating_mul(2);
        // The old block is released by the reallocation itself.
        self.store.reserve_exact(new_capacity - self.store.len());
        trace!(
            old_capacity = self.capacity,
            new_capacity,
            len = self.store.len(),
            "growing sequence buffer"
        );
        self.capacity = new_capacity;
    }

    /// Maps a signed index onto the valid range `[0, len)`.
    fn checked_index(&self, index: isize) -> Result<usize> {
        match usize::try_from(index) {
            Ok(i) if i < self.store.len() => Ok(i),
            _ => {
                debug!(index, len = self.store.len(), "rejected out-of-range index");
                Err(SequenceError::IndexOutOfRange {
                    index,
                    len: self.store.len(),
                })
            }
        }
    }

    /// Returns a reference to the element at `index`.
    pub fn get(&self, index: isize) -> Result<&T> {
        let i = self.checked_index(index)?;
        Ok(&self.store[i])
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: isize) -> Result<&mut T> {
        let i = self.checked_index(index)?;
        Ok(&mut self.store[i])
    }

    /// Overwrites the element at `index` with `value`.
    pub fn set(&mut self, index: isize, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting every later element one slot left.
    ///
    /// The shift only touches `[index + 1, len)`, so removing the last element reads
    /// nothing past the valid range.
    pub fn remove_at(&mut self, index: isize) -> Result<T> {
        let i = self.checked_index(index)?;
        Ok(self.store.remove(i))
    }

    pub fn as_slice(&self) -> &[T] {
        self.store.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.store.as_mut_slice()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.store.iter()
    }

    /// Forward cursor at position `0`.
    pub fn begin(&self) -> BidirectionalCursor<'_, T> {
        BidirectionalCursor::at(self, 0, Direction::Forward)
    }

    /// Forward end marker, at position `len()`.
    pub fn end(&self) -> BidirectionalCursor<'_, T> {
        BidirectionalCursor::at(self, signed_len(self.len()), Direction::Forward)
    }

    /// Backward cursor at position `len() - 1`.
    pub fn reverse_begin(&self) -> BidirectionalCursor<'_, T> {
        BidirectionalCursor::at(self, signed_len(self.len()) - 1, Direction::Backward)
    }

    /// Backward end marker, at position `-1`.
    pub fn reverse_end(&self) -> BidirectionalCursor<'_, T> {
        BidirectionalCursor::at(self, -1, Direction::Backward)
    }

    /// Writable cursor starting where [`begin`](Self::begin) or
    /// [`reverse_begin`](Self::reverse_begin) would for `direction`.
    pub fn cursor_mut(&mut self, direction: Direction) -> CursorMut<'_, T> {
        let position = match direction {
            Direction::Forward => 0,
            Direction::Backward => signed_len(self.len()) - 1,
        };
        CursorMut::at(self, position, direction)
    }
}

impl<T> Default for SequenceBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SequenceBuffer<T> {
    fn clone(&self) -> Self {
        let mut store = Vec::with_capacity(self.capacity);
        store.extend_from_slice(&self.store);
        Self {
            store,
            capacity: self.capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SequenceBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.store.iter()).finish()
    }
}

/// Compares the logical contents only; capacity is ignored.
impl<T: PartialEq> PartialEq for SequenceBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SequenceBuffer<T> {}

impl<T> Extend<T> for SequenceBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for SequenceBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl<'a, T> IntoIterator for &'a SequenceBuffer<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Unchecked operator access. Panics on an out-of-range index, like `Vec`.
impl<T> Index<usize> for SequenceBuffer<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.store[index]
    }
}

impl<T> IndexMut<usize> for SequenceBuffer<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.store[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new_is_empty_with_default_capacity() {
        let buf: SequenceBuffer<i32> = SequenceBuffer::new();
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 10);
    }

    #[test]
    fn test_buffer_example_scenario() {
        let mut buf = SequenceBuffer::new();
        buf.append(3);
        buf.append(2);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(1), Ok(&2));

        buf.set(1, 10).unwrap();
        assert_eq!(buf.get(1), Ok(&10));

        let forward: Vec<i32> = buf.begin().walk().copied().collect();
        assert_eq!(forward, vec![3, 10]);
        let backward: Vec<i32> = buf.reverse_begin().walk().copied().collect();
        assert_eq!(backward, vec![10, 3]);
    }

    #[test]
    fn test_buffer_growth_doubles_and_preserves_order() {
        let mut buf = SequenceBuffer::new();
        for i in 0..10 {
            buf.append(i * 7);
        }
        assert_eq!(buf.capacity(), 10);

        buf.append(70);
        assert_eq!(buf.capacity(), 20);
        assert_eq!(buf.len(), 11);
        for i in 0..11 {
            assert_eq!(buf.get(i), Ok(&(i * 7)));
        }

        for i in 11..21 {
            buf.append(i * 7);
        }
        assert_eq!(buf.capacity(), 40);
    }

    #[test]
    fn test_buffer_with_capacity_zero_still_grows() {
        let mut buf = SequenceBuffer::with_capacity(0);
        assert_eq!(buf.capacity(), 1);
        buf.append('a');
        buf.append('b');
        buf.append('c');
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.as_slice(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_buffer_remove_at_middle_shifts_left() {
        let mut buf: SequenceBuffer<i32> = (10..15).collect();
        assert_eq!(buf.remove_at(1), Ok(11));
        assert_eq!(buf.as_slice(), &[10, 12, 13, 14]);
        assert_eq!(buf.capacity(), 10);
    }

    #[test]
    fn test_buffer_remove_at_last_and_first() {
        let mut buf: SequenceBuffer<i32> = (1..=3).collect();
        assert_eq!(buf.remove_at(2), Ok(3));
        assert_eq!(buf.as_slice(), &[1, 2]);
        assert_eq!(buf.remove_at(0), Ok(1));
        assert_eq!(buf.as_slice(), &[2]);
        assert_eq!(buf.remove_at(0), Ok(2));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_buffer_bounds_rejected_without_mutation() {
        let mut buf: SequenceBuffer<i32> = (0..3).collect();
        let out = |index| SequenceError::IndexOutOfRange { index, len: 3 };

        assert_eq!(buf.get(3), Err(out(3)));
        assert_eq!(buf.get(-1), Err(out(-1)));
        assert_eq!(buf.set(3, 99), Err(out(3)));
        assert_eq!(buf.set(-2, 99), Err(out(-2)));
        assert_eq!(buf.remove_at(3), Err(out(3)));
        assert_eq!(buf.remove_at(-1), Err(out(-1)));
        assert_eq!(buf.get_mut(isize::MIN).err(), Some(out(isize::MIN)));

        assert_eq!(buf.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_buffer_empty_rejects_every_index() {
        let mut buf: SequenceBuffer<u8> = SequenceBuffer::new();
        assert_eq!(buf.get(0), Err(SequenceError::IndexOutOfRange { index: 0, len: 0 }));
        assert!(buf.remove_at(0).is_err());
    }

    #[test]
    fn test_buffer_get_mut_writes_in_place() {
        let mut buf: SequenceBuffer<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        buf.get_mut(0).unwrap().push('!');
        assert_eq!(buf[0], "a!");
        buf[1] = "z".to_string();
        assert_eq!(buf.get(1).map(String::as_str), Ok("z"));
    }

    #[test]
    #[should_panic]
    fn test_buffer_index_operator_panics_past_len() {
        let buf: SequenceBuffer<i32> = (0..3).collect();
        let _ = buf[3];
    }

    #[test]
    fn test_buffer_clone_keeps_capacity_and_contents() {
        let mut buf: SequenceBuffer<i32> = (0..11).collect();
        let copy = buf.clone();
        assert_eq!(copy.capacity(), 20);
        assert_eq!(copy, buf);

        buf.set(0, -1).unwrap();
        assert_ne!(copy, buf);
    }

    #[test]
    fn test_buffer_eq_ignores_capacity() {
        let mut a = SequenceBuffer::with_capacity(2);
        let mut b = SequenceBuffer::with_capacity(64);
        a.extend([1, 2, 3]);
        b.extend([1, 2, 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_buffer_debug_and_iter() {
        let buf: SequenceBuffer<i32> = (1..=3).collect();
        assert_eq!(format!("{buf:?}"), "[1, 2, 3]");
        let total: i32 = (&buf).into_iter().sum();
        assert_eq!(total, 6);
        assert_eq!(buf.iter().rev().next(), Some(&3));
    }

    #[test]
    fn test_buffer_drop_releases_every_element_once() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        {
            let mut buf = SequenceBuffer::with_capacity(2);
            for _ in 0..9 {
                buf.append(Rc::clone(&tracker));
            }
            assert_eq!(Rc::strong_count(&tracker), 10);
            drop(buf.remove_at(4).unwrap());
            assert_eq!(Rc::strong_count(&tracker), 9);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_buffer_zero_sized_elements_track_len_by_appends() {
        let mut buf: SequenceBuffer<()> = SequenceBuffer::new();
        for _ in 0..25 {
            buf.append(());
        }
        assert_eq!(buf.len(), 25);
        assert_eq!(buf.capacity(), 40);
        assert_eq!(buf.end().position(), 25);
        assert_eq!(buf.reverse_begin().walk().len(), 25);
        assert_eq!(buf.remove_at(24), Ok(()));
        assert_eq!(buf.get(24), Err(SequenceError::IndexOutOfRange { index: 24, len: 24 }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn append_then_get_matches_input(values in prop::collection::vec(any::<i64>(), 0..64)) {
                let mut buf = SequenceBuffer::new();
                for &v in &values {
                    buf.append(v);
                }
                prop_assert_eq!(buf.len(), values.len());
                prop_assert!(buf.capacity() >= buf.len());
                for (i, v) in values.iter().enumerate() {
                    prop_assert_eq!(buf.get(signed_len(i)), Ok(v));
                }
            }

            #[test]
            fn remove_at_shifts_tail(
                values in prop::collection::vec(any::<i32>(), 1..40),
                seed in any::<prop::sample::Index>(),
            ) {
                let i = seed.index(values.len());
                let mut buf: SequenceBuffer<i32> = values.iter().copied().collect();

                prop_assert_eq!(buf.remove_at(signed_len(i)), Ok(values[i]));
                prop_assert_eq!(buf.len(), values.len() - 1);
                prop_assert_eq!(&buf.as_slice()[..i], &values[..i]);
                prop_assert_eq!(&buf.as_slice()[i..], &values[i + 1..]);
            }

            #[test]
            fn out_of_range_leaves_buffer_unchanged(
                values in prop::collection::vec(any::<u8>(), 0..20),
                offset in 0isize..1000,
                negative in any::<bool>(),
            ) {
                let mut buf: SequenceBuffer<u8> = values.iter().copied().collect();
                let index = if negative { -1 - offset } else { signed_len(values.len()) + offset };

                prop_assert!(buf.get(index).is_err());
                prop_assert!(buf.set(index, 0).is_err());
                prop_assert!(buf.remove_at(index).is_err());
                prop_assert_eq!(buf.as_slice(), values.as_slice());
            }
        }
    }
}
