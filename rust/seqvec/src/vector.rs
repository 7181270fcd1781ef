use std::{
    fmt,
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr,
};

use seqvec_common::{Result, error::Error, result::verify_not_empty, verify_index, verify_position};

use crate::{
    BufferId,
    cursor::{ConstCursor, Cursor},
    raw_buf::RawBuf,
};

/// A growable, contiguously stored sequence of `T` with cursor-based access.
///
/// `SeqVec` owns a single storage block with room for [`capacity`](Self::capacity)
/// elements, of which the first [`len`](Self::len) are live. When an insertion finds
/// the block full, the capacity doubles: a new block is allocated, the live elements
/// are moved into it in order, and the old block is released.
///
/// Positions can be addressed by index or by [`Cursor`]/[`ConstCursor`]. Cursors are
/// tagged with the [`BufferId`] of the block they were issued against; every
/// reallocation assigns a new id, which makes earlier cursors stale.
pub struct SeqVec<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> SeqVec<T> {
    /// Capacity of a container created by [`SeqVec::new`].
    pub const INITIAL_CAPACITY: usize = 10;

    /// Creates an empty container with [`INITIAL_CAPACITY`](Self::INITIAL_CAPACITY)
    /// slots.
    pub fn new() -> SeqVec<T> {
        Self::with_capacity(Self::INITIAL_CAPACITY)
    }

    /// Creates an empty container with room for at least `capacity` elements.
    ///
    /// A zero capacity is rounded up to one, so that doubling always makes room.
    pub fn with_capacity(capacity: usize) -> SeqVec<T> {
        SeqVec {
            buf: RawBuf::allocate(capacity.max(1)),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the container can hold before it has to reallocate.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Id of the current storage block.
    #[inline]
    pub fn buffer_id(&self) -> BufferId {
        self.buf.id()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        let index = verify_index!(index, self.len);
        Ok(&self.as_slice()[index])
    }

    /// Returns the element at `index`, mutably.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let index = verify_index!(index, self.len);
        Ok(&mut self.as_mut_slice()[index])
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.buf.ptr().add(index) }
    }

    /// Returns the element at `index`, mutably, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.buf.ptr().add(index) }
    }

    /// Returns the first element, or `ContainerIsEmpty`.
    pub fn first(&self) -> Result<&T> {
        verify_not_empty(self.len, "first")?;
        Ok(&self.as_slice()[0])
    }

    pub fn first_mut(&mut self) -> Result<&mut T> {
        verify_not_empty(self.len, "first_mut")?;
        Ok(&mut self.as_mut_slice()[0])
    }

    /// Returns the last element, or `ContainerIsEmpty`.
    pub fn last(&self) -> Result<&T> {
        verify_not_empty(self.len, "last")?;
        Ok(&self.as_slice()[self.len - 1])
    }

    pub fn last_mut(&mut self) -> Result<&mut T> {
        verify_not_empty(self.len, "last_mut")?;
        let last = self.len - 1;
        Ok(&mut self.as_mut_slice()[last])
    }

    /// Cursor at the first slot.
    #[inline]
    pub fn begin(&self) -> Cursor<T> {
        Cursor::new(self.buf.id(), 0)
    }

    /// Cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<T> {
        Cursor::new(self.buf.id(), self.len as isize)
    }

    #[inline]
    pub fn cbegin(&self) -> ConstCursor<T> {
        self.begin().into()
    }

    #[inline]
    pub fn cend(&self) -> ConstCursor<T> {
        self.end().into()
    }

    /// Returns `true` if `cursor` was issued against the current storage block.
    #[inline]
    pub fn is_live(&self, cursor: impl Into<ConstCursor<T>>) -> bool {
        cursor.into().id() == self.buf.id()
    }

    /// Returns the element `cursor` points at.
    ///
    /// # Errors
    ///
    /// `InvalidCursor` if the cursor is stale or was issued by another container,
    /// `IndexOutOfBounds` if its offset lies outside `[0, len)`.
    pub fn get_at(&self, cursor: impl Into<ConstCursor<T>>) -> Result<&T> {
        let cursor = cursor.into();
        self.verify_live(cursor.id())?;
        let index = verify_index!(cursor.offset(), self.len);
        Ok(&self.as_slice()[index])
    }

    /// Returns the element `cursor` points at, mutably.
    ///
    /// Fails under the same conditions as [`get_at`](Self::get_at).
    pub fn get_at_mut(&mut self, cursor: Cursor<T>) -> Result<&mut T> {
        self.verify_live(cursor.id())?;
        let index = verify_index!(cursor.offset(), self.len);
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Returns the element `cursor` points at, with no checks at all.
    ///
    /// # Safety
    ///
    /// `cursor` must be live for this container and its offset must lie in
    /// `[0, len)`.
    #[inline]
    pub unsafe fn get_at_unchecked(&self, cursor: impl Into<ConstCursor<T>>) -> &T {
        let cursor = cursor.into();
        debug_assert!(self.is_live(cursor));
        unsafe { &*self.buf.ptr().offset(cursor.offset()) }
    }

    /// Mutable counterpart of [`get_at_unchecked`](Self::get_at_unchecked).
    ///
    /// # Safety
    ///
    /// Same as [`get_at_unchecked`](Self::get_at_unchecked).
    #[inline]
    pub unsafe fn get_at_unchecked_mut(&mut self, cursor: Cursor<T>) -> &mut T {
        debug_assert!(self.is_live(cursor));
        unsafe { &mut *self.buf.ptr().offset(cursor.offset()) }
    }

    /// Drops every element. Capacity and buffer id are kept, so cursors stay live.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), len));
        }
    }

    /// Inserts `value` immediately before the slot `cursor` points at and returns
    /// a cursor to the inserted element.
    ///
    /// The returned cursor carries the current buffer id, which differs from the
    /// id of `cursor` if the insertion had to grow the container.
    ///
    /// # Errors
    ///
    /// `InvalidCursor` if the cursor is not live, `IndexOutOfBounds` if its offset
    /// lies outside `[0, len]`. Nothing is modified on error.
    pub fn insert_before(&mut self, cursor: Cursor<T>, value: T) -> Result<Cursor<T>> {
        self.verify_live(cursor.id())?;
        let index = verify_position!(cursor.offset(), self.len);
        Ok(self.insert_unchecked(index, value))
    }

    /// Inserts `value` so that it ends up at `index`; `index == len` appends.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index > len`.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<Cursor<T>> {
        let index = verify_position!(index, self.len);
        Ok(self.insert_unchecked(index, value))
    }

    /// Drops the element `cursor` points at and closes the gap.
    ///
    /// Returns a cursor to the element that moved into the vacated slot, which is
    /// [`end`](Self::end) if the last element was removed.
    ///
    /// # Errors
    ///
    /// `InvalidCursor` if the cursor is not live, `IndexOutOfBounds` if its offset
    /// lies outside `[0, len)`.
    pub fn remove(&mut self, cursor: Cursor<T>) -> Result<Cursor<T>> {
        self.verify_live(cursor.id())?;
        let index = verify_index!(cursor.offset(), self.len);
        drop(self.remove_unchecked(index));
        Ok(cursor)
    }

    /// Drops the element at `index` and closes the gap; see [`remove`](Self::remove).
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<Cursor<T>> {
        let index = verify_index!(index, self.len);
        drop(self.remove_unchecked(index));
        Ok(Cursor::new(self.buf.id(), index as isize))
    }

    /// Appends `value`, doubling the capacity if the container is full.
    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        unsafe { self.buf.ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Removes the last element and returns it, or `ContainerIsEmpty`.
    pub fn pop_back(&mut self) -> Result<T> {
        verify_not_empty(self.len, "pop_back")?;
        self.len -= 1;
        Ok(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Makes room for at least `additional` more elements.
    ///
    /// The capacity at least doubles when the container has to grow. On error
    /// the container is left untouched.
    ///
    /// # Errors
    ///
    /// `CapacityOverflow` if the required capacity is not representable,
    /// `AllocationFailed` if the allocator refuses the block.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or_else(Error::capacity_overflow)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let new_capacity = self.capacity().saturating_mul(2).max(required);
        let buf = RawBuf::try_allocate(new_capacity)?;
        self.relocate(buf);
        Ok(())
    }

    /// Replaces the contents with a deep copy of `source`, adopting its capacity.
    ///
    /// The copy is built in a new block before the current elements are dropped,
    /// so a panicking `clone` leaves `self` unchanged.
    pub fn assign(&mut self, source: &SeqVec<T>)
    where
        T: Clone,
    {
        *self = source.deep_copy();
    }
}

impl<T> SeqVec<T> {
    fn verify_live(&self, id: BufferId) -> Result<()> {
        if id == self.buf.id() {
            return Ok(());
        }
        let message = if id.is_none() {
            "cursor does not refer to any buffer".to_string()
        } else {
            format!(
                "cursor refers to buffer {id}, the container uses buffer {}",
                self.buf.id()
            )
        };
        Err(Error::invalid_cursor(message))
    }

    /// `index` must be within `[0, len]`.
    fn insert_unchecked(&mut self, index: usize, value: T) -> Cursor<T> {
        debug_assert!(index <= self.len);
        self.grow_if_full();
        unsafe {
            let slot = self.buf.ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(value);
        }
        self.len += 1;
        Cursor::new(self.buf.id(), index as isize)
    }

    /// `index` must be within `[0, len)`.
    fn remove_unchecked(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        unsafe {
            let slot = self.buf.ptr().add(index);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    #[inline]
    fn grow_if_full(&mut self) {
        if self.len == self.buf.capacity() {
            self.grow();
        }
    }

    #[cold]
    fn grow(&mut self) {
        let new_capacity = self
            .buf
            .capacity()
            .checked_mul(2)
            .expect("capacity overflow");
        self.relocate(RawBuf::allocate(new_capacity));
    }

    /// Moves the live elements into `buf` and releases the current block.
    fn relocate(&mut self, mut buf: RawBuf<T>) {
        debug_assert!(buf.capacity() >= self.len);
        log::trace!(
            "relocating {} elements: buffer {} (capacity {}) -> {} (capacity {})",
            self.len,
            self.buf.id(),
            self.buf.capacity(),
            buf.id(),
            buf.capacity()
        );
        unsafe { buf.move_from(&self.buf, self.len) };
        // The old block's slots were moved out bitwise; dropping it only frees memory.
        drop(std::mem::replace(&mut self.buf, buf));
    }

    fn deep_copy(&self) -> SeqVec<T>
    where
        T: Clone,
    {
        let mut copy: SeqVec<T> = SeqVec {
            buf: RawBuf::allocate(self.capacity()),
            len: 0,
        };
        for value in self.iter() {
            unsafe { copy.buf.ptr().add(copy.len).write(value.clone()) };
            copy.len += 1;
        }
        log::debug!(
            "copied {} elements from buffer {} into buffer {}",
            self.len,
            self.buf.id(),
            copy.buf.id()
        );
        copy
    }
}

impl<T> Drop for SeqVec<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len));
        }
    }
}

impl<T> Default for SeqVec<T> {
    fn default() -> Self {
        SeqVec::new()
    }
}

impl<T: Clone> Clone for SeqVec<T> {
    fn clone(&self) -> Self {
        self.deep_copy()
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<T> Deref for SeqVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SeqVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for SeqVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    fn index(&self, index: usize) -> &T {
        self.at(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T> IndexMut<usize> for SeqVec<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T> Index<Cursor<T>> for SeqVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the cursor is not live or out of range.
    #[inline]
    fn index(&self, cursor: Cursor<T>) -> &T {
        self.get_at(cursor).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T> Index<ConstCursor<T>> for SeqVec<T> {
    type Output = T;

    #[inline]
    fn index(&self, cursor: ConstCursor<T>) -> &T {
        self.get_at(cursor).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T> IndexMut<Cursor<T>> for SeqVec<T> {
    #[inline]
    fn index_mut(&mut self, cursor: Cursor<T>) -> &mut T {
        self.get_at_mut(cursor).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T: fmt::Debug> fmt::Debug for SeqVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SeqVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SeqVec<T> {}

impl<T> FromIterator<T> for SeqVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = SeqVec::new();
        vec.extend(iter);
        vec
    }
}

impl<T> Extend<T> for SeqVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> From<Vec<T>> for SeqVec<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for SeqVec<T> {
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a SeqVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SeqVec<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
