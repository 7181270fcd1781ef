//! Owned, uninitialized storage blocks backing a [`SeqVec`](crate::SeqVec).
//!
//! `RawBuf<T>` only manages memory: it allocates a block large enough for
//! `capacity` values of `T` and releases it on drop, using the layout it was
//! allocated with. It never constructs or drops elements; tracking which slots
//! hold live values is the job of the owning container.

use std::{
    alloc::{self, Layout},
    fmt,
    marker::PhantomData,
    ptr::NonNull,
    sync::atomic::{AtomicU64, Ordering},
};

use seqvec_common::{Result, error::Error};

/// Identity of a single storage block.
///
/// A fresh id is drawn for every allocated block, so two containers never share
/// an id and a container's id changes whenever its storage is reallocated.
/// Cursors carry the id of the block they were issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BufferId(u64);

impl BufferId {
    /// The id carried by default-constructed cursors; never assigned to a block.
    pub const NONE: BufferId = BufferId(0);

    fn next() -> BufferId {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        BufferId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<none>")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// A contiguous block of uninitialized memory with room for `capacity` values of `T`.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    capacity: usize,
    /// Layout the block was allocated with; a zero size means nothing was allocated.
    layout: Layout,
    id: BufferId,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// Allocates a block for `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if the byte size of the block overflows `isize::MAX`; aborts via
    /// [`alloc::handle_alloc_error`] if the allocator refuses the request.
    pub fn allocate(capacity: usize) -> RawBuf<T> {
        let layout = Layout::array::<T>(capacity).expect("capacity overflow");
        let ptr =
            Self::allocate_layout(layout).unwrap_or_else(|| alloc::handle_alloc_error(layout));
        Self::from_parts(ptr, capacity, layout)
    }

    /// Allocates a block for `capacity` values, reporting failures as errors.
    pub fn try_allocate(capacity: usize) -> Result<RawBuf<T>> {
        let layout = Layout::array::<T>(capacity).map_err(|_| Error::capacity_overflow())?;
        let ptr =
            Self::allocate_layout(layout).ok_or_else(|| Error::allocation_failed(layout.size()))?;
        Ok(Self::from_parts(ptr, capacity, layout))
    }

    /// Pointer to the first slot. Dangling (but aligned) for zero-sized layouts.
    #[inline]
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Moves `count` values from the front of `src` into the front of `self`.
    ///
    /// # Safety
    ///
    /// The first `count` slots of `src` must hold initialized values and
    /// `count` must not exceed the capacity of either block. After the call
    /// those values are owned by `self`; `src` must treat its slots as
    /// uninitialized.
    pub unsafe fn move_from(&mut self, src: &RawBuf<T>, count: usize) {
        debug_assert!(count <= src.capacity && count <= self.capacity);
        unsafe {
            std::ptr::copy_nonoverlapping(src.ptr(), self.ptr(), count);
        }
    }

    fn allocate_layout(layout: Layout) -> Option<NonNull<T>> {
        if layout.size() == 0 {
            return Some(NonNull::dangling());
        }
        NonNull::new(unsafe { alloc::alloc(layout) } as *mut T)
    }

    fn from_parts(ptr: NonNull<T>, capacity: usize, layout: Layout) -> RawBuf<T> {
        RawBuf {
            ptr,
            capacity,
            layout,
            id: BufferId::next(),
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout) }
        }
    }
}

impl<T> fmt::Debug for RawBuf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuf")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .finish()
    }
}

// The block is uniquely owned; sharing it is as safe as sharing the `T`s in it.
unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}
