//! Position cursors over a [`SeqVec`].
//!
//! A cursor is a plain `(buffer id, offset)` pair. It borrows nothing and owns
//! nothing: element access always goes through the container, which checks that
//! the cursor was issued against its current storage block. Any reallocation of
//! the container (growth, reassignment) gives the container a new
//! [`BufferId`], so cursors issued before it become stale and are rejected.
//!
//! Two variants exist. [`Cursor`] may be used for mutable access through
//! [`SeqVec::get_at_mut`] and for insertion and removal; [`ConstCursor`] is
//! read-only. Every `Cursor` converts into a `ConstCursor`, and cursors of
//! either variant compare equal when their ids and offsets match.
//!
//! Arithmetic never validates the resulting offset. A cursor may point before
//! the beginning or past the end; that only becomes an error when it is used to
//! reach an element.

use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use seqvec_common::{Result, error::Error};

use crate::{BufferId, SeqVec};

macro_rules! define_cursor {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T> {
            id: BufferId,
            offset: isize,
            _marker: PhantomData<fn() -> T>,
        }

        impl<T> $name<T> {
            /// Creates a cursor at `offset` within the buffer identified by `id`.
            #[inline]
            pub fn new(id: BufferId, offset: isize) -> Self {
                $name {
                    id,
                    offset,
                    _marker: PhantomData,
                }
            }

            /// Id of the storage block this cursor was issued against.
            #[inline]
            pub fn id(&self) -> BufferId {
                self.id
            }

            /// Logical offset of this cursor, counted in elements.
            #[inline]
            pub fn offset(&self) -> isize {
                self.offset
            }

            /// Returns a cursor moved `n` elements toward the end.
            #[inline]
            pub fn advance(self, n: isize) -> Self {
                Self::new(self.id, self.offset.wrapping_add(n))
            }

            /// Returns a cursor moved `n` elements toward the beginning.
            #[inline]
            pub fn retreat(self, n: isize) -> Self {
                Self::new(self.id, self.offset.wrapping_sub(n))
            }

            /// Moves this cursor one element forward and returns it.
            #[inline]
            pub fn increment(&mut self) -> &mut Self {
                *self += 1;
                self
            }

            /// Moves this cursor one element back and returns it.
            #[inline]
            pub fn decrement(&mut self) -> &mut Self {
                *self -= 1;
                self
            }

            /// Moves this cursor one element forward, returning its previous value.
            #[inline]
            pub fn post_increment(&mut self) -> Self {
                let prev = *self;
                *self += 1;
                prev
            }

            /// Moves this cursor one element back, returning its previous value.
            #[inline]
            pub fn post_decrement(&mut self) -> Self {
                let prev = *self;
                *self -= 1;
                prev
            }

            /// Signed number of elements from `origin` to `self` (`self - origin`).
            ///
            /// # Errors
            ///
            /// Returns `InvalidCursor` if the two cursors were issued against
            /// different buffers, either of distinct containers or of the same
            /// container across a reallocation.
            pub fn offset_from(&self, origin: impl Into<ConstCursor<T>>) -> Result<isize> {
                let origin = origin.into();
                check_same_buffer(self.id, origin.id())?;
                Ok(self.offset.wrapping_sub(origin.offset()))
            }

            /// Signed number of elements from `self` to `target` (`target - self`).
            ///
            /// Fails under the same conditions as [`offset_from`](Self::offset_from).
            pub fn distance_to(&self, target: impl Into<ConstCursor<T>>) -> Result<isize> {
                let target = target.into();
                check_same_buffer(self.id, target.id())?;
                Ok(target.offset().wrapping_sub(self.offset))
            }

            /// Returns the element this cursor points at.
            ///
            /// # Errors
            ///
            /// `InvalidCursor` if the cursor is not live for `vec`,
            /// `IndexOutOfBounds` if the offset lies outside `[0, len)`.
            pub fn get(self, vec: &SeqVec<T>) -> Result<&T> {
                vec.get_at(self)
            }
        }

        impl<T> Clone for $name<T> {
            #[inline]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> Default for $name<T> {
            /// A sentinel cursor that refers to no buffer.
            fn default() -> Self {
                Self::new(BufferId::NONE, 0)
            }
        }

        impl<T> Eq for $name<T> {}

        impl<T> Hash for $name<T> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
                self.offset.hash(state);
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("id", &self.id)
                    .field("offset", &self.offset)
                    .finish()
            }
        }

        impl<T> Add<isize> for $name<T> {
            type Output = Self;

            #[inline]
            fn add(self, n: isize) -> Self {
                self.advance(n)
            }
        }

        impl<T> Sub<isize> for $name<T> {
            type Output = Self;

            #[inline]
            fn sub(self, n: isize) -> Self {
                self.retreat(n)
            }
        }

        impl<T> AddAssign<isize> for $name<T> {
            #[inline]
            fn add_assign(&mut self, n: isize) {
                self.offset = self.offset.wrapping_add(n);
            }
        }

        impl<T> SubAssign<isize> for $name<T> {
            #[inline]
            fn sub_assign(&mut self, n: isize) {
                self.offset = self.offset.wrapping_sub(n);
            }
        }
    };
}

macro_rules! impl_cursor_eq {
    ($lhs:ident, $rhs:ident) => {
        impl<T> PartialEq<$rhs<T>> for $lhs<T> {
            #[inline]
            fn eq(&self, other: &$rhs<T>) -> bool {
                self.id() == other.id() && self.offset() == other.offset()
            }
        }
    };
}

define_cursor!(
    /// A cursor that permits mutable access, insertion and removal through
    /// the container it was issued by.
    Cursor
);

define_cursor!(
    /// A read-only cursor.
    ConstCursor
);

impl_cursor_eq!(Cursor, Cursor);
impl_cursor_eq!(Cursor, ConstCursor);
impl_cursor_eq!(ConstCursor, Cursor);
impl_cursor_eq!(ConstCursor, ConstCursor);

impl<T> Cursor<T> {
    /// Returns the element this cursor points at, mutably.
    ///
    /// Fails under the same conditions as [`get`](Self::get).
    pub fn get_mut(self, vec: &mut SeqVec<T>) -> Result<&mut T> {
        vec.get_at_mut(self)
    }

    /// Read-only view of this cursor.
    #[inline]
    pub fn as_const(self) -> ConstCursor<T> {
        self.into()
    }
}

impl<T> From<Cursor<T>> for ConstCursor<T> {
    #[inline]
    fn from(cursor: Cursor<T>) -> Self {
        ConstCursor::new(cursor.id(), cursor.offset())
    }
}

fn check_same_buffer(lhs: BufferId, rhs: BufferId) -> Result<()> {
    if lhs == rhs {
        Ok(())
    } else {
        Err(Error::invalid_cursor(format!(
            "cursors belong to different buffers ({lhs} and {rhs})"
        )))
    }
}
