//! A contiguous, growable sequence container with position cursors.
//!
//! [`SeqVec<T>`] stores its elements in a single owned block that doubles in size
//! whenever an insertion finds it full. Elements can be reached by index, through the
//! slice the container dereferences to, or through [`Cursor`]/[`ConstCursor`] values.
//!
//! Cursors are plain `(buffer id, offset)` pairs. They do not borrow the container, so
//! they can be kept across mutations; the container rejects any cursor whose
//! [`BufferId`] no longer matches its current storage block.
//!
//! ```
//! use seqvec::SeqVec;
//!
//! let mut v = SeqVec::new();
//! v.push_back(1);
//! v.push_back(2);
//! v.push_back(3);
//! v.insert_at(1, 9).unwrap();
//! assert_eq!(v.as_slice(), &[1, 9, 2, 3]);
//!
//! let next = v.remove_at(0).unwrap();
//! assert_eq!(v[next], 9);
//! assert_eq!(v.end().offset_from(v.begin()).unwrap(), 3);
//! ```

pub mod cursor;
pub mod raw_buf;
pub mod vector;

pub use cursor::{ConstCursor, Cursor};
pub use raw_buf::BufferId;
pub use vector::SeqVec;

pub use seqvec_common::{Result, error::Error, error::ErrorKind};
