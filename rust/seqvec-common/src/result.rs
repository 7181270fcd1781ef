use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Verifies that `$index` addresses a slot within `[0, $len)`, returning
/// `IndexOutOfBounds` from the enclosing function otherwise.
#[macro_export]
macro_rules! verify_index {
    ($index:expr, $len:expr) => {{
        $crate::result::verify_index($index, $len)?
    }};
}

/// Verifies that `$index` addresses an insertion point within `[0, $len]`.
#[macro_export]
macro_rules! verify_position {
    ($index:expr, $len:expr) => {{
        $crate::result::verify_position($index, $len)?
    }};
}

/// An index or cursor offset that can be checked against a container length.
///
/// Implemented for `usize` container indices and `isize` cursor offsets.
pub trait SlotIndex: Copy {
    /// The value as an in-range `usize`, or `None` if it is negative.
    fn to_slot(self) -> Option<usize>;

    /// The value widened without loss, for error reporting.
    fn widen(self) -> i128;
}

impl SlotIndex for usize {
    #[inline]
    fn to_slot(self) -> Option<usize> {
        Some(self)
    }

    #[inline]
    fn widen(self) -> i128 {
        self as i128
    }
}

impl SlotIndex for isize {
    #[inline]
    fn to_slot(self) -> Option<usize> {
        usize::try_from(self).ok()
    }

    #[inline]
    fn widen(self) -> i128 {
        self as i128
    }
}

/// Checks `index` against `[0, len)` and returns it as `usize`.
#[inline]
pub fn verify_index(index: impl SlotIndex, len: usize) -> Result<usize> {
    match index.to_slot() {
        Some(i) if i < len => Ok(i),
        _ => out_of_bounds(index.widen(), len),
    }
}

/// Checks `index` against `[0, len]` (one-past-the-end allowed) and returns
/// it as `usize`.
#[inline]
pub fn verify_position(index: impl SlotIndex, len: usize) -> Result<usize> {
    match index.to_slot() {
        Some(i) if i <= len => Ok(i),
        _ => out_of_bounds(index.widen(), len),
    }
}

#[inline]
pub fn verify_not_empty(len: usize, operation: &str) -> Result<()> {
    if len != 0 {
        Ok(())
    } else {
        container_is_empty(operation)
    }
}

#[cold]
pub fn out_of_bounds<T>(index: i128, len: usize) -> Result<T> {
    Err(Error::index_out_of_bounds(index, len))
}

#[cold]
pub fn container_is_empty(operation: &str) -> Result<()> {
    Err(Error::container_is_empty(operation))
}
