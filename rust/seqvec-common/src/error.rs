use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn index_out_of_bounds(index: i128, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfBounds { index, len }.into())
    }

    pub fn container_is_empty(operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::ContainerIsEmpty {
                operation: operation.into(),
            }
            .into(),
        )
    }

    pub fn invalid_cursor(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidCursor {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn capacity_overflow() -> Error {
        Error(ErrorKind::CapacityOverflow.into())
    }

    pub fn allocation_failed(bytes: usize) -> Error {
        Error(ErrorKind::AllocationFailed { bytes }.into())
    }

    /// Returns `true` if this is an `IndexOutOfBounds` error.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexOutOfBounds { .. })
    }

    /// Returns `true` if this is a `ContainerIsEmpty` error.
    pub fn is_container_empty(&self) -> bool {
        matches!(self.kind(), ErrorKind::ContainerIsEmpty { .. })
    }

    /// Returns `true` if this is an `InvalidCursor` error.
    pub fn is_invalid_cursor(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidCursor { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    /// `index` is wide enough to carry both signed cursor offsets and
    /// unsigned container indices unchanged.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: i128, len: usize },

    #[error("{operation} called on an empty container")]
    ContainerIsEmpty { operation: String },

    #[error("invalid cursor: {message}")]
    InvalidCursor { message: String },

    #[error("capacity overflow")]
    CapacityOverflow,

    #[error("failed to allocate {bytes} bytes")]
    AllocationFailed { bytes: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
