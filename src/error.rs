//! Error reporting for value and container operations
//!
//! Every recoverable failure in the crate is returned as an [`Error`].
//! Invariant violations inside the containers are programming errors,
//! not recoverable conditions, and panic instead.

use crate::context::Op;
use crate::value::Kind;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error from a value or container operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value's kind does not support the requested operation
    Unsupported { kind: Kind, op: Op },
    /// An operand or argument was ill-typed or otherwise unusable
    InvalidArgument(&'static str),
    /// Index or slice endpoint past the valid range
    OutOfBounds { index: usize, len: usize },
    /// Table lookup or removal found no matching key
    NotFound,
    /// Literal text does not match the kind's grammar; nothing was consumed
    ParseFailure { kind: Kind, reason: &'static str },
    /// Capacity overflow, or the allocator refused the request
    AllocationFailure,
}

impl Error {
    /// Whether this is an invalid-argument-class failure
    ///
    /// Unsupported operations classify as invalid arguments, so a caller
    /// can probe "can I do this to that value" with a single check.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::Unsupported { .. } | Error::InvalidArgument(_)
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unsupported { kind, op } => {
                write!(f, "{} values do not support {}", kind, op)
            }
            Error::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
            Error::OutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
            Error::NotFound => write!(f, "key not found"),
            Error::ParseFailure { kind, reason } => {
                write!(f, "cannot parse {} literal: {}", kind, reason)
            }
            Error::AllocationFailure => write!(f, "allocation failed"),
        }
    }
}

impl std::error::Error for Error {}
