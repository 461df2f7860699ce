//! Errors raised by [`StaticVec`](crate::StaticVec) operations.

use std::error::Error;
use std::fmt;

/// Errors from checked [`StaticVec`](crate::StaticVec) operations.
///
/// Both indicate a caller bug rather than an expected runtime condition;
/// the vector is never modified by an operation that returns one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VecError {
    /// The operation would grow the vector past its fixed capacity.
    CapacityExceeded {
        /// Number of elements the operation tried to add.
        requested: usize,
        /// Length at the time of the call.
        len: usize,
        /// Fixed capacity of the vector.
        capacity: usize,
    },
    /// An index or range bound lies outside the live elements.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// Length at the time of the call.
        len: usize,
    },
}

impl fmt::Display for VecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                len,
                capacity,
            } => {
                write!(
                    f,
                    "static vector capacity exceeded: cannot add {requested} to {len} of {capacity} elements"
                )
            }
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for static vector of length {len}")
            }
        }
    }
}

impl Error for VecError {}
