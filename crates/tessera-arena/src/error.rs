//! Arena-specific error types.
//!
//! Exhaustion of an existing arena is reported as `None` by the allocation
//! methods. The variants here only cover failing to create the backing
//! buffer in the first place.

use std::error::Error;
use std::fmt;

/// Errors that can occur while constructing a heap-backed arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The requested capacity cannot be described as an allocation layout
    /// (it exceeds `isize::MAX` once rounded up to the alignment).
    LayoutOverflow {
        /// Number of bytes requested.
        capacity: usize,
    },
    /// The global allocator could not provide the buffer.
    OutOfMemory {
        /// Number of bytes requested.
        capacity: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayoutOverflow { capacity } => {
                write!(f, "arena capacity {capacity} bytes overflows an allocation layout")
            }
            Self::OutOfMemory { capacity } => {
                write!(f, "out of memory allocating {capacity} byte arena buffer")
            }
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_capacity() {
        let err = ArenaError::OutOfMemory { capacity: 4096 };
        assert!(err.to_string().contains("4096"));
        let err = ArenaError::LayoutOverflow { capacity: usize::MAX };
        assert!(err.to_string().contains("overflows"));
    }
}
