//! Error types for arrays and the `.npy` codec.

use std::fmt;
use std::io;

use crate::dtype::DType;

/// Errors raised while building, indexing, loading or saving arrays.
#[derive(Debug)]
pub enum NdError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The stream does not start with `\x93NUMPY`.
    InvalidMagic,
    /// The `.npy` format version is not supported.
    UnsupportedVersion {
        /// Major version byte.
        major: u8,
        /// Minor version byte.
        minor: u8,
    },
    /// The header dictionary could not be parsed.
    MalformedHeader {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The `descr` entry names a type this crate does not handle.
    UnknownDType {
        /// The descriptor as found in the header.
        descr: String,
    },
    /// The file holds a different element type than requested.
    DTypeMismatch {
        /// Type the caller asked for.
        expected: DType,
        /// Type recorded in the file.
        found: DType,
    },
    /// The data section ended before every element was read.
    Truncated {
        /// Bytes the header promised.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },
    /// A shape with no axes was supplied.
    EmptyShape,
    /// The product of a shape's extents overflows `usize`.
    ShapeOverflow {
        /// The offending shape.
        shape: Vec<usize>,
    },
    /// A shape's element count does not match the data.
    ShapeMismatch {
        /// Elements implied by the shape.
        expected: usize,
        /// Elements actually present.
        found: usize,
    },
    /// The number of indices differs from the array's rank.
    RankMismatch {
        /// Rank of the array.
        expected: usize,
        /// Number of indices given.
        found: usize,
    },
    /// An index is past the extent of its axis.
    IndexOutOfBounds {
        /// Axis the index applies to.
        axis: usize,
        /// The offending index.
        index: usize,
        /// Extent of that axis.
        extent: usize,
    },
    /// A codec configuration value is invalid.
    InvalidConfig {
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl fmt::Display for NdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"\\x93NUMPY\")"),
            Self::UnsupportedVersion { major, minor } => {
                write!(f, "unsupported .npy format version {major}.{minor}")
            }
            Self::MalformedHeader { detail } => write!(f, "malformed .npy header: {detail}"),
            Self::UnknownDType { descr } => write!(f, "data type '{descr}' is unknown"),
            Self::DTypeMismatch { expected, found } => write!(
                f,
                "element type mismatch: expected {}, file holds {}",
                expected.descr(),
                found.descr()
            ),
            Self::Truncated { expected, found } => {
                write!(f, "data truncated: expected {expected} bytes, found {found}")
            }
            Self::EmptyShape => write!(f, "shape must have at least one axis"),
            Self::ShapeOverflow { shape } => {
                write!(f, "element count of shape {shape:?} overflows usize")
            }
            Self::ShapeMismatch { expected, found } => write!(
                f,
                "shape is incompatible with number of elements: shape needs {expected}, have {found}"
            ),
            Self::RankMismatch { expected, found } => {
                write!(f, "expected {expected} indices, got {found}")
            }
            Self::IndexOutOfBounds {
                axis,
                index,
                extent,
            } => write!(
                f,
                "index {index} out of range for axis {axis} with extent {extent}"
            ),
            Self::InvalidConfig { detail } => write!(f, "invalid codec config: {detail}"),
        }
    }
}

impl std::error::Error for NdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NdError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_errors_keep_their_source() {
        let err = NdError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn messages_name_the_problem() {
        let err = NdError::DTypeMismatch {
            expected: DType::F32,
            found: DType::F64,
        };
        assert_eq!(
            err.to_string(),
            "element type mismatch: expected f4, file holds f8"
        );
        let err = NdError::IndexOutOfBounds {
            axis: 1,
            index: 3,
            extent: 3,
        };
        assert!(err.to_string().contains("axis 1"));
        assert!(NdError::EmptyShape.source().is_none());
    }
}
