//! Array shapes.

use smallvec::SmallVec;

use crate::error::NdError;

/// Extents of each axis. Inline up to rank 4.
pub type Shape = SmallVec<[usize; 4]>;

/// Number of elements a shape describes.
///
/// Fails on a shape with no axes or whose product overflows.
pub fn element_count(shape: &[usize]) -> Result<usize, NdError> {
    if shape.is_empty() {
        return Err(NdError::EmptyShape);
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| NdError::ShapeOverflow {
            shape: shape.to_vec(),
        })
}
