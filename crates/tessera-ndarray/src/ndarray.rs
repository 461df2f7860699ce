//! The [`NdArray`] container.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::ops::{Index, IndexMut};
use std::path::Path;

use log::debug;

use crate::config::NpyConfig;
use crate::dtype::Element;
use crate::error::NdError;
use crate::npy::{self, NpyHeader};
use crate::shape::{self, Shape};

/// Memory layout of a multi-dimensional array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// C order: the last index varies fastest.
    #[default]
    RowMajor,
    /// Fortran order: the first index varies fastest.
    ColumnMajor,
}

impl Order {
    /// Whether this is Fortran (column-major) order.
    pub fn is_fortran(self) -> bool {
        self == Order::ColumnMajor
    }

    fn from_fortran(fortran: bool) -> Self {
        if fortran {
            Order::ColumnMajor
        } else {
            Order::RowMajor
        }
    }
}

/// A dense N-dimensional array stored in one contiguous buffer.
///
/// The shape always has at least one axis and its product equals the
/// number of stored elements.
///
/// Two ways to index:
///
/// - `array[[i, j]]` or `array[&idx[..]]`: fast path. The rank is not
///   checked and a per-axis overrun is only caught if it lands past the
///   end of the buffer.
/// - [`at`](NdArray::at) / [`linear_index`](NdArray::linear_index): checks
///   the rank and every axis, returning an error.
///
/// # Example
///
/// ```
/// use tessera_ndarray::{NdArray, Order};
///
/// let mut a = NdArray::<f64>::new(&[2, 3], Order::RowMajor).unwrap();
/// a[[1, 2]] = 5.0;
/// assert_eq!(a.as_slice()[5], 5.0);
/// assert!(a.at(&[2, 0]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray<T> {
    data: Vec<T>,
    shape: Shape,
    order: Order,
}

impl<T: Clone + Default> NdArray<T> {
    /// A default-filled array of the given shape.
    pub fn new(shape: &[usize], order: Order) -> Result<Self, NdError> {
        let count = shape::element_count(shape)?;
        Ok(Self {
            data: vec![T::default(); count],
            shape: Shape::from_slice(shape),
            order,
        })
    }

    /// Change the shape, growing with default values or truncating the
    /// buffer as needed. Existing elements keep their linear positions.
    pub fn reallocate(&mut self, shape: &[usize]) -> Result<(), NdError> {
        let count = shape::element_count(shape)?;
        self.data.resize(count, T::default());
        self.shape = Shape::from_slice(shape);
        Ok(())
    }
}

impl<T> NdArray<T> {
    /// Wrap `data` with the given shape.
    ///
    /// Fails unless the shape's element count equals `data.len()`.
    pub fn from_vec(data: Vec<T>, shape: &[usize], order: Order) -> Result<Self, NdError> {
        let count = shape::element_count(shape)?;
        if count != data.len() {
            return Err(NdError::ShapeMismatch {
                expected: count,
                found: data.len(),
            });
        }
        Ok(Self {
            data,
            shape: Shape::from_slice(shape),
            order,
        })
    }

    /// Extent of each axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements (some axis has extent zero).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Memory layout.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Checked conversion of a multi-index to a buffer offset.
    pub fn linear_index(&self, indices: &[usize]) -> Result<usize, NdError> {
        if indices.len() != self.shape.len() {
            return Err(NdError::RankMismatch {
                expected: self.shape.len(),
                found: indices.len(),
            });
        }
        for (axis, (&index, &extent)) in indices.iter().zip(self.shape.iter()).enumerate() {
            if index >= extent {
                return Err(NdError::IndexOutOfBounds {
                    axis,
                    index,
                    extent,
                });
            }
        }
        Ok(self.offset(indices))
    }

    /// Buffer offset of a multi-index, without any checks.
    ///
    /// Extra indices are ignored; missing ones read as zero.
    fn offset(&self, indices: &[usize]) -> usize {
        let step = |acc: usize, axis: usize| {
            acc * self.shape[axis] + indices.get(axis).copied().unwrap_or(0)
        };
        let rank = self.shape.len();
        match self.order {
            Order::RowMajor => (0..rank).fold(0, step),
            Order::ColumnMajor => (0..rank).rev().fold(0, step),
        }
    }

    /// Checked element access.
    pub fn at(&self, indices: &[usize]) -> Result<&T, NdError> {
        let i = self.linear_index(indices)?;
        Ok(&self.data[i])
    }

    /// Checked mutable element access.
    pub fn at_mut(&mut self, indices: &[usize]) -> Result<&mut T, NdError> {
        let i = self.linear_index(indices)?;
        Ok(&mut self.data[i])
    }

    /// Reinterpret the buffer under a new shape with the same element
    /// count. The data is not moved.
    pub fn reshape(&mut self, shape: &[usize]) -> Result<(), NdError> {
        let count = shape::element_count(shape)?;
        if count != self.data.len() {
            return Err(NdError::ShapeMismatch {
                expected: count,
                found: self.data.len(),
            });
        }
        self.shape = Shape::from_slice(shape);
        Ok(())
    }

    /// The elements in memory order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The elements in memory order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over the elements in memory order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate mutably over the elements in memory order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Give up the shape and return the buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> NdArray<T> {
    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Element> NdArray<T> {
    /// Header describing this array, with data written in `config`'s byte
    /// order.
    pub fn npy_header(&self, config: &NpyConfig) -> NpyHeader {
        NpyHeader {
            dtype: T::DTYPE,
            byte_order: config.byte_order,
            fortran_order: self.order.is_fortran(),
            shape: self.shape.clone(),
        }
    }

    /// Decode an array from a `.npy` stream.
    ///
    /// Fails with [`NdError::DTypeMismatch`] if the stream holds a
    /// different element type.
    pub fn read_from<R: Read>(reader: R) -> Result<Self, NdError> {
        let data = npy::read_npy(reader)?;
        let order = Order::from_fortran(data.header.fortran_order);
        let shape = data.header.shape.clone();
        Self::from_vec(data.into_vec()?, &shape, order)
    }

    /// Encode the array as a `.npy` stream with the default config.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), NdError> {
        self.write_to_with(writer, &NpyConfig::default())
    }

    /// Encode the array as a `.npy` stream.
    pub fn write_to_with<W: Write>(&self, writer: W, config: &NpyConfig) -> Result<(), NdError> {
        config.validate()?;
        let header = self.npy_header(config);
        npy::write_npy_aligned(
            writer,
            &header,
            bytemuck::cast_slice(&self.data),
            config.alignment,
        )
    }

    /// Load an array from a `.npy` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NdError> {
        let path = path.as_ref();
        debug!("loading {} array from {}", T::DTYPE, path.display());
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Save the array to a `.npy` file with the default config.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NdError> {
        self.save_with(path, &NpyConfig::default())
    }

    /// Save the array to a `.npy` file.
    pub fn save_with(&self, path: impl AsRef<Path>, config: &NpyConfig) -> Result<(), NdError> {
        let path = path.as_ref();
        debug!(
            "saving {} array of shape {:?} to {}",
            T::DTYPE,
            self.shape(),
            path.display()
        );
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to_with(&mut writer, config)?;
        writer.flush()?;
        Ok(())
    }
}

impl<T> Index<&[usize]> for NdArray<T> {
    type Output = T;

    fn index(&self, indices: &[usize]) -> &T {
        &self.data[self.offset(indices)]
    }
}

impl<T> IndexMut<&[usize]> for NdArray<T> {
    fn index_mut(&mut self, indices: &[usize]) -> &mut T {
        let i = self.offset(indices);
        &mut self.data[i]
    }
}

impl<T, const K: usize> Index<[usize; K]> for NdArray<T> {
    type Output = T;

    fn index(&self, indices: [usize; K]) -> &T {
        &self[&indices[..]]
    }
}

impl<T, const K: usize> IndexMut<[usize; K]> for NdArray<T> {
    fn index_mut(&mut self, indices: [usize; K]) -> &mut T {
        &mut self[&indices[..]]
    }
}

impl<'a, T> IntoIterator for &'a NdArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut NdArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{ByteOrder, Complex, DType};

    fn counting(shape: &[usize], order: Order) -> NdArray<i32> {
        let n = shape.iter().product::<usize>() as i32;
        NdArray::from_vec((0..n).collect(), shape, order).unwrap()
    }

    #[test]
    fn new_fills_with_default() {
        let a = NdArray::<f64>::new(&[2, 3], Order::RowMajor).unwrap();
        assert_eq!(a.len(), 6);
        assert_eq!(a.shape(), &[2, 3]);
        assert!(a.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn empty_shape_is_rejected() {
        assert!(matches!(
            NdArray::<f64>::new(&[], Order::RowMajor),
            Err(NdError::EmptyShape)
        ));
        assert!(matches!(
            NdArray::from_vec(vec![1], &[], Order::RowMajor),
            Err(NdError::EmptyShape)
        ));
    }

    #[test]
    fn from_vec_checks_element_count() {
        let err = NdArray::from_vec(vec![1, 2, 3], &[2, 2], Order::RowMajor).unwrap_err();
        assert!(matches!(
            err,
            NdError::ShapeMismatch {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn row_major_last_index_fastest() {
        let a = counting(&[2, 3, 4], Order::RowMajor);
        assert_eq!(a[[0, 0, 1]], 1);
        assert_eq!(a[[0, 1, 0]], 4);
        assert_eq!(a[[1, 0, 0]], 12);
        assert_eq!(a.linear_index(&[1, 2, 3]).unwrap(), 23);
    }

    #[test]
    fn column_major_first_index_fastest() {
        let a = counting(&[2, 3, 4], Order::ColumnMajor);
        assert_eq!(a[[1, 0, 0]], 1);
        assert_eq!(a[[0, 1, 0]], 2);
        assert_eq!(a[[0, 0, 1]], 6);
        assert_eq!(a.linear_index(&[1, 2, 3]).unwrap(), 23);
    }

    #[test]
    fn checked_access_validates_rank_and_every_axis() {
        let mut a = counting(&[2, 3], Order::RowMajor);
        assert!(matches!(
            a.at(&[1]),
            Err(NdError::RankMismatch {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            a.at(&[2, 0]),
            Err(NdError::IndexOutOfBounds {
                axis: 0,
                index: 2,
                extent: 2
            })
        ));
        assert!(matches!(
            a.at(&[0, 3]),
            Err(NdError::IndexOutOfBounds { axis: 1, .. })
        ));
        *a.at_mut(&[1, 1]).unwrap() = 40;
        assert_eq!(*a.at(&[1, 1]).unwrap(), 40);
    }

    #[test]
    fn slice_indexing_matches_array_indexing() {
        let a = counting(&[3, 3], Order::ColumnMajor);
        let idx = vec![2, 1];
        assert_eq!(a[&idx[..]], a[[2, 1]]);
    }

    #[test]
    fn fill_and_iterate() {
        let mut a = NdArray::<u8>::new(&[4], Order::RowMajor).unwrap();
        a.fill(7);
        assert_eq!(a.iter().map(|&x| x as u32).sum::<u32>(), 28);
        for x in &mut a {
            *x += 1;
        }
        assert_eq!(a.as_slice(), &[8, 8, 8, 8]);
    }

    #[test]
    fn reshape_keeps_data() {
        let mut a = counting(&[2, 3], Order::RowMajor);
        a.reshape(&[3, 2]).unwrap();
        assert_eq!(a.shape(), &[3, 2]);
        assert_eq!(a[[2, 1]], 5);
        assert!(a.reshape(&[4, 2]).is_err());
        assert_eq!(a.shape(), &[3, 2]);
    }

    #[test]
    fn reallocate_resizes_buffer() {
        let mut a = counting(&[2, 2], Order::RowMajor);
        a.reallocate(&[3, 2]).unwrap();
        assert_eq!(a.as_slice(), &[0, 1, 2, 3, 0, 0]);
        a.reallocate(&[1]).unwrap();
        assert_eq!(a.as_slice(), &[0]);
        assert!(a.reallocate(&[]).is_err());
    }

    #[test]
    fn stream_round_trip_preserves_order_flag() {
        let a = counting(&[2, 3], Order::ColumnMajor);
        let mut buf = Vec::new();
        a.write_to(&mut buf).unwrap();
        let b = NdArray::<i32>::read_from(buf.as_slice()).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.order(), Order::ColumnMajor);
    }

    #[test]
    fn big_endian_config_round_trips() {
        let a = NdArray::from_vec(vec![1.5f64, -2.25, 1e300], &[3], Order::RowMajor).unwrap();
        let config = NpyConfig::default().with_byte_order(ByteOrder::Big);
        let mut buf = Vec::new();
        a.write_to_with(&mut buf, &config).unwrap();
        let tail = &buf[buf.len() - 8..];
        assert_eq!(tail, 1e300f64.to_be_bytes());
        assert_eq!(NdArray::<f64>::read_from(buf.as_slice()).unwrap(), a);
    }

    #[test]
    fn complex_round_trip() {
        let data = vec![Complex::new(1.0f32, -1.0), Complex::new(0.5, 2.0)];
        let a = NdArray::from_vec(data, &[2], Order::RowMajor).unwrap();
        let mut buf = Vec::new();
        a.write_to_with(&mut buf, &NpyConfig::default().with_byte_order(ByteOrder::Big))
            .unwrap();
        let b = NdArray::<Complex<f32>>::read_from(buf.as_slice()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reading_wrong_element_type_fails() {
        let a = counting(&[2], Order::RowMajor);
        let mut buf = Vec::new();
        a.write_to(&mut buf).unwrap();
        assert!(matches!(
            NdArray::<f32>::read_from(buf.as_slice()),
            Err(NdError::DTypeMismatch {
                expected: DType::F32,
                found: DType::I32
            })
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_writing() {
        let a = counting(&[2], Order::RowMajor);
        let config = NpyConfig {
            alignment: 3,
            byte_order: ByteOrder::Little,
        };
        let mut buf = Vec::new();
        assert!(matches!(
            a.write_to_with(&mut buf, &config),
            Err(NdError::InvalidConfig { .. })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.npy");
        let a = counting(&[3, 4], Order::RowMajor);
        a.save(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!((bytes.len() - a.len() * 4) % 64, 0);
        assert_eq!(NdArray::<i32>::load(&path).unwrap(), a);
    }

    #[test]
    fn loading_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = NdArray::<i32>::load(dir.path().join("absent.npy"));
        assert!(matches!(result, Err(NdError::Io(_))));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn checked_index_agrees_with_fast_path(
                shape in proptest::collection::vec(1usize..5, 1..5),
                column_major in any::<bool>(),
                seed in any::<u64>(),
            ) {
                let order = if column_major { Order::ColumnMajor } else { Order::RowMajor };
                let a = counting(&shape, order);
                let idx: Vec<usize> = shape
                    .iter()
                    .enumerate()
                    .map(|(k, &n)| (seed.rotate_left(k as u32 * 7) as usize) % n)
                    .collect();
                let linear = a.linear_index(&idx).unwrap();
                prop_assert!(linear < a.len());
                prop_assert_eq!(a[&idx[..]], linear as i32);
            }

            #[test]
            fn every_linear_offset_is_hit_once(
                shape in proptest::collection::vec(1usize..4, 1..4),
                column_major in any::<bool>(),
            ) {
                let order = if column_major { Order::ColumnMajor } else { Order::RowMajor };
                let a = counting(&shape, order);
                let mut seen = vec![false; a.len()];
                let mut idx = vec![0usize; shape.len()];
                loop {
                    let i = a.linear_index(&idx).unwrap();
                    prop_assert!(!seen[i]);
                    seen[i] = true;
                    // Odometer increment over the multi-index.
                    let mut axis = 0;
                    while axis < shape.len() {
                        idx[axis] += 1;
                        if idx[axis] < shape[axis] {
                            break;
                        }
                        idx[axis] = 0;
                        axis += 1;
                    }
                    if axis == shape.len() {
                        break;
                    }
                }
                prop_assert!(seen.iter().all(|&s| s));
            }
        }
    }
}
