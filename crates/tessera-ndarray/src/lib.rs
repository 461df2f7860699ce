//! Dense N-dimensional arrays with NumPy `.npy` load and save.
//!
//! [`NdArray`] owns one contiguous buffer plus a shape and a memory
//! [`Order`]. The [`npy`] module implements the `.npy` container format
//! (versions 1.0, 2.0 and 3.0 on read; 1.0 or 2.0 on write) for the
//! element types listed in [`DType`], in either byte order.
//!
//! ```
//! use tessera_ndarray::{NdArray, Order};
//!
//! let a = NdArray::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], &[2, 2], Order::RowMajor).unwrap();
//! let mut bytes = Vec::new();
//! a.write_to(&mut bytes).unwrap();
//! let b = NdArray::<f32>::read_from(bytes.as_slice()).unwrap();
//! assert_eq!(a, b);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod dtype;
pub mod error;
pub mod ndarray;
pub mod npy;
pub mod shape;

pub use config::NpyConfig;
pub use dtype::{ByteOrder, Complex, DType, Element};
pub use error::NdError;
pub use ndarray::{NdArray, Order};
pub use npy::{read_npy, write_npy, write_npy_aligned, NpyData, NpyHeader};
pub use shape::Shape;
