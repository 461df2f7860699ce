//! Benchmark fixtures for the Tessera building blocks.
//!
//! - [`sample_grid`]: a deterministic `f64` array of a given shape
//! - [`encoded_grid`]: the same array already encoded as `.npy` bytes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessera_ndarray::{ByteOrder, NdArray, NpyConfig, Order};

/// Build a row-major `f64` array whose element `i` is `i * 0.5`.
pub fn sample_grid(shape: &[usize]) -> NdArray<f64> {
    let count = shape.iter().product::<usize>();
    let data = (0..count).map(|i| i as f64 * 0.5).collect();
    NdArray::from_vec(data, shape, Order::RowMajor).unwrap()
}

/// Encode [`sample_grid`] as a `.npy` stream in the given byte order.
pub fn encoded_grid(shape: &[usize], byte_order: ByteOrder) -> Vec<u8> {
    let grid = sample_grid(shape);
    let mut buf = Vec::with_capacity(grid.len() * 8 + 128);
    grid.write_to_with(&mut buf, &NpyConfig::default().with_byte_order(byte_order))
        .unwrap();
    buf
}
