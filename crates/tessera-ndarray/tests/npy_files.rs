//! Reading and writing `.npy` files laid out the way NumPy writes them.

use tessera_ndarray::{ByteOrder, DType, NdArray, NdError, NpyConfig, Order};

/// A version 1.0 file with NumPy's header spelling, padded to 64 bytes.
fn numpy_style(dict: &str, data: &[u8]) -> Vec<u8> {
    let mut header = dict.as_bytes().to_vec();
    let unpadded = 10 + header.len() + 1;
    header.resize(header.len() + (64 - unpadded % 64) % 64, b' ');
    header.push(b'\n');

    let mut out = b"\x93NUMPY\x01\x00".to_vec();
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(&header);
    out.extend_from_slice(data);
    out
}

#[test]
fn reads_numpy_little_endian_doubles() {
    let data: Vec<u8> = [1.0f64, 2.5, -3.0]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    let bytes = numpy_style(
        "{'descr': '<f8', 'fortran_order': False, 'shape': (3,), }",
        &data,
    );
    let a = NdArray::<f64>::read_from(bytes.as_slice()).unwrap();
    assert_eq!(a.shape(), &[3]);
    assert_eq!(a.as_slice(), &[1.0, 2.5, -3.0]);
}

#[test]
fn reads_numpy_big_endian_fortran_ints() {
    let data: Vec<u8> = (0i16..6).flat_map(|v| v.to_be_bytes()).collect();
    let bytes = numpy_style(
        "{'descr': '>i2', 'fortran_order': True, 'shape': (2, 3), }",
        &data,
    );
    let a = NdArray::<i16>::read_from(bytes.as_slice()).unwrap();
    assert_eq!(a.order(), Order::ColumnMajor);
    assert_eq!(a[[1, 0]], 1);
    assert_eq!(a[[0, 2]], 4);
}

#[test]
fn scalar_shape_reads_as_one_element() {
    let bytes = numpy_style(
        "{'descr': '|u1', 'fortran_order': False, 'shape': (), }",
        &[42],
    );
    let a = NdArray::<u8>::read_from(bytes.as_slice()).unwrap();
    assert_eq!(a.shape(), &[1]);
    assert_eq!(a.as_slice(), &[42]);
}

#[test]
fn short_data_is_truncated_error() {
    let bytes = numpy_style(
        "{'descr': '<i4', 'fortran_order': False, 'shape': (4,), }",
        &[0; 10],
    );
    assert!(matches!(
        NdArray::<i32>::read_from(bytes.as_slice()),
        Err(NdError::Truncated {
            expected: 16,
            found: 10
        })
    ));
}

#[test]
fn unknown_descr_is_reported() {
    let bytes = numpy_style(
        "{'descr': '<U8', 'fortran_order': False, 'shape': (1,), }",
        &[0; 32],
    );
    assert!(matches!(
        NdArray::<i32>::read_from(bytes.as_slice()),
        Err(NdError::UnknownDType { .. })
    ));
}

#[test]
fn written_header_uses_numpy_spelling() {
    let a = NdArray::from_vec(vec![0u16; 6], &[2, 3], Order::RowMajor).unwrap();
    let mut bytes = Vec::new();
    a.write_to_with(&mut bytes, &NpyConfig::default().with_byte_order(ByteOrder::Big))
        .unwrap();
    let header = String::from_utf8_lossy(&bytes[10..]);
    assert!(header.starts_with("{'descr': '>u2', 'fortran_order': False, 'shape': (2, 3), }"));
    assert_eq!(bytes[6], 1);
}

#[test]
fn save_then_load_every_real_dtype() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("i8.npy");
    let a = NdArray::from_vec(vec![-1i8, 0, 1], &[3], Order::RowMajor).unwrap();
    a.save(&path).unwrap();
    assert_eq!(NdArray::<i8>::load(&path).unwrap(), a);

    let path = dir.path().join("u64.npy");
    let a = NdArray::from_vec(vec![u64::MAX, 7], &[2, 1], Order::ColumnMajor).unwrap();
    a.save(&path).unwrap();
    assert_eq!(NdArray::<u64>::load(&path).unwrap(), a);

    let path = dir.path().join("f32.npy");
    let a = NdArray::from_vec(vec![0.25f32; 8], &[2, 2, 2], Order::RowMajor).unwrap();
    let config = NpyConfig::new(16, ByteOrder::Big).unwrap();
    a.save_with(&path, &config).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!((bytes.len() - 32) % 16, 0);
    assert_eq!(NdArray::<f32>::load(&path).unwrap(), a);

    assert_eq!(DType::F32.size(), 4);
}
