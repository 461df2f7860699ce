//! Encode/decode for the NumPy `.npy` format.
//!
//! Layout:
//!
//! ```text
//! \x93NUMPY  major minor  header_len  header_dict ... '\n'  data
//! ```
//!
//! `header_len` is a little-endian `u16` for version 1 and `u32` for
//! versions 2 and 3. The header is a Python dict literal such as
//! `{'descr': '<f4', 'fortran_order': False, 'shape': (2, 3), }`, padded
//! with spaces and a final newline so the data section starts on an
//! aligned offset. Element data follows as raw bytes in the order the
//! descriptor names.
//!
//! Decoded data is always returned in host byte order.

use std::io::{Read, Write};

use indexmap::IndexMap;
use log::{debug, trace};

use crate::config::NpyConfig;
use crate::dtype::{ByteOrder, DType, Element};
use crate::error::NdError;
use crate::shape::{self, Shape};

/// The six bytes every `.npy` stream starts with.
pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Largest header a version 1 file can describe.
const V1_MAX_HEADER: usize = u16::MAX as usize;

// ── Header model ────────────────────────────────────────────────

/// Everything the header dictionary describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NpyHeader {
    /// Element type.
    pub dtype: DType,
    /// Byte order of the element data in the file.
    pub byte_order: ByteOrder,
    /// Column-major layout when true.
    pub fortran_order: bool,
    /// Extents of each axis. A scalar file reports `[1]`.
    pub shape: Shape,
}

impl NpyHeader {
    /// Native-order, row-major header.
    pub fn new(dtype: DType, shape: &[usize]) -> Self {
        Self {
            dtype,
            byte_order: ByteOrder::NATIVE,
            fortran_order: false,
            shape: Shape::from_slice(shape),
        }
    }

    /// Number of elements described by the shape.
    pub fn element_count(&self) -> Result<usize, NdError> {
        shape::element_count(&self.shape)
    }

    /// Size of the data section in bytes.
    pub fn data_len(&self) -> Result<usize, NdError> {
        self.element_count()?
            .checked_mul(self.dtype.size())
            .ok_or_else(|| NdError::ShapeOverflow {
                shape: self.shape.to_vec(),
            })
    }

    /// The header dictionary, without padding.
    pub fn to_dict(&self) -> String {
        // Single-byte types have no byte order.
        let prefix = if self.dtype.size() == 1 {
            '|'
        } else {
            self.byte_order.prefix()
        };
        let fortran = if self.fortran_order { "True" } else { "False" };
        let shape = match self.shape.as_slice() {
            [one] => format!("({one},)"),
            axes => {
                let parts: Vec<String> = axes.iter().map(usize::to_string).collect();
                format!("({})", parts.join(", "))
            }
        };
        format!(
            "{{'descr': '{prefix}{}', 'fortran_order': {fortran}, 'shape': {shape}, }}",
            self.dtype.descr()
        )
    }

    /// Interpret a parsed header dictionary.
    pub fn from_dict(dict: &HeaderDict) -> Result<Self, NdError> {
        let descr = match dict.get("descr") {
            Some(HeaderValue::Str(s)) => s,
            Some(other) => return Err(malformed(format!("'descr' is not a string: {other:?}"))),
            None => return Err(malformed("missing key 'descr'")),
        };
        let (dtype, byte_order) = DType::parse_descr(descr)?;

        let fortran_order = match dict.get("fortran_order") {
            Some(HeaderValue::Bool(b)) => *b,
            Some(other) => {
                return Err(malformed(format!(
                    "'fortran_order' is not a boolean: {other:?}"
                )))
            }
            None => return Err(malformed("missing key 'fortran_order'")),
        };

        let shape = match dict.get("shape") {
            Some(HeaderValue::Tuple(axes)) if axes.is_empty() => Shape::from_slice(&[1]),
            Some(HeaderValue::Tuple(axes)) => Shape::from_slice(axes),
            Some(other) => return Err(malformed(format!("'shape' is not a tuple: {other:?}"))),
            None => return Err(malformed("missing key 'shape'")),
        };

        Ok(Self {
            dtype,
            byte_order,
            fortran_order,
            shape,
        })
    }
}

/// A decoded file: header plus element bytes in host order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NpyData {
    /// The file's header. `byte_order` records the order on disk.
    pub header: NpyHeader,
    /// Element data, already converted to host byte order.
    pub bytes: Vec<u8>,
}

impl NpyData {
    /// Reinterpret the data as `T`, checking the element type.
    pub fn into_vec<T: Element>(self) -> Result<Vec<T>, NdError> {
        if self.header.dtype != T::DTYPE {
            return Err(NdError::DTypeMismatch {
                expected: T::DTYPE,
                found: self.header.dtype,
            });
        }
        let count = self.bytes.len() / T::DTYPE.size();
        let mut out = vec![T::default(); count];
        bytemuck::cast_slice_mut::<T, u8>(&mut out).copy_from_slice(&self.bytes);
        Ok(out)
    }
}

// ── Header dictionary ───────────────────────────────────────────

/// A value in the header dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderValue {
    /// A quoted string.
    Str(String),
    /// `True` or `False`.
    Bool(bool),
    /// A non-negative integer.
    Int(usize),
    /// A tuple of non-negative integers.
    Tuple(Vec<usize>),
}

/// Header keys and values in file order.
pub type HeaderDict = IndexMap<String, HeaderValue>;

fn malformed(detail: impl Into<String>) -> NdError {
    NdError::MalformedHeader {
        detail: detail.into(),
    }
}

/// Parse a header dictionary literal.
///
/// Accepts arbitrary whitespace, either quote style, any key order, a
/// trailing comma, and Python 2 `L` suffixes on integers.
pub fn parse_header_dict(text: &str) -> Result<HeaderDict, NdError> {
    let mut parser = DictParser {
        src: text.as_bytes(),
        pos: 0,
    };
    let dict = parser.dict()?;
    parser.skip_ws();
    if parser.pos != parser.src.len() {
        return Err(malformed(format!(
            "unexpected trailing text at byte {}",
            parser.pos
        )));
    }
    Ok(dict)
}

struct DictParser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl DictParser<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), NdError> {
        self.skip_ws();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(malformed(format!(
                "expected '{}' at byte {}",
                byte as char, self.pos
            )))
        }
    }

    /// Consume `byte` if it is next, after whitespace.
    fn eat(&mut self, byte: u8) -> bool {
        self.skip_ws();
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn dict(&mut self) -> Result<HeaderDict, NdError> {
        self.expect(b'{')?;
        let mut dict = HeaderDict::new();
        loop {
            if self.eat(b'}') {
                return Ok(dict);
            }
            let key = self.string()?;
            self.expect(b':')?;
            let value = self.value()?;
            if dict.insert(key.clone(), value).is_some() {
                return Err(malformed(format!("duplicate key '{key}'")));
            }
            if !self.eat(b',') {
                self.expect(b'}')?;
                return Ok(dict);
            }
        }
    }

    fn value(&mut self) -> Result<HeaderValue, NdError> {
        self.skip_ws();
        match self.peek() {
            Some(b'\'' | b'"') => self.string().map(HeaderValue::Str),
            Some(b'(') => self.tuple().map(HeaderValue::Tuple),
            Some(b) if b.is_ascii_digit() => self.int().map(HeaderValue::Int),
            Some(b) if b.is_ascii_alphabetic() => match self.word() {
                "True" => Ok(HeaderValue::Bool(true)),
                "False" => Ok(HeaderValue::Bool(false)),
                other => Err(malformed(format!("unsupported literal '{other}'"))),
            },
            Some(b) => Err(malformed(format!(
                "unexpected '{}' at byte {}",
                b as char, self.pos
            ))),
            None => Err(malformed("header ended inside a value")),
        }
    }

    fn string(&mut self) -> Result<String, NdError> {
        self.skip_ws();
        let quote = match self.peek() {
            Some(q @ (b'\'' | b'"')) => q,
            _ => return Err(malformed(format!("expected a string at byte {}", self.pos))),
        };
        self.pos += 1;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == quote {
                let text = std::str::from_utf8(&self.src[start..self.pos])
                    .map_err(|e| malformed(format!("invalid UTF-8 in string: {e}")))?;
                self.pos += 1;
                return Ok(text.to_owned());
            }
            self.pos += 1;
        }
        Err(malformed("unterminated string"))
    }

    fn word(&mut self) -> &str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        // ASCII alphanumerics are valid UTF-8.
        std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("")
    }

    fn int(&mut self) -> Result<usize, NdError> {
        self.skip_ws();
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(malformed(format!("expected an integer at byte {start}")));
        }
        let digits = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("");
        let n = digits
            .parse::<usize>()
            .map_err(|e| malformed(format!("bad integer '{digits}': {e}")))?;
        if self.peek() == Some(b'L') {
            self.pos += 1;
        }
        Ok(n)
    }

    fn tuple(&mut self) -> Result<Vec<usize>, NdError> {
        self.expect(b'(')?;
        let mut items = Vec::new();
        loop {
            if self.eat(b')') {
                return Ok(items);
            }
            items.push(self.int()?);
            if !self.eat(b',') {
                self.expect(b')')?;
                return Ok(items);
            }
        }
    }
}

// ── Byte order ──────────────────────────────────────────────────

/// Reverse the bytes of every `unit`-sized scalar in `data`.
pub fn swap_bytes(data: &mut [u8], unit: usize) {
    if unit <= 1 {
        return;
    }
    for scalar in data.chunks_exact_mut(unit) {
        scalar.reverse();
    }
}

// ── Reading ─────────────────────────────────────────────────────

fn read_array<const N: usize>(r: &mut dyn Read) -> Result<[u8; N], NdError> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read and parse the preamble, leaving `r` at the start of the data.
pub fn read_header(r: &mut dyn Read) -> Result<NpyHeader, NdError> {
    let magic: [u8; 6] = read_array(r)?;
    if &magic != MAGIC {
        return Err(NdError::InvalidMagic);
    }
    let [major, minor]: [u8; 2] = read_array(r)?;
    let header_len = match major {
        1 => u16::from_le_bytes(read_array(r)?) as usize,
        2 | 3 => u32::from_le_bytes(read_array(r)?) as usize,
        _ => return Err(NdError::UnsupportedVersion { major, minor }),
    };

    let mut raw = Vec::new();
    r.take(header_len as u64).read_to_end(&mut raw)?;
    if raw.len() < header_len {
        return Err(malformed(format!(
            "header is {} bytes, expected {header_len}",
            raw.len()
        )));
    }
    let text = String::from_utf8(raw).map_err(|e| malformed(format!("invalid UTF-8: {e}")))?;
    NpyHeader::from_dict(&parse_header_dict(&text)?)
}

/// Decode a complete `.npy` stream.
///
/// Trailing bytes after the data section are left unread.
pub fn read_npy<R: Read>(mut reader: R) -> Result<NpyData, NdError> {
    let header = read_header(&mut reader)?;
    let expected = header.data_len()?;

    let mut bytes = Vec::new();
    reader.by_ref().take(expected as u64).read_to_end(&mut bytes)?;
    if bytes.len() < expected {
        return Err(NdError::Truncated {
            expected,
            found: bytes.len(),
        });
    }

    if !header.byte_order.is_native() {
        trace!(
            "swapping {} {} elements to host order",
            header.element_count()?,
            header.dtype
        );
        swap_bytes(&mut bytes, header.dtype.swap_unit());
    }

    debug!(
        "decoded .npy: dtype {} shape {:?} ({} bytes)",
        header.dtype,
        header.shape.as_slice(),
        bytes.len()
    );
    Ok(NpyData { header, bytes })
}

// ── Writing ─────────────────────────────────────────────────────

/// Build the full preamble for `header`, padded to `alignment`.
pub fn encode_preamble(header: &NpyHeader, alignment: usize) -> Result<Vec<u8>, NdError> {
    NpyConfig {
        alignment,
        byte_order: header.byte_order,
    }
    .validate()?;

    let dict = header.to_dict();
    let padded_len = |prefix: usize| {
        let unpadded = prefix + dict.len() + 1;
        let spaces = (alignment - unpadded % alignment) % alignment;
        dict.len() + spaces + 1
    };

    let v1_len = padded_len(MAGIC.len() + 2 + 2);
    let (major, len_field, header_len) = if v1_len <= V1_MAX_HEADER {
        (1u8, (v1_len as u16).to_le_bytes().to_vec(), v1_len)
    } else {
        let v2_len = padded_len(MAGIC.len() + 2 + 4);
        let field = u32::try_from(v2_len).map_err(|_| malformed("header too large"))?;
        (2u8, field.to_le_bytes().to_vec(), v2_len)
    };

    let mut out = Vec::with_capacity(MAGIC.len() + 2 + len_field.len() + header_len);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&[major, 0]);
    out.extend_from_slice(&len_field);
    out.extend_from_slice(dict.as_bytes());
    out.resize(out.len() + header_len - dict.len() - 1, b' ');
    out.push(b'\n');
    Ok(out)
}

/// Encode `data` (host byte order) under `header` with the default
/// 64-byte alignment.
pub fn write_npy<W: Write>(writer: W, header: &NpyHeader, data: &[u8]) -> Result<(), NdError> {
    write_npy_aligned(writer, header, data, NpyConfig::DEFAULT_ALIGNMENT)
}

/// Encode `data` (host byte order) under `header`.
///
/// The data is written in `header.byte_order`, swapping a copy when that
/// differs from the host. `data` must hold exactly the bytes the header's
/// shape and dtype describe.
pub fn write_npy_aligned<W: Write>(
    mut writer: W,
    header: &NpyHeader,
    data: &[u8],
    alignment: usize,
) -> Result<(), NdError> {
    let expected = header.data_len()?;
    if data.len() != expected {
        let size = header.dtype.size();
        return Err(NdError::ShapeMismatch {
            expected: expected / size,
            found: data.len() / size,
        });
    }

    writer.write_all(&encode_preamble(header, alignment)?)?;
    if header.byte_order.is_native() || header.dtype.swap_unit() == 1 {
        writer.write_all(data)?;
    } else {
        trace!(
            "swapping {} {} elements to {:?} order",
            expected / header.dtype.size(),
            header.dtype,
            header.byte_order
        );
        let mut swapped = data.to_vec();
        swap_bytes(&mut swapped, header.dtype.swap_unit());
        writer.write_all(&swapped)?;
    }
    debug!(
        "encoded .npy: dtype {} shape {:?} ({} bytes)",
        header.dtype,
        header.shape.as_slice(),
        data.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(header: &NpyHeader, data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_npy(&mut buf, header, data).unwrap();
        buf
    }

    /// Hand-built stream with an arbitrary header dictionary.
    fn raw_stream(dict: &str, data: &[u8]) -> Vec<u8> {
        let mut buf = MAGIC.to_vec();
        buf.extend_from_slice(&[1, 0]);
        buf.extend_from_slice(&(dict.len() as u16).to_le_bytes());
        buf.extend_from_slice(dict.as_bytes());
        buf.extend_from_slice(data);
        buf
    }

    #[test]
    fn dict_matches_numpy_layout() {
        let header = NpyHeader {
            dtype: DType::F32,
            byte_order: ByteOrder::Little,
            fortran_order: false,
            shape: Shape::from_slice(&[2, 3]),
        };
        assert_eq!(
            header.to_dict(),
            "{'descr': '<f4', 'fortran_order': False, 'shape': (2, 3), }"
        );
        let one_d = NpyHeader::new(DType::U8, &[5]);
        assert_eq!(
            one_d.to_dict(),
            "{'descr': '|B1', 'fortran_order': False, 'shape': (5,), }"
        );
    }

    #[test]
    fn preamble_is_aligned_and_newline_terminated() {
        for alignment in [16, 64, 128] {
            let header = NpyHeader::new(DType::F64, &[3, 4, 5]);
            let preamble = encode_preamble(&header, alignment).unwrap();
            assert_eq!(preamble.len() % alignment, 0);
            assert_eq!(preamble.last(), Some(&b'\n'));
            assert_eq!(&preamble[..6], MAGIC);
            assert_eq!(preamble[6], 1);
            let len = u16::from_le_bytes([preamble[8], preamble[9]]) as usize;
            assert_eq!(len + 10, preamble.len());
        }
    }

    #[test]
    fn huge_shapes_switch_to_version_two() {
        let shape = vec![1usize; 30_000];
        let header = NpyHeader::new(DType::I8, &shape);
        let preamble = encode_preamble(&header, 64).unwrap();
        assert_eq!(preamble[6], 2);
        let len = u32::from_le_bytes([preamble[8], preamble[9], preamble[10], preamble[11]]);
        assert_eq!(len as usize + 12, preamble.len());
        assert_eq!(preamble.len() % 64, 0);

        let mut buf = preamble;
        buf.push(7);
        let decoded = read_npy(buf.as_slice()).unwrap();
        assert_eq!(decoded.header.shape.len(), 30_000);
        assert_eq!(decoded.bytes, [7]);
    }

    #[test]
    fn round_trip_native() {
        let values = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let header = NpyHeader::new(DType::F32, &[2, 3]);
        let buf = encode(&header, bytemuck::cast_slice(&values));
        let decoded = read_npy(buf.as_slice()).unwrap();
        assert_eq!(decoded.header, header);
        assert_eq!(decoded.into_vec::<f32>().unwrap(), values);
    }

    #[test]
    fn big_endian_data_is_swapped_on_write_and_read() {
        let values = [0x0102_0304u32, 0x0A0B_0C0D];
        let mut header = NpyHeader::new(DType::U32, &[2]);
        header.byte_order = ByteOrder::Big;
        let buf = encode(&header, bytemuck::cast_slice(&values));

        let data_start = buf.len() - 8;
        assert_eq!(&buf[data_start..data_start + 4], &[1, 2, 3, 4]);
        let text = std::str::from_utf8(&buf[10..data_start]).unwrap();
        assert!(text.contains("'>u4'"));

        let decoded = read_npy(buf.as_slice()).unwrap();
        assert_eq!(decoded.header.byte_order, ByteOrder::Big);
        assert_eq!(decoded.into_vec::<u32>().unwrap(), values);
    }

    #[test]
    fn complex_swaps_each_component() {
        let mut bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
        swap_bytes(&mut bytes, DType::C64.swap_unit());
        assert_eq!(bytes, [4, 3, 2, 1, 8, 7, 6, 5]);
    }

    #[test]
    fn parses_foreign_spacing_and_key_order() {
        let dict = "{ \"shape\" :(3L,) ,'fortran_order':True,   'descr':'<i2' }   \n";
        let data = [1u8, 0, 2, 0, 3, 0];
        let decoded = read_npy(raw_stream(dict, &data).as_slice()).unwrap();
        assert_eq!(decoded.header.dtype, DType::I16);
        assert!(decoded.header.fortran_order);
        assert_eq!(decoded.header.shape.as_slice(), &[3]);
        assert_eq!(decoded.into_vec::<i16>().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn header_dict_preserves_key_order() {
        let dict = parse_header_dict("{'b': 1, 'a': (), 'c': 'x'}").unwrap();
        let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(dict["b"], HeaderValue::Int(1));
        assert_eq!(dict["a"], HeaderValue::Tuple(vec![]));
    }

    #[test]
    fn scalar_shape_reads_as_one_element() {
        let dict = "{'descr': '<f8', 'fortran_order': False, 'shape': (), }\n";
        let decoded = read_npy(raw_stream(dict, &2.5f64.to_le_bytes()).as_slice()).unwrap();
        assert_eq!(decoded.header.shape.as_slice(), &[1]);
        assert_eq!(decoded.into_vec::<f64>().unwrap(), [2.5]);
    }

    #[test]
    fn reads_numpy_one_byte_spellings() {
        let dict = "{'descr': '|u1', 'fortran_order': False, 'shape': (2,), }";
        let decoded = read_npy(raw_stream(dict, &[7, 200]).as_slice()).unwrap();
        assert_eq!(decoded.header.dtype, DType::U8);
        assert_eq!(decoded.into_vec::<u8>().unwrap(), [7, 200]);

        let dict = "{'descr': '|i1', 'fortran_order': False, 'shape': (2,), }";
        let decoded = read_npy(raw_stream(dict, &[0xff, 3]).as_slice()).unwrap();
        assert_eq!(decoded.header.dtype, DType::I8);
        assert_eq!(decoded.into_vec::<i8>().unwrap(), [-1, 3]);

        // Writing keeps the canonical spelling.
        let header = NpyHeader::new(DType::I8, &[2]);
        assert!(header.to_dict().contains("'|b1'"));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut buf = encode(&NpyHeader::new(DType::U8, &[1]), &[0]);
        buf[1] = b'X';
        assert!(matches!(
            read_npy(buf.as_slice()),
            Err(NdError::InvalidMagic)
        ));
    }

    #[test]
    fn rejects_unknown_version() {
        let mut buf = encode(&NpyHeader::new(DType::U8, &[1]), &[0]);
        buf[6] = 9;
        assert!(matches!(
            read_npy(buf.as_slice()),
            Err(NdError::UnsupportedVersion { major: 9, minor: 0 })
        ));
    }

    #[test]
    fn rejects_malformed_headers() {
        for dict in [
            "{'descr': '<f4', 'shape': (1,), }",
            "{'descr': '<f4', 'fortran_order': Maybe, 'shape': (1,), }",
            "{'descr': '<f4', 'fortran_order': False, 'shape': (1,) ",
            "['descr']",
            "{'descr': 4, 'fortran_order': False, 'shape': (1,), }",
        ] {
            let result = read_npy(raw_stream(dict, &[0; 4]).as_slice());
            assert!(
                matches!(result, Err(NdError::MalformedHeader { .. })),
                "{dict}: {result:?}"
            );
        }
    }

    #[test]
    fn rejects_unknown_dtype() {
        let dict = "{'descr': '<f2', 'fortran_order': False, 'shape': (1,), }";
        assert!(matches!(
            read_npy(raw_stream(dict, &[0; 2]).as_slice()),
            Err(NdError::UnknownDType { .. })
        ));
    }

    #[test]
    fn rejects_truncated_data() {
        let buf = encode(&NpyHeader::new(DType::I32, &[4]), &[0; 16]);
        let cut = &buf[..buf.len() - 3];
        assert!(matches!(
            read_npy(cut),
            Err(NdError::Truncated {
                expected: 16,
                found: 13
            })
        ));
    }

    #[test]
    fn rejects_wrong_data_length_on_write() {
        let mut buf = Vec::new();
        let result = write_npy(&mut buf, &NpyHeader::new(DType::I32, &[4]), &[0; 12]);
        assert!(matches!(
            result,
            Err(NdError::ShapeMismatch {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn into_vec_checks_dtype() {
        let buf = encode(&NpyHeader::new(DType::F64, &[1]), &[0; 8]);
        let decoded = read_npy(buf.as_slice()).unwrap();
        assert!(matches!(
            decoded.into_vec::<f32>(),
            Err(NdError::DTypeMismatch {
                expected: DType::F32,
                found: DType::F64
            })
        ));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_shape_round_trips(
                shape in proptest::collection::vec(1usize..5, 1..5),
                big_endian in any::<bool>(),
                fortran in any::<bool>(),
            ) {
                let count: usize = shape.iter().product();
                let values: Vec<i64> = (0..count as i64).map(|i| i * 7 - 3).collect();
                let header = NpyHeader {
                    dtype: DType::I64,
                    byte_order: if big_endian { ByteOrder::Big } else { ByteOrder::Little },
                    fortran_order: fortran,
                    shape: Shape::from_slice(&shape),
                };
                let mut buf = Vec::new();
                write_npy(&mut buf, &header, bytemuck::cast_slice(&values)).unwrap();
                let decoded = read_npy(buf.as_slice()).unwrap();
                prop_assert_eq!(&decoded.header, &header);
                prop_assert_eq!(decoded.into_vec::<i64>().unwrap(), values);
            }

            #[test]
            fn parser_never_panics(text in "\\PC{0,64}") {
                let _ = parse_header_dict(&text);
            }
        }
    }
}
