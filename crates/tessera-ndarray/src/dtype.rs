//! Element types understood by the `.npy` codec.
//!
//! A descriptor such as `<f4` is a byte-order prefix followed by a type
//! code. [`DType`] is the type code, [`ByteOrder`] the prefix, and
//! [`Element`] ties a Rust type to its [`DType`].

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::NdError;

/// Type code of an array element.
///
/// `b1` and `B1` denote signed and unsigned bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    /// Signed byte, `b1`.
    I8,
    /// Unsigned byte, `B1`.
    U8,
    /// `i2`.
    I16,
    /// `i4`.
    I32,
    /// `i8`.
    I64,
    /// `u2`.
    U16,
    /// `u4`.
    U32,
    /// `u8`.
    U64,
    /// `f4`.
    F32,
    /// `f8`.
    F64,
    /// Pair of `f4`, `c8`.
    C64,
    /// Pair of `f8`, `c16`.
    C128,
}

impl DType {
    /// Every supported type code.
    pub const ALL: [DType; 12] = [
        DType::I8,
        DType::U8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::F32,
        DType::F64,
        DType::C64,
        DType::C128,
    ];

    /// The type code without byte-order prefix.
    pub fn descr(self) -> &'static str {
        match self {
            DType::I8 => "b1",
            DType::U8 => "B1",
            DType::I16 => "i2",
            DType::I32 => "i4",
            DType::I64 => "i8",
            DType::U16 => "u2",
            DType::U32 => "u4",
            DType::U64 => "u8",
            DType::F32 => "f4",
            DType::F64 => "f8",
            DType::C64 => "c8",
            DType::C128 => "c16",
        }
    }

    /// Look up a type code without byte-order prefix.
    ///
    /// Also accepts `i1` and `u1`, NumPy's own spelling of the one-byte
    /// integers. The writer always emits `b1`/`B1`.
    pub fn from_code(code: &str) -> Result<Self, NdError> {
        match code {
            "i1" => return Ok(DType::I8),
            "u1" => return Ok(DType::U8),
            _ => {}
        }
        DType::ALL
            .into_iter()
            .find(|d| d.descr() == code)
            .ok_or_else(|| NdError::UnknownDType {
                descr: code.to_owned(),
            })
    }

    /// Parse a full descriptor such as `<f4`, `>i2` or `|B1`.
    ///
    /// A missing prefix is read as native order.
    pub fn parse_descr(descr: &str) -> Result<(Self, ByteOrder), NdError> {
        let mut chars = descr.chars();
        match chars.next().and_then(ByteOrder::from_prefix) {
            Some(order) => Ok((DType::from_code(chars.as_str())?, order)),
            None => Ok((DType::from_code(descr)?, ByteOrder::NATIVE)),
        }
    }

    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            DType::I8 | DType::U8 => 1,
            DType::I16 | DType::U16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 | DType::C64 => 8,
            DType::C128 => 16,
        }
    }

    /// Size of the scalar unit that byte swapping acts on.
    ///
    /// Complex numbers swap each component separately.
    pub fn swap_unit(self) -> usize {
        match self {
            DType::C64 => 4,
            DType::C128 => 8,
            other => other.size(),
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descr())
    }
}

/// Byte order of element data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first, prefix `<`.
    Little,
    /// Most significant byte first, prefix `>`.
    Big,
}

impl ByteOrder {
    /// Byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::Little;
    /// Byte order of the host.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::Big;

    /// Interpret a descriptor prefix. `|` (not applicable) and `=` (native)
    /// both mean the host order.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            '<' => Some(ByteOrder::Little),
            '>' => Some(ByteOrder::Big),
            '|' | '=' => Some(ByteOrder::NATIVE),
            _ => None,
        }
    }

    /// The explicit prefix for this order.
    pub fn prefix(self) -> char {
        match self {
            ByteOrder::Little => '<',
            ByteOrder::Big => '>',
        }
    }

    /// Whether this is the host order.
    pub fn is_native(self) -> bool {
        self == ByteOrder::NATIVE
    }
}

/// A complex number stored as `re` followed by `im`, matching the `.npy`
/// `c8`/`c16` layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

impl<T> Complex<T> {
    /// A complex number from its parts.
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

// SAFETY: repr(C) pair of identical Pod floats; no padding, any bit
// pattern is valid.
unsafe impl Zeroable for Complex<f32> {}
// SAFETY: see above.
unsafe impl Pod for Complex<f32> {}
// SAFETY: see above.
unsafe impl Zeroable for Complex<f64> {}
// SAFETY: see above.
unsafe impl Pod for Complex<f64> {}

/// A plain-data Rust type with a `.npy` type code.
pub trait Element: Pod + Default {
    /// The matching type code.
    const DTYPE: DType;
}

macro_rules! element {
    ($($t:ty => $d:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$d;
            }
        )*
    };
}

element! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Complex<f32> => C64,
    Complex<f64> => C128,
}
