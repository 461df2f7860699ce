//! Floating-point scalars usable inside a [`Dual`](crate::Dual).

use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// The operations a dual number needs from its scalar type.
///
/// Implemented for `f32` and `f64`; each method forwards to the inherent
/// method of the same name.
pub trait Real:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Sum
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// `ln(2)`.
    const LN_2: Self;
    /// `ln(10)`.
    const LN_10: Self;

    /// Lossy conversion from `f64`, for literal constants.
    fn from_f64(v: f64) -> Self;

    /// As [`f64::abs`].
    fn abs(self) -> Self;
    /// As [`f64::signum`].
    fn signum(self) -> Self;
    /// As [`f64::powf`].
    fn powf(self, n: Self) -> Self;
    /// As [`f64::powi`].
    fn powi(self, n: i32) -> Self;
    /// As [`f64::sqrt`].
    fn sqrt(self) -> Self;
    /// As [`f64::cbrt`].
    fn cbrt(self) -> Self;
    /// As [`f64::exp`].
    fn exp(self) -> Self;
    /// As [`f64::exp2`].
    fn exp2(self) -> Self;
    /// As [`f64::exp_m1`].
    fn exp_m1(self) -> Self;
    /// As [`f64::ln`].
    fn ln(self) -> Self;
    /// As [`f64::log2`].
    fn log2(self) -> Self;
    /// As [`f64::log10`].
    fn log10(self) -> Self;
    /// As [`f64::ln_1p`].
    fn ln_1p(self) -> Self;
    /// As [`f64::sin`].
    fn sin(self) -> Self;
    /// As [`f64::cos`].
    fn cos(self) -> Self;
    /// As [`f64::tan`].
    fn tan(self) -> Self;
    /// As [`f64::asin`].
    fn asin(self) -> Self;
    /// As [`f64::acos`].
    fn acos(self) -> Self;
    /// As [`f64::atan`].
    fn atan(self) -> Self;
    /// As [`f64::atan2`].
    fn atan2(self, x: Self) -> Self;
    /// As [`f64::sinh`].
    fn sinh(self) -> Self;
    /// As [`f64::cosh`].
    fn cosh(self) -> Self;
    /// As [`f64::tanh`].
    fn tanh(self) -> Self;
    /// As [`f64::asinh`].
    fn asinh(self) -> Self;
    /// As [`f64::acosh`].
    fn acosh(self) -> Self;
    /// As [`f64::atanh`].
    fn atanh(self) -> Self;
}

macro_rules! forward {
    ($t:ty; $($name:ident),* $(,)?) => {
        $(
            #[inline]
            fn $name(self) -> Self {
                <$t>::$name(self)
            }
        )*
    };
}

macro_rules! impl_real {
    ($t:ident) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const LN_2: Self = std::$t::consts::LN_2;
            const LN_10: Self = std::$t::consts::LN_10;

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn powf(self, n: Self) -> Self {
                <$t>::powf(self, n)
            }

            #[inline]
            fn powi(self, n: i32) -> Self {
                <$t>::powi(self, n)
            }

            #[inline]
            fn atan2(self, x: Self) -> Self {
                <$t>::atan2(self, x)
            }

            forward!($t;
                abs, signum, sqrt, cbrt, exp, exp2, exp_m1, ln, log2, log10, ln_1p,
                sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, asinh, acosh, atanh,
            );
        }
    };
}

impl_real!(f32);
impl_real!(f64);
