//! Elementary functions on [`Dual`] numbers.
//!
//! Each function returns `f(value)` and propagates the derivative as
//! `epsilon * f'(value)`. Domains follow the scalar functions: outside them
//! the value and derivative are NaN or infinite exactly as `f64` would be.

use crate::dual::Dual;
use crate::real::Real;

impl<T: Real> Dual<T> {
    /// Absolute value. The derivative at zero is taken from the right.
    pub fn abs(self) -> Self {
        let sign = if self.value() >= T::ZERO { T::ONE } else { -T::ONE };
        self.chain(self.value().abs(), sign)
    }

    /// `self^n` for a constant exponent.
    pub fn powf(self, n: T) -> Self {
        let v = self.value();
        self.chain(v.powf(n), n * v.powf(n - T::ONE))
    }

    /// `self^n` for an integer exponent.
    pub fn powi(self, n: i32) -> Self {
        let v = self.value();
        let n_real = T::from_f64(f64::from(n));
        self.chain(v.powi(n), n_real * v.powi(n - 1))
    }

    /// `base^exp` for a constant base.
    pub fn scalar_pow(base: T, exp: Self) -> Self {
        let out = base.powf(exp.value());
        exp.chain(out, out * base.ln())
    }

    /// `self^exp` with both parts varying. Requires `self > 0` for a finite
    /// derivative.
    pub fn pow(self, exp: Self) -> Self {
        let (v, e) = (self.value(), exp.value());
        let out = v.powf(e);
        Self::new(
            out,
            out * (exp.epsilon() * v.ln() + e * self.epsilon() / v),
        )
    }

    /// Square root.
    pub fn sqrt(self) -> Self {
        let s = self.value().sqrt();
        self.chain(s, T::ONE / (s + s))
    }

    /// Cube root.
    pub fn cbrt(self) -> Self {
        let c = self.value().cbrt();
        self.chain(c, T::ONE / (T::from_f64(3.0) * c * c))
    }

    /// `e^self`.
    pub fn exp(self) -> Self {
        let e = self.value().exp();
        self.chain(e, e)
    }

    /// `2^self`.
    pub fn exp2(self) -> Self {
        let e = self.value().exp2();
        self.chain(e, e * T::LN_2)
    }

    /// `e^self - 1`, accurate near zero.
    pub fn exp_m1(self) -> Self {
        let v = self.value();
        self.chain(v.exp_m1(), v.exp())
    }

    /// Natural logarithm.
    pub fn ln(self) -> Self {
        let v = self.value();
        self.chain(v.ln(), T::ONE / v)
    }

    /// Base-2 logarithm.
    pub fn log2(self) -> Self {
        let v = self.value();
        self.chain(v.log2(), T::ONE / (v * T::LN_2))
    }

    /// Base-10 logarithm.
    pub fn log10(self) -> Self {
        let v = self.value();
        self.chain(v.log10(), T::ONE / (v * T::LN_10))
    }

    /// `ln(1 + self)`, accurate near zero.
    pub fn ln_1p(self) -> Self {
        let v = self.value();
        self.chain(v.ln_1p(), T::ONE / (T::ONE + v))
    }

    /// Sine.
    pub fn sin(self) -> Self {
        let v = self.value();
        self.chain(v.sin(), v.cos())
    }

    /// Cosine.
    pub fn cos(self) -> Self {
        let v = self.value();
        self.chain(v.cos(), -v.sin())
    }

    /// Tangent.
    pub fn tan(self) -> Self {
        let v = self.value();
        let c = v.cos();
        self.chain(v.tan(), T::ONE / (c * c))
    }

    /// Arcsine.
    pub fn asin(self) -> Self {
        let v = self.value();
        self.chain(v.asin(), T::ONE / (T::ONE - v * v).sqrt())
    }

    /// Arccosine.
    pub fn acos(self) -> Self {
        let v = self.value();
        self.chain(v.acos(), -T::ONE / (T::ONE - v * v).sqrt())
    }

    /// Arctangent.
    pub fn atan(self) -> Self {
        let v = self.value();
        self.chain(v.atan(), T::ONE / (T::ONE + v * v))
    }

    /// Four-quadrant arctangent of `self / x`, both parts varying.
    ///
    /// `∂/∂y = x / (x² + y²)` and `∂/∂x = -y / (x² + y²)`.
    pub fn atan2(self, x: Self) -> Self {
        let (yv, xv) = (self.value(), x.value());
        let r2 = xv * xv + yv * yv;
        Self::new(
            yv.atan2(xv),
            (xv * self.epsilon() - yv * x.epsilon()) / r2,
        )
    }

    /// Four-quadrant arctangent of `self / x` for a constant `x`.
    pub fn atan2_scalar(self, x: T) -> Self {
        self.atan2(Self::constant(x))
    }

    /// Four-quadrant arctangent of `y / x` for a constant `y`.
    pub fn scalar_atan2(y: T, x: Self) -> Self {
        Self::constant(y).atan2(x)
    }

    /// Hyperbolic sine.
    pub fn sinh(self) -> Self {
        let v = self.value();
        self.chain(v.sinh(), v.cosh())
    }

    /// Hyperbolic cosine.
    pub fn cosh(self) -> Self {
        let v = self.value();
        self.chain(v.cosh(), v.sinh())
    }

    /// Hyperbolic tangent.
    pub fn tanh(self) -> Self {
        let v = self.value();
        let c = v.cosh();
        self.chain(v.tanh(), T::ONE / (c * c))
    }

    /// Inverse hyperbolic sine.
    pub fn asinh(self) -> Self {
        let v = self.value();
        self.chain(v.asinh(), T::ONE / (v * v + T::ONE).sqrt())
    }

    /// Inverse hyperbolic cosine. Defined for `self >= 1`.
    pub fn acosh(self) -> Self {
        let v = self.value();
        self.chain(v.acosh(), T::ONE / (v * v - T::ONE).sqrt())
    }

    /// Inverse hyperbolic tangent. Defined for `|self| < 1`.
    pub fn atanh(self) -> Self {
        let v = self.value();
        self.chain(v.atanh(), T::ONE / (T::ONE - v * v))
    }
}
