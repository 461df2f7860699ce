//! The [`Dual`] number type and its arithmetic.

use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::real::Real;

/// A value paired with its derivative: `value + epsilon·ε` with `ε² = 0`.
///
/// Scalars mix freely with duals on either side of `+ - * /`; a scalar
/// behaves as a constant (zero derivative).
///
/// ```
/// use tessera_dual::Dual;
///
/// let x = Dual::variable(3.0_f64);
/// let y = 2.0 * x * x + 1.0; // 2x² + 1
/// assert_eq!(y.value(), 19.0);
/// assert_eq!(y.epsilon(), 12.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dual<T> {
    value: T,
    epsilon: T,
}

impl<T: Real> Dual<T> {
    /// A dual with explicit value and derivative parts.
    pub const fn new(value: T, epsilon: T) -> Self {
        Self { value, epsilon }
    }

    /// A constant: derivative zero.
    pub fn constant(value: T) -> Self {
        Self::new(value, T::ZERO)
    }

    /// The independent variable: derivative one.
    pub fn variable(value: T) -> Self {
        Self::new(value, T::ONE)
    }

    /// The value part.
    pub fn value(&self) -> T {
        self.value
    }

    /// The derivative part.
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// Replace the value part.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    /// Replace the derivative part.
    pub fn set_epsilon(&mut self, epsilon: T) {
        self.epsilon = epsilon;
    }

    /// Mutable access to the value part.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Mutable access to the derivative part.
    pub fn epsilon_mut(&mut self) -> &mut T {
        &mut self.epsilon
    }

    /// Apply the chain rule: `f(value)` with derivative `epsilon * df`.
    pub(crate) fn chain(self, value: T, df: T) -> Self {
        Self::new(value, self.epsilon * df)
    }
}

impl<T: Real> From<T> for Dual<T> {
    fn from(value: T) -> Self {
        Self::constant(value)
    }
}

impl<T: Real> fmt::Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}ε", self.value, self.epsilon)
    }
}

impl<T: Real> Neg for Dual<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.value, -self.epsilon)
    }
}

impl<T: Real> AddAssign for Dual<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
        self.epsilon += rhs.epsilon;
    }
}

impl<T: Real> AddAssign<T> for Dual<T> {
    fn add_assign(&mut self, rhs: T) {
        self.value += rhs;
    }
}

impl<T: Real> SubAssign for Dual<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
        self.epsilon -= rhs.epsilon;
    }
}

impl<T: Real> SubAssign<T> for Dual<T> {
    fn sub_assign(&mut self, rhs: T) {
        self.value -= rhs;
    }
}

impl<T: Real> MulAssign for Dual<T> {
    /// Product rule; the derivative is computed from the old value.
    fn mul_assign(&mut self, rhs: Self) {
        self.epsilon = self.epsilon * rhs.value + self.value * rhs.epsilon;
        self.value *= rhs.value;
    }
}

impl<T: Real> MulAssign<T> for Dual<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.value *= rhs;
        self.epsilon *= rhs;
    }
}

impl<T: Real> DivAssign for Dual<T> {
    /// Quotient rule; the derivative is computed from the old value.
    fn div_assign(&mut self, rhs: Self) {
        self.epsilon =
            (self.epsilon * rhs.value - self.value * rhs.epsilon) / (rhs.value * rhs.value);
        self.value /= rhs.value;
    }
}

impl<T: Real> DivAssign<T> for Dual<T> {
    fn div_assign(&mut self, rhs: T) {
        self.value /= rhs;
        self.epsilon /= rhs;
    }
}

macro_rules! binary_from_assign {
    ($($trait:ident, $method:ident, $assign:ident;)*) => {
        $(
            impl<T: Real> $trait for Dual<T> {
                type Output = Self;

                fn $method(mut self, rhs: Self) -> Self {
                    self.$assign(rhs);
                    self
                }
            }

            impl<T: Real> $trait<T> for Dual<T> {
                type Output = Self;

                fn $method(mut self, rhs: T) -> Self {
                    self.$assign(rhs);
                    self
                }
            }
        )*
    };
}

binary_from_assign! {
    Add, add, add_assign;
    Sub, sub, sub_assign;
    Mul, mul, mul_assign;
    Div, div, div_assign;
}

/// `scalar op dual` for a concrete scalar type.
macro_rules! scalar_lhs {
    ($($t:ty),*) => {
        $(
            impl Add<Dual<$t>> for $t {
                type Output = Dual<$t>;

                fn add(self, rhs: Dual<$t>) -> Dual<$t> {
                    rhs + self
                }
            }

            impl Sub<Dual<$t>> for $t {
                type Output = Dual<$t>;

                fn sub(self, rhs: Dual<$t>) -> Dual<$t> {
                    Dual::new(self - rhs.value, -rhs.epsilon)
                }
            }

            impl Mul<Dual<$t>> for $t {
                type Output = Dual<$t>;

                fn mul(self, rhs: Dual<$t>) -> Dual<$t> {
                    rhs * self
                }
            }

            impl Div<Dual<$t>> for $t {
                type Output = Dual<$t>;

                fn div(self, rhs: Dual<$t>) -> Dual<$t> {
                    Dual::new(
                        self / rhs.value,
                        -self * rhs.epsilon / (rhs.value * rhs.value),
                    )
                }
            }
        )*
    };
}

scalar_lhs!(f32, f64);

impl<T: Real> Sum for Dual<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::constant(T::ZERO), |acc, x| acc + x)
    }
}

impl<T: Real> Product for Dual<T> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::constant(T::ONE), |acc, x| acc * x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type D = Dual<f64>;

    #[test]
    fn constructors() {
        let c = D::constant(2.0);
        assert_eq!((c.value(), c.epsilon()), (2.0, 0.0));
        let v = D::variable(2.0);
        assert_eq!((v.value(), v.epsilon()), (2.0, 1.0));
        let n = D::new(1.0, 3.0);
        assert_eq!(n.epsilon(), 3.0);
        assert_eq!(D::from(4.0), D::constant(4.0));
        assert_eq!(D::default(), D::new(0.0, 0.0));
    }

    #[test]
    fn setters_and_mut_accessors() {
        let mut d = D::new(1.0, 2.0);
        d.set_value(5.0);
        d.set_epsilon(6.0);
        assert_eq!(d, D::new(5.0, 6.0));
        *d.value_mut() += 1.0;
        *d.epsilon_mut() *= 2.0;
        assert_eq!(d, D::new(6.0, 12.0));
    }

    #[test]
    fn addition_and_subtraction() {
        let a = D::new(3.0, 1.0);
        let b = D::new(5.0, 2.0);
        assert_eq!(a + b, D::new(8.0, 3.0));
        assert_eq!(a - b, D::new(-2.0, -1.0));
        assert_eq!(a + 1.0, D::new(4.0, 1.0));
        assert_eq!(1.0 + a, D::new(4.0, 1.0));
        assert_eq!(a - 1.0, D::new(2.0, 1.0));
        assert_eq!(1.0 - a, D::new(-2.0, -1.0));
        assert_eq!(-a, D::new(-3.0, -1.0));
    }

    #[test]
    fn product_rule() {
        let a = D::new(3.0, 1.0);
        let b = D::new(5.0, 2.0);
        // (3 + ε)(5 + 2ε) = 15 + (6 + 5)ε
        assert_eq!(a * b, D::new(15.0, 11.0));
        assert_eq!(a * 2.0, D::new(6.0, 2.0));
        assert_eq!(2.0 * a, D::new(6.0, 2.0));
    }

    #[test]
    fn quotient_rule() {
        let a = D::new(3.0, 1.0);
        let b = D::new(2.0, 1.0);
        // (a'b - ab') / b² = (2 - 3) / 4
        assert_eq!(a / b, D::new(1.5, -0.25));
        assert_eq!(a / 2.0, D::new(1.5, 0.5));
        // d(1/x) = -1/x²
        assert_eq!(1.0 / b, D::new(0.5, -0.25));
    }

    #[test]
    fn compound_assignment_uses_old_value() {
        let mut a = D::new(3.0, 1.0);
        a *= D::new(5.0, 2.0);
        assert_eq!(a, D::new(15.0, 11.0));

        let mut q = D::new(3.0, 1.0);
        q /= D::new(2.0, 1.0);
        assert_eq!(q, D::new(1.5, -0.25));

        let mut s = D::new(1.0, 1.0);
        s += 2.0;
        s -= D::new(0.5, 0.5);
        s *= 2.0;
        s /= 5.0;
        assert_eq!(s, D::new(1.0, 0.2));
    }

    #[test]
    fn sum_and_product() {
        let xs = [D::new(1.0, 1.0), D::new(2.0, 0.0), D::new(3.0, 1.0)];
        let s: D = xs.iter().copied().sum();
        assert_eq!(s, D::new(6.0, 2.0));
        let p: D = xs.iter().copied().product();
        // x · 2 · (x + 2) at x = 1: value 6, derivative 4x + 4 = 8
        assert_eq!(p, D::new(6.0, 8.0));
    }

    #[test]
    fn works_for_f32() {
        let x = Dual::variable(2.0_f32);
        let y = 3.0_f32 * x * x;
        assert_eq!(y, Dual::new(12.0_f32, 12.0));
    }

    #[test]
    fn display() {
        assert_eq!(D::new(1.5, -2.0).to_string(), "1.5 + -2ε");
    }
}
