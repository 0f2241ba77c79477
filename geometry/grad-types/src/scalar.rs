//! Scalar value with a fixed-width gradient.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A real value paired with its partial derivatives over `N` variables.
///
/// Arithmetic on `GradScalar` applies the chain rule, so any expression
/// built from these operators carries exact first derivatives with
/// respect to whichever variables were seeded. The width `N` is a
/// compile-time constant; mixing widths in one expression does not type
/// check.
///
/// # Example
///
/// ```
/// use grad_types::GradScalar;
///
/// // f(a, b) = a * b + a at a = 2, b = 3
/// let a = GradScalar::<2>::variable(2.0, 0);
/// let b = GradScalar::<2>::variable(3.0, 1);
/// let f = a * b + a;
///
/// assert!((f.value - 8.0).abs() < 1e-12);
/// assert!((f.grad[0] - 4.0).abs() < 1e-12); // df/da = b + 1
/// assert!((f.grad[1] - 2.0).abs() < 1e-12); // df/db = a
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradScalar<const N: usize> {
    /// The value itself.
    pub value: f64,
    /// Partial derivatives of `value` with respect to each tracked variable.
    pub grad: [f64; N],
}

impl<const N: usize> Default for GradScalar<N> {
    fn default() -> Self {
        Self::constant(0.0)
    }
}

impl<const N: usize> From<f64> for GradScalar<N> {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl<const N: usize> GradScalar<N> {
    /// Create a scalar from a value and an explicit gradient.
    #[must_use]
    pub const fn new(value: f64, grad: [f64; N]) -> Self {
        Self { value, grad }
    }

    /// Create a constant: all partial derivatives are zero.
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self {
            value,
            grad: [0.0; N],
        }
    }

    /// Create an independent variable with a unit derivative at `index`.
    ///
    /// `index` must be less than `N`.
    #[must_use]
    pub fn variable(value: f64, index: usize) -> Self {
        debug_assert!(index < N, "variable index {index} out of range for width {}", N);
        let mut grad = [0.0; N];
        grad[index] = 1.0;
        Self { value, grad }
    }

    /// Builds `f(u)` from its value and `k = f'(u)`: `d f(u) = f'(u) du`.
    #[must_use]
    fn chain(value: f64, k: f64, grad: &[f64; N]) -> Self {
        Self {
            value,
            grad: std::array::from_fn(|i| k * grad[i]),
        }
    }

    /// Square root. The value must be non-negative, and strictly positive
    /// for the derivative to be finite.
    #[must_use]
    pub fn sqrt(self) -> Self {
        debug_assert!(self.value >= 0.0, "sqrt of negative value {}", self.value);
        let s = self.value.sqrt();
        Self::chain(s, 0.5 / s, &self.grad)
    }

    /// `self * self`.
    #[must_use]
    pub fn square(self) -> Self {
        Self::chain(self.value * self.value, 2.0 * self.value, &self.grad)
    }

    /// Sine and cosine of `self`, computed together.
    ///
    /// Returns `(sin, cos)`.
    #[must_use]
    pub fn sincos(self) -> (Self, Self) {
        let (s, c) = self.value.sin_cos();
        (
            Self::chain(s, c, &self.grad),
            Self::chain(c, -s, &self.grad),
        )
    }

    /// Sine.
    #[must_use]
    pub fn sin(self) -> Self {
        self.sincos().0
    }

    /// Cosine.
    #[must_use]
    pub fn cos(self) -> Self {
        self.sincos().1
    }
}

// =============================================================================
// GradScalar (op) GradScalar
// =============================================================================

impl<const N: usize> Add for GradScalar<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            grad: std::array::from_fn(|i| self.grad[i] + rhs.grad[i]),
        }
    }
}

impl<const N: usize> Sub for GradScalar<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
            grad: std::array::from_fn(|i| self.grad[i] - rhs.grad[i]),
        }
    }
}

impl<const N: usize> Mul for GradScalar<N> {
    type Output = Self;

    #[allow(clippy::suboptimal_flops)]
    fn mul(self, rhs: Self) -> Self {
        Self {
            value: self.value * rhs.value,
            grad: std::array::from_fn(|i| self.value * rhs.grad[i] + rhs.value * self.grad[i]),
        }
    }
}

impl<const N: usize> Div for GradScalar<N> {
    type Output = Self;

    #[allow(clippy::suboptimal_flops)]
    fn div(self, rhs: Self) -> Self {
        debug_assert!(rhs.value != 0.0, "division by a zero-valued GradScalar");
        let denom = rhs.value * rhs.value;
        Self {
            value: self.value / rhs.value,
            grad: std::array::from_fn(|i| {
                (self.grad[i] * rhs.value - self.value * rhs.grad[i]) / denom
            }),
        }
    }
}

impl<const N: usize> Neg for GradScalar<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            value: -self.value,
            grad: self.grad.map(|g| -g),
        }
    }
}

impl<const N: usize> AddAssign for GradScalar<N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const N: usize> SubAssign for GradScalar<N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const N: usize> MulAssign for GradScalar<N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// =============================================================================
// Mixed with f64 constants
// =============================================================================

impl<const N: usize> Add<f64> for GradScalar<N> {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self {
            value: self.value + rhs,
            grad: self.grad,
        }
    }
}

impl<const N: usize> Add<GradScalar<N>> for f64 {
    type Output = GradScalar<N>;

    fn add(self, rhs: GradScalar<N>) -> GradScalar<N> {
        rhs + self
    }
}

impl<const N: usize> Sub<f64> for GradScalar<N> {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self {
            value: self.value - rhs,
            grad: self.grad,
        }
    }
}

impl<const N: usize> Sub<GradScalar<N>> for f64 {
    type Output = GradScalar<N>;

    fn sub(self, rhs: GradScalar<N>) -> GradScalar<N> {
        GradScalar {
            value: self - rhs.value,
            grad: rhs.grad.map(|g| -g),
        }
    }
}

impl<const N: usize> Mul<f64> for GradScalar<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::chain(self.value * rhs, rhs, &self.grad)
    }
}

impl<const N: usize> Mul<GradScalar<N>> for f64 {
    type Output = GradScalar<N>;

    fn mul(self, rhs: GradScalar<N>) -> GradScalar<N> {
        rhs * self
    }
}

impl<const N: usize> Div<f64> for GradScalar<N> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        debug_assert!(rhs != 0.0, "division by zero");
        Self::chain(self.value / rhs, 1.0 / rhs, &self.grad)
    }
}

impl<const N: usize> Div<GradScalar<N>> for f64 {
    type Output = GradScalar<N>;

    fn div(self, rhs: GradScalar<N>) -> GradScalar<N> {
        debug_assert!(rhs.value != 0.0, "division by a zero-valued GradScalar");
        // d(k/u) = -k/u^2 du
        GradScalar::chain(self / rhs.value, -self / (rhs.value * rhs.value), &rhs.grad)
    }
}
