//! Fixed-size tuples of [`GradScalar`] sharing one derivative space.

use std::ops::{Add, Index, IndexMut, Mul, Sub};

use nalgebra::{SMatrix, SVector};

use crate::scalar::GradScalar;

/// `M` gradient-carrying scalars that share the same `N`-wide derivative
/// space.
///
/// A `GradVector` is how raw coordinate arrays enter and leave a
/// differentiated computation: [`constant`](Self::constant) and
/// [`seeded`](Self::seeded) build one from plain values, and
/// [`extract_value`](Self::extract_value) /
/// [`extract_grad`](Self::extract_grad) copy results back out.
///
/// # Example
///
/// ```
/// use grad_types::GradVector;
///
/// // Two 3-vectors as independent variables in a joint 6-wide space
/// let a = GradVector::<6, 3>::seeded(&[1.0, 2.0, 3.0], 0);
/// let b = GradVector::<6, 3>::seeded(&[4.0, 5.0, 6.0], 3);
///
/// let d = a.dot(&b);
/// assert!((d.value - 32.0).abs() < 1e-12);
/// // d(a.b)/da = b, d(a.b)/db = a
/// assert_eq!(d.grad, [4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradVector<const N: usize, const M: usize> {
    /// The components.
    pub v: [GradScalar<N>; M],
}

impl<const N: usize, const M: usize> Default for GradVector<N, M> {
    fn default() -> Self {
        Self {
            v: [GradScalar::default(); M],
        }
    }
}

impl<const N: usize, const M: usize> From<[GradScalar<N>; M]> for GradVector<N, M> {
    fn from(v: [GradScalar<N>; M]) -> Self {
        Self { v }
    }
}

impl<const N: usize, const M: usize> Index<usize> for GradVector<N, M> {
    type Output = GradScalar<N>;

    fn index(&self, i: usize) -> &GradScalar<N> {
        &self.v[i]
    }
}

impl<const N: usize, const M: usize> IndexMut<usize> for GradVector<N, M> {
    fn index_mut(&mut self, i: usize) -> &mut GradScalar<N> {
        &mut self.v[i]
    }
}

impl<const N: usize, const M: usize> GradVector<N, M> {
    /// Wrap raw values as constants (all gradients zero).
    #[must_use]
    pub fn constant(values: &[f64; M]) -> Self {
        Self {
            v: values.map(GradScalar::constant),
        }
    }

    /// Wrap raw values as independent variables occupying columns
    /// `offset..offset + M` of the derivative space.
    ///
    /// Component `i` gets a unit derivative at column `offset + i`.
    #[must_use]
    pub fn seeded(values: &[f64; M], offset: usize) -> Self {
        debug_assert!(
            offset + M <= N,
            "seeding {} variables at offset {offset} overflows width {}",
            M,
            N
        );
        Self {
            v: std::array::from_fn(|i| GradScalar::variable(values[i], offset + i)),
        }
    }

    /// Copy the component values into `out`.
    pub fn extract_value(&self, out: &mut [f64; M]) {
        for (o, s) in out.iter_mut().zip(&self.v) {
            *o = s.value;
        }
    }

    /// Copy gradient columns `start..start + W` into `out`.
    ///
    /// The block is row-major with one row per component:
    /// `out[i][j] = d v[i] / d var[start + j]`.
    pub fn extract_grad<const W: usize>(&self, start: usize, out: &mut [[f64; W]; M]) {
        debug_assert!(
            start + W <= N,
            "gradient block {start}..{} out of range for width {}",
            start + W,
            N
        );
        for (row, s) in out.iter_mut().zip(&self.v) {
            row.copy_from_slice(&s.grad[start..start + W]);
        }
    }

    /// Component values as an nalgebra vector.
    #[must_use]
    pub fn values(&self) -> SVector<f64, M> {
        SVector::from_fn(|i, _| self.v[i].value)
    }

    /// Gradient columns `start..start + W` as an `M x W` nalgebra matrix.
    #[must_use]
    pub fn jacobian<const W: usize>(&self, start: usize) -> SMatrix<f64, M, W> {
        debug_assert!(
            start + W <= N,
            "jacobian block {start}..{} out of range for width {}",
            start + W,
            N
        );
        SMatrix::from_fn(|i, j| self.v[i].grad[start + j])
    }

    /// Inner product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> GradScalar<N> {
        self.v
            .iter()
            .zip(&other.v)
            .fold(GradScalar::constant(0.0), |acc, (a, b)| acc + *a * *b)
    }
}

impl<const N: usize, const M: usize> Add for GradVector<N, M> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            v: std::array::from_fn(|i| self.v[i] + rhs.v[i]),
        }
    }
}

impl<const N: usize, const M: usize> Sub for GradVector<N, M> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            v: std::array::from_fn(|i| self.v[i] - rhs.v[i]),
        }
    }
}

/// Scaling by a gradient-carrying scalar.
impl<const N: usize, const M: usize> Mul<GradScalar<N>> for GradVector<N, M> {
    type Output = Self;

    fn mul(self, k: GradScalar<N>) -> Self {
        Self {
            v: self.v.map(|s| s * k),
        }
    }
}

impl<const N: usize> GradVector<N, 3> {
    /// Cross product `self x other`.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        let [a0, a1, a2] = self.v;
        let [b0, b1, b2] = other.v;
        Self {
            v: [a1 * b2 - a2 * b1, a2 * b0 - a0 * b2, a0 * b1 - a1 * b0],
        }
    }
}
