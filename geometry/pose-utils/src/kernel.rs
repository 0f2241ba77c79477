//! Rodrigues rotation evaluated on gradient-carrying values.

use grad_types::{GradScalar, GradVector};
use tracing::trace;

/// Rotate `x` by the rotation vector `r`, propagating derivatives.
///
/// With `th = |r|` and `axis = r / th`, Rodrigues' formula
///
/// ```text
/// x_out = x cos(th) + (axis x x) sin(th) + axis (axis . x) (1 - cos(th))
/// ```
///
/// is evaluated in terms of `r` directly:
///
/// ```text
/// x_out = x cos(th) + (r x x) sin(th)/th + r (r . x) (1 - cos(th))/th^2
/// ```
///
/// Both `sin(th)/th` and `(1 - cos(th))/th^2` are removable singularities at
/// `th = 0`. When `th^2 < small_angle_threshold` they are replaced by their
/// limits `1` and `1/2`, giving `x + r x x + r (r . x)/2`. Everything is
/// computed through [`GradScalar`] arithmetic, so the result carries exact
/// derivatives of whichever branch ran with respect to whatever was seeded
/// in `r` and `x`.
#[must_use]
pub fn rotate_point_r_core<const N: usize>(
    r: &GradVector<N, 3>,
    x: &GradVector<N, 3>,
    small_angle_threshold: f64,
) -> GradVector<N, 3> {
    let th2 = r.dot(r);
    let cross = r.cross(x);
    let inner = r.dot(x);

    if th2.value < small_angle_threshold {
        trace!(th2 = th2.value, "small-angle rotation");
        return *x + cross + *r * (inner / 2.0);
    }

    let th = th2.sqrt();
    let (s, c) = th.sincos();
    let k: GradScalar<N> = inner * (1.0 - c) / th2;

    *x * c + cross * (s / th) + *r * k
}
