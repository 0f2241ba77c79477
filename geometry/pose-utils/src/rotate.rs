//! Entry points for rotating a point by a rotation vector.

use grad_types::GradVector;
use nalgebra::{Matrix3, Vector3};
use tracing::{debug, trace};

use crate::error::{RotationError, RotationResult};
use crate::kernel::rotate_point_r_core;
use crate::params::{RotationParams, SMALL_ANGLE_THRESHOLD};

/// Rotate `x_in` by the rotation vector `r`, optionally with Jacobians.
///
/// `r` is axis * angle (radians). On return `x_out = R(r) x_in`, and each
/// Jacobian that was requested holds a row-major 3x3 block:
///
/// - `j_r[i][j] = d x_out[i] / d r[j]`
/// - `j_x[i][j] = d x_out[i] / d x_in[j]` (this is `R(r)` itself)
///
/// The derivative width is picked from the request: no gradient work at all
/// when neither Jacobian is wanted, a 3-wide space when one is, and a single
/// joint 6-wide evaluation (`r` in columns `0..3`, `x_in` in `3..6`) when
/// both are.
///
/// Inputs are not validated; see [`rotate_point_r_checked`] for a variant
/// that rejects non-finite coordinates.
///
/// # Example
///
/// ```
/// use pose_utils::rotate_point_r;
/// use std::f64::consts::FRAC_PI_2;
///
/// let mut x_out = [0.0; 3];
/// let mut j_x = [[0.0; 3]; 3];
/// rotate_point_r(&mut x_out, None, Some(&mut j_x), &[0.0, 0.0, FRAC_PI_2], &[1.0, 0.0, 0.0]);
///
/// assert!((x_out[0] - 0.0).abs() < 1e-12);
/// assert!((x_out[1] - 1.0).abs() < 1e-12);
/// assert!((j_x[1][0] - 1.0).abs() < 1e-12);
/// ```
pub fn rotate_point_r(
    x_out: &mut [f64; 3],
    j_r: Option<&mut [[f64; 3]; 3]>,
    j_x: Option<&mut [[f64; 3]; 3]>,
    r: &[f64; 3],
    x_in: &[f64; 3],
) {
    dispatch(SMALL_ANGLE_THRESHOLD, x_out, j_r, j_x, r, x_in);
}

/// [`rotate_point_r`] with a caller-chosen small-angle threshold.
///
/// The params are not validated here; use
/// [`RotationParams::validate`] or [`rotate_point_r_checked`].
pub fn rotate_point_r_with_params(
    params: &RotationParams,
    x_out: &mut [f64; 3],
    j_r: Option<&mut [[f64; 3]; 3]>,
    j_x: Option<&mut [[f64; 3]; 3]>,
    r: &[f64; 3],
    x_in: &[f64; 3],
) {
    dispatch(params.small_angle_threshold, x_out, j_r, j_x, r, x_in);
}

/// [`rotate_point_r_with_params`] that checks its inputs first.
///
/// Nothing is written to the outputs if a check fails.
///
/// # Errors
///
/// - [`RotationError::InvalidThreshold`] if `params` is invalid
/// - [`RotationError::NonFiniteInput`] if any component of `r` or `x_in`
///   is NaN or infinite
pub fn rotate_point_r_checked(
    params: &RotationParams,
    x_out: &mut [f64; 3],
    j_r: Option<&mut [[f64; 3]; 3]>,
    j_x: Option<&mut [[f64; 3]; 3]>,
    r: &[f64; 3],
    x_in: &[f64; 3],
) -> RotationResult<()> {
    params.validate()?;
    check_finite("r", r)?;
    check_finite("x_in", x_in)?;

    dispatch(params.small_angle_threshold, x_out, j_r, j_x, r, x_in);
    Ok(())
}

fn check_finite(argument: &'static str, v: &[f64; 3]) -> RotationResult<()> {
    match v.iter().position(|c| !c.is_finite()) {
        None => Ok(()),
        Some(index) => {
            debug!(argument, index, value = v[index], "rejecting non-finite input");
            Err(RotationError::NonFiniteInput {
                argument,
                index,
                value: v[index],
            })
        }
    }
}

fn dispatch(
    threshold: f64,
    x_out: &mut [f64; 3],
    j_r: Option<&mut [[f64; 3]; 3]>,
    j_x: Option<&mut [[f64; 3]; 3]>,
    r: &[f64; 3],
    x_in: &[f64; 3],
) {
    trace!(
        jacobian_r = j_r.is_some(),
        jacobian_x = j_x.is_some(),
        "rotate_point_r"
    );

    match (j_r, j_x) {
        (None, None) => {
            let out = rotate_point_r_core::<0>(
                &GradVector::constant(r),
                &GradVector::constant(x_in),
                threshold,
            );
            out.extract_value(x_out);
        }
        (Some(j_r), None) => {
            let out = rotate_point_r_core::<3>(
                &GradVector::seeded(r, 0),
                &GradVector::constant(x_in),
                threshold,
            );
            out.extract_value(x_out);
            out.extract_grad(0, j_r);
        }
        (None, Some(j_x)) => {
            let out = rotate_point_r_core::<3>(
                &GradVector::constant(r),
                &GradVector::seeded(x_in, 0),
                threshold,
            );
            out.extract_value(x_out);
            out.extract_grad(0, j_x);
        }
        (Some(j_r), Some(j_x)) => {
            let out = rotate_point_r_core::<6>(
                &GradVector::seeded(r, 0),
                &GradVector::seeded(x_in, 3),
                threshold,
            );
            out.extract_value(x_out);
            out.extract_grad(0, j_r);
            out.extract_grad(3, j_x);
        }
    }
}

/// A rotated point together with both Jacobians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedPoint {
    /// `R(r) x`.
    pub point: Vector3<f64>,
    /// `d point / d r`.
    pub jacobian_r: Matrix3<f64>,
    /// `d point / d x`, equal to `R(r)`.
    pub jacobian_x: Matrix3<f64>,
}

/// Rotate `x` by the rotation vector `r`.
///
/// # Example
///
/// ```
/// use nalgebra::Vector3;
/// use pose_utils::rotate_vector;
/// use std::f64::consts::PI;
///
/// let p = rotate_vector(&Vector3::new(PI, 0.0, 0.0), &Vector3::new(0.0, 1.0, 0.0));
/// assert!((p.y + 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn rotate_vector(r: &Vector3<f64>, x: &Vector3<f64>) -> Vector3<f64> {
    rotate_point_r_core::<0>(
        &GradVector::constant(&[r.x, r.y, r.z]),
        &GradVector::constant(&[x.x, x.y, x.z]),
        SMALL_ANGLE_THRESHOLD,
    )
    .values()
}

/// The rotation matrix `R(r)` of a rotation vector.
///
/// Obtained as the Jacobian of the rotated point with respect to the point,
/// so it agrees exactly with the `j_x` output of [`rotate_point_r`].
#[must_use]
pub fn rotation_matrix(r: &Vector3<f64>) -> Matrix3<f64> {
    rotate_point_r_core::<3>(
        &GradVector::constant(&[r.x, r.y, r.z]),
        &GradVector::seeded(&[0.0; 3], 0),
        SMALL_ANGLE_THRESHOLD,
    )
    .jacobian::<3>(0)
}

/// Rotate `x` by `r` and return the point with both Jacobians.
#[must_use]
pub fn rotate_with_jacobians(r: &Vector3<f64>, x: &Vector3<f64>) -> RotatedPoint {
    let out = rotate_point_r_core::<6>(
        &GradVector::seeded(&[r.x, r.y, r.z], 0),
        &GradVector::seeded(&[x.x, x.y, x.z], 3),
        SMALL_ANGLE_THRESHOLD,
    );
    RotatedPoint {
        point: out.values(),
        jacobian_r: out.jacobian::<3>(0),
        jacobian_x: out.jacobian::<3>(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_mat_eq(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3], eps: f64) {
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(a[i][j], b[i][j], epsilon = eps);
            }
        }
    }

    const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    #[test]
    fn zero_rotation_scenario() {
        let mut x_out = [0.0; 3];
        let mut j_x = [[9.0; 3]; 3];
        rotate_point_r(&mut x_out, None, Some(&mut j_x), &[0.0; 3], &[1.0, 0.0, 0.0]);

        assert_eq!(x_out, [1.0, 0.0, 0.0]);
        assert_mat_eq(&j_x, &IDENTITY, 0.0);
    }

    #[test]
    fn zero_rotation_jacobian_r_is_negative_skew_of_x() {
        // d(r x x)/dr = -[x]_x at r = 0
        let x = [1.0, 2.0, 3.0];
        let mut x_out = [0.0; 3];
        let mut j_r = [[0.0; 3]; 3];
        rotate_point_r(&mut x_out, Some(&mut j_r), None, &[0.0; 3], &x);

        let expected = [[0.0, 3.0, -2.0], [-3.0, 0.0, 1.0], [2.0, -1.0, 0.0]];
        assert_mat_eq(&j_r, &expected, 1e-15);
    }

    #[test]
    fn quarter_turn_scenario() {
        let mut x_out = [0.0; 3];
        rotate_point_r(&mut x_out, None, None, &[0.0, 0.0, FRAC_PI_2], &[1.0, 0.0, 0.0]);

        assert_relative_eq!(x_out[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(x_out[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x_out[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn all_request_combinations_agree() {
        let r = [0.4, -0.2, 1.1];
        let x = [2.0, -1.0, 0.5];

        let mut plain = [0.0; 3];
        rotate_point_r(&mut plain, None, None, &r, &x);

        let mut out_r = [0.0; 3];
        let mut j_r_only = [[0.0; 3]; 3];
        rotate_point_r(&mut out_r, Some(&mut j_r_only), None, &r, &x);

        let mut out_x = [0.0; 3];
        let mut j_x_only = [[0.0; 3]; 3];
        rotate_point_r(&mut out_x, None, Some(&mut j_x_only), &r, &x);

        let mut out_both = [0.0; 3];
        let mut j_r = [[0.0; 3]; 3];
        let mut j_x = [[0.0; 3]; 3];
        rotate_point_r(&mut out_both, Some(&mut j_r), Some(&mut j_x), &r, &x);

        for i in 0..3 {
            assert_relative_eq!(plain[i], out_r[i], epsilon = 1e-14);
            assert_relative_eq!(plain[i], out_x[i], epsilon = 1e-14);
            assert_relative_eq!(plain[i], out_both[i], epsilon = 1e-14);
        }
        assert_mat_eq(&j_r, &j_r_only, 1e-14);
        assert_mat_eq(&j_x, &j_x_only, 1e-14);
    }

    #[test]
    fn custom_threshold_is_used() {
        let params = RotationParams::new().with_small_angle_threshold(10.0);
        let mut x_out = [0.0; 3];
        rotate_point_r_with_params(
            &params,
            &mut x_out,
            None,
            None,
            &[0.0, 0.0, FRAC_PI_2],
            &[1.0, 0.0, 0.0],
        );

        // First-order expansion, not the exact rotation
        assert_relative_eq!(x_out[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x_out[1], FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn checked_accepts_finite_input() {
        let mut x_out = [0.0; 3];
        let mut j_x = [[0.0; 3]; 3];
        let result = rotate_point_r_checked(
            &RotationParams::default(),
            &mut x_out,
            None,
            Some(&mut j_x),
            &[0.0, 0.0, FRAC_PI_2],
            &[1.0, 0.0, 0.0],
        );

        assert!(result.is_ok());
        assert_relative_eq!(x_out[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn checked_rejects_non_finite_input() {
        let mut x_out = [7.0; 3];
        let err = rotate_point_r_checked(
            &RotationParams::default(),
            &mut x_out,
            None,
            None,
            &[0.0, f64::NAN, 0.0],
            &[1.0, 0.0, 0.0],
        );
        assert!(matches!(
            err,
            Err(RotationError::NonFiniteInput {
                argument: "r",
                index: 1,
                ..
            })
        ));
        assert_eq!(x_out, [7.0; 3]);

        let err = rotate_point_r_checked(
            &RotationParams::default(),
            &mut x_out,
            None,
            None,
            &[0.0; 3],
            &[1.0, 0.0, f64::NEG_INFINITY],
        );
        assert_eq!(
            err,
            Err(RotationError::NonFiniteInput {
                argument: "x_in",
                index: 2,
                value: f64::NEG_INFINITY,
            })
        );
    }

    #[test]
    fn checked_rejects_invalid_params() {
        let mut x_out = [0.0; 3];
        let params = RotationParams::new().with_small_angle_threshold(-1.0);
        let err = rotate_point_r_checked(&params, &mut x_out, None, None, &[0.0; 3], &[1.0; 3]);
        assert_eq!(err, Err(RotationError::InvalidThreshold(-1.0)));
    }

    #[test]
    fn half_turn_about_x() {
        let p = rotate_vector(&Vector3::new(PI, 0.0, 0.0), &Vector3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p, Vector3::new(1.0, -2.0, -3.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_matrix_matches_j_x() {
        let r = [0.1, 0.7, -0.3];
        let mut x_out = [0.0; 3];
        let mut j_x = [[0.0; 3]; 3];
        rotate_point_r(&mut x_out, None, Some(&mut j_x), &r, &[5.0, -4.0, 2.0]);

        let m = rotation_matrix(&Vector3::from(r));
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(m[(i, j)], j_x[i][j], epsilon = 1e-14);
            }
        }
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn rotate_with_jacobians_matches_array_api() {
        let r = Vector3::new(-0.5, 0.25, 0.8);
        let x = Vector3::new(1.0, 1.0, -2.0);
        let rp = rotate_with_jacobians(&r, &x);

        let mut x_out = [0.0; 3];
        let mut j_r = [[0.0; 3]; 3];
        let mut j_x = [[0.0; 3]; 3];
        rotate_point_r(
            &mut x_out,
            Some(&mut j_r),
            Some(&mut j_x),
            &[r.x, r.y, r.z],
            &[x.x, x.y, x.z],
        );

        assert_relative_eq!(rp.point, Vector3::from(x_out), epsilon = 1e-14);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(rp.jacobian_r[(i, j)], j_r[i][j], epsilon = 1e-14);
                assert_relative_eq!(rp.jacobian_x[(i, j)], j_x[i][j], epsilon = 1e-14);
            }
        }
        assert_relative_eq!(rotate_vector(&r, &x), rp.point, epsilon = 1e-14);
    }
}
