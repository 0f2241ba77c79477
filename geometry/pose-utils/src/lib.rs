//! Rotation-vector point rotation with exact Jacobians.
//!
//! This crate rotates 3D points by rotation vectors (axis * angle, in
//! radians) and returns the derivatives calibration and pose solvers need:
//!
//! - [`rotate_point_r`] - Array-based primitive with optional `d/dr` and
//!   `d/dx` outputs, no validation and no error channel
//! - [`rotate_point_r_with_params`] - Same, with a custom [`RotationParams`]
//! - [`rotate_point_r_checked`] - Rejects non-finite inputs with a
//!   [`RotationError`]
//! - [`rotate_vector`], [`rotation_matrix`], [`rotate_with_jacobians`] -
//!   nalgebra-typed conveniences
//!
//! Derivatives come from forward-mode propagation through the Rodrigues
//! formula using [`grad_types`]. They are exact for every angle, including
//! the neighbourhood of zero where the formula is replaced by its
//! small-angle limit.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Example
//!
//! ```
//! use pose_utils::rotate_point_r;
//!
//! let r = [0.1, -0.2, 0.3];
//! let x = [1.0, 2.0, 3.0];
//!
//! let mut x_out = [0.0; 3];
//! let mut j_r = [[0.0; 3]; 3];
//! let mut j_x = [[0.0; 3]; 3];
//! rotate_point_r(&mut x_out, Some(&mut j_r), Some(&mut j_x), &r, &x);
//!
//! // Rotations preserve length
//! let n_in: f64 = x.iter().map(|v| v * v).sum();
//! let n_out: f64 = x_out.iter().map(|v| v * v).sum();
//! assert!((n_in - n_out).abs() < 1e-12);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for [`RotationParams`]

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod kernel;
mod params;
mod rotate;

pub use error::{RotationError, RotationResult};
pub use kernel::rotate_point_r_core;
pub use params::{RotationParams, SMALL_ANGLE_THRESHOLD};
pub use rotate::{
    RotatedPoint, rotate_point_r, rotate_point_r_checked, rotate_point_r_with_params,
    rotate_vector, rotate_with_jacobians, rotation_matrix,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        RotatedPoint, RotationError, RotationParams, RotationResult, SMALL_ANGLE_THRESHOLD,
        rotate_point_r, rotate_point_r_checked, rotate_point_r_with_params, rotate_vector,
        rotate_with_jacobians, rotation_matrix,
    };
}
