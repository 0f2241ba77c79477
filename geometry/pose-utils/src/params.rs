//! Parameters for rotation-vector evaluation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RotationError, RotationResult};

/// Squared-angle cutoff below which the small-angle expansion is used.
///
/// Compared against `|r|^2`, so the corresponding angle is `1e-5` rad.
pub const SMALL_ANGLE_THRESHOLD: f64 = 1e-10;

/// Parameters for [`rotate_point_r_with_params`](crate::rotate_point_r_with_params).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RotationParams {
    /// Squared rotation angle (rad^2) below which `sin(th)/th` and
    /// `(1 - cos(th))/th^2` are replaced by their limits `1` and `1/2`.
    /// Default: [`SMALL_ANGLE_THRESHOLD`]
    pub small_angle_threshold: f64,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            small_angle_threshold: SMALL_ANGLE_THRESHOLD,
        }
    }
}

impl RotationParams {
    /// Create default params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the squared-angle threshold of the small-angle branch.
    #[must_use]
    pub const fn with_small_angle_threshold(mut self, threshold: f64) -> Self {
        self.small_angle_threshold = threshold;
        self
    }

    /// Check that the params are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidThreshold`] if the threshold is not
    /// finite and strictly positive.
    pub fn validate(&self) -> RotationResult<()> {
        let t = self.small_angle_threshold;
        if t.is_finite() && t > 0.0 {
            Ok(())
        } else {
            Err(RotationError::InvalidThreshold(t))
        }
    }
}
