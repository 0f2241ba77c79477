//! Error types for the checked rotation front end.

use thiserror::Error;

/// Result type for checked rotation operations.
pub type RotationResult<T> = Result<T, RotationError>;

/// Errors reported by [`rotate_point_r_checked`](crate::rotate_point_r_checked)
/// and [`RotationParams::validate`](crate::RotationParams::validate).
///
/// The unchecked entry point never produces these; it treats the same
/// conditions as caller preconditions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RotationError {
    /// An input coordinate is NaN or infinite.
    #[error("non-finite {argument}[{index}]: {value}")]
    NonFiniteInput {
        /// Which argument (`"r"` or `"x_in"`).
        argument: &'static str,
        /// Component index within the argument.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// The small-angle threshold must be finite and positive.
    #[error("invalid small-angle threshold: {0} (must be finite and positive)")]
    InvalidThreshold(f64),
}
