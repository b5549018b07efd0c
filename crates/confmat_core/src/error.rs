//! Error types for confmat_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while validating labels or computing a matrix.
#[derive(Error, Debug)]
pub enum CoreError {
    /// True and predicted sequences differ in length.
    #[error("Input length mismatch: {true_len} true labels vs {pred_len} predicted labels")]
    LengthMismatch {
        /// Number of true labels.
        true_len: usize,
        /// Number of predicted labels.
        pred_len: usize,
    },

    /// No observations were supplied.
    #[error("Empty input: at least one observation is required")]
    EmptyInput,
}
