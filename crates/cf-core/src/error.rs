//! Error types for confound

use thiserror::Error;

/// confound error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid run parameter (row count, seed, structural coefficient)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input vectors disagree in length
    #[error("Shape mismatch: {what} has length {got}, expected {expected}")]
    ShapeMismatch {
        /// Which input was mis-sized.
        what: String,
        /// Required length.
        expected: usize,
        /// Observed length.
        got: usize,
    },

    /// Design matrix (or population covariance) is not full rank
    #[error("Singular design: {0}")]
    SingularDesign(String),
}

impl Error {
    /// Shorthand for [`Error::ShapeMismatch`].
    pub fn shape(what: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::ShapeMismatch { what: what.into(), expected, got }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
