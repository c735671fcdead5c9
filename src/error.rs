use thiserror::Error;

/// Unified error type for `eeiors` operations.
#[derive(Debug, Error)]
pub enum EeioError {
    /// Raised when provided matrices or vectors have incompatible dimensions.
    #[error("dimension mismatch in {context}: expected {expected} but found {found}")]
    DimensionMismatch {
        /// Human-readable context describing the operation.
        context: &'static str,
        /// The required dimension, often implied by the rest of the table.
        expected: usize,
        /// The dimension that was actually supplied.
        found: usize,
    },

    /// Raised when a matrix inversion encounters a singular system.
    #[error("matrix in {context} is singular")]
    SingularMatrix { context: &'static str },

    /// Raised when numerical routines produce NaN under a fail-fast policy.
    #[error("encountered NaN during {context}")]
    NumericalError { context: &'static str },

    /// Raised when an output driver vector carries a non-finite entry.
    #[error("{context} contains a non-finite entry at index {index}")]
    NonFiniteDriver {
        /// Which driver vector was being validated.
        context: &'static str,
        /// Position of the offending entry.
        index: usize,
    },

    /// Raised when a required component has not been provided to a builder.
    #[error("{component} must be provided before building the supply-use system")]
    MissingComponent { component: &'static str },
}

impl EeioError {
    /// Helper to format a [`DimensionMismatch`](EeioError::DimensionMismatch) error.
    pub fn dimension_mismatch(context: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            found,
        }
    }

    /// Helper to raise when a matrix inversion fails due to singularity.
    pub fn singular(context: &'static str) -> Self {
        Self::SingularMatrix { context }
    }

    /// Helper for bubbling up missing component errors from builders.
    pub fn missing_component(component: &'static str) -> Self {
        Self::MissingComponent { component }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, EeioError>;
