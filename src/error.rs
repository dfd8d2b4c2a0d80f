//! Error types for cover, distance, complex and filtration construction.

use thiserror::Error;

/// Errors surfaced by the mapper pipeline.
///
/// Every variant is a local validation failure. Nothing is retried
/// internally; callers are expected to render an empty or error state.
#[derive(Debug, Error)]
pub enum MapperError {
    /// Malformed point cloud or label input.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// Two vectors of differing length were compared.
    #[error("Dimension mismatch: expected {expected}, actual {actual}")]
    DimensionMismatch {
        /// Length of the reference vector
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },

    /// Non-finite threshold or a threshold applied to an empty matrix.
    #[error("Invalid threshold: {message}")]
    InvalidThreshold {
        /// Description of the rejected threshold
        message: String,
    },

    /// No simplex appeared at any sampled threshold.
    #[error("Filtration is empty: no simplices were produced at any threshold")]
    EmptyFiltration,

    /// Configuration failed validation.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the rejected setting
        message: String,
    },

    /// A sweep was aborted through its cancellation token.
    #[error("Sweep cancelled after {completed} of {total} thresholds")]
    Cancelled {
        /// Thresholds fully evaluated before the abort was observed
        completed: usize,
        /// Thresholds requested
        total: usize,
    },

    /// The worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Config (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapperError {
    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an InvalidThreshold error.
    pub fn invalid_threshold(message: impl Into<String>) -> Self {
        Self::InvalidThreshold {
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type MapperResult<T> = Result<T, MapperError>;
