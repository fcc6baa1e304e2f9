//! Error types for quadwarp-transform

use thiserror::Error;

/// Errors that can occur while building or applying a homography
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] quadwarp_core::Error),

    /// Singular matrix (non-invertible)
    #[error("singular transformation matrix")]
    SingularMatrix,

    /// The point correspondences cannot define a homography
    #[error("degenerate correspondence: {0}")]
    DegenerateCorrespondence(String),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: {0}")]
    UnsupportedDepth(String),
}

impl TransformError {
    /// Lift a core error, surfacing a singular factorization as
    /// [`TransformError::SingularMatrix`].
    pub(crate) fn from_solve(err: quadwarp_core::Error) -> Self {
        match err {
            quadwarp_core::Error::SingularMatrix { .. } => Self::SingularMatrix,
            other => Self::Core(other),
        }
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
