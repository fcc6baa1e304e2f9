//! Error types for quadwarp-core
//!
//! Provides a unified error type for the image container and the dense
//! linear algebra used by the transform crate. Each variant captures
//! enough context for diagnostics without exposing internal details.

use thiserror::Error;

/// quadwarp-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid pixel depth
    #[error("invalid pixel depth: {0} bpp")]
    InvalidDepth(u32),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Incompatible pixel depths
    #[error("incompatible pixel depths: {0} bpp vs {1} bpp")]
    IncompatibleDepths(u32, u32),

    /// Unsupported pixel depth for this operation
    #[error("unsupported pixel depth: {0} bpp")]
    UnsupportedDepth(u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Matrix with a zero dimension
    #[error("invalid matrix size: {rows}x{cols}")]
    InvalidMatrixSize { rows: usize, cols: usize },

    /// Square matrix required
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Vector or matrix length does not match the operand
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// No usable pivot was found while factoring
    #[error("singular matrix: no pivot in column {column}")]
    SingularMatrix { column: usize },

    /// NaN or infinity in an input or a computed result
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for quadwarp-core operations
pub type Result<T> = std::result::Result<T, Error>;
