//! Error types for regrow-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Grid accessors report out-of-range coordinates and malformed buffers
//! through these variants instead of panicking.

use thiserror::Error;

/// regrow-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Coordinate outside the grid
    #[error("point ({row}, {col}) out of bounds for {height}x{width} grid")]
    PointOutOfBounds {
        row: u32,
        col: u32,
        height: u32,
        width: u32,
    },

    /// Grid dimension mismatch
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Pixel buffer does not match the declared dimensions
    #[error("buffer length mismatch: expected {expected} pixels, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Ownership cell is not held by the expected region
    #[error("ownership conflict at ({row}, {col}): expected region {expected}, found {found}")]
    OwnershipConflict {
        row: u32,
        col: u32,
        expected: u32,
        found: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for regrow-core operations
pub type Result<T> = std::result::Result<T, Error>;
