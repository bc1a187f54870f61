//! Error types for regrow-region

use thiserror::Error;

/// Errors that can occur during region growing and fusion
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] regrow_core::Error),

    /// Seed position outside the image
    #[error("invalid seed position: ({row}, {col})")]
    InvalidSeed { row: u32, col: u32 },

    /// Seed pixel already belongs to a region
    #[error("seed position ({row}, {col}) already owned by region {owner}")]
    SeedOccupied { row: u32, col: u32, owner: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Attempt to merge a region into itself
    #[error("region {0} cannot be merged into itself")]
    SelfMerge(u32),

    /// The two regions of a merge share a pixel
    #[error("regions {target} and {source_id} both claim pixel ({row}, {col})")]
    MergeOverlap {
        target: u32,
        source_id: u32,
        row: u32,
        col: u32,
    },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
