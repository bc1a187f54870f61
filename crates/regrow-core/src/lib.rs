//! regrow-core - Basic data structures for region-growing segmentation
//!
//! This crate provides the fundamental data structures shared by the
//! segmentation engine and its collaborators:
//!
//! - [`Color`] - 8-bit RGB pixel value
//! - [`Point`] - `(row, col)` pixel coordinate
//! - [`PixelGrid`] / [`PixelGridMut`] - The source image (immutable / mutable)
//! - [`OwnershipGrid`] - Which region owns each pixel
//! - [`RegionId`] / [`Ownership`] - Region identifiers and pixel status

pub mod color;
pub mod error;
pub mod grid;
pub mod ownership;
pub mod point;

pub use color::{CHANNELS, Color};
pub use error::{Error, Result};
pub use grid::{PixelGrid, PixelGridMut};
pub use ownership::{Ownership, OwnershipGrid, RegionId};
pub use point::Point;
