//! regrow - Seeded region growing image segmentation
//!
//! Segments a color image into connected regions of homogeneous color.
//! Each region starts from a seed pixel, absorbs neighbors whose color
//! falls within an adaptive acceptance window, widens that window when it
//! stalls, and finally fuses with compatible adjacent regions.
//!
//! # Example
//!
//! ```
//! use regrow::{Color, PixelGrid, Point};
//! use regrow::region::{SegmentationOptions, segment};
//!
//! let image = PixelGrid::from_fn(6, 4, |p| {
//!     if p.row < 2 { Color::new(200, 0, 0) } else { Color::new(0, 0, 200) }
//! })
//! .unwrap();
//! let seeds = [Point::new(0, 0), Point::new(3, 5)];
//! let seg = segment(&image, &seeds, &SegmentationOptions::default()).unwrap();
//! assert_eq!(seg.region_count(), 2);
//! assert_eq!(seg.render_mean_colors(Color::BLACK).data(), image.data());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use regrow_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use regrow_io as io;
pub use regrow_region as region;
