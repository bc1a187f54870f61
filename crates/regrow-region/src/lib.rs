//! regrow-region - Seeded region growing and fusion
//!
//! This crate provides the segmentation engine:
//!
//! - **Regions** - Seeded pixel sets that grow through their neighbors
//!   while the neighbor colors fall within an acceptance window
//! - **Threshold adaptation** - Bounded widening of the window when
//!   growth stalls
//! - **Fusion** - Compatibility tests and merging of adjacent regions
//! - **Driver** - Full segmentation from a set of seeds
//!
//! # Examples
//!
//! ## Growing a single region
//!
//! ```
//! use regrow_region::{GrowthParams, Region};
//! use regrow_core::{Color, OwnershipGrid, PixelGrid, Point, RegionId};
//!
//! let image = PixelGrid::from_fn(3, 3, |_| Color::gray(128)).unwrap();
//! let mut owners = OwnershipGrid::for_image(&image);
//!
//! let mut region = Region::new(
//!     RegionId(1),
//!     Point::new(1, 1),
//!     &image,
//!     &mut owners,
//!     &GrowthParams::default(),
//! )
//! .unwrap();
//! region.grow(&mut owners).unwrap();
//! assert_eq!(region.member_count(), 9);
//! assert!(region.frontier().is_empty());
//! ```
//!
//! ## Segmenting an image
//!
//! ```
//! use regrow_region::{SeedSource, SegmentationOptions, segment_auto};
//! use regrow_core::{Color, PixelGrid};
//!
//! let image = PixelGrid::from_fn(16, 16, |p| Color::gray((p.row * 16) as u8)).unwrap();
//! let options = SegmentationOptions::new().with_seeds(SeedSource::Grid { spacing: 8 });
//! let seg = segment_auto(&image, &options).unwrap();
//! assert!(seg.region_count() >= 1);
//! ```

pub mod connectivity;
pub mod error;
pub mod region;
pub mod seed;
pub mod segment;
pub mod stats;

// Re-export core types
pub use regrow_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use connectivity::ConnectivityType;

// Re-export region types
pub use region::{
    DEFAULT_COEF_SD, DEFAULT_COEF_SD_MAX, DEFAULT_THRESHOLD, DEFAULT_THRESHOLD_MAX, GrowthParams,
    GrowthState, Region,
};

// Re-export statistics
pub use stats::{AcceptanceWindow, ColorStats, mean_to_color};

// Re-export seed placement
pub use seed::{SeedOptions, SeedSource, grid_seeds, random_seeds};

// Re-export driver types and functions
pub use segment::{RegionSummary, Segmentation, SegmentationOptions, segment, segment_auto};
