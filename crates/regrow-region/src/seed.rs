//! Seed placement
//!
//! Seeds are either drawn uniformly at random over the image or laid out on
//! a regular lattice. Random placement is reproducible when an RNG seed is
//! given.

use crate::error::{RegionError, RegionResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regrow_core::Point;

/// Options for random seed placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// Number of seeds to draw
    pub count: usize,
    /// RNG seed; `None` draws from the operating system
    pub rng_seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            count: 16,
            rng_seed: None,
        }
    }
}

impl SeedOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Make the draw reproducible
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// Draw `options.count` points uniformly over a `width` x `height` image.
///
/// Points may repeat; the driver skips seeds that land on an owned pixel.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if the image is empty.
pub fn random_seeds(width: u32, height: u32, options: &SeedOptions) -> RegionResult<Vec<Point>> {
    if width == 0 || height == 0 {
        return Err(RegionError::InvalidParameters(format!(
            "cannot place seeds in a {}x{} image",
            width, height
        )));
    }
    let mut rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Ok((0..options.count)
        .map(|_| Point::new(rng.random_range(0..height), rng.random_range(0..width)))
        .collect())
}

/// Where the driver places its seeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// Uniform random points
    Random(SeedOptions),
    /// One point per `spacing` x `spacing` cell
    Grid { spacing: u32 },
}

impl Default for SeedSource {
    fn default() -> Self {
        SeedSource::Random(SeedOptions::default())
    }
}

impl SeedSource {
    /// Produce seed points for a `width` x `height` image.
    pub fn place(&self, width: u32, height: u32) -> RegionResult<Vec<Point>> {
        match self {
            SeedSource::Random(options) => random_seeds(width, height, options),
            SeedSource::Grid { spacing } => grid_seeds(width, height, *spacing),
        }
    }
}

/// Place one seed at the center of each `spacing` x `spacing` cell.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `spacing` is zero.
pub fn grid_seeds(width: u32, height: u32, spacing: u32) -> RegionResult<Vec<Point>> {
    if spacing == 0 {
        return Err(RegionError::InvalidParameters(
            "seed spacing must be positive".to_string(),
        ));
    }
    let half = spacing / 2;
    let mut seeds = Vec::new();
    for row in (half..height).step_by(spacing as usize) {
        for col in (half..width).step_by(spacing as usize) {
            seeds.push(Point::new(row, col));
        }
    }
    Ok(seeds)
}
