//! Segmentation driver
//!
//! Creates one [`Region`] per seed, steps every region until all of them
//! are terminal, then repeatedly fuses adjacent compatible regions until a
//! full pass performs no merge.
//!
//! # Examples
//!
//! ```
//! use regrow_core::{Color, PixelGrid, Point};
//! use regrow_region::{SegmentationOptions, segment};
//!
//! let image = PixelGrid::from_fn(8, 4, |p| {
//!     if p.col < 4 { Color::gray(30) } else { Color::gray(220) }
//! })
//! .unwrap();
//! let seeds = [Point::new(0, 0), Point::new(3, 7)];
//! let seg = segment(&image, &seeds, &SegmentationOptions::default()).unwrap();
//! assert_eq!(seg.region_count(), 2);
//! assert_eq!(seg.unclaimed_count(), 0);
//! ```

use crate::error::{RegionError, RegionResult};
use crate::region::{GrowthParams, Region};
use crate::seed::SeedSource;
use log::{debug, warn};
use regrow_core::{Color, OwnershipGrid, PixelGrid, Point, RegionId};
use std::collections::{BTreeMap, HashMap};

/// Options for a full segmentation run
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationOptions {
    /// Growth and adaptation parameters shared by every region
    pub growth: GrowthParams,
    /// Fuse compatible adjacent regions after growth
    pub merge: bool,
    /// Seed placement used by [`segment_auto`]
    pub seeds: SeedSource,
}

impl Default for SegmentationOptions {
    fn default() -> Self {
        Self {
            growth: GrowthParams::default(),
            merge: true,
            seeds: SeedSource::default(),
        }
    }
}

impl SegmentationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_growth(mut self, growth: GrowthParams) -> Self {
        self.growth = growth;
        self
    }

    /// Enable or disable the fusion phase
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    pub fn with_seeds(mut self, seeds: SeedSource) -> Self {
        self.seeds = seeds;
        self
    }
}

/// Read-out of one surviving region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub id: RegionId,
    /// Seed of the region that survived fusion
    pub seed: Point,
    pub mean_color: Color,
    pub pixel_count: usize,
    /// Final adaptation parameters
    pub threshold: u32,
    pub coef_sd: f32,
}

impl RegionSummary {
    fn of(region: &Region) -> Self {
        Self {
            id: region.id(),
            seed: region.seed(),
            mean_color: region.mean_color(),
            pixel_count: region.member_count(),
            threshold: region.threshold(),
            coef_sd: region.coef_sd(),
        }
    }
}

/// Result of [`segment`]
#[derive(Debug, Clone)]
pub struct Segmentation {
    image: PixelGrid,
    owners: OwnershipGrid,
    regions: Vec<RegionSummary>,
    growth_rounds: usize,
    merges: usize,
}

impl Segmentation {
    /// Final pixel ownership.
    pub fn owners(&self) -> &OwnershipGrid {
        &self.owners
    }

    /// Surviving regions, ordered by id.
    pub fn regions(&self) -> &[RegionSummary] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&RegionSummary> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Pixels no region claimed.
    pub fn unclaimed_count(&self) -> usize {
        self.owners.iter().filter(|(_, o)| o.owner().is_none()).count()
    }

    /// Label of the region owning `p`; 0 when unclaimed.
    pub fn label_at(&self, p: Point) -> Option<u32> {
        self.owners
            .get(p)
            .map(|o| o.owner().map_or(0, RegionId::label))
    }

    /// Row-major labels, 0 for unclaimed pixels.
    pub fn labels(&self) -> Vec<u32> {
        self.owners.labels()
    }

    /// Paint each pixel with the mean color of its region, unclaimed pixels
    /// with `fill`.
    pub fn render_mean_colors(&self, fill: Color) -> PixelGrid {
        let means: HashMap<RegionId, Color> =
            self.regions.iter().map(|r| (r.id, r.mean_color)).collect();
        let mut out = self.image.to_mut();
        for (dst, (_, ownership)) in out.data_mut().iter_mut().zip(self.owners.iter()) {
            *dst = ownership
                .owner()
                .and_then(|id| means.get(&id).copied())
                .unwrap_or(fill);
        }
        out.into()
    }

    /// Number of growth rounds until every region was terminal.
    pub fn growth_rounds(&self) -> usize {
        self.growth_rounds
    }

    pub fn merges(&self) -> usize {
        self.merges
    }

    pub fn into_owners(self) -> OwnershipGrid {
        self.owners
    }
}

/// Segment `image` from the given seeds.
///
/// Region ids are assigned from 1 in seed order. A seed that lands on a
/// pixel already claimed by an earlier seed is skipped.
///
/// # Errors
///
/// - [`RegionError::InvalidParameters`] if the growth parameters are invalid
/// - [`RegionError::InvalidSeed`] if a seed lies outside the image
pub fn segment(
    image: &PixelGrid,
    seeds: &[Point],
    options: &SegmentationOptions,
) -> RegionResult<Segmentation> {
    options.growth.validate()?;
    let mut owners = OwnershipGrid::for_image(image);
    let mut regions: BTreeMap<RegionId, Region> = BTreeMap::new();

    let mut next_id = 1u32;
    for &seed in seeds {
        let id = RegionId(next_id);
        match Region::new(id, seed, image, &mut owners, &options.growth) {
            Ok(region) => {
                regions.insert(id, region);
                next_id += 1;
            }
            Err(RegionError::SeedOccupied { row, col, owner }) => {
                warn!("skipping seed ({}, {}): already owned by #{}", row, col, owner);
            }
            Err(e) => return Err(e),
        }
    }
    debug!("segment: {} regions from {} seeds", regions.len(), seeds.len());

    let growth_rounds = grow_all(&mut regions, &mut owners)?;
    let merges = if options.merge {
        merge_all(&mut regions, &mut owners)?
    } else {
        0
    };

    let regions: Vec<RegionSummary> = regions.values().map(RegionSummary::of).collect();
    debug!(
        "segment: {} regions after {} rounds and {} merges",
        regions.len(),
        growth_rounds,
        merges
    );
    Ok(Segmentation {
        image: image.clone(),
        owners,
        regions,
        growth_rounds,
        merges,
    })
}

/// Segment `image` with seeds placed according to `options.seeds`.
pub fn segment_auto(
    image: &PixelGrid,
    options: &SegmentationOptions,
) -> RegionResult<Segmentation> {
    let seeds = options.seeds.place(image.width(), image.height())?;
    segment(image, &seeds, options)
}

fn grow_all(
    regions: &mut BTreeMap<RegionId, Region>,
    owners: &mut OwnershipGrid,
) -> RegionResult<usize> {
    let mut rounds = 0;
    loop {
        let mut active = 0;
        for region in regions.values_mut().filter(|r| !r.is_terminal()) {
            region.step(owners)?;
            active += 1;
        }
        if active == 0 {
            return Ok(rounds);
        }
        rounds += 1;
        debug!(
            "growth round {}: {} active, {} pixels claimed",
            rounds,
            active,
            owners.claimed_count()
        );
    }
}

fn merge_all(
    regions: &mut BTreeMap<RegionId, Region>,
    owners: &mut OwnershipGrid,
) -> RegionResult<usize> {
    let mut merges = 0;
    loop {
        let mut pass = 0;
        let ids: Vec<RegionId> = regions.keys().copied().collect();
        for id in ids {
            let Some(region) = regions.get(&id) else {
                continue;
            };
            let best = region
                .neighbor_ids(owners)
                .into_iter()
                .filter_map(|nid| regions.get(&nid).map(|n| (nid, n)))
                .filter(|(_, n)| region.verify_fusion(n))
                .map(|(nid, n)| (region.merge_criterion(n), nid))
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            let Some((_, nid)) = best else {
                continue;
            };
            let Some(other) = regions.remove(&nid) else {
                continue;
            };
            if let Some(target) = regions.get_mut(&id) {
                target.merge(other, owners)?;
                pass += 1;
            }
        }
        if pass == 0 {
            return Ok(merges);
        }
        merges += pass;
        debug!("merge pass: {} merges, {} regions left", pass, regions.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedOptions;

    fn quadrants() -> PixelGrid {
        PixelGrid::from_fn(6, 6, |p| match (p.row < 3, p.col < 3) {
            (true, true) => Color::new(200, 20, 20),
            (true, false) => Color::new(20, 200, 20),
            (false, true) => Color::new(20, 20, 200),
            (false, false) => Color::new(200, 200, 20),
        })
        .unwrap()
    }

    #[test]
    fn test_one_region_per_quadrant() {
        let image = quadrants();
        let seeds = [
            Point::new(0, 0),
            Point::new(0, 5),
            Point::new(5, 0),
            Point::new(5, 5),
        ];
        let seg = segment(&image, &seeds, &SegmentationOptions::default()).unwrap();
        assert_eq!(seg.region_count(), 4);
        assert_eq!(seg.merges(), 0);
        assert_eq!(seg.unclaimed_count(), 0);
        assert!(seg.regions().iter().all(|r| r.pixel_count == 9));
        assert_eq!(seg.label_at(Point::new(1, 1)), Some(1));
        assert_eq!(seg.label_at(Point::new(4, 4)), Some(4));
        assert_eq!(seg.label_at(Point::new(6, 0)), None);
        assert_eq!(seg.render_mean_colors(Color::BLACK).data(), image.data());
    }

    #[test]
    fn test_enclosed_seed_is_merged() {
        // The first region grows over the second seed's whole neighborhood
        let image = PixelGrid::from_fn(8, 2, |p| Color::gray(if p.col < 4 { 100 } else { 104 }))
            .unwrap();
        let seeds = [Point::new(0, 0), Point::new(0, 7)];

        let split = segment(
            &image,
            &seeds,
            &SegmentationOptions::new().with_merge(false),
        )
        .unwrap();
        assert_eq!(split.region_count(), 2);
        assert_eq!(split.region(RegionId(1)).unwrap().pixel_count, 15);
        assert_eq!(split.region(RegionId(2)).unwrap().pixel_count, 1);

        let merged = segment(&image, &seeds, &SegmentationOptions::default()).unwrap();
        assert_eq!(merged.merges(), 1);
        assert_eq!(merged.region_count(), 1);
        assert_eq!(merged.regions()[0].pixel_count, 16);
        assert!(merged.labels().iter().all(|&l| l == 1));
    }

    #[test]
    fn test_duplicate_seed_skipped() {
        let image = quadrants();
        let seeds = [Point::new(0, 0), Point::new(0, 0), Point::new(5, 5)];
        let seg = segment(&image, &seeds, &SegmentationOptions::default()).unwrap();
        let ids: Vec<u32> = seg.regions().iter().map(|r| r.id.label()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(seg.region(RegionId(2)).unwrap().seed, Point::new(5, 5));
        assert_eq!(seg.unclaimed_count(), 18);
        let rendered = seg.render_mean_colors(Color::WHITE);
        assert_eq!(rendered.get(Point::new(0, 5)), Some(Color::WHITE));
    }

    #[test]
    fn test_out_of_bounds_seed_is_error() {
        let image = quadrants();
        let err = segment(&image, &[Point::new(0, 6)], &SegmentationOptions::default());
        assert!(matches!(err, Err(RegionError::InvalidSeed { row: 0, col: 6 })));
    }

    #[test]
    fn test_segment_auto_is_reproducible() {
        let image = quadrants();
        let opts = SegmentationOptions::new()
            .with_seeds(SeedSource::Random(SeedOptions::new(6).with_rng_seed(5)));
        let a = segment_auto(&image, &opts).unwrap();
        let b = segment_auto(&image, &opts).unwrap();
        assert_eq!(a.labels(), b.labels());
        assert_eq!(a.regions(), b.regions());
    }
}
