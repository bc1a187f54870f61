//! Region - a growing set of pixels of homogeneous color
//!
//! A [`Region`] starts from a single seed pixel and absorbs neighboring
//! pixels whose color falls within its acceptance window. It keeps:
//!
//! - the colors of its members, in absorption order, with running
//!   statistics (mean, standard deviation) refreshed on each absorption;
//! - a **frontier**: claimed pixels whose neighbors have not been examined;
//! - a **boundary**: examined neighbors that were rejected by the color
//!   test or that belong to another region (candidates for fusion).
//!
//! Membership itself lives in the shared [`OwnershipGrid`]; a region only
//! mirrors its own members so it can hand them over on merge. The source
//! [`PixelGrid`] is held as a shared handle and never copied.
//!
//! # Lifecycle
//!
//! ```text
//! Growing --grow()--> Stalled --increase_threshold()--> Growing
//!                        |
//!                        +--(saturated or nothing left to test)--> Terminal
//! ```
//!
//! Terminal regions never grow again but remain eligible for merging.

mod adapt;
mod fusion;
mod grow;
mod params;

pub use params::{
    DEFAULT_COEF_SD, DEFAULT_COEF_SD_MAX, DEFAULT_THRESHOLD, DEFAULT_THRESHOLD_MAX, GrowthParams,
};

use crate::error::{RegionError, RegionResult};
use crate::stats::{AcceptanceWindow, ColorStats, mean_to_color};
use log::warn;
use regrow_core::{CHANNELS, Color, OwnershipGrid, PixelGrid, Point, RegionId};
use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

/// Growth state of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthState {
    /// The frontier holds pixels whose neighbors are still to be examined
    Growing,
    /// The frontier is empty; adaptation may widen the window
    Stalled,
    /// No further growth or adaptation will occur
    Terminal,
}

/// A seeded region
#[derive(Debug, Clone)]
pub struct Region {
    id: RegionId,
    seed: Point,
    image: PixelGrid,
    params: GrowthParams,
    /// Member pixels, parallel to `colors`
    members: Vec<Point>,
    /// Member colors in absorption order
    colors: Vec<Color>,
    stats: ColorStats,
    mean: [f64; CHANNELS],
    window: AcceptanceWindow,
    frontier: VecDeque<Point>,
    boundary: HashSet<Point>,
    /// Unclaimed boundary pixels released for re-examination by adaptation
    pending: HashSet<Point>,
    threshold: u32,
    coef_sd: f32,
    stalled: bool,
    is_increase: bool,
    state: GrowthState,
}

impl Region {
    /// Create a single-pixel region at `seed` and claim the seed.
    ///
    /// The region keeps a shared handle on `image`; `owners` is only
    /// borrowed for the claim.
    ///
    /// # Errors
    ///
    /// - [`RegionError::InvalidParameters`] if `params` fail validation
    /// - [`RegionError::Core`] if `owners` and `image` differ in size
    /// - [`RegionError::InvalidSeed`] if `seed` is outside the image
    /// - [`RegionError::SeedOccupied`] if another region owns `seed`
    pub fn new(
        id: RegionId,
        seed: Point,
        image: &PixelGrid,
        owners: &mut OwnershipGrid,
        params: &GrowthParams,
    ) -> RegionResult<Self> {
        params.validate()?;
        owners.check_matches(image)?;
        let color = image.get(seed).ok_or(RegionError::InvalidSeed {
            row: seed.row,
            col: seed.col,
        })?;
        if !owners.claim(seed, id)? {
            return Err(RegionError::SeedOccupied {
                row: seed.row,
                col: seed.col,
                owner: owners.owner(seed).map_or(0, RegionId::label),
            });
        }

        let mut region = Region {
            id,
            seed,
            image: image.clone(),
            params: params.clone(),
            members: vec![seed],
            colors: vec![color],
            stats: ColorStats::new(),
            mean: [0.0; CHANNELS],
            window: AcceptanceWindow::default(),
            frontier: VecDeque::from([seed]),
            boundary: HashSet::new(),
            pending: HashSet::new(),
            threshold: params.threshold,
            coef_sd: params.coef_sd,
            stalled: false,
            is_increase: false,
            state: GrowthState::Growing,
        };
        region.stats.push(color);
        region.average_color();
        region.average_color_threshold();
        Ok(region)
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// The seed the region was created from.
    #[inline]
    pub fn seed(&self) -> Point {
        self.seed
    }

    #[inline]
    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    /// Number of member pixels.
    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Member pixels, parallel to [`Region::colors`].
    #[inline]
    pub fn members(&self) -> &[Point] {
        &self.members
    }

    /// Member colors in absorption order.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn stats(&self) -> &ColorStats {
        &self.stats
    }

    /// Mean color, rounded to 8 bits per channel.
    #[inline]
    pub fn mean_color(&self) -> Color {
        mean_to_color(self.mean)
    }

    /// Exact per-channel mean.
    #[inline]
    pub fn mean(&self) -> [f64; CHANNELS] {
        self.mean
    }

    #[inline]
    pub fn window(&self) -> AcceptanceWindow {
        self.window
    }

    #[inline]
    pub fn frontier(&self) -> &VecDeque<Point> {
        &self.frontier
    }

    #[inline]
    pub fn boundary(&self) -> &HashSet<Point> {
        &self.boundary
    }

    /// Boundary pixels in row-major order.
    pub fn boundary_points(&self) -> Vec<Point> {
        let mut pts: Vec<Point> = self.boundary.iter().copied().collect();
        pts.sort_unstable();
        pts
    }

    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[inline]
    pub fn coef_sd(&self) -> f32 {
        self.coef_sd
    }

    /// Whether the last growth attempt claimed no pixel.
    #[inline]
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    #[inline]
    pub fn state(&self) -> GrowthState {
        self.state
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state == GrowthState::Terminal
    }

    /// Check whether both regions carry the same id.
    #[inline]
    pub fn same_identity(&self, other: &Region) -> bool {
        self.id == other.id
    }

    /// Order by member count, then by id.
    pub fn compare_by(&self, other: &Region) -> Ordering {
        self.member_count()
            .cmp(&other.member_count())
            .then(self.id.cmp(&other.id))
    }

    /// Recompute the mean color from the running statistics.
    pub fn average_color(&mut self) {
        self.mean = self.stats.mean();
    }

    /// Recompute the acceptance window from the mean, the color standard
    /// deviation and the current `threshold` / `coef_sd`.
    pub fn average_color_threshold(&mut self) {
        self.window = AcceptanceWindow::from_stats(
            self.mean,
            self.stats.std_dev(),
            self.threshold,
            self.coef_sd,
        );
    }

    /// Claim `p` as a member.
    ///
    /// On success the pixel's color joins the statistics, the pixel is
    /// queued on the frontier and dropped from the boundary, and the mean
    /// and window are refreshed. Returns `Ok(false)` without any change if
    /// the pixel is already owned.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Core`] if `p` is out of bounds.
    pub fn add_point(&mut self, p: Point, owners: &mut OwnershipGrid) -> RegionResult<bool> {
        let Some(color) = self.image.get(p) else {
            return Err(regrow_core::Error::PointOutOfBounds {
                row: p.row,
                col: p.col,
                height: self.image.height(),
                width: self.image.width(),
            }
            .into());
        };
        if !owners.claim(p, self.id)? {
            return Ok(false);
        }
        self.members.push(p);
        self.colors.push(color);
        self.stats.push(color);
        self.frontier.push_back(p);
        self.boundary.remove(&p);
        self.pending.remove(&p);
        self.average_color();
        self.average_color_threshold();
        Ok(true)
    }

    /// Give up member `p`.
    ///
    /// The released pixel joins the boundary if it still touches a member,
    /// and boundary pixels that only touched `p` are dropped.
    ///
    /// Returns `true` if the region is now empty. A region with no members
    /// left is a defect of the caller and is logged as such.
    pub fn remove_point(&mut self, p: Point, owners: &mut OwnershipGrid) -> RegionResult<bool> {
        if let Some(idx) = self.members.iter().position(|&m| m == p) {
            owners.release(p, self.id)?;
            self.members.swap_remove(idx);
            let color = self.colors.swap_remove(idx);
            self.stats.remove(color);
            self.frontier.retain(|&f| f != p);
            self.average_color();
            self.average_color_threshold();

            let (width, height) = self.image.dimensions();
            for n in self.params.connectivity.neighbors(p, height, width) {
                if !self.touches_member(n, owners) {
                    self.boundary.remove(&n);
                    self.pending.remove(&n);
                }
            }
            if self.touches_member(p, owners) {
                self.boundary.insert(p);
            }
        }
        let empty = self.members.is_empty();
        if empty {
            warn!("region {} has no members left", self.id);
        }
        Ok(empty)
    }

    fn touches_member(&self, p: Point, owners: &OwnershipGrid) -> bool {
        let (width, height) = self.image.dimensions();
        self.params
            .connectivity
            .neighbors(p, height, width)
            .any(|n| owners.is_owned_by(n, self.id))
    }

    /// Drop `p` from the boundary. Returns `true` if it was present.
    pub fn remove_point_in_border(&mut self, p: Point) -> bool {
        let in_boundary = self.boundary.remove(&p);
        let in_pending = self.pending.remove(&p);
        in_boundary || in_pending
    }

    /// Forget every boundary pixel.
    pub fn clear_boundary(&mut self) {
        self.boundary.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, color: Color) -> PixelGrid {
        PixelGrid::from_fn(width, height, |_| color).unwrap()
    }

    #[test]
    fn test_new_claims_seed() {
        let image = uniform(3, 3, Color::gray(50));
        let mut owners = OwnershipGrid::for_image(&image);
        let region = Region::new(
            RegionId(1),
            Point::new(1, 1),
            &image,
            &mut owners,
            &GrowthParams::default(),
        )
        .unwrap();
        assert_eq!(region.member_count(), 1);
        assert_eq!(region.frontier().len(), 1);
        assert!(region.boundary().is_empty());
        assert_eq!(region.mean_color(), Color::gray(50));
        assert_eq!(owners.owner(Point::new(1, 1)), Some(RegionId(1)));
        assert_eq!(region.state(), GrowthState::Growing);
        // Shared handle, not a copy
        assert_eq!(image.ref_count(), 2);
    }

    #[test]
    fn test_new_rejects_bad_seed() {
        let image = uniform(3, 3, Color::BLACK);
        let mut owners = OwnershipGrid::for_image(&image);
        let params = GrowthParams::default();
        assert!(matches!(
            Region::new(RegionId(1), Point::new(3, 0), &image, &mut owners, &params),
            Err(RegionError::InvalidSeed { row: 3, col: 0 })
        ));
        Region::new(RegionId(1), Point::new(0, 0), &image, &mut owners, &params).unwrap();
        assert!(matches!(
            Region::new(RegionId(2), Point::new(0, 0), &image, &mut owners, &params),
            Err(RegionError::SeedOccupied { owner: 1, .. })
        ));
    }

    #[test]
    fn test_new_rejects_mismatched_grid() {
        let image = uniform(3, 3, Color::BLACK);
        let mut owners = OwnershipGrid::new(4, 3).unwrap();
        assert!(matches!(
            Region::new(
                RegionId(1),
                Point::new(0, 0),
                &image,
                &mut owners,
                &GrowthParams::default()
            ),
            Err(RegionError::Core(_))
        ));
    }

    #[test]
    fn test_add_and_remove_point() {
        let image = PixelGrid::from_fn(3, 1, |p| Color::gray(10 * p.col as u8)).unwrap();
        let mut owners = OwnershipGrid::for_image(&image);
        let mut region = Region::new(
            RegionId(1),
            Point::new(0, 0),
            &image,
            &mut owners,
            &GrowthParams::default(),
        )
        .unwrap();

        assert!(region.add_point(Point::new(0, 2), &mut owners).unwrap());
        assert!(!region.add_point(Point::new(0, 2), &mut owners).unwrap());
        assert_eq!(region.member_count(), 2);
        assert_eq!(region.mean_color(), Color::gray(10));

        assert!(!region.remove_point(Point::new(0, 2), &mut owners).unwrap());
        assert!(owners.is_unclaimed(Point::new(0, 2)));
        assert_eq!(region.mean_color(), Color::gray(0));
        assert!(!region.frontier().contains(&Point::new(0, 2)));

        // Removing a non-member changes nothing
        assert!(!region.remove_point(Point::new(0, 1), &mut owners).unwrap());
        assert_eq!(region.member_count(), 1);

        assert!(region.remove_point(Point::new(0, 0), &mut owners).unwrap());
        assert_eq!(region.member_count(), 0);
    }

    #[test]
    fn test_compare_by_and_identity() {
        let image = uniform(4, 1, Color::BLACK);
        let mut owners = OwnershipGrid::for_image(&image);
        let params = GrowthParams::default();
        let mut a =
            Region::new(RegionId(2), Point::new(0, 0), &image, &mut owners, &params).unwrap();
        let b = Region::new(RegionId(1), Point::new(0, 3), &image, &mut owners, &params).unwrap();
        assert_eq!(a.compare_by(&b), Ordering::Greater);
        a.add_point(Point::new(0, 1), &mut owners).unwrap();
        assert_eq!(b.compare_by(&a), Ordering::Less);
        assert!(a.same_identity(&a.clone()));
        assert!(!a.same_identity(&b));
    }
}
