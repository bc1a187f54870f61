//! Pixel ownership map
//!
//! [`OwnershipGrid`] records, for every pixel of the source image, which
//! region currently owns it. It is the single source of truth for region
//! membership: a pixel belongs to at most one region at any time.
//!
//! Claims are compare-and-set against [`Ownership::Unclaimed`]: once a
//! pixel is owned it can only change hands through
//! [`OwnershipGrid::reassign`] (used when two regions merge) or be given
//! back with [`OwnershipGrid::release`].

use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use crate::point::Point;
use std::fmt;

/// Region identifier
///
/// Label value 0 is reserved for unclaimed pixels in [`OwnershipGrid::labels`],
/// so live regions should use ids starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl RegionId {
    /// The numeric label of this id.
    #[inline]
    pub fn label(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Status of one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// No region owns the pixel
    #[default]
    Unclaimed,
    /// The pixel belongs to the given region
    Owned(RegionId),
}

impl Ownership {
    /// The owning region, if any.
    #[inline]
    pub fn owner(self) -> Option<RegionId> {
        match self {
            Ownership::Unclaimed => None,
            Ownership::Owned(id) => Some(id),
        }
    }
}

/// Per-pixel region ownership
#[derive(Debug, Clone)]
pub struct OwnershipGrid {
    width: u32,
    height: u32,
    cells: Vec<Ownership>,
}

impl OwnershipGrid {
    /// Create an all-unclaimed grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Ownership::Unclaimed; width as usize * height as usize],
        })
    }

    /// Create an all-unclaimed grid matching an image.
    pub fn for_image(image: &PixelGrid) -> Self {
        // PixelGrid dimensions are non-zero by construction
        Self {
            width: image.width(),
            height: image.height(),
            cells: vec![Ownership::Unclaimed; image.pixel_count()],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether a point lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.is_within(self.height, self.width)
    }

    /// Verify that this grid has the same dimensions as `image`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn check_matches(&self, image: &PixelGrid) -> Result<()> {
        if self.width != image.width() || self.height != image.height() {
            return Err(Error::DimensionMismatch {
                expected: (image.width(), image.height()),
                actual: (self.width, self.height),
            });
        }
        Ok(())
    }

    fn index_of(&self, p: Point) -> Result<usize> {
        if !self.contains(p) {
            return Err(Error::PointOutOfBounds {
                row: p.row,
                col: p.col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(p.index(self.width))
    }

    /// Get the status of `p`, or `None` if it is out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Ownership> {
        if self.contains(p) {
            Some(self.cells[p.index(self.width)])
        } else {
            None
        }
    }

    /// Get the owner of `p`.
    ///
    /// Returns `None` if the pixel is unclaimed or out of bounds.
    #[inline]
    pub fn owner(&self, p: Point) -> Option<RegionId> {
        self.get(p).and_then(Ownership::owner)
    }

    /// Check whether `p` is in bounds and unclaimed.
    #[inline]
    pub fn is_unclaimed(&self, p: Point) -> bool {
        self.get(p) == Some(Ownership::Unclaimed)
    }

    /// Check whether `p` is owned by `id`.
    #[inline]
    pub fn is_owned_by(&self, p: Point, id: RegionId) -> bool {
        self.get(p) == Some(Ownership::Owned(id))
    }

    /// Claim `p` for `id` if it is unclaimed.
    ///
    /// Returns `Ok(true)` if the claim succeeded and `Ok(false)` if the pixel
    /// was already owned (by any region, including `id`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointOutOfBounds`] if `p` is outside the grid.
    pub fn claim(&mut self, p: Point, id: RegionId) -> Result<bool> {
        let idx = self.index_of(p)?;
        match self.cells[idx] {
            Ownership::Unclaimed => {
                self.cells[idx] = Ownership::Owned(id);
                Ok(true)
            }
            Ownership::Owned(_) => Ok(false),
        }
    }

    /// Give `p` back if it is owned by `id`.
    ///
    /// Returns `Ok(true)` if the pixel was released.
    pub fn release(&mut self, p: Point, id: RegionId) -> Result<bool> {
        let idx = self.index_of(p)?;
        if self.cells[idx] == Ownership::Owned(id) {
            self.cells[idx] = Ownership::Unclaimed;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Transfer `p` from region `from` to region `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OwnershipConflict`] if `p` is not owned by `from`.
    pub fn reassign(&mut self, p: Point, from: RegionId, to: RegionId) -> Result<()> {
        let idx = self.index_of(p)?;
        match self.cells[idx] {
            Ownership::Owned(id) if id == from => {
                self.cells[idx] = Ownership::Owned(to);
                Ok(())
            }
            other => Err(Error::OwnershipConflict {
                row: p.row,
                col: p.col,
                expected: from.label(),
                found: other.owner().map_or(0, RegionId::label),
            }),
        }
    }

    /// Count the pixels owned by `id`.
    pub fn count_owned_by(&self, id: RegionId) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Ownership::Owned(id))
            .count()
    }

    /// Count the pixels owned by any region.
    pub fn claimed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Ownership::Owned(_)))
            .count()
    }

    /// Export as a row-major label array, 0 for unclaimed pixels.
    pub fn labels(&self) -> Vec<u32> {
        self.cells
            .iter()
            .map(|c| c.owner().map_or(0, RegionId::label))
            .collect()
    }

    /// Iterate over `(point, ownership)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Ownership)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Point::from_index(i, width), c))
    }
}
