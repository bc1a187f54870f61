//! PixelGrid - the source image container
//!
//! [`PixelGrid`] is the read-only raster every region reads colors from.
//! It is a row-major array of [`Color`] values with fixed width and height.
//!
//! Every region keeps a handle to the image it grows over, so the pixel
//! buffer sits behind an `Arc` and cloning a grid copies nothing. Writers
//! (rendering, decoders) work on a [`PixelGridMut`] obtained from
//! [`PixelGrid::to_mut`] or [`PixelGrid::try_into_mut`] and freeze it back
//! with `From`.

mod access;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::point::Point;
use std::sync::Arc;

#[derive(Debug)]
struct GridData {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl GridData {
    fn check_dimensions(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(width as usize * height as usize)
    }
}

/// Shared, read-only color raster
///
/// # Examples
///
/// ```
/// use regrow_core::{Color, PixelGrid, Point};
///
/// let grid = PixelGrid::from_fn(4, 3, |p| Color::gray((p.row * 10) as u8)).unwrap();
/// assert_eq!(grid.width(), 4);
/// assert_eq!(grid.height(), 3);
/// assert_eq!(grid.get(Point::new(2, 0)), Some(Color::gray(20)));
/// assert_eq!(grid.get(Point::new(3, 0)), None);
/// ```
#[derive(Debug, Clone)]
pub struct PixelGrid {
    inner: Arc<GridData>,
}

impl PixelGrid {
    /// Create a new black grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = GridData::check_dimensions(width, height)?;
        Ok(PixelGrid {
            inner: Arc::new(GridData {
                width,
                height,
                data: vec![Color::BLACK; len],
            }),
        })
    }

    /// Create a grid from a row-major color buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero-sized grid and
    /// [`Error::BufferLength`] if `data.len() != width * height`.
    pub fn from_colors(width: u32, height: u32, data: Vec<Color>) -> Result<Self> {
        let len = GridData::check_dimensions(width, height)?;
        if data.len() != len {
            return Err(Error::BufferLength {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(PixelGrid {
            inner: Arc::new(GridData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create a grid by evaluating `f` at every point.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(Point) -> Color,
    {
        let len = GridData::check_dimensions(width, height)?;
        let data = (0..len).map(|i| f(Point::from_index(i, width))).collect();
        Self::from_colors(width, height, data)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.data.len()
    }

    /// Check whether a point lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.is_within(self.inner.height, self.inner.width)
    }

    /// Row-major colors.
    #[inline]
    pub fn data(&self) -> &[Color] {
        &self.inner.data
    }

    /// Handles currently sharing the pixel buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Unwrap the buffer for writing without copying.
    ///
    /// Fails, handing the grid back, while any other handle is alive.
    pub fn try_into_mut(self) -> std::result::Result<PixelGridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixelGridMut { inner: data }),
            Err(arc) => Err(PixelGrid { inner: arc }),
        }
    }

    /// Copy the pixels into a writable grid.
    pub fn to_mut(&self) -> PixelGridMut {
        PixelGridMut {
            inner: GridData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Writable raster, owned by one holder
#[derive(Debug)]
pub struct PixelGridMut {
    inner: GridData,
}

impl PixelGridMut {
    /// Number of columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Check whether a point lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.is_within(self.inner.height, self.inner.width)
    }

    /// Fill every pixel with one color.
    pub fn fill(&mut self, color: Color) {
        self.inner.data.fill(color);
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [Color] {
        &mut self.inner.data
    }
}

impl From<PixelGridMut> for PixelGrid {
    fn from(grid: PixelGridMut) -> Self {
        PixelGrid {
            inner: Arc::new(grid.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(
            PixelGrid::new(0, 5),
            Err(Error::InvalidDimension { width: 0, height: 5 })
        ));
        assert!(PixelGrid::new(5, 0).is_err());
    }

    #[test]
    fn test_from_colors_checks_length() {
        let err = PixelGrid::from_colors(2, 2, vec![Color::BLACK; 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferLength {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_clone_shares_data() {
        let grid = PixelGrid::new(3, 3).unwrap();
        let other = grid.clone();
        assert_eq!(grid.ref_count(), 2);
        // Shared handle cannot be taken mutably
        let grid = grid.try_into_mut().unwrap_err();
        drop(other);
        assert!(grid.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_round_trip() {
        let grid = PixelGrid::new(2, 2).unwrap();
        let mut gm = grid.to_mut();
        gm.fill(Color::WHITE);
        let filled: PixelGrid = gm.into();
        assert!(filled.data().iter().all(|&c| c == Color::WHITE));
        // Original untouched
        assert!(grid.data().iter().all(|&c| c == Color::BLACK));
    }
}
