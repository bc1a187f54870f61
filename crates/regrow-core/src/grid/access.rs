//! Pixel access functions
//!
//! Bounds-checked getters and setters for individual pixels. Checked
//! accessors return `None` or an error for coordinates outside the grid;
//! the `_unchecked` variants panic instead.

use super::{PixelGrid, PixelGridMut};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::point::Point;

impl PixelGrid {
    /// Get the color at `p`.
    ///
    /// Returns `None` if `p` is out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Color> {
        if self.contains(p) {
            Some(self.inner.data[p.index(self.inner.width)])
        } else {
            None
        }
    }

    /// Get the color at `p` without the `Option` wrapper.
    ///
    /// # Panics
    ///
    /// Panics if `p` lies outside the pixel buffer.
    #[inline]
    pub fn get_unchecked(&self, p: Point) -> Color {
        self.inner.data[p.index(self.inner.width)]
    }

    /// Get one row as a slice.
    pub fn row(&self, row: u32) -> Option<&[Color]> {
        if row >= self.inner.height {
            return None;
        }
        let w = self.inner.width as usize;
        let start = row as usize * w;
        Some(&self.inner.data[start..start + w])
    }
}

impl PixelGridMut {
    /// Get the color at `p`.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Color> {
        if self.contains(p) {
            Some(self.inner.data[p.index(self.inner.width)])
        } else {
            None
        }
    }

    /// Set the color at `p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointOutOfBounds`] if `p` is outside the grid.
    pub fn set(&mut self, p: Point, color: Color) -> Result<()> {
        if !self.contains(p) {
            return Err(Error::PointOutOfBounds {
                row: p.row,
                col: p.col,
                height: self.inner.height,
                width: self.inner.width,
            });
        }
        let idx = p.index(self.inner.width);
        self.inner.data[idx] = color;
        Ok(())
    }

    /// Set the color at `p` without returning an error.
    ///
    /// # Panics
    ///
    /// Panics if `p` lies outside the pixel buffer.
    #[inline]
    pub fn set_unchecked(&mut self, p: Point, color: Color) {
        let idx = p.index(self.inner.width);
        self.inner.data[idx] = color;
    }
}
