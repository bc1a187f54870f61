//! Grid coordinates
//!
//! A [`Point`] addresses one pixel by `(row, col)`. It is a structural key:
//! two points are equal iff both components match, and the derived `Hash`
//! is stable, so points can be used directly in sets and maps.

/// A `(row, col)` pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    /// Row index, valid range `[0, height)`
    pub row: u32,
    /// Column index, valid range `[0, width)`
    pub col: u32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Pack the point into a row-major linear index.
    #[inline]
    pub fn index(self, width: u32) -> usize {
        self.row as usize * width as usize + self.col as usize
    }

    /// Recover a point from a row-major linear index.
    #[inline]
    pub fn from_index(index: usize, width: u32) -> Self {
        let width = width as usize;
        Self {
            row: (index / width) as u32,
            col: (index % width) as u32,
        }
    }

    /// Check whether the point lies inside a `height` x `width` grid.
    #[inline]
    pub fn is_within(self, height: u32, width: u32) -> bool {
        self.row < height && self.col < width
    }

    /// Move by `(dr, dc)`, returning `None` if the result leaves the grid.
    pub fn offset(self, dr: i32, dc: i32, height: u32, width: u32) -> Option<Point> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let p = Point { row, col };
        p.is_within(height, width).then_some(p)
    }
}

impl From<(u32, u32)> for Point {
    fn from((row, col): (u32, u32)) -> Self {
        Point { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let p = Point::new(3, 7);
        let idx = p.index(10);
        assert_eq!(idx, 37);
        assert_eq!(Point::from_index(idx, 10), p);
    }

    #[test]
    fn test_offset_clips_at_edges() {
        let p = Point::new(0, 0);
        assert_eq!(p.offset(-1, 0, 5, 5), None);
        assert_eq!(p.offset(0, -1, 5, 5), None);
        assert_eq!(p.offset(1, 1, 5, 5), Some(Point::new(1, 1)));

        let q = Point::new(4, 4);
        assert_eq!(q.offset(1, 0, 5, 5), None);
        assert_eq!(q.offset(0, 1, 5, 5), None);
        assert_eq!(q.offset(-1, -1, 5, 5), Some(Point::new(3, 3)));
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut pts = vec![Point::new(1, 0), Point::new(0, 2), Point::new(0, 1)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(0, 1), Point::new(0, 2), Point::new(1, 0)]);
    }
}
