//! Pixel neighborhoods
//!
//! Regions grow through the neighbors of their frontier pixels. The
//! neighborhood is either the 4 edge-adjacent pixels or the 8 pixels
//! sharing an edge or a corner.

use regrow_core::Point;

const FOUR_WAY: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

const EIGHT_WAY: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Connectivity type for region growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// `(d_row, d_col)` offsets of the neighborhood, in row-major order.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY,
            ConnectivityType::EightWay => &EIGHT_WAY,
        }
    }

    /// Iterate over the in-bounds neighbors of `p` in a `height` x `width` grid.
    ///
    /// Out-of-bounds neighbors are never produced.
    pub fn neighbors(self, p: Point, height: u32, width: u32) -> impl Iterator<Item = Point> {
        self.offsets()
            .iter()
            .filter_map(move |&(dr, dc)| p.offset(dr, dc, height, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_way_interior() {
        let n: Vec<Point> = ConnectivityType::FourWay
            .neighbors(Point::new(1, 1), 3, 3)
            .collect();
        assert_eq!(
            n,
            vec![
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(2, 1)
            ]
        );
    }

    #[test]
    fn test_corner_is_clipped() {
        assert_eq!(
            ConnectivityType::FourWay
                .neighbors(Point::new(0, 0), 3, 3)
                .count(),
            2
        );
        assert_eq!(
            ConnectivityType::EightWay
                .neighbors(Point::new(0, 0), 3, 3)
                .count(),
            3
        );
        assert_eq!(
            ConnectivityType::EightWay
                .neighbors(Point::new(1, 1), 3, 3)
                .count(),
            8
        );
    }

    #[test]
    fn test_single_pixel_grid_has_no_neighbors() {
        assert_eq!(
            ConnectivityType::EightWay
                .neighbors(Point::new(0, 0), 1, 1)
                .count(),
            0
        );
    }
}
