//! Staggered brick grid
//!
//! Bricks live on integer (row, column) coordinates. Odd rows are shifted
//! right by half a brick, so every cell touches six others:
//! - same row: left and right
//! - even rows: (row ± 1, col - 1) and (row ± 1, col)
//! - odd rows: (row ± 1, col) and (row ± 1, col + 1)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::WallConfig;

/// The two players. `Near` defends the top edge (low rows), `Far` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Near,
    Far,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Near => Side::Far,
            Side::Far => Side::Near,
        }
    }

    /// Row step in which repairs grow after this side strikes
    pub fn push_direction(self) -> i32 {
        match self {
            Side::Near => 1,
            Side::Far => -1,
        }
    }
}

/// Brick coordinate. Ordered row-major so iteration is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True for rows shifted by half a brick
    #[inline]
    pub fn is_offset_row(self) -> bool {
        self.row.rem_euclid(2) == 1
    }

    /// The two cells touching this one on row `row + dir` (`dir` is ±1), left first
    pub fn vertical_neighbors(self, dir: i32) -> [Coord; 2] {
        let row = self.row + dir;
        if self.is_offset_row() {
            [Coord::new(row, self.col), Coord::new(row, self.col + 1)]
        } else {
            [Coord::new(row, self.col - 1), Coord::new(row, self.col)]
        }
    }

    /// All six touching cells
    pub fn neighbors(self) -> [Coord; 6] {
        let [up_a, up_b] = self.vertical_neighbors(-1);
        let [down_a, down_b] = self.vertical_neighbors(1);
        [
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row, self.col + 1),
            up_a,
            up_b,
            down_a,
            down_b,
        ]
    }
}

/// Surface-derived layout: brick size and row limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallGeometry {
    pub surface_width: f32,
    pub surface_height: f32,
    /// Visible columns (at least one)
    pub columns: i32,
    /// Visible rows (at least one)
    pub rows: i32,
    pub brick_width: f32,
    pub brick_height: f32,
    /// Reaching this row means the wall broke into `Near`'s territory
    pub near_row_limit: i32,
    /// Reaching this row means the wall broke into `Far`'s territory
    pub far_row_limit: i32,
}

impl WallGeometry {
    /// Fit bricks to a surface. Degenerate sizes clamp to a single cell.
    pub fn new(surface_width: f32, surface_height: f32, config: &WallConfig) -> Self {
        let surface_width = surface_width.max(1.0);
        let columns = ((surface_width / config.target_brick_width).round() as i32).max(1);
        let brick_width = surface_width / columns as f32;

        let mut geometry = Self {
            surface_width,
            surface_height: 0.0,
            columns,
            rows: 1,
            brick_width,
            brick_height: config.brick_height,
            near_row_limit: 0,
            far_row_limit: 0,
        };
        geometry.set_height(surface_height, config.row_margin);
        geometry
    }

    /// Recompute row limits for a new surface height
    pub fn set_height(&mut self, surface_height: f32, row_margin: i32) {
        self.surface_height = surface_height.max(0.0);
        self.rows = ((self.surface_height / self.brick_height).floor() as i32).max(1);
        self.near_row_limit = row_margin.min(self.rows - 1);
        self.far_row_limit = (self.rows - 1 - row_margin).max(self.near_row_limit);
    }

    /// Row the starting ribbon sits on
    pub fn center_row(&self) -> i32 {
        (self.near_row_limit + self.far_row_limit) / 2
    }

    /// Horizontal shift applied to a row
    #[inline]
    pub fn row_offset(&self, row: i32) -> f32 {
        if row.rem_euclid(2) == 1 {
            self.brick_width / 2.0
        } else {
            0.0
        }
    }

    /// Top-left corner of the brick at `coord`
    pub fn position(&self, coord: Coord) -> Vec2 {
        Vec2::new(
            coord.col as f32 * self.brick_width + self.row_offset(coord.row),
            coord.row as f32 * self.brick_height,
        )
    }

    /// Center of the brick at `coord`
    pub fn center(&self, coord: Coord) -> Vec2 {
        self.position(coord) + self.half_extents()
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.brick_width, self.brick_height) * 0.5
    }

    /// Row containing a y coordinate
    pub fn row_at(&self, y: f32) -> i32 {
        (y / self.brick_height).floor() as i32
    }

    /// Column containing an x coordinate on a given row
    pub fn col_at(&self, row: i32, x: f32) -> i32 {
        ((x - self.row_offset(row)) / self.brick_width).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_neighbor_parity() {
        let even = Coord::new(4, 3);
        let n = even.neighbors();
        assert!(n.contains(&Coord::new(3, 2)));
        assert!(n.contains(&Coord::new(3, 3)));
        assert!(n.contains(&Coord::new(5, 2)));
        assert!(n.contains(&Coord::new(5, 3)));
        assert!(!n.contains(&Coord::new(5, 4)));

        let odd = Coord::new(5, 3);
        let n = odd.neighbors();
        assert!(n.contains(&Coord::new(4, 3)));
        assert!(n.contains(&Coord::new(4, 4)));
        assert!(n.contains(&Coord::new(6, 4)));
        assert!(!n.contains(&Coord::new(6, 2)));
    }

    #[test]
    fn test_negative_rows_use_same_parity_rule() {
        // -1 is an offset row just like 1
        assert!(Coord::new(-1, 0).is_offset_row());
        assert!(!Coord::new(-2, 0).is_offset_row());
        assert_eq!(
            Coord::new(-1, 0).vertical_neighbors(1),
            [Coord::new(0, 0), Coord::new(0, 1)]
        );
    }

    #[test]
    fn test_columns_tile_surface_exactly() {
        let config = WallConfig::default();
        let geometry = WallGeometry::new(1000.0, 600.0, &config);
        assert!((geometry.columns as f32 * geometry.brick_width - 1000.0).abs() < 0.001);
        assert_eq!(geometry.rows, (600.0 / config.brick_height) as i32);
        assert!(geometry.near_row_limit < geometry.far_row_limit);
    }

    #[test]
    fn test_zero_width_surface_clamps_to_one_column() {
        let geometry = WallGeometry::new(0.0, 0.0, &WallConfig::default());
        assert_eq!(geometry.columns, 1);
        assert_eq!(geometry.rows, 1);
        assert!(geometry.brick_width.is_finite() && geometry.brick_width > 0.0);
        assert_eq!(geometry.near_row_limit, 0);
        assert_eq!(geometry.far_row_limit, 0);
    }

    #[test]
    fn test_position_offsets_odd_rows() {
        let geometry = WallGeometry::new(480.0, 320.0, &WallConfig::default());
        let w = geometry.brick_width;
        let h = geometry.brick_height;
        assert_eq!(geometry.position(Coord::new(2, 3)), Vec2::new(3.0 * w, 2.0 * h));
        assert_eq!(geometry.position(Coord::new(3, 3)), Vec2::new(3.5 * w, 3.0 * h));
    }

    #[test]
    fn test_inverse_lookup() {
        let geometry = WallGeometry::new(480.0, 320.0, &WallConfig::default());
        for coord in [Coord::new(4, 2), Coord::new(5, 2), Coord::new(-1, -3)] {
            let c = geometry.center(coord);
            assert_eq!(geometry.row_at(c.y), coord.row);
            assert_eq!(geometry.col_at(coord.row, c.x), coord.col);
        }
    }

    proptest! {
        #[test]
        fn prop_adjacency_is_symmetric(row in -50i32..50, col in -50i32..50) {
            let a = Coord::new(row, col);
            for n in a.neighbors() {
                prop_assert!(n.neighbors().contains(&a), "{:?} missing from neighbors of {:?}", a, n);
            }
        }

        #[test]
        fn prop_neighbors_are_distinct(row in -50i32..50, col in -50i32..50) {
            let a = Coord::new(row, col);
            let mut n = a.neighbors().to_vec();
            n.sort();
            n.dedup();
            prop_assert_eq!(n.len(), 6);
            prop_assert!(!n.contains(&a));
        }
    }
}
