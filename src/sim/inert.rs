//! Edge inertness
//!
//! Bricks close to a row limit ignore hits from the side that owns that
//! limit. A brick that qualifies for both sides (tiny surfaces) is inert to
//! `Near`.

use super::grid::{Side, WallGeometry};
use super::registry::BrickRegistry;

/// Side a brick on `row` ignores, if any
pub fn inert_side(row: i32, geometry: &WallGeometry, inert_row_offset: i32) -> Option<Side> {
    if row <= geometry.near_row_limit + inert_row_offset {
        Some(Side::Near)
    } else if row >= geometry.far_row_limit - inert_row_offset {
        Some(Side::Far)
    } else {
        None
    }
}

/// Recompute the inert flag on every brick
pub fn refresh_inertness(registry: &mut BrickRegistry, geometry: &WallGeometry, inert_row_offset: i32) {
    for brick in registry.iter_mut() {
        brick.inert_from = inert_side(brick.coord.row, geometry, inert_row_offset);
    }
}
