//! Ball vs brick contact search
//!
//! Bricks are axis-aligned boxes, so a contact is an overlap on both axes.
//! Only a small window of cells around the ball is inspected, found by
//! inverting the grid layout, which keeps the cost per ball constant no
//! matter how large the wall grows.

use glam::Vec2;

use super::grid::{Coord, WallGeometry};
use super::registry::BrickRegistry;

/// Axis a ball bounces along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Deepest contact found for one ball
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub coord: Coord,
    pub axis: Axis,
    /// Unit normal on `axis`, pointing from the brick toward the ball
    pub normal: Vec2,
    /// Overlap along `axis` (how far to push the ball out)
    pub penetration: f32,
    /// Overlap on both axes combined
    pub depth: f32,
}

impl Contact {
    /// Reflect the ball on the contact axis and push it clear of the brick
    pub fn apply(&self, pos: &mut Vec2, vel: &mut Vec2) {
        *vel = reflect_velocity(*vel, self.normal);
        *pos += self.normal * self.penetration;
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Find the deepest brick contact for a ball.
///
/// A brick only counts if the ball is moving into it on at least one
/// overlapping axis, so a ball already leaving a brick never re-triggers.
/// Ties go to the first brick in row-major order.
pub fn query(
    registry: &BrickRegistry,
    geometry: &WallGeometry,
    pos: Vec2,
    vel: Vec2,
    radius: f32,
) -> Option<Contact> {
    if registry.is_empty() {
        return None;
    }

    let half = geometry.half_extents();
    let reach_rows = 1 + (radius / geometry.brick_height).ceil() as i32;
    let reach_cols = 1 + (radius / geometry.brick_width).ceil() as i32;
    let est_row = geometry.row_at(pos.y);

    let mut best: Option<Contact> = None;
    for row in (est_row - reach_rows)..=(est_row + reach_rows) {
        let est_col = geometry.col_at(row, pos.x);
        for col in (est_col - reach_cols)..=(est_col + reach_cols) {
            let coord = Coord::new(row, col);
            if !registry.contains(coord) {
                continue;
            }
            let Some(contact) = contact_with(geometry, coord, half, pos, vel, radius) else {
                continue;
            };
            if best.as_ref().is_none_or(|b| contact.depth > b.depth) {
                best = Some(contact);
            }
        }
    }
    best
}

fn contact_with(
    geometry: &WallGeometry,
    coord: Coord,
    half: Vec2,
    pos: Vec2,
    vel: Vec2,
    radius: f32,
) -> Option<Contact> {
    let delta = pos - geometry.center(coord);
    let overlap = half + Vec2::splat(radius) - delta.abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }

    // Moving toward the brick centre on that axis
    let into_x = vel.x * delta.x < 0.0;
    let into_y = vel.y * delta.y < 0.0;
    let axis = match (into_x, into_y) {
        (true, true) if overlap.x < overlap.y => Axis::X,
        (true, true) => Axis::Y,
        (true, false) => Axis::X,
        (false, true) => Axis::Y,
        (false, false) => return None,
    };

    let (normal, penetration) = match axis {
        Axis::X => (Vec2::new(delta.x.signum(), 0.0), overlap.x),
        Axis::Y => (Vec2::new(0.0, delta.y.signum()), overlap.y),
    };
    Some(Contact {
        coord,
        axis,
        normal,
        penetration,
        depth: overlap.x + overlap.y,
    })
}
