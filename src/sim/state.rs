//! Match state and the value types the wall hands to the game layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Coord, Side};
use super::registry::BrickKind;
use super::wall::Wall;
use crate::config::WallConfig;
use crate::consts::*;

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Side credited with this ball's hits
    pub side: Side,
}

impl Ball {
    pub fn new(id: u32, side: Side, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: BALL_RADIUS,
            side,
        }
    }

    /// Straight-line step, bouncing off the left and right surface edges
    pub fn advance(&mut self, dt: f32, surface_width: f32) {
        self.pos += self.vel * dt;
        if self.pos.x - self.radius < 0.0 && self.vel.x < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
        } else if self.pos.x + self.radius > surface_width && self.vel.x > 0.0 {
            self.pos.x = surface_width - self.radius;
            self.vel.x = -self.vel.x;
        }
    }
}

/// What happened to a single resolved impact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpactOutcome {
    /// No brick at the coordinate (already gone)
    Missing { coord: Coord },
    /// Brick was inert to the striking side; any kind it carried was consumed
    Absorbed {
        coord: Coord,
        side: Side,
        consumed: Option<BrickKind>,
    },
    /// Brick removed, wall still intact
    Removed {
        coord: Coord,
        side: Side,
        kind: Option<BrickKind>,
    },
    /// Brick removed and the wall was grown back together
    Repaired {
        coord: Coord,
        side: Side,
        kind: Option<BrickKind>,
        added: Vec<Coord>,
    },
    /// Brick removed and no repair reconnected the wall
    Severed {
        coord: Coord,
        side: Side,
        kind: Option<BrickKind>,
        added: Vec<Coord>,
    },
}

impl ImpactOutcome {
    pub fn coord(&self) -> Coord {
        match self {
            ImpactOutcome::Missing { coord }
            | ImpactOutcome::Absorbed { coord, .. }
            | ImpactOutcome::Removed { coord, .. }
            | ImpactOutcome::Repaired { coord, .. }
            | ImpactOutcome::Severed { coord, .. } => *coord,
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            ImpactOutcome::Missing { .. } => None,
            ImpactOutcome::Absorbed { side, .. }
            | ImpactOutcome::Removed { side, .. }
            | ImpactOutcome::Repaired { side, .. }
            | ImpactOutcome::Severed { side, .. } => Some(*side),
        }
    }

    /// Kind released by this impact, whether removed or consumed
    pub fn kind(&self) -> Option<BrickKind> {
        match self {
            ImpactOutcome::Missing { .. } => None,
            ImpactOutcome::Absorbed { consumed, .. } => *consumed,
            ImpactOutcome::Removed { kind, .. }
            | ImpactOutcome::Repaired { kind, .. }
            | ImpactOutcome::Severed { kind, .. } => *kind,
        }
    }

    pub fn added(&self) -> &[Coord] {
        match self {
            ImpactOutcome::Repaired { added, .. } | ImpactOutcome::Severed { added, .. } => added,
            _ => &[],
        }
    }
}

/// Wall breach: `side` wins because `coord` reached the other side's row limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub side: Side,
    pub coord: Coord,
}

/// Things the game layer may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallEvent {
    Initialized { columns: i32, rows: i32 },
    BrickRemoved { coord: Coord, side: Side },
    ImpactAbsorbed { coord: Coord, side: Side },
    /// A brick carrying a kind was removed or had its kind consumed
    KindStruck { coord: Coord, side: Side, kind: BrickKind },
    BrickRepaired { coord: Coord, kind: Option<BrickKind> },
    /// Repair search ran out of candidates with the wall still severed
    IntegrityAnomaly { coord: Coord, added: usize },
    BrickClamped { from: Coord, to: Coord },
    BrickPruned { coord: Coord },
}

/// A running match: the wall plus the balls flying at it
#[derive(Debug, Clone)]
pub struct MatchState {
    pub wall: Wall,
    /// Active balls (sorted by id for determinism)
    pub balls: Vec<Ball>,
    pub winner: Option<Winner>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Wall events from the most recent tick
    pub events: Vec<WallEvent>,
    next_id: u32,
}

impl MatchState {
    /// Build a wall for the surface and serve one ball per side
    pub fn new(config: WallConfig, surface_width: f32, surface_height: f32) -> Self {
        let mut state = Self {
            wall: Wall::new(config, surface_width, surface_height),
            balls: Vec::new(),
            winner: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.serve(Side::Near);
        state.serve(Side::Far);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Launch a fresh ball from a side's edge toward the wall
    pub fn serve(&mut self, side: Side) {
        let geometry = self.wall.geometry();
        let x = geometry.surface_width / 2.0;
        let (y, dir) = match side {
            Side::Near => (geometry.near_row_limit as f32 * geometry.brick_height / 2.0, 1.0),
            Side::Far => {
                let limit_bottom = (geometry.far_row_limit + 1) as f32 * geometry.brick_height;
                ((limit_bottom + geometry.surface_height) / 2.0, -1.0)
            }
        };
        let vel = Vec2::new(0.6 * dir, 0.8 * dir) * BALL_SPEED;
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, side, Vec2::new(x, y), vel));
    }

    /// Surface changed size: rebuild the wall and re-serve
    pub fn resize(&mut self, surface_width: f32, surface_height: f32) {
        self.wall.initialize(surface_width, surface_height);
        self.balls.clear();
        self.winner = None;
        self.serve(Side::Near);
        self.serve(Side::Far);
    }

    pub fn balls_for(&self, side: Side) -> usize {
        self.balls.iter().filter(|b| b.side == side).count()
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_serves_both_sides() {
        let state = MatchState::new(WallConfig::default(), 480.0, 320.0);
        assert_eq!(state.balls_for(Side::Near), 1);
        assert_eq!(state.balls_for(Side::Far), 1);

        let near = state.balls.iter().find(|b| b.side == Side::Near).unwrap();
        let far = state.balls.iter().find(|b| b.side == Side::Far).unwrap();
        assert!(near.vel.y > 0.0 && far.vel.y < 0.0);
        assert!(near.pos.y < far.pos.y);
    }

    #[test]
    fn test_resize_rebuilds_wall_and_reserves() {
        let mut state = MatchState::new(WallConfig::default(), 480.0, 320.0);
        state.serve(Side::Near);
        state.resize(960.0, 320.0);

        assert_eq!(state.wall.geometry().columns, 20);
        assert_eq!(state.wall.registry().len(), 24);
        assert_eq!(state.balls.len(), 2);
        assert!(state.balls.iter().all(|b| b.pos.x == 480.0));
        assert!(state.winner.is_none());
    }

    #[test]
    fn test_ball_bounces_off_side_edges() {
        let mut ball = Ball::new(1, Side::Near, Vec2::new(3.0, 50.0), Vec2::new(-120.0, 0.0));
        ball.advance(0.1, 480.0);
        assert_eq!(ball.pos.x, ball.radius);
        assert!(ball.vel.x > 0.0);

        let mut ball = Ball::new(2, Side::Far, Vec2::new(478.0, 50.0), Vec2::new(120.0, 0.0));
        ball.advance(0.1, 480.0);
        assert_eq!(ball.pos.x, 480.0 - ball.radius);
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_outcome_accessors() {
        let coord = Coord::new(3, 4);
        let outcome = ImpactOutcome::Repaired {
            coord,
            side: Side::Far,
            kind: Some(BrickKind::Activation),
            added: vec![Coord::new(2, 4)],
        };
        assert_eq!(outcome.coord(), coord);
        assert_eq!(outcome.side(), Some(Side::Far));
        assert_eq!(outcome.kind(), Some(BrickKind::Activation));
        assert_eq!(outcome.added(), &[Coord::new(2, 4)]);

        let missing = ImpactOutcome::Missing { coord };
        assert_eq!(missing.side(), None);
        assert!(missing.added().is_empty());
    }
}
