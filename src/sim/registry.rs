//! Brick storage
//!
//! One brick per coordinate, kept in a `BTreeMap` so every scan walks bricks
//! in row-major order and runs are reproducible.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Coord, Side, WallGeometry};

/// Power-ups a brick can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraBall,
    RemoveBall,
    GrowPaddle,
    ShrinkPaddle,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ExtraBall,
        PowerUpKind::RemoveBall,
        PowerUpKind::GrowPaddle,
        PowerUpKind::ShrinkPaddle,
    ];
}

/// Special brick kinds. Plain bricks carry no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickKind {
    PowerUp(PowerUpKind),
    /// Marks the centre brick of a fresh ribbon
    Activation,
}

impl BrickKind {
    /// Roll a kind for a repair brick
    pub fn roll(rng: &mut impl Rng, power_up_chance: f64) -> Option<Self> {
        if power_up_chance > 0.0 && rng.random_bool(power_up_chance.min(1.0)) {
            let idx = rng.random_range(0..PowerUpKind::ALL.len());
            Some(BrickKind::PowerUp(PowerUpKind::ALL[idx]))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub coord: Coord,
    /// Top-left corner on the surface
    pub pos: Vec2,
    pub kind: Option<BrickKind>,
    /// Not on any near-to-far path. Only the topology analyzer writes this.
    pub orphan: bool,
    /// Side whose hits this brick ignores
    pub inert_from: Option<Side>,
}

impl Brick {
    pub fn new(coord: Coord, kind: Option<BrickKind>, geometry: &WallGeometry) -> Self {
        Self {
            coord,
            pos: geometry.position(coord),
            kind,
            orphan: false,
            inert_from: None,
        }
    }

    #[inline]
    pub fn is_inert_to(&self, side: Side) -> bool {
        self.inert_from == Some(side)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrickRegistry {
    bricks: BTreeMap<Coord, Brick>,
}

impl BrickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.bricks.contains_key(&coord)
    }

    pub fn get(&self, coord: Coord) -> Option<&Brick> {
        self.bricks.get(&coord)
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Brick> {
        self.bricks.get_mut(&coord)
    }

    /// Insert a brick. Occupied coordinates are left untouched; returns whether it was added.
    pub fn insert(&mut self, brick: Brick) -> bool {
        if self.bricks.contains_key(&brick.coord) {
            return false;
        }
        self.bricks.insert(brick.coord, brick);
        true
    }

    pub fn remove(&mut self, coord: Coord) -> Option<Brick> {
        self.bricks.remove(&coord)
    }

    pub fn clear(&mut self) {
        self.bricks.clear();
    }

    /// Bricks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.values_mut()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.bricks.keys().copied()
    }

    /// Re-derive every brick position from its coordinate
    pub fn refresh_positions(&mut self, geometry: &WallGeometry) {
        for brick in self.bricks.values_mut() {
            brick.pos = geometry.position(brick.coord);
        }
    }
}
