//! Deterministic wall simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bricks by coordinate, balls by id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod inert;
pub mod pending;
pub mod registry;
pub mod repair;
pub mod state;
pub mod tick;
pub mod topology;
pub mod wall;

pub use collision::{Axis, Contact};
pub use grid::{Coord, Side, WallGeometry};
pub use registry::{Brick, BrickKind, BrickRegistry, PowerUpKind};
pub use repair::RepairOutcome;
pub use state::{Ball, ImpactOutcome, MatchState, WallEvent, Winner};
pub use tick::tick;
pub use topology::{Span, analyze};
pub use wall::Wall;
